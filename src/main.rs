//! Lightworld - Entry Point
//!
//! Controls:
//! - Arrows / WASD: Move
//! - X: Sword
//! - Z / Space: Use (open, read, lift, throw)
//! - C: Use equipped item
//! - Enter: Inventory
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin as KiraAudioPlugin;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins; kira replaces the built-in audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Lightworld".to_string(),
                        resolution: (768.0, 672.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest())
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Top-down physics, no gravity
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(16.0))
        .add_systems(Startup, disable_gravity)

        .add_plugins(KiraAudioPlugin)

        // Our game plugin
        .add_plugins(lightworld::LightworldPlugin)

        .run();
}

fn disable_gravity(mut configs: Query<&mut RapierConfiguration>) {
    for mut config in configs.iter_mut() {
        config.gravity = Vec2::ZERO;
    }
}
