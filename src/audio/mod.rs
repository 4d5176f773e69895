//! Sound effect playback.
//!
//! Gameplay code sends `PlaySfxEvent`s and never touches audio directly.

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::core::{PlaySfxEvent, Sfx};

/// Volume applied to every effect.
#[derive(Resource, Debug, Clone, Copy)]
pub struct EffectVolume(pub f64);

impl Default for EffectVolume {
    fn default() -> Self {
        Self(0.8)
    }
}

/// Plays sound effects through kira.
pub struct AudioFxPlugin;

impl Plugin for AudioFxPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EffectVolume>()
            .add_systems(Update, play_sfx);
    }
}

/// Asset path for each effect.
pub fn sfx_path(sfx: Sfx) -> &'static str {
    match sfx {
        Sfx::Lift => "audio/effects/lift.ogg",
        Sfx::Throw => "audio/effects/throw.ogg",
        Sfx::ChestOpen => "audio/effects/chest_open.ogg",
        Sfx::ItemFanfare => "audio/effects/item_fanfaire.ogg",
        Sfx::Error => "audio/effects/error.ogg",
        Sfx::Pause => "audio/effects/pause_close.ogg",
        Sfx::Smash => "audio/effects/grass_cut.ogg",
        Sfx::Pickup => "audio/effects/rupee1.ogg",
        Sfx::Sword => "audio/effects/sword1.ogg",
    }
}

fn play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
    volume: Res<EffectVolume>,
) {
    for PlaySfxEvent(sfx) in events.read() {
        audio
            .play(asset_server.load(sfx_path(*sfx)))
            .with_volume(volume.0);
    }
}
