//! Data file loading - RON parsing and load errors shared by every plugin
//! that reads `assets/data/`.

mod error;

pub use error::DataLoadError;

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::de::DeserializeOwned;

/// Root directory for all data files.
pub const DATA_ROOT: &str = "assets/data";

/// Read and parse a RON file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataLoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    parse_ron(&display, &contents)
}

/// Parse RON text, tagging errors with `source` for the log.
pub fn parse_ron<T: DeserializeOwned>(source: &str, contents: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: source.to_string(),
        details: e.to_string(),
    })
}

/// Load a RON file, logging and falling back to `T::default()` on failure.
pub fn load_ron_or_default<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> T {
    let path = path.as_ref();
    match load_ron(path) {
        Ok(value) => {
            info!("Loaded {}", path.display());
            value
        }
        Err(DataLoadError::FileNotFound(p)) => {
            warn!("Could not find {}. Using defaults.", p);
            T::default()
        }
        Err(e) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        speed: f32,
        #[serde(default)]
        name: String,
    }

    #[test]
    fn test_parse_ron_reads_struct() {
        let sample: Sample = parse_ron("inline", "(speed: 2.5)").unwrap();
        assert_eq!(sample.speed, 2.5);
        assert_eq!(sample.name, "");
    }

    #[test]
    fn test_parse_error_names_source() {
        let err = parse_ron::<Sample>("broken.ron", "(speed: )").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { ref path, .. } if path == "broken.ron"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_ron::<Sample>("assets/data/does_not_exist.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let sample: Sample = load_ron_or_default("assets/data/does_not_exist.ron");
        assert_eq!(sample, Sample::default());
    }
}
