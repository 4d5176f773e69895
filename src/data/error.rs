//! Error types for data file loading.

use thiserror::Error;

/// Errors that can occur when loading config, item or zone data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Two inventory items claim the same name.
    #[error("Duplicate item descriptor '{0}'")]
    DuplicateItem(String),

    /// A descriptor links to an item that does not exist.
    #[error("Item '{item}' links to unknown item '{linked}'")]
    UnknownLinkedItem { item: String, linked: String },
}
