use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

/// Error types for the clockface crate.
///
/// Only the outer surface (configuration files and the command line) can fail.
/// Widget operations are total and never return these.
#[derive(Error, Debug)]
pub enum ClockError {
    /// A configuration value was rejected
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig {
        /// The offending field
        field: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Import operation error with file context
    #[error("failed to import '{path}': {details}")]
    ImportError {
        /// Path of file being imported
        path: PathBuf,
        /// Import error details
        details: String,
    },

    /// Output could not be serialized
    #[error("failed to serialize {content_type}: {details}")]
    Serialization {
        /// What was being serialized
        content_type: String,
        /// Serializer error details
        details: String,
    },
}

/// A specialized `Result` type for clockface operations.
pub type Result<T> = result::Result<T, ClockError>;

impl ClockError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ClockError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an import error with file path context.
    pub fn import(error: impl fmt::Display, path: &Path) -> Self {
        let clean_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        ClockError::ImportError {
            path: clean_path,
            details: error.to_string(),
        }
    }

    /// Creates a serialization error for the named content.
    pub fn serialization(content_type: &str, error: impl fmt::Display) -> Self {
        ClockError::Serialization {
            content_type: content_type.to_string(),
            details: error.to_string(),
        }
    }
}
