//! Structured error types for configuration loading.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No config file within the ascent bound.
    NotFound,
    IoFailure,
    DeserializationFailure,
    /// The config could not be encoded as JSON.
    SerializationFailure,
    InvalidConfiguration,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::IoFailure => "IO_FAILURE",
            ErrorCode::DeserializationFailure => "DESERIALIZATION_FAILURE",
            ErrorCode::SerializationFailure => "SERIALIZATION_FAILURE",
            ErrorCode::InvalidConfiguration => "INVALID_CONFIGURATION",
        }
    }
}

/// Errors raised while reading, parsing or writing `magma.json`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Read or write failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text is not valid JSON or does not match the schema.
    #[error("{message}")]
    Deserialize { path: PathBuf, message: String },

    /// The config could not be encoded as JSON on save.
    #[error("Failed to serialize magma.json: {message}")]
    Serialize { path: PathBuf, message: String },

    /// Text parsed to a JSON `null` document.
    #[error("Failed to deserialize magma.json")]
    EmptyDocument { path: PathBuf },

    /// Wrapper used by the fail-fast `load` entry point.
    #[error("{message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn deserialize(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Deserialize {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn serialize(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Serialize {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Wrap any failure into `Invalid`, keeping the best available message.
    pub fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Invalid {
                message: "Invalid magma.json".to_string(),
            }
        } else {
            Self::Invalid { message }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Io { .. } => ErrorCode::IoFailure,
            ConfigError::Deserialize { .. } | ConfigError::EmptyDocument { .. } => {
                ErrorCode::DeserializationFailure
            }
            ConfigError::Serialize { .. } => ErrorCode::SerializationFailure,
            ConfigError::Invalid { .. } => ErrorCode::InvalidConfiguration,
        }
    }

    /// Path of the file involved, when known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConfigError::Io { path, .. }
            | ConfigError::Deserialize { path, .. }
            | ConfigError::Serialize { path, .. }
            | ConfigError::EmptyDocument { path } => Some(path),
            ConfigError::Invalid { .. } => None,
        }
    }
}

/// Serializable view of an error, for machine-readable CLI output.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn not_found(start_dir: &std::path::Path) -> Self {
        Self::new(
            ErrorCode::NotFound,
            format!("No magma.json found from {}", start_dir.display()),
        )
    }
}

impl From<&ConfigError> for ErrorReport {
    fn from(err: &ConfigError) -> Self {
        let report = Self::new(err.code(), err.to_string());
        match err.path() {
            Some(path) => report.with_path(path.to_string_lossy()),
            None => report,
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
