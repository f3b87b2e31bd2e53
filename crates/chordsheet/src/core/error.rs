//! Core error types for chord sheet processing
//!
//! This module defines the error conditions raised across the pipeline:
//! construction-time validation, render-time structural failures, registry
//! lookups and import problems. Malformed chord data reaching a renderer is
//! deliberately not an error; renderers recover from it.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ChordsheetError>;

/// Core error types for chord sheet processing
#[derive(Error, Debug)]
pub enum ChordsheetError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("cannot render in dialect {format}: {reason}")]
    CannotRender { format: String, reason: String },

    #[error("unknown line type: {line_type}")]
    UnknownLineType { line_type: String },

    #[error("no renderer available for format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Import error: {message}")]
    Import { message: String },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl ChordsheetError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new "cannot render" error for a dialect
    pub fn cannot_render(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CannotRender {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a new import error
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }
}
