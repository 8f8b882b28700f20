//! # Error Types
//!
//! This module defines error types used throughout the kokun library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for kokun operations
#[derive(Debug, Error)]
pub enum KokunError {
    /// Font resource does not exist
    #[error("Font not found: {}", path.display())]
    FontNotFound { path: PathBuf },

    /// Font bytes could not be parsed
    #[error("Font parse error ({}): {message}", path.display())]
    FontParse { path: PathBuf, message: String },

    /// Image file could not be decoded
    #[error("Image decode error ({}): {message}", path.display())]
    ImageDecode { path: PathBuf, message: String },

    /// Canvas could not be encoded
    #[error("Image encode error: {0}")]
    ImageEncode(String),

    /// Malformed style or CLI configuration
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KokunError>;
