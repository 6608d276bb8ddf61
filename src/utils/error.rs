// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Errors raised while turning the input document into plain text
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Statement document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported statement format '{extension}' for {} (expected .pdf or .txt)", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("PDF converter '{0}' is not installed or not on PATH")]
    ConverterUnavailable(String),

    #[error("PDF conversion failed with {status}: {stderr}")]
    ConversionFailed { status: std::process::ExitStatus, stderr: String },

    #[error("Converted text is not valid UTF-8: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    // Patterns only capture digit runs, so this means overflow or a rule bug
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Loading statement failed: {0}")]
    Document(#[from] DocumentError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
