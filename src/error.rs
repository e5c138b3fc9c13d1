//! Error types for the rainmap application.
//!
//! This module defines a single error enum covering every failure the two
//! pipelines can surface. Join mismatches and empty result sets are not errors.

use thiserror::Error;

/// The main error type for rainmap operations.
#[derive(Error, Debug)]
pub enum RainmapError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from an input table
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid coordinate errors
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Map rendering errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with RainmapError
pub type Result<T> = std::result::Result<T, RainmapError>;
