//! Error types for snnkit

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for snnkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the conversion utilities
///
/// Numeric edge cases (NaN input, `h = 0` binarization, empty samples) are
/// not errors; they produce NaN, signed zeros or a `0.0` sentinel instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad enum value, bad range or bad integer constraint
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Layer label that cannot be parsed
    #[error("Invalid layer label '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    /// Input buffers with incompatible shapes
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },

    /// Value kind that has no JSON representation
    #[error("{type_name} not JSON serializable")]
    NotSerializable { type_name: String },

    /// Serialization backend failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration file missing, malformed or invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Helper library path does not resolve to a file
    #[error("Helper library not found: {}", path.display())]
    HelperNotFound { path: PathBuf },

    /// Dynamic loader rejected the helper library
    #[error("Failed to load helper library {}: {message}", path.display())]
    HelperLoad { path: PathBuf, message: String },

    /// Helper library lacks a symbol the contract requires
    #[error("Helper library {} does not export required symbol '{symbol}'", path.display())]
    MissingSymbol { symbol: String, path: PathBuf },

    /// Helper library was built against a different helper ABI
    #[error("Helper ABI mismatch: expected version {expected}, found {found}")]
    HelperAbiMismatch { expected: u32, found: u32 },

    /// Underlying IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
