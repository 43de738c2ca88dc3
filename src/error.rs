//! Error types

use thiserror::Error;

/// Errors from setting up or configuring the landing subsystems.
#[derive(Debug, Error)]
pub enum LandingError {
    /// The host could not provide a 2D drawing context.
    #[error("2d drawing surface unavailable")]
    SurfaceUnavailable,

    /// Width or height was zero when creating a field.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The particle palette could not be used.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("settings parse error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Submissions rejected before any answer checking happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("too many failed attempts")]
    Locked,

    #[error("a verification is already in progress")]
    Busy,

    #[error("already verified")]
    AlreadyVerified,

    #[error("answer is empty")]
    EmptyAnswer,
}
