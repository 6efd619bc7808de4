//! # Error Types Module
//!
//! Error types for the configuration and input surfaces of the crate.
//! The extraction engine itself has no error path: anything it cannot read
//! simply comes back as an absent field.

/// Custom error types for configuration and batch input
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Invalid extraction configuration
    Config(String),
    /// Unusable input (e.g. an empty observation file)
    Input(String),
    /// File system errors while reading observations
    Io(String),
}

/// Result alias used by configuration and batch helpers
pub type AppResult<T> = Result<T, AppError>;

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {msg}"),
            AppError::Input(msg) => write!(f, "Input error: {msg}"),
            AppError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
