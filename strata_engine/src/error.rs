//! Error types for the Strata engine
//!
//! This module defines the error types used throughout the engine,
//! covering configuration, initialization, and drawable rendering.

use std::fmt;

/// Result type for Strata engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Strata engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid configuration (chunk size, projector setup, etc.)
    InvalidConfig(String),

    /// Initialization failed (engine, subsystems)
    InitializationFailed(String),

    /// A drawable failed to render itself
    RenderFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::RenderFailed(msg) => write!(f, "Render failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
