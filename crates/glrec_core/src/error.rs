//! Core error types

use thiserror::Error;

/// Errors raised by a graphics context (real or recording).
///
/// A recording context never produces these on its own behalf except for
/// [`ContextError::NoSuchMethod`]; everything else is the wrapped context's
/// failure, passed through unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContextError {
    /// The context has no method with this name
    #[error("No such method on graphics context: {0}")]
    NoSuchMethod(String),

    /// The context rejected the arguments of a call
    #[error("Invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },

    /// The underlying context was lost
    #[error("Graphics context lost")]
    ContextLost,

    /// Generic context error
    #[error("Graphics context error: {0}")]
    Other(String),
}

/// Result type for context operations
pub type Result<T> = std::result::Result<T, ContextError>;

/// Frame counter errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The process-wide frame counter is already ticking
    #[error("Global frame counter already started")]
    AlreadyStarted,
}
