//! Error types for session, script, and call failures

use thiserror::Error;

/// Errors surfaced by the embedding layer.
///
/// Decode mismatches are not errors: the codec follows the interpreter's
/// permissive conversion rules and degrades silently (see `stack`).
/// Requesting an unsupported host type is a compile-time failure, so it
/// has no variant here.
#[derive(Error, Debug)]
pub enum Error {
    /// The interpreter state could not be allocated.
    #[error("failed to create interpreter session")]
    SessionCreation,

    /// The interpreter reported a load or protected-call failure.
    ///
    /// Carries the error text popped from the interpreter stack. The
    /// session remains valid for further calls.
    #[error("script error: {message}")]
    Script { message: String },

    /// A global, function, or chunk name contained an interior NUL byte
    /// and cannot cross the C boundary.
    #[error("invalid name: {0}")]
    InvalidName(#[from] std::ffi::NulError),
}

/// Result type for embedding operations.
pub type Result<T> = std::result::Result<T, Error>;
