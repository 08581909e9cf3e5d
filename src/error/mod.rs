//! Error handling for arena-backed hashing

use std::borrow::Cow;
use std::fmt;

/// The error type for arena-backed hash operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The compression engine failed its one-time readiness check
    EngineNotReady {
        /// Details reported by the readiness check
        details: &'static str,
    },

    /// Operation on an instance whose digest has already been taken
    AlreadyFinalized {
        /// Operation that was attempted
        context: &'static str,
    },

    /// Input could not be interpreted as bytes under the requested encoding
    InvalidInput {
        /// Name of the offending input
        name: Cow<'static, str>,
        /// Reason why the input was rejected
        reason: Cow<'static, str>,
    },

    /// Caller-supplied output buffer cannot hold the digest
    BufferTooSmall {
        /// Context where the buffer was checked
        context: &'static str,
        /// Bytes required at the requested offset
        needed: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// Arena growth failed; unrecoverable within the process
    OutOfMemory {
        /// Capacity in bytes the arena attempted to reserve
        requested: usize,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
}

impl Error {
    /// Shorthand to create an InvalidInput error
    pub fn input<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::InvalidInput {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for arena-backed hash operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EngineNotReady { details } => {
                write!(f, "Compression engine not ready: {}", details)
            }
            Error::AlreadyFinalized { context } => {
                write!(f, "{}: hash instance already finalized", context)
            }
            Error::InvalidInput { name, reason } => {
                write!(f, "Invalid input '{}': {}", name, reason)
            }
            Error::BufferTooSmall {
                context,
                needed,
                actual,
            } => {
                write!(
                    f,
                    "{}: output buffer too small (need {}, have {})",
                    context, needed, actual
                )
            }
            Error::OutOfMemory { requested } => {
                write!(f, "Arena growth to {} bytes failed", requested)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for Error {}

// Include the validation submodule
pub mod validate;
