//! Error types for the HVR render core
//!
//! Most conditions inside the core self-heal (invalid handles and device
//! changes trigger recreation, redundant attach/detach/release are no-ops).
//! The variants below cover what is surfaced to the caller: host allocation
//! failures, failed native initialization and bad construction parameters.

use std::fmt;

/// Result type for HVR render core operations
pub type Result<T> = std::result::Result<T, Error>;

/// HVR render core errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Native renderer or host backend reported a failure
    BackendError(String),

    /// Out of GPU memory while allocating a surface
    OutOfMemory,

    /// Invalid resource (destroyed frame buffer, dead handle, ...)
    InvalidResource(String),

    /// Initialization failed (native player, scene, function table)
    InitializationFailed(String),

    /// Invalid construction or call parameter
    InvalidParameter(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an [`Error`] and log it through the engine logger
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("hvr::FrameBuffer", InvalidResource, "frame buffer {} destroyed", id);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::hvr::Error::$variant(message)
    }};
}

/// Log an error and return it from the enclosing function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
