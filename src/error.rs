//! Error types for textframe.

use std::collections::TryReserveError;
use std::fmt;
use std::io;

/// Result type alias for textframe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for textframe operations.
///
/// Out-of-range offsets are never errors: every offset the widget accepts is
/// clamped. Errors are reserved for conditions the host has to see.
#[derive(Debug)]
pub enum Error {
    /// I/O error reported by a presentation surface.
    Io(io::Error),
    /// The document store could not grow to hold an insert.
    Capacity {
        requested: usize,
        source: TryReserveError,
    },
    /// A surface rejected a blit.
    Surface(String),
    /// A blit worker panicked while copying a rectangle.
    WorkerPanicked(String),
    /// The blit pool has shut down.
    Disconnected,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Capacity { requested, .. } => {
                write!(f, "cannot grow document store to {requested} bytes")
            }
            Self::Surface(msg) => write!(f, "blit failed: {msg}"),
            Self::WorkerPanicked(msg) => write!(f, "blit worker panicked: {msg}"),
            Self::Disconnected => write!(f, "blit pool disconnected"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Capacity { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let mut v: Vec<u8> = Vec::new();
        let source = v.try_reserve_exact(usize::MAX).unwrap_err();
        let err = Error::Capacity {
            requested: 4096,
            source,
        };
        assert!(err.to_string().contains("4096"));

        let err = Error::Surface("window closed".to_string());
        assert!(err.to_string().contains("window closed"));

        let err = Error::WorkerPanicked("boom".to_string());
        assert!(err.to_string().contains("boom"));

        assert_eq!(Error::Disconnected.to_string(), "blit pool disconnected");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_capacity_keeps_reserve_failure_as_source() {
        let mut v: Vec<u8> = Vec::new();
        let source = v.try_reserve_exact(usize::MAX).unwrap_err();
        let err = Error::Capacity {
            requested: usize::MAX,
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&Error::Disconnected).is_none());
    }
}
