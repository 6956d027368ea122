//! Unified error type.

use std::fmt;

/// The error type returned by wicket's fallible operations.
///
/// This type covers infrastructure failures only: binding the listen socket
/// or accepting a connection. Application-level failures never surface here —
/// handler errors are absorbed by the instrumentation middleware and turned
/// into HTTP [`Response`](crate::Response)s.
#[derive(Debug)]
pub struct Error(std::io::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "io: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(e)
    }
}
