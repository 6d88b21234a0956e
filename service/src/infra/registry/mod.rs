//! [`Registry`]-related implementations.

pub mod memory;

use derive_more::{Display, Error as StdError};

pub use self::memory::InMemory;

/// Lookup of the entities owned outside of this service, injected into it.
pub use common::Handler as Registry;

/// [`Registry`] error.
#[derive(Debug, Display, StdError)]
#[display("{_0}")]
pub struct Error(
    #[error(not(source))] Box<dyn std::error::Error + Send + Sync>,
);

impl Error {
    /// Creates a new [`Error`] out of the provided underlying one.
    #[must_use]
    pub fn new(
        err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod spec {
    use super::Error;

    #[test]
    fn displays_underlying_error() {
        assert_eq!(
            Error::new("connection reset").to_string(),
            "connection reset",
        );
    }
}
