//! Error types for Shardring
//!
//! This module defines the common error types used throughout the system.

use thiserror::Error;

/// Common result type for Shardring operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for Shardring
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A key was resolved against a ring with no members. Membership
    /// mutations never fail; this is the single distinguished error.
    #[error("no nodes available in the ring")]
    EmptyRing,
}

impl Error {
    /// Check if this error means the ring had no members
    #[must_use]
    pub const fn is_empty_ring(&self) -> bool {
        matches!(self, Self::EmptyRing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring_message() {
        assert_eq!(
            Error::EmptyRing.to_string(),
            "no nodes available in the ring"
        );
    }

    #[test]
    fn test_is_empty_ring() {
        assert!(Error::EmptyRing.is_empty_ring());
    }
}
