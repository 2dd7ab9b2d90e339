//! Ring position digest
//!
//! Nodes and keys are placed on the ring by a single shared hashing
//! primitive: the SHA-1 digest of their UTF-8 identifier. Because both
//! sides go through the same function, node positions and key positions
//! live in one ordered space.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;

/// A position on the hash ring: the SHA-1 digest of a node identifier
/// or key.
///
/// Positions are compared by raw digest byte order. For a fixed-width
/// digest this is identical to lexicographic comparison of the
/// lowercase-hex rendering, so the ring's angular ordering matches
/// string comparison of the printed form. All ring operations use this
/// comparator and no other.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RingPosition([u8; 20]);

impl RingPosition {
    /// Hash an identifier or key onto the ring.
    ///
    /// Deterministic: the same input always lands on the same position,
    /// across calls and across process runs.
    #[must_use]
    pub fn of(input: &str) -> Self {
        Self(Sha1::digest(input.as_bytes()).into())
    }

    /// Create from an existing digest
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw digest bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render as lowercase hex
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for RingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for RingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RingPosition({})", self.to_hex())
    }
}
