//! Shardring Common - Shared types and utilities
//!
//! This crate provides the ring position digest, node identifier type,
//! and error definitions used across all Shardring components.

pub mod digest;
pub mod error;
pub mod types;

pub use digest::RingPosition;
pub use error::{Error, Result};
pub use types::NodeId;
