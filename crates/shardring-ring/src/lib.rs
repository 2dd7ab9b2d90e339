//! Shardring Ring - consistent-hashing key-to-node assignment
//!
//! This crate implements the hash ring: nodes and keys are digested
//! onto one ordered space, and a key is owned by the first node at or
//! clockwise of the key's position, wrapping past the largest position
//! back to the smallest. Adding or removing a node remaps only the keys
//! on the arc adjacent to it.
//!
//! [`Ring`] is the single-threaded structure; [`SharedRing`] wraps it
//! in a cloneable read/write-locked handle for concurrent callers.
//!
//! # Example
//! ```
//! use shardring_ring::Ring;
//!
//! let mut ring = Ring::new();
//! ring.add_node("node1");
//! ring.add_node("node2");
//!
//! let owner = ring.node_for_key("user:42")?;
//! assert!(ring.nodes().contains(owner));
//! # Ok::<(), shardring_common::Error>(())
//! ```

pub mod ring;
pub mod shared;

pub use ring::Ring;
pub use shared::SharedRing;
