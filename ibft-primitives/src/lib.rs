//! # IBFT Primitives
//!
//! Fixed-size primitive types shared by the IBFT message core.
//!
//! - `UInt256`: 256-bit unsigned integer with a canonical 32-byte
//!   little-endian encoding
//! - `hash`: SSZ-style hash-tree roots (SHA-256) used for value and message
//!   identity
//!
//! ## Design Principles
//!
//! - **Zero dependencies on other ibft-* crates**
//! - **Deterministic**: encode/decode are exact inverses and roots are
//!   reproducible across runs
//!
//! ## Example
//!
//! ```rust
//! use ibft_primitives::{HashTreeRoot, UInt256};
//!
//! let value = UInt256::from_hex("01").unwrap();
//! let encoded = value.encode();
//! assert_eq!(encoded[0], 0x01);
//! assert!(encoded[1..].iter().all(|b| *b == 0));
//!
//! assert_eq!(UInt256::decode(&encoded).unwrap(), value);
//! assert_eq!(value.hash_tree_root().encode(), encoded);
//! ```

pub mod error;
pub mod hash;
pub mod uint256;

#[cfg(test)]
mod tests;

// Re-exports
pub use error::{PrimitiveError, PrimitiveResult};
pub use hash::{merkleize, mix_in_length, pack, sha256, Chunk, Hash, HashTreeRoot};
pub use uint256::{UInt256, UINT256_SIZE};
