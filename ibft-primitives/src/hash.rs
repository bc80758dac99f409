//! Merkle-style hash-tree roots over 32-byte chunks.
//!
//! Follows the SSZ merkleization scheme with SHA-256 as the node hash:
//!
//! - values are packed into 32-byte chunks (zero-padded),
//! - the chunk list is padded with zero chunks to a power of two,
//! - pairs are hashed bottom-up until one chunk remains,
//! - variable-length values mix their length into the root.
//!
//! A single chunk is its own root, so the root of a [`UInt256`] equals its
//! canonical encoding.

use crate::uint256::{UInt256, UINT256_SIZE};
use sha2::{Digest, Sha256};

/// A 32-byte chunk of merkleization input.
pub type Chunk = [u8; UINT256_SIZE];

/// 32-byte digest used for message and value identity.
pub type Hash = UInt256;

/// Types with a deterministic hash-tree root.
pub trait HashTreeRoot {
    /// Computes the hash-tree root.
    fn hash_tree_root(&self) -> Hash;
}

impl HashTreeRoot for UInt256 {
    fn hash_tree_root(&self) -> Hash {
        merkleize(&[self.encode()])
    }
}

impl HashTreeRoot for u64 {
    fn hash_tree_root(&self) -> Hash {
        UInt256::from_u64(*self).hash_tree_root()
    }
}

impl HashTreeRoot for [u8] {
    fn hash_tree_root(&self) -> Hash {
        mix_in_length(merkleize(&pack(self)), self.len())
    }
}

impl HashTreeRoot for Vec<u8> {
    fn hash_tree_root(&self) -> Hash {
        self.as_slice().hash_tree_root()
    }
}

/// Computes SHA-256 of `data`.
#[must_use]
pub fn sha256(data: &[u8]) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn hash_pair(left: &Chunk, right: &Chunk) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Splits `bytes` into 32-byte chunks, zero-padding the last one.
#[must_use]
pub fn pack(bytes: &[u8]) -> Vec<Chunk> {
    bytes
        .chunks(UINT256_SIZE)
        .map(|part| {
            let mut chunk = [0u8; UINT256_SIZE];
            chunk[..part.len()].copy_from_slice(part);
            chunk
        })
        .collect()
}

/// Merkleizes `chunks` into a single root. An empty list yields the zero
/// chunk.
#[must_use]
pub fn merkleize(chunks: &[Chunk]) -> Hash {
    if chunks.is_empty() {
        return Hash::zero();
    }

    let width = chunks.len().next_power_of_two();
    let mut layer: Vec<Chunk> = Vec::with_capacity(width);
    layer.extend_from_slice(chunks);
    layer.resize(width, [0u8; UINT256_SIZE]);

    while layer.len() > 1 {
        layer = layer
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }

    Hash::from_le_bytes(layer[0])
}

/// Mixes a list length into `root`, as done for variable-length values.
#[must_use]
pub fn mix_in_length(root: Hash, length: usize) -> Hash {
    let length = UInt256::from_u64(length as u64);
    Hash::from_le_bytes(hash_pair(&root.encode(), &length.encode()))
}
