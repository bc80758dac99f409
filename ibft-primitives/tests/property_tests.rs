//! Property-based tests for ibft-primitives
//!
//! These tests use proptest to verify:
//! - Encode/decode round trips for every 256-bit value
//! - Big-endian construction matches the little-endian encoding
//! - Hash-tree roots are deterministic

use ibft_primitives::{merkleize, pack, HashTreeRoot, UInt256};
use proptest::prelude::*;

proptest! {
    /// Encoding then decoding reproduces the value bit-for-bit
    #[test]
    fn test_encode_decode_round_trip(bytes in any::<[u8; 32]>()) {
        let value = UInt256::from_le_bytes(bytes);
        let encoded = value.encode();
        prop_assert_eq!(encoded, bytes);
        prop_assert_eq!(UInt256::decode(&encoded).unwrap(), value);
    }

    /// Short big-endian input is zero-extended on the high end
    #[test]
    fn test_be_slice_zero_extends(bytes in proptest::collection::vec(any::<u8>(), 0..=32)) {
        let value = UInt256::from_be_slice(&bytes).unwrap();
        let encoded = value.encode();

        let mut expected = bytes.clone();
        expected.reverse();
        expected.resize(32, 0);
        prop_assert_eq!(encoded.to_vec(), expected);
    }

    /// Hex formatting and parsing are inverses
    #[test]
    fn test_hex_round_trip(bytes in any::<[u8; 32]>()) {
        let value = UInt256::from_le_bytes(bytes);
        prop_assert_eq!(UInt256::from_hex(&value.to_hex_string()).unwrap(), value);
    }

    /// Roots are deterministic for arbitrary byte strings
    #[test]
    fn test_byte_root_consistency(data in any::<Vec<u8>>()) {
        let first = data.hash_tree_root();
        let second = data.clone().hash_tree_root();
        prop_assert_eq!(first, second);
    }

    /// Merkleizing the packed chunks is stable
    #[test]
    fn test_merkleize_consistency(data in any::<Vec<u8>>()) {
        let chunks = pack(&data);
        prop_assert_eq!(merkleize(&chunks), merkleize(&chunks));
    }
}
