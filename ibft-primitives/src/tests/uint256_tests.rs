// Fixed-size encoding vectors for UInt256.
use crate::{HashTreeRoot, UInt256};

#[cfg(test)]
mod tests {
    use super::*;

    struct Case {
        val: String,
        exp: String,
    }

    /// Every single-bit value: `val` is big-endian hex, `exp` the expected
    /// 32-byte little-endian encoding.
    fn single_bit_cases() -> Vec<Case> {
        let mut cases = vec![Case {
            val: String::new(),
            exp: "00".repeat(32),
        }];

        for byte_index in 0..32 {
            for bit in 0..8 {
                let top = format!("{:02x}", 1u8 << bit);
                let val = format!("{top}{}", "00".repeat(byte_index));
                let exp = format!(
                    "{}{top}{}",
                    "00".repeat(byte_index),
                    "00".repeat(31 - byte_index)
                );
                cases.push(Case { val, exp });
            }
        }
        cases
    }

    #[test]
    fn test_encoding_vectors() {
        for case in single_bit_cases() {
            let value = UInt256::from_hex(&case.val).unwrap();
            let encoded = value.encode();
            assert_eq!(encoded.len(), 32);
            assert_eq!(hex::encode(encoded), case.exp, "input {:?}", case.val);

            let decoded = UInt256::decode(&encoded).unwrap();
            assert_eq!(decoded, value);

            let root = value.hash_tree_root();
            assert_eq!(hex::encode(root.encode()), case.exp);
        }
    }

    #[test]
    fn test_one_encodes_low_byte_first() {
        let value = UInt256::from_hex("01").unwrap();
        let mut expected = [0u8; 32];
        expected[0] = 0x01;
        assert_eq!(value.encode(), expected);
    }

    #[test]
    fn test_empty_input_encodes_as_zero() {
        let value = UInt256::from_hex("").unwrap();
        assert_eq!(value.encode(), [0u8; 32]);
        assert!(value.is_zero());
    }

    #[test]
    fn test_hash_is_reproducible() {
        let value = UInt256::from_hex("0x8000").unwrap();
        assert_eq!(value.hash_tree_root(), value.hash_tree_root());

        let bytes = value.encode().to_vec();
        assert_eq!(bytes.hash_tree_root(), bytes.hash_tree_root());
    }

    #[test]
    fn test_max_value_round_trip() {
        let max = UInt256::from_hex(&"ff".repeat(32)).unwrap();
        assert_eq!(max.encode(), [0xffu8; 32]);
        assert_eq!(UInt256::decode(&max.encode()).unwrap(), max);
    }

    #[test]
    fn test_too_many_digits_rejected() {
        assert!(UInt256::from_hex(&"01".repeat(33)).is_err());
    }
}
