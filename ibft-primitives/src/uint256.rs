//! Implementation of `UInt256`, a 256-bit unsigned integer with a fixed
//! 32-byte little-endian encoding.

use crate::error::{PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The length of encoded `UInt256` values in bytes.
pub const UINT256_SIZE: usize = 32;

/// Represents a 256-bit unsigned integer.
///
/// Stored as four little-endian 64-bit limbs so the canonical encoding is a
/// straight concatenation of `to_le_bytes` of each limb.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct UInt256 {
    /// Bits 0..64 (least significant).
    pub value1: u64,
    /// Bits 64..128.
    pub value2: u64,
    /// Bits 128..192.
    pub value3: u64,
    /// Bits 192..256 (most significant).
    pub value4: u64,
}

impl UInt256 {
    /// Encoded length in bytes.
    pub const LENGTH: usize = UINT256_SIZE;

    /// The zero value.
    pub const ZERO: Self = Self {
        value1: 0,
        value2: 0,
        value3: 0,
        value4: 0,
    };

    /// Creates a new zero `UInt256`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a zero `UInt256`.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Checks if this value is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.value1 == 0 && self.value2 == 0 && self.value3 == 0 && self.value4 == 0
    }

    /// Creates a `UInt256` holding a 64-bit value.
    #[inline]
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self {
            value1: value,
            value2: 0,
            value3: 0,
            value4: 0,
        }
    }

    /// Builds a value from its 32-byte little-endian form.
    #[must_use]
    pub fn from_le_bytes(bytes: [u8; UINT256_SIZE]) -> Self {
        let limb = |offset: usize| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[offset..offset + 8]);
            u64::from_le_bytes(buf)
        };

        Self {
            value1: limb(0),
            value2: limb(8),
            value3: limb(16),
            value4: limb(24),
        }
    }

    /// Returns the 32-byte little-endian form.
    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; UINT256_SIZE] {
        let mut result = [0u8; UINT256_SIZE];
        result[0..8].copy_from_slice(&self.value1.to_le_bytes());
        result[8..16].copy_from_slice(&self.value2.to_le_bytes());
        result[16..24].copy_from_slice(&self.value3.to_le_bytes());
        result[24..32].copy_from_slice(&self.value4.to_le_bytes());
        result
    }

    /// Returns the 32-byte big-endian form.
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; UINT256_SIZE] {
        let mut bytes = self.to_le_bytes();
        bytes.reverse();
        bytes
    }

    /// Canonical fixed-size encoding: 32 bytes, little-endian, zero-padded
    /// on the high end.
    #[inline]
    #[must_use]
    pub fn encode(&self) -> [u8; UINT256_SIZE] {
        self.to_le_bytes()
    }

    /// Decodes the canonical encoding produced by [`UInt256::encode`].
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidLength` unless the input is exactly 32 bytes.
    pub fn decode(bytes: &[u8]) -> PrimitiveResult<Self> {
        let array: [u8; UINT256_SIZE] =
            bytes
                .try_into()
                .map_err(|_| PrimitiveError::InvalidLength {
                    expected: UINT256_SIZE,
                    got: bytes.len(),
                })?;
        Ok(Self::from_le_bytes(array))
    }

    /// Builds a value from up to 32 big-endian bytes. Shorter input is
    /// zero-extended on the high end; empty input is zero.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidLength` if the input exceeds 32 bytes.
    pub fn from_be_slice(bytes: &[u8]) -> PrimitiveResult<Self> {
        if bytes.len() > UINT256_SIZE {
            return Err(PrimitiveError::InvalidLength {
                expected: UINT256_SIZE,
                got: bytes.len(),
            });
        }

        let mut le = [0u8; UINT256_SIZE];
        for (slot, byte) in le.iter_mut().zip(bytes.iter().rev()) {
            *slot = *byte;
        }
        Ok(Self::from_le_bytes(le))
    }

    /// Parses a big-endian hexadecimal number of at most 64 digits, with or
    /// without a `0x` prefix. Odd-length input gets an implicit leading zero.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidHex` on non-hex digits and
    /// `PrimitiveError::InvalidLength` when the value does not fit.
    pub fn from_hex(s: &str) -> PrimitiveResult<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.len() > UINT256_SIZE * 2 {
            return Err(PrimitiveError::InvalidLength {
                expected: UINT256_SIZE * 2,
                got: digits.len(),
            });
        }

        let bytes = if digits.len() % 2 == 1 {
            hex::decode(format!("0{digits}"))
        } else {
            hex::decode(digits)
        }
        .map_err(|e| PrimitiveError::invalid_hex(e.to_string()))?;

        Self::from_be_slice(&bytes)
    }

    /// Formats the value as `0x` followed by 64 big-endian hex digits.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl FromStr for UInt256 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl fmt::Debug for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt256({})", self.to_hex_string())
    }
}

impl PartialOrd for UInt256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UInt256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value4
            .cmp(&other.value4)
            .then(self.value3.cmp(&other.value3))
            .then(self.value2.cmp(&other.value2))
            .then(self.value1.cmp(&other.value1))
    }
}

impl From<u64> for UInt256 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<[u8; UINT256_SIZE]> for UInt256 {
    fn from(data: [u8; UINT256_SIZE]) -> Self {
        Self::from_le_bytes(data)
    }
}

impl TryFrom<&[u8]> for UInt256 {
    type Error = PrimitiveError;

    fn try_from(data: &[u8]) -> std::result::Result<Self, Self::Error> {
        Self::decode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint256_new_is_zero() {
        let value = UInt256::new();
        assert!(value.is_zero());
        assert_eq!(value, UInt256::ZERO);
    }

    #[test]
    fn test_from_u64_encodes_low_bytes() {
        let value = UInt256::from_u64(0x0102);
        let encoded = value.encode();
        assert_eq!(encoded[0], 0x02);
        assert_eq!(encoded[1], 0x01);
        assert!(encoded[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(
            UInt256::decode(&[0u8; 31]),
            Err(PrimitiveError::InvalidLength {
                expected: 32,
                got: 31
            })
        );
        assert!(UInt256::decode(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_from_be_slice_too_long() {
        assert!(UInt256::from_be_slice(&[1u8; 33]).is_err());
    }

    #[test]
    fn test_from_hex_odd_length_and_prefix() {
        assert_eq!(UInt256::from_hex("0x1").unwrap(), UInt256::from_u64(1));
        assert_eq!(UInt256::from_hex("100").unwrap(), UInt256::from_u64(0x100));
        assert!(matches!(
            UInt256::from_hex("zz"),
            Err(PrimitiveError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_ordering_uses_most_significant_limb() {
        let low = UInt256::from_u64(u64::MAX);
        let high = UInt256::from_hex("0x010000000000000000").unwrap();
        assert!(low < high);
        assert_eq!(high.value2, 1);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let value =
            UInt256::from_hex("0x0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20")
                .unwrap();
        let text = value.to_string();
        assert_eq!(
            text,
            "0x0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20"
        );
        assert_eq!(text.parse::<UInt256>().unwrap(), value);
    }
}
