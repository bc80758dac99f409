//! IBFT message type identifiers.

use crate::MessageError;
use serde::{Deserialize, Serialize};

/// IBFT protocol message kinds. The set is closed; matching is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    /// Proposal broadcast by the round's proposer
    Preprepare = 0x00,
    /// Acknowledgement of a proposal
    Prepare = 0x01,
    /// Commitment to a prepared proposal
    Commit = 0x02,
    /// Request to move to a higher round
    RoundChange = 0x03,
}

impl MessageType {
    /// Number of message kinds.
    pub const COUNT: usize = 4;

    /// All message kinds in tag order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Preprepare,
        Self::Prepare,
        Self::Commit,
        Self::RoundChange,
    ];

    /// Converts from byte value
    #[must_use]
    pub const fn from_byte(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Preprepare),
            0x01 => Some(Self::Prepare),
            0x02 => Some(Self::Commit),
            0x03 => Some(Self::RoundChange),
            _ => None,
        }
    }

    /// Converts to byte value
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Dense index in `0..COUNT`, used to pick a per-type store lane.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preprepare => "PREPREPARE",
            Self::Prepare => "PREPARE",
            Self::Commit => "COMMIT",
            Self::RoundChange => "ROUND_CHANGE",
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = MessageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_byte(value).ok_or(MessageError::InvalidMessageType(value))
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_values() {
        assert_eq!(MessageType::Preprepare as u8, 0x00);
        assert_eq!(MessageType::Prepare as u8, 0x01);
        assert_eq!(MessageType::Commit as u8, 0x02);
        assert_eq!(MessageType::RoundChange as u8, 0x03);
    }

    #[test]
    fn test_message_type_from_byte() {
        assert_eq!(MessageType::from_byte(0x01), Some(MessageType::Prepare));
        assert_eq!(MessageType::from_byte(0x03), Some(MessageType::RoundChange));
        assert_eq!(MessageType::from_byte(0x99), None);
        assert_eq!(
            MessageType::try_from(0x04),
            Err(MessageError::InvalidMessageType(0x04))
        );
    }

    #[test]
    fn test_message_type_roundtrip() {
        for (index, msg_type) in MessageType::ALL.into_iter().enumerate() {
            assert_eq!(msg_type.index(), index);
            assert_eq!(MessageType::from_byte(msg_type.to_byte()), Some(msg_type));
        }
    }

    #[test]
    fn test_message_type_display() {
        assert_eq!(MessageType::Prepare.to_string(), "PREPARE");
        assert_eq!(MessageType::RoundChange.to_string(), "ROUND_CHANGE");
    }
}
