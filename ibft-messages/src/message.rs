//! IBFT protocol message as seen by the store.
//!
//! Content is opaque here: the store only looks at the type and the view.
//! Signature checks and payload decoding happen before `record`.

use crate::{MessageType, View};
use ibft_primitives::{merkleize, Hash, HashTreeRoot};
use serde::{Deserialize, Serialize};

/// A received consensus message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// View the message belongs to
    pub view: View,
    /// Sender identity (validator address bytes)
    pub from: Vec<u8>,
    /// Message kind
    pub message_type: MessageType,
    /// Encoded message body
    pub payload: Vec<u8>,
}

impl Message {
    /// Creates a new message
    pub fn new(view: View, from: Vec<u8>, message_type: MessageType, payload: Vec<u8>) -> Self {
        Self {
            view,
            from,
            message_type,
            payload,
        }
    }

    /// Identity digest: hash-tree root over the message fields, in
    /// declaration order (height, round, type, sender, payload).
    #[must_use]
    pub fn digest(&self) -> Hash {
        let fields = [
            self.view.height.hash_tree_root(),
            self.view.round.hash_tree_root(),
            u64::from(self.message_type.to_byte()).hash_tree_root(),
            self.from.hash_tree_root(),
            self.payload.hash_tree_root(),
        ];
        merkleize(&fields.map(|root| root.encode()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepare(from: u8) -> Message {
        Message::new(View::new(10, 1), vec![from], MessageType::Prepare, vec![1, 2, 3])
    }

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(prepare(1).digest(), prepare(1).digest());
    }

    #[test]
    fn test_digest_covers_every_field() {
        let base = prepare(1);

        let mut other = base.clone();
        other.from = vec![2];
        assert_ne!(base.digest(), other.digest());

        let mut other = base.clone();
        other.view.round = 2;
        assert_ne!(base.digest(), other.digest());

        let mut other = base.clone();
        other.message_type = MessageType::Commit;
        assert_ne!(base.digest(), other.digest());

        let mut other = base.clone();
        other.payload.push(4);
        assert_ne!(base.digest(), other.digest());
    }
}
