//! Consensus view: the (height, round) pair every match decision is made on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A specific attempt (round) to agree on a specific block (height).
///
/// Ordering is lexicographic on (height, round), which the message store
/// relies on for range scans.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct View {
    /// Block instance being agreed upon.
    pub height: u64,
    /// Attempt counter within the height.
    pub round: u64,
}

impl View {
    /// Creates a new view.
    #[must_use]
    pub const fn new(height: u64, round: u64) -> Self {
        Self { height, round }
    }

    /// The last possible round at this height; upper bound for range scans.
    #[must_use]
    pub(crate) const fn last_round(self) -> Self {
        Self {
            height: self.height,
            round: u64::MAX,
        }
    }

    /// Exact-round policy: same height and same round.
    #[must_use]
    pub const fn matches_exact(&self, candidate: &Self) -> bool {
        candidate.height == self.height && candidate.round == self.round
    }

    /// Minimum-round policy: same height and a round at least this one.
    #[must_use]
    pub const fn matches_min_round(&self, candidate: &Self) -> bool {
        candidate.height == self.height && candidate.round >= self.round
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.height, self.round)
    }
}
