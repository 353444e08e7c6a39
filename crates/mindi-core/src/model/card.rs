use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A physical card. `copy` tells apart the duplicates of a two-deck table,
/// so two cards are the same card only if rank, suit and copy all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub copy: u8,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self::with_copy(rank, suit, 0)
    }

    pub const fn with_copy(rank: Rank, suit: Suit, copy: u8) -> Self {
        Self { rank, suit, copy }
    }

    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    pub const fn is_ten(self) -> bool {
        self.rank.is_ten()
    }

    /// Stable identity, e.g. `10H-1`.
    pub fn id(self) -> String {
        format!("{}{}-{}", self.rank, self.suit, self.copy)
    }

    pub(crate) fn sort_key(self) -> (Suit, u8, u8) {
        (self.suit, self.value(), self.copy)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
