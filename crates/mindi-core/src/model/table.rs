use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported table sizes. Every size deals nine cards per seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum TableSize {
    Four,
    Six,
    Eight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported table size {0}; expected 4, 6 or 8")]
pub struct InvalidTableSize(pub usize);

impl TableSize {
    pub const ALL: [TableSize; 3] = [TableSize::Four, TableSize::Six, TableSize::Eight];

    pub const CARDS_PER_SEAT: usize = 9;

    pub const fn players(self) -> usize {
        match self {
            TableSize::Four => 4,
            TableSize::Six => 6,
            TableSize::Eight => 8,
        }
    }

    pub const fn deck_count(self) -> u8 {
        match self {
            TableSize::Four => 1,
            TableSize::Six | TableSize::Eight => 2,
        }
    }

    pub const fn ranks(self) -> &'static [Rank] {
        match self {
            TableSize::Six => &Rank::SHORT,
            TableSize::Four | TableSize::Eight => &Rank::ORDERED,
        }
    }

    pub const fn deck_len(self) -> usize {
        self.players() * Self::CARDS_PER_SEAT
    }

    /// One ten per suit per physical deck.
    pub const fn total_tens(self) -> usize {
        4 * self.deck_count() as usize
    }

    /// A team must capture strictly more than this many tens to win.
    pub const fn majority(self) -> usize {
        self.total_tens() / 2
    }
}

impl TryFrom<usize> for TableSize {
    type Error = InvalidTableSize;

    fn try_from(players: usize) -> Result<Self, Self::Error> {
        match players {
            4 => Ok(TableSize::Four),
            6 => Ok(TableSize::Six),
            8 => Ok(TableSize::Eight),
            other => Err(InvalidTableSize(other)),
        }
    }
}

impl From<TableSize> for usize {
    fn from(size: TableSize) -> Self {
        size.players()
    }
}

impl fmt::Display for TableSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.players())
    }
}
