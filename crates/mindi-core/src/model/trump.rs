use crate::model::suit::Suit;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The secretly chosen trump. The suit never changes during a match and
/// `revealed` only ever goes from false to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrumpState {
    suit: Suit,
    revealed: bool,
}

impl TrumpState {
    pub const fn concealed(suit: Suit) -> Self {
        Self {
            suit,
            revealed: false,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let index = rng.gen_range(0..Suit::ALL.len());
        Self::concealed(Suit::ALL[index])
    }

    pub const fn suit(&self) -> Suit {
        self.suit
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Marks the trump as revealed. Returns true only on the first call.
    pub fn reveal(&mut self) -> bool {
        let newly = !self.revealed;
        self.revealed = true;
        newly
    }

    /// The suit that takes part in trick resolution, absent while concealed.
    pub const fn effective(&self) -> Option<Suit> {
        if self.revealed { Some(self.suit) } else { None }
    }

    pub const fn view(&self) -> TrumpView {
        TrumpView {
            suit: self.effective(),
            revealed: self.revealed,
        }
    }
}

/// What the table is allowed to see of the trump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrumpView {
    pub suit: Option<Suit>,
    pub revealed: bool,
}
