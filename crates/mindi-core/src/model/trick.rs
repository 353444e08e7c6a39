use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    capacity: usize,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("{0} has already played this trick")]
    AlreadyPlayed(Seat),
}

impl Trick {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            plays: Vec::with_capacity(capacity),
        }
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == self.capacity
    }

    pub fn leader(&self) -> Option<Seat> {
        self.plays.first().map(|play| play.seat)
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }
        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }
        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// Seat holding the trick so far. Works on partial tricks too.
    pub fn current_leader(&self, trump: Option<Suit>) -> Option<Seat> {
        resolve_winner(&self.plays, trump)
    }

    pub fn winner(&self, trump: Option<Suit>) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        resolve_winner(&self.plays, trump)
    }

    pub fn tens(&self) -> Vec<Card> {
        self.plays
            .iter()
            .map(|play| play.card)
            .filter(|card| card.is_ten())
            .collect()
    }

    /// Empties the trick, handing back what was played.
    pub fn take(&mut self) -> Vec<Play> {
        std::mem::replace(&mut self.plays, Vec::with_capacity(self.capacity))
    }
}

/// Winner of a sequence of plays under `trump`, which should be `None`
/// while the trump is still concealed. Returns `None` for an empty slice.
pub fn resolve_winner(plays: &[Play], trump: Option<Suit>) -> Option<Seat> {
    let (first, rest) = plays.split_first()?;
    let lead = first.card.suit;
    let mut best = first;
    for candidate in rest {
        if beats(candidate.card, best.card, lead, trump) {
            best = candidate;
        }
    }
    Some(best.seat)
}

fn beats(candidate: Card, current: Card, lead: Suit, trump: Option<Suit>) -> bool {
    let candidate_trump = Some(candidate.suit) == trump;
    let current_trump = Some(current.suit) == trump;
    match (candidate_trump, current_trump) {
        (true, false) => true,
        (false, true) => false,
        _ if candidate.suit == current.suit => candidate.value() > current.value(),
        _ => candidate.suit == lead && current.suit != lead && !current_trump,
    }
}
