use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use crate::model::table::InvalidTableSize;
use crate::model::trick::TrickError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    InvalidTableSize(#[from] InvalidTableSize),
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
    #[error("no completed trick is waiting to be resolved")]
    NothingToResolve,
    #[error("match is over; action discarded")]
    ActionAfterTermination,
    #[error("invalid setup: {0}")]
    InvalidSetup(String),
    #[error(transparent)]
    Trick(#[from] TrickError),
}

/// A rejected play. State is never touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("{0} is not in hand")]
    CardNotInHand(Card),
    #[error("must follow {0}")]
    MustFollowSuit(Suit),
    #[error("the trick is being resolved")]
    TrickResolving,
    #[error("the match has not started")]
    NotStarted,
    #[error("{0} does not sit at this table")]
    UnknownSeat(Seat),
}
