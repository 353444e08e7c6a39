use crate::policy::{GreedyPolicy, Policy, PolicyContext};
use mindi_core::model::card::Card;
use mindi_core::model::seat::Seat;
use mindi_core::model::table::TableSize;
use std::fmt;

/// Who decides a seat's card. Both variants feed the same `play_card`.
pub enum MoveSource {
    /// Waits for a person to submit a card.
    Interactive,
    /// Asks a policy as soon as the seat is on turn.
    Automated(Box<dyn Policy>),
}

impl MoveSource {
    pub fn greedy() -> Self {
        MoveSource::Automated(Box::new(GreedyPolicy::new()))
    }

    /// Primary seat interactive, every other seat greedy.
    pub fn default_seating(table: TableSize) -> Vec<MoveSource> {
        (0..table.players())
            .map(|index| {
                if Seat::from(index).is_primary() {
                    MoveSource::Interactive
                } else {
                    MoveSource::greedy()
                }
            })
            .collect()
    }

    /// Every seat greedy, for unattended play.
    pub fn all_automated(table: TableSize) -> Vec<MoveSource> {
        (0..table.players()).map(|_| MoveSource::greedy()).collect()
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, MoveSource::Interactive)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoveSource::Interactive => "interactive",
            MoveSource::Automated(policy) => policy.name(),
        }
    }

    /// `None` means the move has to come from outside.
    pub fn next_move(&mut self, ctx: &PolicyContext) -> Option<Card> {
        match self {
            MoveSource::Interactive => None,
            MoveSource::Automated(policy) => policy.choose_play(ctx),
        }
    }
}

impl fmt::Debug for MoveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveSource({})", self.label())
    }
}
