mod greedy;

pub use greedy::GreedyPolicy;

use mindi_core::game::match_state::Match;
use mindi_core::model::card::Card;
use mindi_core::model::hand::Hand;
use mindi_core::model::seat::Seat;
use mindi_core::model::table::TableSize;
use mindi_core::model::trick::Trick;
use mindi_core::model::trump::TrumpView;

/// What a seat can see when it is asked for a card.
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub trick: &'a Trick,
    pub table: TableSize,
    pub trump: TrumpView,
}

impl<'a> PolicyContext<'a> {
    /// `None` when `seat` is not at the table.
    pub fn from_match(state: &'a Match, seat: Seat) -> Option<Self> {
        Some(Self {
            seat,
            hand: state.hand(seat)?,
            trick: state.trick(),
            table: state.table(),
            trump: state.trump(),
        })
    }
}

/// Move selection for seats not driven by a person.
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    /// Picks a legal card, or `None` when the hand is empty.
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card>;
}
