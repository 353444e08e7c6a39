use super::{Policy, PolicyContext};
use mindi_core::game::rules::{FollowRequirement, legal_cards};
use mindi_core::model::card::Card;
use tracing::{Level, event};

/// Always plays the highest legal card. No look-ahead, no partner play,
/// no trump conservation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        let legal = legal_cards(ctx.hand, ctx.trick);
        let chosen = highest_value(&legal)?;
        log_play_decision(ctx, &legal, chosen);
        Some(chosen)
    }
}

/// First card with the top value, so ties go to hand order.
pub(crate) fn highest_value(cards: &[Card]) -> Option<Card> {
    let mut best: Option<Card> = None;
    for &card in cards {
        match best {
            Some(current) if card.value() <= current.value() => {}
            _ => best = Some(card),
        }
    }
    best
}

fn log_play_decision(ctx: &PolicyContext, legal: &[Card], chosen: Card) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let legal_preview = if legal.len() <= 6 {
        legal
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal.len())
    };
    let requirement = FollowRequirement::of(ctx.hand, ctx.trick);

    event!(
        target: "mindi_bot::play",
        Level::DEBUG,
        seat = ctx.seat.index(),
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        requirement = ?requirement,
        trump_revealed = ctx.trump.revealed,
        trick_cards = ctx.trick.len(),
    );
}

#[cfg(test)]
mod tests {
    use super::{GreedyPolicy, highest_value};
    use crate::policy::{Policy, PolicyContext};
    use mindi_core::model::card::Card;
    use mindi_core::model::hand::Hand;
    use mindi_core::model::rank::Rank;
    use mindi_core::model::seat::Seat;
    use mindi_core::model::suit::Suit;
    use mindi_core::model::table::TableSize;
    use mindi_core::model::trick::Trick;
    use mindi_core::model::trump::TrumpState;

    fn choose(hand: &Hand, trick: &Trick) -> Option<Card> {
        let ctx = PolicyContext {
            seat: Seat::new(1),
            hand,
            trick,
            table: TableSize::Four,
            trump: TrumpState::concealed(Suit::Hearts).view(),
        };
        GreedyPolicy::new().choose_play(&ctx)
    }

    fn hand() -> Hand {
        Hand::with_cards(vec![
            Card::new(Rank::Seven, Suit::Spades),
            Card::new(Rank::Jack, Suit::Spades),
            Card::new(Rank::Ace, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Diamonds),
        ])
    }

    #[test]
    fn leads_highest_card_in_hand() {
        let trick = Trick::new(4);
        assert_eq!(choose(&hand(), &trick), Some(Card::new(Rank::Ace, Suit::Clubs)));
    }

    #[test]
    fn follows_with_highest_of_lead_suit() {
        let mut trick = Trick::new(4);
        trick.play(Seat::new(0), Card::new(Rank::King, Suit::Spades)).unwrap();
        assert_eq!(choose(&hand(), &trick), Some(Card::new(Rank::Jack, Suit::Spades)));
    }

    #[test]
    fn void_plays_highest_anything() {
        let mut trick = Trick::new(4);
        trick.play(Seat::new(0), Card::new(Rank::Six, Suit::Hearts)).unwrap();
        assert_eq!(choose(&hand(), &trick), Some(Card::new(Rank::Ace, Suit::Clubs)));
    }

    #[test]
    fn ties_keep_first_in_hand_order() {
        let cards = [
            Card::with_copy(Rank::King, Suit::Diamonds, 0),
            Card::with_copy(Rank::King, Suit::Spades, 0),
            Card::with_copy(Rank::King, Suit::Diamonds, 1),
        ];
        assert_eq!(highest_value(&cards), Some(cards[0]));
    }

    #[test]
    fn empty_hand_has_no_move() {
        let trick = Trick::new(4);
        assert_eq!(choose(&Hand::new(), &trick), None);
        assert_eq!(highest_value(&[]), None);
    }
}
