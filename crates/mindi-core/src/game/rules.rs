use crate::game::error::IllegalMove;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

/// What the trick asks of the seat about to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowRequirement {
    /// Empty trick: anything goes and sets the lead suit.
    Lead,
    /// Holds the lead suit and must play it.
    Follow(Suit),
    /// Cannot follow. Anything goes, and the trump is revealed.
    Void(Suit),
}

impl FollowRequirement {
    pub fn of(hand: &Hand, trick: &Trick) -> Self {
        match trick.lead_suit() {
            None => FollowRequirement::Lead,
            Some(suit) if hand.has_suit(suit) => FollowRequirement::Follow(suit),
            Some(suit) => FollowRequirement::Void(suit),
        }
    }

    pub fn permits(self, card: Card) -> bool {
        match self {
            FollowRequirement::Follow(suit) => card.suit == suit,
            FollowRequirement::Lead | FollowRequirement::Void(_) => true,
        }
    }

    /// Being unable to follow is what exposes the trump, whatever card is
    /// then chosen.
    pub fn reveals_trump(self) -> bool {
        matches!(self, FollowRequirement::Void(_))
    }
}

/// Legal cards in hand order.
pub fn legal_cards(hand: &Hand, trick: &Trick) -> Vec<Card> {
    let requirement = FollowRequirement::of(hand, trick);
    hand.iter()
        .copied()
        .filter(|card| requirement.permits(*card))
        .collect()
}

pub fn check_play(
    hand: &Hand,
    trick: &Trick,
    card: Card,
) -> Result<FollowRequirement, IllegalMove> {
    if !hand.contains(card) {
        return Err(IllegalMove::CardNotInHand(card));
    }
    let requirement = FollowRequirement::of(hand, trick);
    match requirement {
        FollowRequirement::Follow(suit) if card.suit != suit => {
            Err(IllegalMove::MustFollowSuit(suit))
        }
        _ => Ok(requirement),
    }
}

#[cfg(test)]
mod tests {
    use super::{FollowRequirement, check_play, legal_cards};
    use crate::game::error::IllegalMove;
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;
    use crate::model::trick::Trick;

    fn hand() -> Hand {
        Hand::with_cards(vec![
            Card::new(Rank::Six, Suit::Hearts),
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::Ten, Suit::Clubs),
        ])
    }

    fn trick_led_by(card: Card) -> Trick {
        let mut trick = Trick::new(4);
        trick.play(Seat::new(3), card).unwrap();
        trick
    }

    #[test]
    fn empty_trick_allows_everything() {
        let trick = Trick::new(4);
        assert_eq!(FollowRequirement::of(&hand(), &trick), FollowRequirement::Lead);
        assert_eq!(legal_cards(&hand(), &trick).len(), 3);
    }

    #[test]
    fn holding_lead_suit_restricts_to_it() {
        let trick = trick_led_by(Card::new(Rank::Nine, Suit::Hearts));
        let legal = legal_cards(&hand(), &trick);
        assert_eq!(
            legal,
            vec![
                Card::new(Rank::Six, Suit::Hearts),
                Card::new(Rank::King, Suit::Hearts)
            ]
        );
        assert_eq!(
            check_play(&hand(), &trick, Card::new(Rank::Ten, Suit::Clubs)),
            Err(IllegalMove::MustFollowSuit(Suit::Hearts))
        );
        let ok = check_play(&hand(), &trick, Card::new(Rank::King, Suit::Hearts)).unwrap();
        assert!(!ok.reveals_trump());
    }

    #[test]
    fn void_in_lead_suit_allows_all_and_reveals() {
        let trick = trick_led_by(Card::new(Rank::Nine, Suit::Spades));
        assert_eq!(legal_cards(&hand(), &trick).len(), 3);
        let requirement = check_play(&hand(), &trick, Card::new(Rank::Six, Suit::Hearts)).unwrap();
        assert_eq!(requirement, FollowRequirement::Void(Suit::Spades));
        assert!(requirement.reveals_trump());
    }

    #[test]
    fn card_outside_hand_is_rejected() {
        let trick = Trick::new(4);
        let stranger = Card::new(Rank::Ace, Suit::Diamonds);
        assert_eq!(
            check_play(&hand(), &trick, stranger),
            Err(IllegalMove::CardNotInHand(stranger))
        );
    }
}
