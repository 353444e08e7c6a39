use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::model::table::TableSize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub struct Deck {
    table: TableSize,
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled deck for the given table, ordered by copy, suit, then rank.
    pub fn for_table(table: TableSize) -> Self {
        let mut cards = Vec::with_capacity(table.deck_len());
        for copy in 0..table.deck_count() {
            for suit in Suit::ALL.iter().copied() {
                for rank in table.ranks().iter().copied() {
                    if is_trimmed(table, copy, rank, suit) {
                        continue;
                    }
                    cards.push(Card::with_copy(rank, suit, copy));
                }
            }
        }
        Self { table, cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(table: TableSize, rng: &mut R) -> Self {
        let mut deck = Self::for_table(table);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(table: TableSize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(table, &mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn table(&self) -> TableSize {
        self.table
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Contiguous equal chunks in seat order, each sorted for display.
    pub fn deal(&self) -> Vec<Hand> {
        let per_seat = self.cards.len() / self.table.players();
        self.cards
            .chunks(per_seat)
            .map(|chunk| Hand::with_cards(chunk.to_vec()))
            .collect()
    }
}

// 2 x 4 x 7 = 56 cards at six seats; dropping the second black eights leaves 54.
fn is_trimmed(table: TableSize, copy: u8, rank: Rank, suit: Suit) -> bool {
    table == TableSize::Six
        && copy == 1
        && rank == Rank::Eight
        && matches!(suit, Suit::Spades | Suit::Clubs)
}

#[cfg(test)]
mod tests {
    use super::Deck;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::model::table::TableSize;
    use std::collections::HashSet;

    #[test]
    fn every_table_deals_nine_cards_per_seat() {
        for table in TableSize::ALL {
            let deck = Deck::for_table(table);
            assert_eq!(deck.len() % table.players(), 0);
            assert_eq!(deck.len() / table.players(), 9, "table of {table}");
        }
    }

    #[test]
    fn ten_count_matches_table() {
        for table in TableSize::ALL {
            let deck = Deck::for_table(table);
            let tens = deck.cards().iter().filter(|c| c.is_ten()).count();
            assert_eq!(tens, table.total_tens(), "table of {table}");
        }
    }

    #[test]
    fn identities_are_unique() {
        for table in TableSize::ALL {
            let deck = Deck::for_table(table);
            let unique: HashSet<Card> = deck.cards().iter().copied().collect();
            assert_eq!(unique.len(), deck.len());
        }
    }

    #[test]
    fn six_seat_deck_drops_second_black_eights() {
        let deck = Deck::for_table(TableSize::Six);
        assert_eq!(deck.len(), 54);
        assert!(!deck.cards().contains(&Card::with_copy(Rank::Eight, Suit::Spades, 1)));
        assert!(!deck.cards().contains(&Card::with_copy(Rank::Eight, Suit::Clubs, 1)));
        assert!(deck.cards().contains(&Card::with_copy(Rank::Eight, Suit::Hearts, 1)));
        assert!(deck.cards().contains(&Card::with_copy(Rank::Eight, Suit::Spades, 0)));
        assert!(deck.cards().iter().all(|c| c.rank >= Rank::Eight));
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(TableSize::Eight, 42);
        let deck_b = Deck::shuffled_with_seed(TableSize::Eight, 42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(TableSize::Four, 1);
        let deck_b = Deck::shuffled_with_seed(TableSize::Four, 2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn deal_splits_into_sorted_hands() {
        let deck = Deck::shuffled_with_seed(TableSize::Six, 7);
        let hands = deck.deal();
        assert_eq!(hands.len(), 6);
        for hand in &hands {
            assert_eq!(hand.len(), 9);
            let cards = hand.cards();
            assert!(cards.windows(2).all(|pair| {
                (pair[0].suit, pair[0].value()) <= (pair[1].suit, pair[1].value())
            }));
        }
        assert_eq!(hands[0].cards().len() + hands[5].cards().len(), 18);
    }
}
