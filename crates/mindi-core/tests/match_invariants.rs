use std::collections::HashSet;

use mindi_core::game::error::MatchError;
use mindi_core::game::match_state::{GamePhase, Match, PlayOutcome};
use mindi_core::model::capture::MatchOutcome;
use mindi_core::model::card::Card;
use mindi_core::model::deck::Deck;
use mindi_core::model::seat::Team;

const SEEDS: [u64; 6] = [0, 1, 7, 42, 1234, 987_654_321];

fn sorted_ids(cards: impl IntoIterator<Item = Card>) -> Vec<String> {
    let mut ids: Vec<String> = cards.into_iter().map(Card::id).collect();
    ids.sort();
    ids
}

fn assert_conserved(state: &Match, full_deck: &[String]) {
    let census = state.card_census();
    let unique: HashSet<Card> = census.iter().copied().collect();
    assert_eq!(unique.len(), census.len(), "duplicate card in play");
    assert_eq!(&sorted_ids(census), full_deck, "cards lost or invented");
}

/// Plays to completion, alternating the first and last legal card so both
/// low and high choices get exercised.
fn play_out(state: &mut Match) -> usize {
    let table = state.table();
    let full_deck = sorted_ids(Deck::for_table(table).cards().iter().copied());
    let mut plays = 0usize;

    loop {
        assert_conserved(state, &full_deck);
        match state.phase() {
            GamePhase::Play => {
                let seat = state.turn();
                let legal = state.legal_cards(seat);
                assert!(!legal.is_empty(), "seat on turn must have a legal card");
                let card = if plays % 2 == 0 {
                    legal[0]
                } else {
                    legal[legal.len() - 1]
                };
                let before = state.hand(seat).unwrap().len();
                let outcome = state.play_card(seat, card).expect("legal card accepted");
                assert_eq!(state.hand(seat).unwrap().len(), before - 1);
                if let PlayOutcome::Played { next } = outcome {
                    assert_eq!(next, seat.next(table.players()));
                }
                plays += 1;
            }
            GamePhase::TrickEnd => {
                assert_eq!(state.trick().len(), table.players());
                state.resolve_trick().expect("resolution succeeds");
            }
            GamePhase::GameOver => break,
            GamePhase::Setup => panic!("started match never returns to setup"),
        }
    }
    plays
}

#[test]
fn every_table_size_terminates_with_cards_conserved() {
    for players in [4usize, 6, 8] {
        for seed in SEEDS {
            let mut state = Match::start_with_seed(players, seed).unwrap();
            let plays = play_out(&mut state);

            let table = state.table();
            assert!(plays <= table.deck_len());
            assert_eq!(state.captured().total(), table.total_tens());
            assert!(state.history().len() <= 9);
            assert_eq!(plays, state.history().len() * players);
            assert!(state.outcome().is_some());
        }
    }
}

#[test]
fn outcome_agrees_with_capture_counts() {
    for players in [4usize, 6, 8] {
        for seed in SEEDS {
            let mut state = Match::start_with_seed(players, seed).unwrap();
            play_out(&mut state);
            let majority = state.table().majority();
            let [a, b] = state.captured().counts();
            let expected = if a > majority {
                MatchOutcome::Winner(Team::A)
            } else if b > majority {
                MatchOutcome::Winner(Team::B)
            } else {
                assert_eq!(a, b);
                MatchOutcome::Draw
            };
            assert_eq!(state.outcome(), Some(expected));
        }
    }
}

#[test]
fn trump_reveal_is_monotonic() {
    for seed in SEEDS {
        let mut state = Match::start_with_seed(8, seed).unwrap();
        let mut seen_revealed = false;
        while !state.is_over() {
            if state.phase() == GamePhase::TrickEnd {
                state.resolve_trick().unwrap();
            } else {
                let seat = state.turn();
                let card = state.legal_cards(seat)[0];
                state.play_card(seat, card).unwrap();
            }
            if seen_revealed {
                assert!(state.trump().revealed, "trump went back into hiding");
            }
            seen_revealed = state.trump().revealed;
        }
        let reveals = state
            .log()
            .lines()
            .iter()
            .filter(|line| line.contains("revealed the trump"))
            .count();
        assert!(reveals <= 1);
        assert_eq!(reveals == 1, state.trump().revealed);
        assert_eq!(state.revealed_at_trick().is_some(), state.trump().revealed);
    }
}

#[test]
fn trick_winner_leads_next_trick() {
    let mut state = Match::start_with_seed(6, 55).unwrap();
    while !state.is_over() {
        if state.phase() == GamePhase::TrickEnd {
            let result = state.resolve_trick().unwrap();
            if result.outcome.is_none() {
                assert_eq!(state.turn(), result.winner);
            }
        } else {
            let seat = state.turn();
            let card = state.legal_cards(seat)[0];
            state.play_card(seat, card).unwrap();
        }
    }
    for trick in state.history() {
        let captured_by_winner = trick.tens.iter().all(|card| card.is_ten());
        assert!(captured_by_winner);
    }
}

#[test]
fn termination_does_not_wait_for_empty_hands() {
    let mut ended_early = 0usize;
    for players in [4usize, 6, 8] {
        for seed in SEEDS {
            let mut state = Match::start_with_seed(players, seed).unwrap();
            play_out(&mut state);
            let leftover = state.hands().iter().find_map(|hand| hand.cards().first().copied());
            if let Some(card) = leftover {
                ended_early += 1;
                let seat = state.turn();
                assert_eq!(
                    state.play_card(seat, card),
                    Err(MatchError::ActionAfterTermination)
                );
            }
        }
    }
    assert!(ended_early > 0, "every playout ran the hands dry");
}
