use super::match_state::{GamePhase, Match};
use crate::model::capture::{CapturedTens, MatchOutcome};
use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::table::TableSize;
use crate::model::trick::Play;
use crate::model::trump::TrumpView;
use serde::{Deserialize, Serialize};

/// Read-only view of a match as one seat is allowed to see it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    pub table: TableSize,
    pub phase: GamePhase,
    pub turn: Seat,
    pub viewer: Seat,
    pub hand: Vec<Card>,
    pub hand_sizes: Vec<usize>,
    pub trick: Vec<Play>,
    pub trick_leader: Option<Seat>,
    pub playable: Vec<Card>,
    pub trump: TrumpView,
    pub captured: CapturedTens,
    pub tricks_played: usize,
    pub outcome: Option<MatchOutcome>,
}

impl MatchSnapshot {
    pub fn capture(state: &Match, viewer: Seat) -> Self {
        let trump = state.trump();
        MatchSnapshot {
            table: state.table(),
            phase: state.phase(),
            turn: state.turn(),
            viewer,
            hand: state
                .hands()
                .get(viewer.index())
                .map(|hand| hand.cards().to_vec())
                .unwrap_or_default(),
            hand_sizes: state.hands().iter().map(|hand| hand.len()).collect(),
            trick: state.trick().plays().to_vec(),
            trick_leader: state.trick().current_leader(trump.suit),
            playable: state.legal_cards(viewer),
            trump,
            captured: state.captured().clone(),
            tricks_played: state.history().len(),
            outcome: state.outcome(),
        }
    }

    pub fn to_json(state: &Match, viewer: Seat) -> serde_json::Result<String> {
        let snapshot = Self::capture(state, viewer);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::MatchSnapshot;
    use crate::game::match_state::{GamePhase, Match};
    use crate::model::seat::Seat;

    #[test]
    fn snapshot_shows_only_viewer_hand() {
        let state = Match::start_with_seed(6, 21).unwrap();
        let snapshot = MatchSnapshot::capture(&state, Seat::PRIMARY);
        assert_eq!(snapshot.hand, state.hand(Seat::PRIMARY).unwrap().cards());
        assert_eq!(snapshot.hand_sizes, vec![9; 6]);
        assert_eq!(snapshot.phase, GamePhase::Play);
        assert_eq!(snapshot.playable.len(), 9);
        assert_eq!(snapshot.trick_leader, None);
    }

    #[test]
    fn json_hides_concealed_trump() {
        let state = Match::start_with_seed(4, 99).unwrap();
        let json = MatchSnapshot::to_json(&state, Seat::PRIMARY).unwrap();
        assert!(json.contains("\"suit\": null"));
        assert!(json.contains("\"revealed\": false"));
        assert!(!json.contains("\"seed\""));
    }

    #[test]
    fn json_roundtrip() {
        let mut state = Match::start_with_seed(8, 3).unwrap();
        let card = state.legal_cards(Seat::PRIMARY)[0];
        state.play_card(Seat::PRIMARY, card).unwrap();
        let json = MatchSnapshot::to_json(&state, Seat::new(1)).unwrap();
        let parsed = MatchSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, MatchSnapshot::capture(&state, Seat::new(1)));
        assert_eq!(parsed.trick.len(), 1);
        assert_eq!(parsed.trick_leader, Some(Seat::PRIMARY));
        assert!(!parsed.playable.is_empty());
    }
}
