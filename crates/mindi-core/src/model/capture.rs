use crate::model::card::Card;
use crate::model::seat::Team;
use crate::model::table::TableSize;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Tens captured by each team, in capture order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedTens {
    teams: [Vec<Card>; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(Team),
    Draw,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Winner(team) => write!(f, "{team} wins"),
            MatchOutcome::Draw => f.write_str("draw"),
        }
    }
}

impl CapturedTens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&mut self, team: Team, tens: &[Card]) {
        debug_assert!(tens.iter().all(|card| card.is_ten()));
        self.teams[team.index()].extend_from_slice(tens);
    }

    pub fn cards(&self, team: Team) -> &[Card] {
        &self.teams[team.index()]
    }

    pub fn count(&self, team: Team) -> usize {
        self.teams[team.index()].len()
    }

    pub fn counts(&self) -> [usize; 2] {
        [self.count(Team::A), self.count(Team::B)]
    }

    pub fn total(&self) -> usize {
        self.teams.iter().map(Vec::len).sum()
    }

    pub fn is_exhausted(&self, table: TableSize) -> bool {
        self.total() >= table.total_tens()
    }

    /// Final result once every ten is captured; `None` while any remain.
    pub fn outcome(&self, table: TableSize) -> Option<MatchOutcome> {
        if !self.is_exhausted(table) {
            return None;
        }
        let majority = table.majority();
        let outcome = Team::BOTH
            .iter()
            .copied()
            .find(|team| self.count(*team) > majority)
            .map(MatchOutcome::Winner)
            .unwrap_or(MatchOutcome::Draw);
        Some(outcome)
    }
}
