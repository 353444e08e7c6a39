use crate::model::capture::MatchOutcome;
use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use crate::model::table::TableSize;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Human-readable match events, for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    Started { table: TableSize },
    TrumpRevealed { seat: Seat, suit: Suit },
    TrickWon { winner: Seat, tens: Vec<Card> },
    MatchOver { outcome: MatchOutcome, tens: [usize; 2] },
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchEvent::Started { table } => {
                write!(f, "Game started! {table} players. Trump hidden.")
            }
            MatchEvent::TrumpRevealed { seat, suit } => {
                write!(f, "{seat} revealed the trump: {} {suit}!", suit.symbol())
            }
            MatchEvent::TrickWon { winner, tens } if tens.is_empty() => {
                write!(f, "{winner} wins the trick.")
            }
            MatchEvent::TrickWon { winner, tens } => {
                write!(f, "{winner} wins the trick and captures {} mindi(s)!", tens.len())
            }
            MatchEvent::MatchOver { outcome, tens } => match outcome {
                MatchOutcome::Winner(team) => write!(
                    f,
                    "--- GAME OVER: {} WINS ({}-{}) ---",
                    team.to_string().to_uppercase(),
                    tens[0],
                    tens[1]
                ),
                MatchOutcome::Draw => {
                    write!(f, "--- GAME OVER: DRAW ({}-{}) ---", tens[0], tens[1])
                }
            },
        }
    }
}

/// Append-only event stream kept by a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events appended after the first `cursor` entries.
    pub fn since(&self, cursor: usize) -> &[MatchEvent] {
        self.events.get(cursor..).unwrap_or(&[])
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{EventLog, MatchEvent};
    use crate::model::capture::MatchOutcome;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::seat::{Seat, Team};
    use crate::model::suit::Suit;
    use crate::model::table::TableSize;

    #[test]
    fn lines_render_events() {
        let mut log = EventLog::new();
        log.push(MatchEvent::Started {
            table: TableSize::Six,
        });
        log.push(MatchEvent::TrumpRevealed {
            seat: Seat::new(2),
            suit: Suit::Hearts,
        });
        log.push(MatchEvent::TrickWon {
            winner: Seat::new(1),
            tens: vec![],
        });
        log.push(MatchEvent::TrickWon {
            winner: Seat::new(3),
            tens: vec![Card::new(Rank::Ten, Suit::Clubs)],
        });
        log.push(MatchEvent::MatchOver {
            outcome: MatchOutcome::Winner(Team::A),
            tens: [3, 1],
        });
        assert_eq!(
            log.lines(),
            vec![
                "Game started! 6 players. Trump hidden.",
                "Player 2 revealed the trump: ♥ H!",
                "Player 1 wins the trick.",
                "Player 3 wins the trick and captures 1 mindi(s)!",
                "--- GAME OVER: TEAM A WINS (3-1) ---",
            ]
        );
    }

    #[test]
    fn since_returns_tail() {
        let mut log = EventLog::new();
        log.push(MatchEvent::Started {
            table: TableSize::Four,
        });
        log.push(MatchEvent::MatchOver {
            outcome: MatchOutcome::Draw,
            tens: [2, 2],
        });
        assert_eq!(log.since(1).len(), 1);
        assert!(log.since(2).is_empty());
        assert!(log.since(10).is_empty());
        assert_eq!(log.since(1)[0].to_string(), "--- GAME OVER: DRAW (2-2) ---");
    }
}
