use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat index around the table, 0-based in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(u8);

impl Seat {
    /// The seat driven by the local player.
    pub const PRIMARY: Seat = Seat(0);

    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn next(self, players: usize) -> Seat {
        Seat(((self.0 as usize + 1) % players) as u8)
    }

    pub const fn team(self) -> Team {
        if self.0 % 2 == 0 { Team::A } else { Team::B }
    }

    pub const fn is_primary(self) -> bool {
        self.0 == Self::PRIMARY.0
    }
}

impl From<usize> for Seat {
    fn from(index: usize) -> Self {
        Seat(index as u8)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Partnerships alternate around the table: even seats against odd seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::A, Team::B];

    pub const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::A => "Team A",
            Team::B => "Team B",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::{Seat, Team};

    #[test]
    fn next_wraps_around_table() {
        assert_eq!(Seat::new(3).next(4), Seat::new(0));
        assert_eq!(Seat::new(5).next(8), Seat::new(6));
    }

    #[test]
    fn team_follows_parity() {
        assert_eq!(Seat::new(0).team(), Team::A);
        assert_eq!(Seat::new(1).team(), Team::B);
        assert_eq!(Seat::new(6).team(), Team::A);
        assert_eq!(Seat::new(7).team(), Team::B);
    }

    #[test]
    fn only_seat_zero_is_primary() {
        assert!(Seat::PRIMARY.is_primary());
        assert!(!Seat::new(2).is_primary());
    }
}
