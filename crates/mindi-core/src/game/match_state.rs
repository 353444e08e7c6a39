use crate::game::error::{IllegalMove, MatchError};
use crate::game::log::{EventLog, MatchEvent};
use crate::game::rules;
use crate::model::capture::{CapturedTens, MatchOutcome};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use crate::model::table::TableSize;
use crate::model::trick::{Play, Trick};
use crate::model::trump::{TrumpState, TrumpView};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Setup,
    Play,
    TrickEnd,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub plays: Vec<Play>,
    pub winner: Seat,
    pub tens: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played { next: Seat },
    /// The trick is full; `resolve_trick` must run before the next play.
    TrickFilled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickResult {
    pub winner: Seat,
    pub captured: Vec<Card>,
    pub outcome: Option<MatchOutcome>,
}

/// One match at one table. Owns every hand, the trick in progress and the
/// concealed trump; the only place game state is mutated.
#[derive(Debug, Clone)]
pub struct Match {
    table: TableSize,
    seed: Option<u64>,
    hands: Vec<Hand>,
    trick: Trick,
    history: Vec<CompletedTrick>,
    trump: TrumpState,
    revealed_at_trick: Option<usize>,
    phase: GamePhase,
    turn: Seat,
    captured: CapturedTens,
    outcome: Option<MatchOutcome>,
    declared: bool,
    log: EventLog,
}

impl Match {
    /// Deals a fresh match with a random seed.
    pub fn start(players: usize) -> Result<Self, MatchError> {
        let seed: u64 = rand::random();
        Self::start_with_seed(players, seed)
    }

    pub fn start_with_seed(players: usize, seed: u64) -> Result<Self, MatchError> {
        let table = TableSize::try_from(players)?;
        let mut state = Self::deal(table, seed);
        state.begin();
        Ok(state)
    }

    /// Shuffles, deals and picks the hidden trump. The match is left in
    /// `Setup` until `begin` is called.
    pub fn deal(table: TableSize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(table, &mut rng);
        let trump = TrumpState::random(&mut rng);
        let mut state = Self::assemble(table, deck.deal(), trump);
        state.seed = Some(seed);
        state
    }

    /// Builds a match from prearranged hands, already in `Play` with seat 0
    /// to lead.
    pub fn from_hands(
        table: TableSize,
        hands: Vec<Hand>,
        trump: TrumpState,
    ) -> Result<Self, MatchError> {
        if hands.len() != table.players() {
            return Err(MatchError::InvalidSetup(format!(
                "expected {} hands but got {}",
                table.players(),
                hands.len()
            )));
        }
        let mut state = Self::assemble(table, hands, trump);
        state.begin();
        Ok(state)
    }

    fn assemble(table: TableSize, hands: Vec<Hand>, trump: TrumpState) -> Self {
        Self {
            table,
            seed: None,
            hands,
            trick: Trick::new(table.players()),
            history: Vec::new(),
            trump,
            revealed_at_trick: None,
            phase: GamePhase::Setup,
            turn: Seat::PRIMARY,
            captured: CapturedTens::new(),
            outcome: None,
            declared: false,
            log: EventLog::new(),
        }
    }

    pub fn begin(&mut self) {
        if self.phase != GamePhase::Setup {
            return;
        }
        self.turn = Seat::PRIMARY;
        self.phase = GamePhase::Play;
        self.log.push(MatchEvent::Started { table: self.table });
        event!(
            target: "mindi_core::match",
            Level::DEBUG,
            table = self.table.players(),
            seed = ?self.seed,
            "match started"
        );
    }

    pub fn table(&self) -> TableSize {
        self.table
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    /// `None` for a seat that does not sit at this table.
    pub fn hand(&self, seat: Seat) -> Option<&Hand> {
        self.hands.get(seat.index())
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn trick(&self) -> &Trick {
        &self.trick
    }

    pub fn history(&self) -> &[CompletedTrick] {
        &self.history
    }

    pub fn trump(&self) -> TrumpView {
        self.trump.view()
    }

    /// The trump suit regardless of concealment. Presentation code should
    /// read `trump` or a snapshot instead.
    pub fn trump_suit(&self) -> Suit {
        self.trump.suit()
    }

    /// Index of the trick during which the trump was revealed.
    pub fn revealed_at_trick(&self) -> Option<usize> {
        self.revealed_at_trick
    }

    pub fn captured(&self) -> &CapturedTens {
        &self.captured
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Cards `seat` may play now; empty unless it is that seat's turn.
    pub fn legal_cards(&self, seat: Seat) -> Vec<Card> {
        if self.phase != GamePhase::Play || seat != self.turn {
            return Vec::new();
        }
        rules::legal_cards(&self.hands[seat.index()], &self.trick)
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, MatchError> {
        match self.phase {
            GamePhase::Play => {}
            GamePhase::Setup => return Err(IllegalMove::NotStarted.into()),
            GamePhase::TrickEnd => return Err(IllegalMove::TrickResolving.into()),
            GamePhase::GameOver => return Err(MatchError::ActionAfterTermination),
        }
        if seat.index() >= self.table.players() {
            return Err(IllegalMove::UnknownSeat(seat).into());
        }
        if seat != self.turn {
            return Err(IllegalMove::OutOfTurn {
                expected: self.turn,
                actual: seat,
            }
            .into());
        }

        let requirement = rules::check_play(&self.hands[seat.index()], &self.trick, card)?;
        self.trick.play(seat, card)?;
        self.hands[seat.index()].remove(card);

        if requirement.reveals_trump() && self.trump.reveal() {
            self.revealed_at_trick = Some(self.history.len());
            self.log.push(MatchEvent::TrumpRevealed {
                seat,
                suit: self.trump.suit(),
            });
            event!(
                target: "mindi_core::match",
                Level::INFO,
                seat = seat.index(),
                suit = %self.trump.suit(),
                trick = self.history.len(),
                "trump revealed"
            );
        }

        event!(
            target: "mindi_core::match",
            Level::DEBUG,
            seat = seat.index(),
            card = %card,
            trick_cards = self.trick.len(),
            "card played"
        );

        if self.trick.is_complete() {
            self.phase = GamePhase::TrickEnd;
            Ok(PlayOutcome::TrickFilled)
        } else {
            self.turn = seat.next(self.table.players());
            Ok(PlayOutcome::Played { next: self.turn })
        }
    }

    pub fn resolve_trick(&mut self) -> Result<TrickResult, MatchError> {
        match self.phase {
            GamePhase::TrickEnd => {}
            GamePhase::GameOver => return Err(MatchError::ActionAfterTermination),
            GamePhase::Setup | GamePhase::Play => return Err(MatchError::NothingToResolve),
        }

        let winner = self
            .trick
            .winner(self.trump.effective())
            .ok_or(MatchError::NothingToResolve)?;
        let tens = self.trick.tens();
        self.captured.capture(winner.team(), &tens);
        let plays = self.trick.take();
        self.history.push(CompletedTrick {
            plays,
            winner,
            tens: tens.clone(),
        });
        self.log.push(MatchEvent::TrickWon {
            winner,
            tens: tens.clone(),
        });

        let [team_a, team_b] = self.captured.counts();
        event!(
            target: "mindi_core::match",
            Level::DEBUG,
            winner = winner.index(),
            captured = tens.len(),
            team_a,
            team_b,
            "trick resolved"
        );

        let outcome = self.captured.outcome(self.table);
        match outcome {
            Some(result) => {
                self.phase = GamePhase::GameOver;
                self.outcome = Some(result);
                event!(
                    target: "mindi_core::match",
                    Level::INFO,
                    outcome = %result,
                    team_a,
                    team_b,
                    tricks = self.history.len(),
                    "match over"
                );
            }
            None => {
                self.turn = winner;
                self.phase = GamePhase::Play;
            }
        }

        Ok(TrickResult {
            winner,
            captured: tens,
            outcome,
        })
    }

    /// Appends the final result to the log once the match is over.
    /// Repeated calls leave the log untouched.
    pub fn declare_result(&mut self) -> Option<MatchOutcome> {
        let outcome = self.outcome?;
        if !self.declared {
            self.declared = true;
            self.log.push(MatchEvent::MatchOver {
                outcome,
                tens: self.captured.counts(),
            });
        }
        Some(outcome)
    }

    pub fn is_declared(&self) -> bool {
        self.declared
    }

    /// Every card still in the match: hands, the open trick and every
    /// resolved trick.
    pub fn card_census(&self) -> Vec<Card> {
        let held = self.hands.iter().flat_map(|hand| hand.iter().copied());
        let open = self.trick.plays().iter().map(|play| play.card);
        let swept = self
            .history
            .iter()
            .flat_map(|trick| trick.plays.iter().map(|play| play.card));
        held.chain(open).chain(swept).collect()
    }
}
