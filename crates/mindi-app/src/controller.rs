use crate::scheduler::{Scheduled, Scheduler};
use mindi_bot::{MoveSource, PolicyContext};
use mindi_core::game::error::{IllegalMove, MatchError};
use mindi_core::game::log::MatchEvent;
use mindi_core::game::match_state::{GamePhase, Match};
use mindi_core::game::serialization::MatchSnapshot;
use mindi_core::model::card::Card;
use mindi_core::model::seat::Seat;
use mindi_core::model::table::TableSize;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

const DEFAULT_BOT_DELAY_MS: u64 = 1_000;
const DEFAULT_TRICK_DELAY_MS: u64 = 1_500;
const DEFAULT_RESULT_DELAY_MS: u64 = 500;

/// Visible pauses between automated steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    #[serde(default = "default_bot_delay_ms")]
    pub bot_delay_ms: u64,
    #[serde(default = "default_trick_delay_ms")]
    pub trick_delay_ms: u64,
    #[serde(default = "default_result_delay_ms")]
    pub result_delay_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            bot_delay_ms: DEFAULT_BOT_DELAY_MS,
            trick_delay_ms: DEFAULT_TRICK_DELAY_MS,
            result_delay_ms: DEFAULT_RESULT_DELAY_MS,
        }
    }
}

fn default_bot_delay_ms() -> u64 {
    DEFAULT_BOT_DELAY_MS
}

fn default_trick_delay_ms() -> u64 {
    DEFAULT_TRICK_DELAY_MS
}

fn default_result_delay_ms() -> u64 {
    DEFAULT_RESULT_DELAY_MS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    BotTurn { seat: Seat },
    ResolveTrick,
    DeclareResult,
}

/// Drives one match at a time: takes the primary seat's cards, runs the
/// automated seats after a delay and sweeps full tricks, all through the
/// match's own `play_card`/`resolve_trick`.
///
/// Scheduled work is stamped with the generation of the match that queued
/// it; starting a new match bumps the generation and cancels the queue so
/// nothing from the old match can touch the new one.
pub struct GameController {
    state: Option<Match>,
    seats: Vec<MoveSource>,
    scheduler: Scheduler<DeferredAction>,
    timings: Timings,
    generation: u64,
    log_cursor: usize,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(Timings::default())
    }
}

impl GameController {
    pub fn new(timings: Timings) -> Self {
        Self {
            state: None,
            seats: Vec::new(),
            scheduler: Scheduler::new(),
            timings,
            generation: 0,
            log_cursor: 0,
        }
    }

    pub fn start_match(&mut self, players: usize) -> Result<MatchSnapshot, MatchError> {
        let table = TableSize::try_from(players)?;
        let seed: u64 = rand::random();
        self.start_with_sources(players, seed, MoveSource::default_seating(table))
    }

    pub fn start_match_seeded(
        &mut self,
        players: usize,
        seed: u64,
    ) -> Result<MatchSnapshot, MatchError> {
        let table = TableSize::try_from(players)?;
        self.start_with_sources(players, seed, MoveSource::default_seating(table))
    }

    pub fn start_with_sources(
        &mut self,
        players: usize,
        seed: u64,
        sources: Vec<MoveSource>,
    ) -> Result<MatchSnapshot, MatchError> {
        let state = Match::start_with_seed(players, seed)?;
        if sources.len() != players {
            return Err(MatchError::InvalidSetup(format!(
                "expected {players} move sources but got {}",
                sources.len()
            )));
        }

        let cancelled = self.scheduler.cancel_all();
        self.generation += 1;
        event!(
            target: "mindi_app::controller",
            Level::DEBUG,
            generation = self.generation,
            cancelled,
            players,
            seed,
            "starting match"
        );

        self.state = Some(state);
        self.seats = sources;
        self.log_cursor = 0;
        self.schedule_follow_up();
        self.require_snapshot()
    }

    /// Submits the primary seat's card.
    pub fn play(&mut self, card: Card) -> Result<MatchSnapshot, MatchError> {
        self.submit(Seat::PRIMARY, card)
    }

    /// Submits a card for an interactively driven seat.
    pub fn submit(&mut self, seat: Seat, card: Card) -> Result<MatchSnapshot, MatchError> {
        let Some(state) = self.state.as_mut() else {
            return Err(IllegalMove::NotStarted.into());
        };
        if let Some(source) = self.seats.get(seat.index())
            && !source.is_interactive()
        {
            return Err(IllegalMove::OutOfTurn {
                expected: state.turn(),
                actual: seat,
            }
            .into());
        }
        state.play_card(seat, card)?;
        self.schedule_follow_up();
        self.require_snapshot()
    }

    /// Moves the virtual clock forward by `elapsed_ms`, running every
    /// action that falls due. Returns how many actions ran.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let target = self.scheduler.now_ms().saturating_add(elapsed_ms);
        let mut ran = 0usize;
        while let Some(task) = self.scheduler.pop_due(target) {
            self.run(task);
            ran += 1;
        }
        self.scheduler.advance_clock_to(target);
        ran
    }

    /// Runs queued actions back to back until nothing is pending, which
    /// happens when an interactive seat is on turn or the result has been
    /// declared.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0usize;
        while let Some(task) = self.scheduler.pop_next() {
            self.run(task);
            ran += 1;
        }
        ran
    }

    fn require_snapshot(&self) -> Result<MatchSnapshot, MatchError> {
        self.snapshot().ok_or_else(|| IllegalMove::NotStarted.into())
    }

    pub fn snapshot(&self) -> Option<MatchSnapshot> {
        self.snapshot_for(Seat::PRIMARY)
    }

    pub fn snapshot_for(&self, viewer: Seat) -> Option<MatchSnapshot> {
        self.state
            .as_ref()
            .map(|state| MatchSnapshot::capture(state, viewer))
    }

    pub fn match_state(&self) -> Option<&Match> {
        self.state.as_ref()
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn pending_actions(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn awaiting_input(&self) -> bool {
        self.state.as_ref().is_some_and(|state| {
            state.phase() == GamePhase::Play
                && self
                    .seats
                    .get(state.turn().index())
                    .is_some_and(MoveSource::is_interactive)
        })
    }

    /// Log events appended since the previous call.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        let fresh = state.log().since(self.log_cursor).to_vec();
        self.log_cursor = state.log().len();
        fresh
    }

    fn schedule_follow_up(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let next = match state.phase() {
            GamePhase::Setup => None,
            GamePhase::TrickEnd => {
                Some((self.timings.trick_delay_ms, DeferredAction::ResolveTrick))
            }
            GamePhase::GameOver if !state.is_declared() => {
                Some((self.timings.result_delay_ms, DeferredAction::DeclareResult))
            }
            GamePhase::GameOver => None,
            GamePhase::Play => {
                let seat = state.turn();
                match self.seats.get(seat.index()) {
                    Some(source) if !source.is_interactive() => {
                        Some((self.timings.bot_delay_ms, DeferredAction::BotTurn { seat }))
                    }
                    _ => None,
                }
            }
        };
        if let Some((delay_ms, action)) = next {
            self.scheduler.schedule(delay_ms, self.generation, action);
        }
    }

    fn run(&mut self, task: Scheduled<DeferredAction>) {
        if task.generation != self.generation {
            event!(
                target: "mindi_app::controller",
                Level::DEBUG,
                task_generation = task.generation,
                generation = self.generation,
                action = ?task.action,
                "discarding stale action"
            );
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let result = match task.action {
            DeferredAction::BotTurn { seat } => {
                if state.is_over() {
                    Err(MatchError::ActionAfterTermination)
                } else if state.phase() != GamePhase::Play || state.turn() != seat {
                    return;
                } else {
                    let seats = &mut self.seats;
                    let card = PolicyContext::from_match(state, seat).and_then(|ctx| {
                        seats
                            .get_mut(seat.index())
                            .and_then(|source| source.next_move(&ctx))
                    });
                    match card {
                        Some(card) => state.play_card(seat, card).map(|_| ()),
                        None => return,
                    }
                }
            }
            DeferredAction::ResolveTrick => state.resolve_trick().map(|_| ()),
            DeferredAction::DeclareResult => {
                state.declare_result();
                Ok(())
            }
        };

        match result {
            Ok(()) => self.schedule_follow_up(),
            Err(MatchError::ActionAfterTermination) => {
                event!(
                    target: "mindi_app::controller",
                    Level::DEBUG,
                    action = ?task.action,
                    "discarding action after match end"
                );
            }
            Err(err) => {
                event!(
                    target: "mindi_app::controller",
                    Level::WARN,
                    action = ?task.action,
                    error = %err,
                    "scheduled action rejected"
                );
            }
        }
    }
}
