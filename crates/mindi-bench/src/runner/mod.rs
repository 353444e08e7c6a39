mod summary;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use mindi_app::GameController;
use mindi_bot::MoveSource;
use mindi_core::game::error::MatchError;
use mindi_core::model::capture::MatchOutcome;
use mindi_core::model::seat::Team;
use mindi_core::model::table::TableSize;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BenchConfig, ResolvedOutputs};

pub use summary::OutcomeTally;

/// Plays a batch of fully automated matches through the controller.
pub struct MatchRunner {
    config: BenchConfig,
    outputs: ResolvedOutputs,
    table: TableSize,
}

/// Summary details returned after a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub matches_played: usize,
    pub tally: OutcomeTally,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

/// One JSONL row per finished match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRow {
    pub run_id: String,
    pub match_index: usize,
    pub table_size: usize,
    pub seed: u64,
    pub outcome: MatchOutcome,
    pub tens_team_a: usize,
    pub tens_team_b: usize,
    pub tricks_played: usize,
    pub trump: String,
    pub trump_revealed_at_trick: Option<usize>,
    pub virtual_duration_ms: u64,
}

impl MatchRunner {
    pub fn new(config: BenchConfig, outputs: ResolvedOutputs) -> Self {
        let table = config.table_size();
        Self {
            config,
            outputs,
            table,
        }
    }

    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.table.seed.unwrap_or(0));
        let mut controller = GameController::new(self.config.timings);
        let mut tally = OutcomeTally::default();

        for match_index in 0..self.config.table.matches {
            let seed = rng.next_u64();
            let row = self.play_one(&mut controller, match_index, seed)?;
            tally.record(&row);
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        let markdown = summary::render_markdown(&self.config, self.table, &tally);
        fs::write(&self.outputs.summary_md, markdown)?;

        event!(
            target: "mindi_bench::runner",
            Level::INFO,
            run_id = %self.config.run_id,
            matches = tally.matches,
            team_a_wins = tally.team_a_wins,
            team_b_wins = tally.team_b_wins,
            draws = tally.draws,
            "run complete"
        );

        Ok(RunSummary {
            matches_played: tally.matches,
            tally,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn play_one(
        &self,
        controller: &mut GameController,
        match_index: usize,
        seed: u64,
    ) -> Result<MatchRow, RunnerError> {
        let players = self.table.players();
        controller.start_with_sources(players, seed, MoveSource::all_automated(self.table))?;
        let started_ms = controller.now_ms();
        controller.run_until_idle();
        let finished_ms = controller.now_ms();

        let state = controller
            .match_state()
            .ok_or(RunnerError::Incomplete { match_index, seed })?;
        let outcome = match state.outcome() {
            Some(outcome) if state.is_declared() => outcome,
            _ => return Err(RunnerError::Incomplete { match_index, seed }),
        };

        let row = MatchRow {
            run_id: self.config.run_id.clone(),
            match_index,
            table_size: players,
            seed,
            outcome,
            tens_team_a: state.captured().count(Team::A),
            tens_team_b: state.captured().count(Team::B),
            tricks_played: state.history().len(),
            trump: state.trump_suit().to_string(),
            trump_revealed_at_trick: state.revealed_at_trick(),
            virtual_duration_ms: finished_ms.saturating_sub(started_ms),
        };

        event!(
            target: "mindi_bench::runner",
            Level::DEBUG,
            run_id = %self.config.run_id,
            match_index,
            seed,
            outcome = %row.outcome,
            tens_team_a = row.tens_team_a,
            tens_team_b = row.tens_team_b,
            tricks = row.tricks_played,
            "match finished"
        );

        Ok(row)
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize match row: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("match setup failed: {0}")]
    Match(#[from] MatchError),
    #[error("match {match_index} (seed {seed}) stopped before a result was declared")]
    Incomplete { match_index: usize, seed: u64 },
}
