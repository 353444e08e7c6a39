use std::path::PathBuf;

use clap::Parser;

use mindi_bench::config::{BenchConfig, ResolvedOutputs};
use mindi_bench::logging::init_logging;
use mindi_bench::runner::MatchRunner;

/// Headless harness that plays automated Mindi Coat matches.
#[derive(Debug, Parser)]
#[command(
    name = "mindi-bench",
    author,
    version,
    about = "Deterministic Mindi Coat match runner"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/mindi.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of matches to play.
    #[arg(long, value_name = "MATCHES")]
    matches: Option<usize>,

    /// Override the root RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the table size (4, 6 or 8).
    #[arg(long, value_name = "PLAYERS")]
    table_size: Option<usize>,

    /// Exit after validating the configuration.
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(matches) = cli.matches {
        config.table.matches = matches;
    }

    if let Some(seed) = cli.seed {
        config.table.seed = Some(seed);
    }

    if let Some(size) = cli.table_size {
        config.table.size = size;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let matches = config.table.matches;
    let table = config.table_size();

    println!("Loaded configuration '{run_id}' ({table} players, {matches} matches)");

    if cli.validate_only {
        println!("Validation-only mode: no matches played.");
        return Ok(());
    }

    let telemetry = init_logging(&config, &outputs)?;
    let summary = MatchRunner::new(config, outputs).run()?;

    println!(
        "Run '{run_id}' complete: {} matches → {}",
        summary.matches_played,
        summary.jsonl_path.display()
    );
    println!(
        "Team A {} / Team B {} / draws {}",
        summary.tally.team_a_wins, summary.tally.team_b_wins, summary.tally.draws
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = telemetry.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
