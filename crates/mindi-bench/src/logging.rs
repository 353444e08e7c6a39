use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{Level, event};
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{BenchConfig, LoggingConfig, ResolvedOutputs};

const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Holds the telemetry writer open. Dropping it flushes pending lines.
pub struct TelemetryGuard {
    _worker: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Routes `tracing` events from every crate into `telemetry.jsonl`, one JSON
/// object per line, beside the run summary. The first line records the run
/// settings. Returns `None` when structured logging is off.
pub fn init_logging(
    config: &BenchConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<TelemetryGuard>> {
    if !config.logging.enable_structured {
        return Ok(None);
    }

    let telemetry_path = telemetry_path(outputs);
    let file = create_telemetry_file(&telemetry_path)?;
    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(level_filter(&config.logging))
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // Tests may have installed a global subscriber already.
    let _ = tracing::subscriber::set_global_default(subscriber);

    let table = config.table_size();
    event!(
        target: "mindi_bench::run",
        Level::INFO,
        run_id = %config.run_id,
        players = table.players(),
        total_tens = table.total_tens(),
        matches = config.table.matches,
        seed = config.table.seed.unwrap_or(0),
        bot_delay_ms = config.timings.bot_delay_ms,
        trick_delay_ms = config.timings.trick_delay_ms,
        result_delay_ms = config.timings.result_delay_ms,
        "run configured"
    );

    Ok(Some(TelemetryGuard {
        _worker: worker,
        telemetry_path,
    }))
}

fn telemetry_path(outputs: &ResolvedOutputs) -> PathBuf {
    outputs
        .summary_md
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(TELEMETRY_FILE)
}

fn create_telemetry_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory at {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("creating telemetry file at {}", path.display()))
}

/// `RUST_LOG` wins over the configured level.
fn level_filter(logging: &LoggingConfig) -> EnvFilter {
    let level = logging.level().unwrap_or(Level::INFO);
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}
