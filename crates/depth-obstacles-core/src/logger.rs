//! Stderr logger for the detection pipeline.
//!
//! Every line names the pipeline stage that emitted it, e.g.
//! `[  0.412s DEBUG segment] 3 runs from 212 points`. Records from crates
//! outside the workspace are dropped unless [`LogSettings::foreign`] is set,
//! and single stages can be muted while others stay at `debug`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const WORKSPACE_PREFIX: &str = "depth_obstacles";

/// What the stderr logger prints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    /// Also print records of dependencies.
    pub foreign: bool,
    /// Stage names (`border`, `segment`, `fallback`, ...) to silence.
    pub muted_stages: Vec<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            foreign: false,
            muted_stages: Vec::new(),
        }
    }
}

struct StageLogger {
    settings: LogSettings,
    started: Instant,
}

/// Stage name of a workspace target: the last module path segment, without
/// the crate prefix. `None` for targets of other crates.
fn stage_of(target: &str) -> Option<&str> {
    if !target.starts_with(WORKSPACE_PREFIX) {
        return None;
    }
    let last = target.rsplit("::").next().unwrap_or(target);
    Some(last.strip_prefix("depth_obstacles_").unwrap_or(last))
}

impl StageLogger {
    fn accepts(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.settings.level {
            return false;
        }
        match stage_of(metadata.target()) {
            Some(stage) => !self.settings.muted_stages.iter().any(|m| m == stage),
            None => self.settings.foreign,
        }
    }
}

impl Log for StageLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.accepts(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.accepts(record.metadata()) {
            return;
        }

        let target = record.target();
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:7.3}s {:>5} {}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            stage_of(target).unwrap_or(target),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StageLogger> = OnceLock::new();

/// Install the stderr logger.
///
/// Only the first call installs anything; later calls keep the first
/// settings and return `Ok`.
pub fn init(settings: LogSettings) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let level = settings.level;
    let logger = LOGGER.get_or_init(|| StageLogger {
        settings,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// [`init`] with every stage at `level` and dependencies silenced.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    init(LogSettings {
        level,
        ..LogSettings::default()
    })
}

/// Install a `tracing` subscriber that reports stage spans when they close.
///
/// `RUST_LOG` wins when set; otherwise the workspace logs at `info` and
/// dependencies at `warn`.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{WORKSPACE_PREFIX}=info")));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
