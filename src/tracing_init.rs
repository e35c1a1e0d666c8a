use time::format_description::well_known::Rfc3339;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::naming::local_offset;
use crate::{DiagnosticsConfig, Error, Result};

/// Install a global subscriber for the crate's own diagnostics.
///
/// Category loggers never go through the global subscriber; this only decides
/// where messages such as sweep summaries and skipped files end up.
///
/// `RUST_LOG` wins when set. Otherwise the configured level applies, made
/// `cli_verbose` steps more verbose.
pub fn init_logging(config: &DiagnosticsConfig, cli_verbose: Option<u8>) -> Result<()> {
    let env_filter = diagnostics_filter(config, cli_verbose)?;

    if config.console {
        init_console(env_filter)
    } else {
        init_no_logging(env_filter)
    }
}

/// Initialize console logging.
fn init_console(env_filter: EnvFilter) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(OffsetTime::new(local_offset(), Rfc3339))
        .with_ansi(cfg!(feature = "ansi"))
        .with_thread_ids(false)
        .with_thread_names(false)
        .boxed();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(())
}

/// Initialize with no output (for testing or when diagnostics are disabled).
fn init_no_logging(env_filter: EnvFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter)
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(())
}

/// Filter from `RUST_LOG`, falling back to the configured level.
fn diagnostics_filter(config: &DiagnosticsConfig, cli_verbose: Option<u8>) -> Result<EnvFilter> {
    let level = if config.level.trim().is_empty() {
        LevelFilter::INFO
    } else {
        config
            .level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|e| Error::Init(format!("invalid level {:?}: {}", config.level, e)))?
    };

    Ok(EnvFilter::builder()
        .with_default_directive(more_verbose(level, cli_verbose.unwrap_or(0)).into())
        .from_env_lossy())
}

/// Move `level` `steps` notches towards TRACE.
fn more_verbose(level: LevelFilter, steps: u8) -> LevelFilter {
    (0..steps).fold(level, |level, _| match level {
        LevelFilter::OFF => LevelFilter::ERROR,
        LevelFilter::ERROR => LevelFilter::WARN,
        LevelFilter::WARN => LevelFilter::INFO,
        LevelFilter::INFO => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    })
}
