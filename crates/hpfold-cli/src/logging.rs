use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    fmt::{self, format::FmtSpan},
    prelude::*,
    registry::LookupSpan,
};

const SIMULATOR_TARGET: &str = "hpfold";

pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `-v` raises the simulator's own events; dependencies never log below WARN.
pub fn targets_for(verbosity: u8, quiet: bool) -> Targets {
    let level = level_for(verbosity, quiet);
    Targets::new()
        .with_default(level.min(LevelFilter::WARN))
        .with_target(SIMULATOR_TARGET, level)
}

/// Plain-text layer that also records how long each generation span took.
fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
}

/// Installs the global subscriber. A log file keeps INFO and above even when the console is quiet.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(targets_for(verbosity, quiet));

    let subscriber = tracing_subscriber::registry().with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(&path).map_err(CliError::Io)?;
        let file_filter = targets_for(verbosity.max(1), false);
        subscriber
            .with(file_layer(file).with_filter(file_filter))
            .init();
    } else {
        subscriber.init();
    }

    Ok(())
}
