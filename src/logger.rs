use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

/// Where console log lines go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConsoleOutput {
    /// Below `Warn` to stdout, the rest to stderr.
    Split,
    /// Everything to stderr, leaving stdout to the program output.
    Stderr,
}

fn add_console_sinks(builder: &mut LoggerBuilder, console: ConsoleOutput) -> spdlog::Result<()> {
    if console == ConsoleOutput::Stderr {
        let stderr = Arc::new(StdStreamSink::builder()
            .std_stream(StdStream::Stderr)
            .build()?);
        builder.sink(stderr);
        return Ok(());
    }

    let stdout = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .level_filter(LevelFilter::MoreVerbose(Level::Warn))
        .build()?);

    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
        .build()?);

    builder.sink(stdout).sink(stderr);

    Ok(())
}

/// Without a `[log]` section the default spdlog logger is kept, unless the
/// console has to stay off stdout.
pub fn configure_logger(config: &Config, console: ConsoleOutput) -> spdlog::Result<()> {
    let (level, location, log_to_console) = match config.log {
        Some(ref log) => (log.level, log.location.as_ref(), log.log_to_console),
        None if console == ConsoleOutput::Split => return Ok(()),
        None => (LogLevel::Info, None, true),
    };

    let mut builder = Logger::builder();

    if let Some(location) = location {
        let daily_sink = Arc::new(RotatingFileSink::builder()
            .base_path(location)
            .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
            .max_files(30)
            .rotate_on_open(false)
            .build()?);
        builder.sink(daily_sink);
    }

    if log_to_console || location.is_none() {
        add_console_sinks(&mut builder, console)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(level.into()));

    spdlog::set_default_logger(logger);

    Ok(())
}
