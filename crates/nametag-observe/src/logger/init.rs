use std::{
    fs::{File, OpenOptions},
    path::Path,
    sync::Mutex,
};

use tracing::Subscriber;
use tracing_subscriber::{
    Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

use crate::logger::{
    config::LoggerConfig,
    error::{LoggerError, LoggerResult},
    object::{LoggerFormat, LoggerRfc3339},
};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Initializes text logger on stderr.
pub fn logger_text(cfg: &LoggerConfig) -> LoggerResult<()> {
    let filter = cfg.level.to_env_filter();
    let stream = fmt::layer()
        .with_ansi(cfg.should_use_color())
        .with_target(cfg.with_targets)
        .with_timer(LoggerRfc3339::new(cfg.tz))
        .with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry().with(filter).with(stream);
    let file = file_layer(cfg)?;
    init_subscriber(subscriber.with(file))
}

/// Initializes JSON (structured) logger on stderr.
pub fn logger_json(cfg: &LoggerConfig) -> LoggerResult<()> {
    let filter = cfg.level.to_env_filter();
    let stream = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(LoggerRfc3339::new(cfg.tz))
        .with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry().with(filter).with(stream);
    let file = file_layer(cfg)?;
    init_subscriber(subscriber.with(file))
}

/// Initializes journald logger (Linux only).
#[cfg(target_os = "linux")]
pub fn logger_journald(cfg: &LoggerConfig) -> LoggerResult<()> {
    let filter = cfg.level.to_env_filter();
    let journald =
        tracing_journald::layer().map_err(|e| LoggerError::JournaldInitFailed(e.to_string()))?;

    let subscriber = tracing_subscriber::registry().with(filter).with(journald);
    let file = file_layer(cfg)?;
    init_subscriber(subscriber.with(file))
}

#[cfg(not(target_os = "linux"))]
pub fn logger_journald(_cfg: &LoggerConfig) -> LoggerResult<()> {
    Err(LoggerError::JournaldNotSupported)
}

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> LoggerResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::LogFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Layer writing to the configured log file, if any.
///
/// JSON stays JSON; every other format is written as plain text without colors.
fn file_layer<S>(cfg: &LoggerConfig) -> LoggerResult<Option<BoxedLayer<S>>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let Some(path) = cfg.file.as_deref() else {
        return Ok(None);
    };
    let writer = Mutex::new(open_log_file(path)?);
    let timer = LoggerRfc3339::new(cfg.tz);

    let layer = match cfg.format {
        LoggerFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(cfg.with_targets)
            .with_timer(timer)
            .with_writer(writer)
            .boxed(),
        _ => fmt::layer()
            .with_ansi(false)
            .with_target(cfg.with_targets)
            .with_timer(timer)
            .with_writer(writer)
            .boxed(),
    };
    Ok(Some(layer))
}

/// Installs the subscriber as the global default.
fn init_subscriber<S>(subscriber: S) -> LoggerResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}
