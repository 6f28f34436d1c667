mod config;
mod error;
mod init;
mod object;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use init::open_log_file;
pub use object::LoggerFormat;
pub use object::LoggerLevel;
pub use object::{LoggerTimeZone, init_local_offset};

/// Initializes the global tracing subscriber with the given configuration.
///
/// Events go to stderr in the configured format, and additionally to
/// [`LoggerConfig::file`] when set. Call once, early in `main()`; for
/// `LoggerTimeZone::Local` call [`init_local_offset`] first.
///
/// # Examples
/// ```rust
/// use nametag_observe::{LoggerConfig, LoggerLevel, init_logger};
///
/// let config = LoggerConfig {
///     level: LoggerLevel::from_verbosity(1, false),
///     ..Default::default()
/// };
/// init_logger(&config).expect("Failed to initialize logger");
///
/// tracing::debug!("logger initialized");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LoggerFormat::Text => init::logger_text(cfg),
        LoggerFormat::Json => init::logger_json(cfg),
        LoggerFormat::Journald => init::logger_journald(cfg),
    }
}
