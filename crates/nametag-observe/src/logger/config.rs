use serde::{Deserialize, Serialize};
use std::{io::IsTerminal, path::PathBuf};

use crate::logger::object::{LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format of the stderr stream.
    pub format: LoggerFormat,
    /// Log level filter expression (e.g., "info", "nametag_core=debug,info").
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    /// Whether to use colored output on the stream.
    pub use_color: bool,
    /// Append-only log file receiving the same events as the stream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: false,
            use_color: true,
            file: None,
        }
    }
}

impl LoggerConfig {
    /// Color is used only when enabled and stderr is a terminal.
    ///
    /// Call during logger initialization, not during config parsing.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}
