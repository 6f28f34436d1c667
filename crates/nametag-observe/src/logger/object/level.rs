use std::{convert::TryFrom, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::LoggerError;

/// Validated `tracing_subscriber::EnvFilter` expression.
///
/// Stores the raw filter string (e.g. `"info"`, `"nametag_core=trace,warn"`) and
/// turns it into an `EnvFilter` on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    /// # Examples
    /// ```
    /// use nametag_observe::LoggerLevel;
    ///
    /// let lvl = LoggerLevel::new("nametag_core=debug,info").unwrap();
    /// assert_eq!(lvl.as_str(), "nametag_core=debug,info");
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LoggerError> {
        Self::try_from(s.into())
    }

    /// Level picked from command-line verbosity flags.
    ///
    /// `quiet` wins over any number of `-v`: warnings and errors only.
    /// Otherwise `0` is info, `1` debug and `2+` trace.
    ///
    /// # Examples
    /// ```
    /// use nametag_observe::LoggerLevel;
    ///
    /// assert_eq!(LoggerLevel::from_verbosity(0, false).as_str(), "info");
    /// assert_eq!(LoggerLevel::from_verbosity(2, false).as_str(), "trace");
    /// assert_eq!(LoggerLevel::from_verbosity(1, true).as_str(), "warn");
    /// ```
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let lvl = match (quiet, verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        LoggerLevel(lvl.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.as_str()).expect("LoggerLevel is always valid after construction")
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        LoggerLevel("info".to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(LoggerLevel(s)),
            Err(e) => Err(LoggerError::InvalidLevel(format!("{s}: {e}"))),
        }
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}
