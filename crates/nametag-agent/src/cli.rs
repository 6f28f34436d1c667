//! Command-line surface of the `nametag` binary.
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use nametag_model::{
    AllocationSpec, BackoffStrategy, DEFAULT_GROUP_TAG, DEFAULT_NAME_TAG, JitterStrategy,
};
use nametag_observe::{LoggerConfig, LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Assign a unique `<prefix><n>` name tag to an entity of a tagged group.
#[derive(Parser, Debug)]
#[command(name = "nametag", version)]
#[command(about = "Assign a unique name to an entity using only its tag registry")]
pub struct Args {
    /// Entity (instance) identifier to name
    #[arg(value_name = "ENTITY_ID")]
    pub entity: String,

    /// Tag receiving the name
    #[arg(short = 'n', long, default_value = DEFAULT_NAME_TAG)]
    pub name_tag: String,

    /// Tag holding the group value
    #[arg(short = 'g', long, default_value = DEFAULT_GROUP_TAG)]
    pub group_tag: String,

    /// Name prefix; derived from the group value when empty
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Group value to join instead of reading the group tag
    #[arg(long)]
    pub group: Option<String>,

    /// Replace a name that is already set
    #[arg(short, long)]
    pub overwrite: bool,

    /// Commit+verify rounds before giving up
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: u32,

    /// Wait strategy between commit and verification (uniform|none)
    #[arg(long, default_value_t = JitterStrategy::Uniform)]
    pub jitter: JitterStrategy,

    /// Lower bound of the verification wait, in milliseconds
    #[arg(long, default_value_t = 1_000)]
    pub jitter_min_ms: u64,

    /// Upper bound of the verification wait, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    pub jitter_max_ms: u64,

    /// JSON registry document
    #[arg(long, env = "NAMETAG_REGISTRY", value_name = "PATH")]
    pub registry: PathBuf,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Log stream format (text|json|journald)
    #[arg(long, default_value_t = LoggerFormat::Text)]
    pub log_format: LoggerFormat,

    /// Timezone of log timestamps (utc|local)
    #[arg(long, default_value_t = LoggerTimeZone::Utc)]
    pub log_tz: LoggerTimeZone,

    /// Also append every event to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            format: self.log_format,
            level: LoggerLevel::from_verbosity(self.verbose, self.quiet),
            tz: self.log_tz,
            file: self.log_file.clone(),
            ..Default::default()
        }
    }

    pub fn allocation_spec(&self) -> AllocationSpec {
        let mut spec = AllocationSpec::new(self.entity.as_str())
            .with_name_tag(&self.name_tag)
            .with_group_tag(&self.group_tag)
            .with_overwrite(self.overwrite)
            .with_retries(self.retries)
            .with_backoff(BackoffStrategy {
                jitter: self.jitter,
                min_ms: self.jitter_min_ms,
                max_ms: self.jitter_max_ms,
            });
        if !self.prefix.is_empty() {
            spec = spec.with_prefix(&self.prefix);
        }
        if let Some(group) = &self.group {
            spec = spec.with_group(group);
        }
        spec
    }
}
