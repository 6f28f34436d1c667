use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// Controls how the post-commit wait is randomized.
///
/// Concurrent allocators racing on one group verify their writes after a wait.
/// A random wait desynchronizes them, so two allocators rarely re-read the group
/// at the same instant before each other's write has propagated.
///
/// Strategies:
/// - `Uniform`: wait is sampled uniformly from `[min, max]` (inclusive).
/// - `None`: no randomness, always wait exactly `min`.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum JitterStrategy {
    /// Uniform jitter over the whole configured range.
    #[default]
    Uniform,
    /// Fixed wait of the configured minimum.
    None,
}

impl FromStr for JitterStrategy {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "full" | "default" => Ok(JitterStrategy::Uniform),
            "none" | "fixed" => Ok(JitterStrategy::None),
            other => Err(ModelError::UnknownJitter(other.to_string())),
        }
    }
}

impl fmt::Display for JitterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JitterStrategy::Uniform => "uniform",
            JitterStrategy::None => "none",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitive() {
        assert_eq!(
            "Uniform".parse::<JitterStrategy>().unwrap(),
            JitterStrategy::Uniform
        );
        assert_eq!(
            " full ".parse::<JitterStrategy>().unwrap(),
            JitterStrategy::Uniform
        );
        assert_eq!(
            "NONE".parse::<JitterStrategy>().unwrap(),
            JitterStrategy::None
        );
    }

    #[test]
    fn rejects_unknown() {
        let err = "decorrelated".parse::<JitterStrategy>().unwrap_err();
        assert!(matches!(err, ModelError::UnknownJitter(s) if s == "decorrelated"));
    }

    #[test]
    fn display_parses_back() {
        for j in [JitterStrategy::Uniform, JitterStrategy::None] {
            assert_eq!(j.to_string().parse::<JitterStrategy>().unwrap(), j);
        }
    }
}
