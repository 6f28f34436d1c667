use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// Bounds of the randomized wait between a commit and its verification read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BackoffStrategy {
    pub jitter: super::JitterStrategy,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self {
            jitter: super::JitterStrategy::Uniform,
            min_ms: 1_000,
            max_ms: 10_000,
        }
    }
}

impl BackoffStrategy {
    /// Rejects an empty range.
    pub fn validate(&self) -> ModelResult<()> {
        if self.min_ms > self.max_ms {
            return Err(ModelError::Invalid(format!(
                "backoff min_ms ({}) is greater than max_ms ({})",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }
}
