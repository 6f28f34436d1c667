use std::time::Duration;

use nametag_model::BackoffStrategy;

use crate::policy::BackoffPolicy;

pub fn to_backoff_policy(s: &BackoffStrategy) -> BackoffPolicy {
    BackoffPolicy {
        jitter: s.jitter,
        min: Duration::from_millis(s.min_ms),
        max: Duration::from_millis(s.max_ms),
    }
}
