use std::time::Duration;

use nametag_model::JitterStrategy;
use rand::Rng;

/// Runtime form of [`nametag_model::BackoffStrategy`].
///
/// Bounds are inclusive. `min <= max` is checked by `AllocationSpec::validate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub jitter: JitterStrategy,
    pub min: Duration,
    pub max: Duration,
}

impl BackoffPolicy {
    /// Pick the wait before the next verification read.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        match self.jitter {
            JitterStrategy::None => self.min,
            JitterStrategy::Uniform => {
                let lo = millis(self.min);
                let hi = millis(self.max).max(lo);
                Duration::from_millis(rng.gen_range(lo..=hi))
            }
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::to_backoff_policy;
    use nametag_model::BackoffStrategy;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn uniform_samples_stay_within_bounds() {
        let policy = to_backoff_policy(&BackoffStrategy::default());
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let d = policy.sample(&mut rng);
            assert!(d >= Duration::from_secs(1) && d <= Duration::from_secs(10), "{d:?}");
        }
    }

    #[test]
    fn uniform_samples_are_not_constant() {
        let policy = to_backoff_policy(&BackoffStrategy::default());
        let mut rng = StdRng::seed_from_u64(42);

        let first = policy.sample(&mut rng);
        assert!((0..100).any(|_| policy.sample(&mut rng) != first));
    }

    #[test]
    fn none_waits_exactly_min() {
        let policy = to_backoff_policy(&BackoffStrategy {
            jitter: JitterStrategy::None,
            min_ms: 250,
            max_ms: 9_000,
        });
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..10 {
            assert_eq!(policy.sample(&mut rng), Duration::from_millis(250));
        }
    }

    #[test]
    fn degenerate_range_returns_the_bound() {
        let policy = to_backoff_policy(&BackoffStrategy {
            jitter: JitterStrategy::Uniform,
            min_ms: 0,
            max_ms: 0,
        });
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(policy.sample(&mut rng), Duration::ZERO);
    }
}
