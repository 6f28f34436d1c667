mod backoff;

pub use backoff::to_backoff_policy;
