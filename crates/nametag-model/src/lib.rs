mod domain;
pub use domain::{DEFAULT_GROUP_TAG, DEFAULT_NAME_TAG, DEFAULT_RETRIES};
pub use domain::{Entity, EntityId, Snapshot, TagFilter, Tags, candidate_name};

mod error;
pub use error::{ModelError, ModelResult};

mod spec;
pub use spec::AllocationSpec;

mod strategy;
pub use strategy::{BackoffStrategy, JitterStrategy};
