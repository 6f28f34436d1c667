mod tags;
pub use tags::Tags;

mod entity;
pub use entity::{Entity, EntityId};

mod filter;
pub use filter::TagFilter;

mod snapshot;
pub use snapshot::{Snapshot, candidate_name};

mod constants;
pub use constants::{DEFAULT_GROUP_TAG, DEFAULT_NAME_TAG, DEFAULT_RETRIES};
