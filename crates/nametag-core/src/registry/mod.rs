//! Registry capability used by the allocator to read and tag entities.
//!
//! The registry is eventually consistent and offers no conditional writes:
//! every [`Registry::write_tag`] is a last-writer-wins overwrite of one tag.
mod error;
pub use error::{RegistryError, RegistryResult};

mod memory;
pub use memory::{MemoryRegistry, TagWrite};

mod file;
pub use file::{JsonFileRegistry, RegistryDocument};

use nametag_model::{Entity, EntityId, TagFilter};

/// Tag-based entity registry.
///
/// Implementations must tolerate concurrent writers from other processes;
/// the allocator never assumes exclusive access.
pub trait Registry: Send + Sync {
    /// Backend name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Return every entity matching `filter`, each with its full tag collection.
    fn find_entities(&self, filter: &TagFilter) -> RegistryResult<Vec<Entity>>;

    /// Overwrite a single tag on one entity.
    fn write_tag(&self, entity: &EntityId, key: &str, value: &str) -> RegistryResult<()>;
}
