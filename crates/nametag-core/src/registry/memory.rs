use std::sync::{Mutex, RwLock};

use nametag_model::{Entity, EntityId, TagFilter};
use tracing::trace;

use super::{Registry, RegistryError, RegistryResult};

/// One tag write observed by a [`MemoryRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWrite {
    pub entity: EntityId,
    pub key: String,
    pub value: String,
}

/// In-process registry holding entities in insertion order.
///
/// Reads and writes are immediately consistent. Every write is also recorded
/// so callers can inspect what a run changed.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entities: RwLock<Vec<Entity>>,
    writes: Mutex<Vec<TagWrite>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with `entities`.
    pub fn with_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            entities: RwLock::new(entities.into_iter().collect()),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Add an entity, replacing any entity with the same id.
    pub fn insert(&self, entity: Entity) -> RegistryResult<()> {
        let mut guard = self.entities.write().map_err(|_| poisoned())?;
        match guard.iter_mut().find(|e| e.id == entity.id) {
            Some(slot) => *slot = entity,
            None => guard.push(entity),
        }
        Ok(())
    }

    /// Current state of one entity.
    pub fn get(&self, id: &EntityId) -> Option<Entity> {
        self.entities
            .read()
            .ok()
            .and_then(|guard| guard.iter().find(|e| &e.id == id).cloned())
    }

    /// All writes issued so far, oldest first.
    pub fn writes(&self) -> Vec<TagWrite> {
        self.writes
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Registry for MemoryRegistry {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn find_entities(&self, filter: &TagFilter) -> RegistryResult<Vec<Entity>> {
        let guard = self.entities.read().map_err(|_| poisoned())?;
        let found: Vec<Entity> = guard.iter().filter(|e| filter.matches(e)).cloned().collect();
        trace!(%filter, found = found.len(), "memory registry query");
        Ok(found)
    }

    fn write_tag(&self, entity: &EntityId, key: &str, value: &str) -> RegistryResult<()> {
        {
            let mut guard = self.entities.write().map_err(|_| poisoned())?;
            let target = guard
                .iter_mut()
                .find(|e| &e.id == entity)
                .ok_or_else(|| RegistryError::UnknownEntity(entity.clone()))?;
            target.set_tag(key, value);
        }

        self.writes.lock().map_err(|_| poisoned())?.push(TagWrite {
            entity: entity.clone(),
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }
}

fn poisoned() -> RegistryError {
    RegistryError::Unavailable("memory registry lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MemoryRegistry {
        MemoryRegistry::with_entities([
            Entity::new("i-1").with_tag("Group", "web").with_tag("Name", "web1"),
            Entity::new("i-2").with_tag("Group", "web"),
            Entity::new("i-3").with_tag("Group", "db"),
            Entity::untagged("i-4"),
        ])
    }

    #[test]
    fn find_by_group_tag() {
        let reg = registry();
        let web = reg
            .find_entities(&TagFilter::tag_equals("Group", "web"))
            .unwrap();

        let ids: Vec<_> = web.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["i-1", "i-2"]);
    }

    #[test]
    fn write_tag_is_visible_and_recorded() {
        let reg = registry();
        let id = EntityId::new("i-2");

        reg.write_tag(&id, "Name", "web2").unwrap();

        assert_eq!(reg.get(&id).unwrap().tag("Name"), Some("web2"));
        assert_eq!(
            reg.writes(),
            vec![TagWrite {
                entity: id,
                key: "Name".into(),
                value: "web2".into(),
            }]
        );
    }

    #[test]
    fn write_tag_creates_missing_collection() {
        let reg = registry();
        let id = EntityId::new("i-4");

        reg.write_tag(&id, "Group", "web").unwrap();
        assert_eq!(reg.get(&id).unwrap().tag("Group"), Some("web"));
    }

    #[test]
    fn write_to_unknown_entity_fails() {
        let reg = registry();
        let err = reg
            .write_tag(&EntityId::new("i-missing"), "Name", "x")
            .unwrap_err();

        assert!(matches!(err, RegistryError::UnknownEntity(id) if id.as_str() == "i-missing"));
        assert!(reg.writes().is_empty());
    }

    #[test]
    fn insert_replaces_same_id() {
        let reg = registry();
        reg.insert(Entity::new("i-1")).unwrap();

        assert!(reg.get(&EntityId::new("i-1")).unwrap().tag("Name").is_none());
        assert_eq!(reg.find_entities(&TagFilter::tag_exists("Group")).unwrap().len(), 2);
    }
}
