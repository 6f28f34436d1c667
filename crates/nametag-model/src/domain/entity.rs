use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Tags;

/// Opaque registry identifier of an entity (e.g. an instance id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A registry entity together with its tag collection.
///
/// `tags == None` means the registry reported no tag collection at all,
/// which is not the same as an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

impl Entity {
    /// Entity with an empty tag collection.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            tags: Some(Tags::new()),
        }
    }

    /// Entity without any tag collection.
    pub fn untagged(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            tags: None,
        }
    }

    /// Builder-style helper that sets one tag, creating the collection if needed.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_tag(key, value);
        self
    }

    /// Returns `true` if the entity carries a tag collection (possibly empty).
    pub fn has_tags(&self) -> bool {
        self.tags.is_some()
    }

    /// Value of `key`, if the collection exists and the tag is set.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.as_ref().and_then(|t| t.get(key))
    }

    /// Returns `true` if `key` is set.
    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.as_ref().is_some_and(|t| t.contains(key))
    }

    /// Overwrite one tag, creating the collection if it was absent.
    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.get_or_insert_with(Tags::new).insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_differs_from_empty() {
        let empty = Entity::new("i-1");
        let bare = Entity::untagged("i-1");

        assert!(empty.has_tags());
        assert!(!bare.has_tags());
        assert!(empty.tag("Name").is_none());
        assert!(bare.tag("Name").is_none());
    }

    #[test]
    fn set_tag_creates_collection() {
        let mut e = Entity::untagged("i-1");
        e.set_tag("Name", "web1");

        assert!(e.has_tags());
        assert_eq!(e.tag("Name"), Some("web1"));
        assert!(e.has_tag("Name"));
        assert!(!e.has_tag("Group"));
    }

    #[test]
    fn serde_omits_missing_tags() {
        let json = serde_json::to_string(&Entity::untagged("i-1")).unwrap();
        assert_eq!(json, r#"{"id":"i-1"}"#);

        let back: Entity = serde_json::from_str(&json).unwrap();
        assert!(back.tags.is_none());

        let back: Entity = serde_json::from_str(r#"{"id":"i-2","tags":{}}"#).unwrap();
        assert_eq!(back.tags.map(|t| t.len()), Some(0));
    }
}
