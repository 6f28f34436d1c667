use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Entity, EntityId};

/// Key/value predicate used to query the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum TagFilter {
    /// Entity id equals the given id.
    EntityId { id: EntityId },
    /// Tag `key` is set to exactly `value`.
    TagEquals { key: String, value: String },
    /// Tag `key` is set, whatever its value.
    TagExists { key: String },
}

impl TagFilter {
    pub fn entity(id: impl Into<EntityId>) -> Self {
        Self::EntityId { id: id.into() }
    }

    pub fn tag_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::TagEquals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn tag_exists(key: impl Into<String>) -> Self {
        Self::TagExists { key: key.into() }
    }

    /// Evaluate the predicate against one entity.
    ///
    /// Backends that cannot push the filter down to the store use this directly.
    pub fn matches(&self, entity: &Entity) -> bool {
        match self {
            TagFilter::EntityId { id } => &entity.id == id,
            TagFilter::TagEquals { key, value } => entity.tag(key) == Some(value.as_str()),
            TagFilter::TagExists { key } => entity.has_tag(key),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::EntityId { id } => write!(f, "entity-id={id}"),
            TagFilter::TagEquals { key, value } => write!(f, "tag:{key}={value}"),
            TagFilter::TagExists { key } => write!(f, "tag-key={key}"),
        }
    }
}
