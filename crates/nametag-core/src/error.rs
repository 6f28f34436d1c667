use thiserror::Error;

use nametag_model::{EntityId, ModelError};

use crate::registry::RegistryError;

/// Coarse classification used to pick a process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The run can never succeed as configured.
    Precondition,
    /// The retry budget ran out while the group was contended.
    Exhausted,
    /// A registry call failed.
    Registry,
    /// The allocation spec itself is unusable.
    Config,
}

#[derive(Debug, Error)]
pub enum AllocError {
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("entity {0} has no tag collection")]
    TagsMissing(EntityId),

    #[error("entity {entity} has no '{group_tag}' tag and no explicit prefix was given")]
    GroupTagMissing { entity: EntityId, group_tag: String },

    #[error("entity {entity} is already named '{name}' (overwrite is disabled)")]
    AlreadyNamed { entity: EntityId, name: String },

    #[error(
        "no unique name with prefix '{prefix}' after {retries} attempts (last candidate: {last_candidate})"
    )]
    Exhausted {
        prefix: String,
        retries: u32,
        last_candidate: String,
    },

    #[error("invalid allocation spec: {0}")]
    InvalidSpec(#[from] ModelError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl AllocError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AllocError::EntityNotFound(_)
            | AllocError::TagsMissing(_)
            | AllocError::GroupTagMissing { .. }
            | AllocError::AlreadyNamed { .. } => ErrorClass::Precondition,
            AllocError::Exhausted { .. } => ErrorClass::Exhausted,
            AllocError::Registry(_) => ErrorClass::Registry,
            AllocError::InvalidSpec(_) => ErrorClass::Config,
        }
    }
}

pub type AllocResult<T> = Result<T, AllocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preconditions_are_classified_together() {
        let id = EntityId::new("i-1");
        let errs = [
            AllocError::EntityNotFound(id.clone()),
            AllocError::TagsMissing(id.clone()),
            AllocError::GroupTagMissing {
                entity: id.clone(),
                group_tag: "Group".into(),
            },
            AllocError::AlreadyNamed {
                entity: id,
                name: "web1".into(),
            },
        ];

        for e in errs {
            assert_eq!(e.class(), ErrorClass::Precondition, "{e}");
        }
    }

    #[test]
    fn exhaustion_is_distinct_from_registry_failure() {
        let exhausted = AllocError::Exhausted {
            prefix: "web".into(),
            retries: 3,
            last_candidate: "web3".into(),
        };
        let registry = AllocError::from(RegistryError::Unavailable("throttled".into()));

        assert_eq!(exhausted.class(), ErrorClass::Exhausted);
        assert_eq!(registry.class(), ErrorClass::Registry);
        assert!(exhausted.to_string().contains("web3"));
    }

    #[test]
    fn already_named_reports_existing_name() {
        let e = AllocError::AlreadyNamed {
            entity: EntityId::new("i-1"),
            name: "web7".into(),
        };
        assert_eq!(
            e.to_string(),
            "entity i-1 is already named 'web7' (overwrite is disabled)"
        );
    }
}
