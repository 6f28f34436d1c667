use nametag_model::{AllocationSpec, Entity, TagFilter};
use tracing::{debug, warn};

use crate::{
    error::{AllocError, AllocResult},
    registry::Registry,
};

/// Naming namespace resolved for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix every candidate starts with.
    pub prefix: String,
    /// Group value, if any.
    pub group: Option<String>,
    /// Query returning every member of the namespace.
    pub filter: TagFilter,
    /// Whether the target must be tagged with `group` before the first attempt.
    pub join: bool,
}

/// Fetch the target and check that it can be named.
pub fn fetch_target(registry: &dyn Registry, spec: &AllocationSpec) -> AllocResult<Entity> {
    let target = registry
        .find_entities(&TagFilter::entity(spec.target.clone()))?
        .into_iter()
        .find(|e| e.id == spec.target)
        .ok_or_else(|| AllocError::EntityNotFound(spec.target.clone()))?;

    check_target(&target, spec)?;
    Ok(target)
}

/// Preconditions on an already fetched target.
pub fn check_target(target: &Entity, spec: &AllocationSpec) -> AllocResult<()> {
    if !target.has_tags() {
        return Err(AllocError::TagsMissing(target.id.clone()));
    }

    if let Some(name) = target.tag(&spec.name_tag) {
        if !spec.overwrite {
            return Err(AllocError::AlreadyNamed {
                entity: target.id.clone(),
                name: name.to_string(),
            });
        }
        warn!(entity = %target.id, existing = name, "existing name will be overwritten");
    }
    Ok(())
}

/// Derive prefix and group for the target.
///
/// Explicit values win: the explicit prefix over the group value, the explicit
/// group over the entity's group tag.
pub fn resolve_namespace(target: &Entity, spec: &AllocationSpec) -> AllocResult<Namespace> {
    let tagged_group = target.tag(&spec.group_tag);
    let group = spec
        .explicit_group()
        .or(tagged_group)
        .map(str::to_string);

    let prefix = match (spec.explicit_prefix(), group.as_deref()) {
        (Some(prefix), _) => prefix.to_string(),
        (None, Some(group)) => group.to_string(),
        (None, None) => {
            return Err(AllocError::GroupTagMissing {
                entity: target.id.clone(),
                group_tag: spec.group_tag.clone(),
            });
        }
    };

    let filter = match group.as_deref() {
        Some(g) => TagFilter::tag_equals(spec.group_tag.clone(), g),
        None => TagFilter::tag_exists(spec.name_tag.clone()),
    };
    let join = match (spec.explicit_group(), tagged_group) {
        (Some(wanted), Some(actual)) => wanted != actual,
        (Some(_), None) => true,
        (None, _) => false,
    };

    debug!(entity = %target.id, %prefix, ?group, %filter, join, "namespace resolved");
    Ok(Namespace {
        prefix,
        group,
        filter,
        join,
    })
}
