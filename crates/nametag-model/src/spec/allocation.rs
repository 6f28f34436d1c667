use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_GROUP_TAG, DEFAULT_NAME_TAG, DEFAULT_RETRIES, EntityId,
    error::ModelResult,
    strategy::BackoffStrategy,
};

/// Declarative description of one naming run.
///
/// `AllocationSpec` says *which* entity gets named, *where* the name and group live,
/// and *how hard* the allocator may try:
/// - target and tag keys (`target`, `name_tag`, `group_tag`)
/// - naming namespace overrides (`prefix`, `group`)
/// - policy (`overwrite`, `retries`, `backoff`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSpec {
    /// Entity that receives the name.
    pub target: EntityId,
    /// Tag key the allocated name is written to.
    pub name_tag: String,
    /// Tag key holding the group value.
    ///
    /// Members of the same group share one namespace.
    pub group_tag: String,
    /// Explicit name prefix.
    ///
    /// When empty or absent the prefix is derived from the group value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Explicit group value.
    ///
    /// Takes priority over the entity's group tag; the allocator writes it to the
    /// entity's group tag when they differ.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Whether an already present name may be replaced.
    #[serde(default)]
    pub overwrite: bool,
    /// Number of commit+verify rounds before giving up.
    pub retries: u32,
    /// Wait between a commit and its verification read.
    #[serde(default)]
    pub backoff: BackoffStrategy,
}

impl AllocationSpec {
    /// Spec with default tag keys, retry budget and backoff.
    pub fn new(target: impl Into<EntityId>) -> Self {
        Self {
            target: target.into(),
            name_tag: DEFAULT_NAME_TAG.to_string(),
            group_tag: DEFAULT_GROUP_TAG.to_string(),
            prefix: None,
            group: None,
            overwrite: false,
            retries: DEFAULT_RETRIES,
            backoff: BackoffStrategy::default(),
        }
    }

    pub fn with_name_tag(mut self, key: impl Into<String>) -> Self {
        self.name_tag = key.into();
        self
    }

    pub fn with_group_tag(mut self, key: impl Into<String>) -> Self {
        self.group_tag = key.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Explicit prefix, if one was supplied and is non-empty.
    pub fn explicit_prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Explicit group, if one was supplied and is non-empty.
    pub fn explicit_group(&self) -> Option<&str> {
        self.group.as_deref().filter(|g| !g.is_empty())
    }

    pub fn validate(&self) -> ModelResult<()> {
        self.backoff.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let spec = AllocationSpec::new("i-1");

        assert_eq!(spec.target.as_str(), "i-1");
        assert_eq!(spec.name_tag, "Name");
        assert_eq!(spec.group_tag, "Group");
        assert_eq!(spec.retries, 10);
        assert!(!spec.overwrite);
        assert!(spec.explicit_prefix().is_none());
        assert!(spec.explicit_group().is_none());
    }

    #[test]
    fn empty_prefix_counts_as_absent() {
        let spec = AllocationSpec::new("i-1").with_prefix("").with_group("");

        assert!(spec.explicit_prefix().is_none());
        assert!(spec.explicit_group().is_none());

        let spec = spec.with_prefix("db-");
        assert_eq!(spec.explicit_prefix(), Some("db-"));
    }

    #[test]
    fn serde_fills_optional_fields() {
        let json = r#"{"target":"i-9","nameTag":"Host","groupTag":"Role","retries":3}"#;
        let spec: AllocationSpec = serde_json::from_str(json).unwrap();

        assert_eq!(spec.target.as_str(), "i-9");
        assert_eq!(spec.name_tag, "Host");
        assert_eq!(spec.group_tag, "Role");
        assert_eq!(spec.retries, 3);
        assert!(!spec.overwrite);
        assert_eq!(spec.backoff, BackoffStrategy::default());
    }
}
