use std::collections::BTreeSet;

use crate::{Entity, EntityId};

/// Build a candidate name: `prefix` followed by the decimal sequence number.
pub fn candidate_name(prefix: &str, seq: u32) -> String {
    format!("{prefix}{seq}")
}

/// Point-in-time view of a naming namespace.
///
/// Holds one `(id, name)` pair per member, where `name` is the value of the
/// name tag at read time. Stale as soon as it is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    members: Vec<(EntityId, Option<String>)>,
}

impl Snapshot {
    /// Capture the names held by `entities` under `name_tag`.
    pub fn capture<'a, I>(entities: I, name_tag: &str) -> Self
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let members = entities
            .into_iter()
            .map(|e| (e.id.clone(), e.tag(name_tag).map(str::to_string)))
            .collect();
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// First member holding `name`.
    pub fn holder(&self, name: &str) -> Option<&EntityId> {
        self.members
            .iter()
            .find(|(_, n)| n.as_deref() == Some(name))
            .map(|(id, _)| id)
    }

    /// Number of members holding `name`, the caller included.
    pub fn count(&self, name: &str) -> usize {
        self.members
            .iter()
            .filter(|(_, n)| n.as_deref() == Some(name))
            .count()
    }

    /// Names held by members other than `me`.
    pub fn taken_by_others(&self, me: &EntityId) -> BTreeSet<&str> {
        self.members
            .iter()
            .filter(|(id, _)| id != me)
            .filter_map(|(_, n)| n.as_deref())
            .collect()
    }

    /// Returns `true` if some member other than `me` holds `name`.
    pub fn held_by_other(&self, me: &EntityId, name: &str) -> bool {
        self.members
            .iter()
            .any(|(id, n)| id != me && n.as_deref() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Vec<Entity> {
        vec![
            Entity::new("i-1").with_tag("Name", "web1"),
            Entity::new("i-2").with_tag("Name", "web3"),
            Entity::new("i-3"),
            Entity::untagged("i-4"),
        ]
    }

    #[test]
    fn candidate_appends_sequence() {
        assert_eq!(candidate_name("web", 1), "web1");
        assert_eq!(candidate_name("web-", 12), "web-12");
        assert_eq!(candidate_name("", 3), "3");
    }

    #[test]
    fn capture_keeps_unnamed_members() {
        let snap = Snapshot::capture(&group(), "Name");

        assert_eq!(snap.len(), 4);
        assert_eq!(snap.count("web1"), 1);
        assert_eq!(snap.count("web2"), 0);
    }

    #[test]
    fn holder_names_the_member() {
        let snap = Snapshot::capture(&group(), "Name");

        assert_eq!(snap.holder("web3"), Some(&EntityId::new("i-2")));
        assert_eq!(snap.holder("web2"), None);
    }

    #[test]
    fn count_includes_every_holder() {
        let mut entities = group();
        entities[2].set_tag("Name", "web1");
        let snap = Snapshot::capture(&entities, "Name");

        assert_eq!(snap.count("web1"), 2);
    }

    #[test]
    fn taken_by_others_excludes_self() {
        let snap = Snapshot::capture(&group(), "Name");
        let me = EntityId::new("i-1");

        let taken = snap.taken_by_others(&me);
        assert_eq!(taken.into_iter().collect::<Vec<_>>(), vec!["web3"]);

        assert!(!snap.held_by_other(&me, "web1"));
        assert!(snap.held_by_other(&me, "web3"));
        assert!(snap.held_by_other(&EntityId::new("i-3"), "web1"));
    }
}
