use nametag_model::{Entity, Snapshot};

use crate::{allocator::validate::Namespace, outcome::Assignment};

/// Result of counting a committed candidate in a fresh snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Exactly one holder.
    Unique,
    /// More than one member holds the candidate.
    Collision(usize),
    /// Nobody holds the candidate; the write has not been observed.
    NotObserved,
}

impl Verification {
    pub fn classify(count: usize) -> Self {
        match count {
            0 => Verification::NotObserved,
            1 => Verification::Unique,
            n => Verification::Collision(n),
        }
    }
}

/// Bookkeeping of the attempt loop.
#[derive(Debug, Clone)]
pub struct Round {
    pub namespace: Namespace,
    /// Sequence number of the next candidate.
    pub seq: u32,
    /// Commit+verify rounds still allowed.
    pub retries_left: u32,
    /// Commit+verify rounds spent.
    pub attempts: u32,
    /// Candidates passed over because the last snapshot showed them taken.
    pub skipped: u32,
    pub last_candidate: Option<String>,
    /// Last known view of the namespace.
    pub snapshot: Snapshot,
}

impl Round {
    pub fn new(namespace: Namespace, snapshot: Snapshot, retries: u32) -> Self {
        Self {
            namespace,
            seq: 1,
            retries_left: retries,
            attempts: 0,
            skipped: 0,
            last_candidate: None,
            snapshot,
        }
    }
}

/// Allocator state machine.
///
/// `Init → Validating → PrefixResolved → Attempting → {Succeeded, CollisionRetry,
/// VerifyFailedRetry, Exhausted}`. Both retry states lead back to `Attempting`
/// or to `Exhausted` once the budget is spent.
#[derive(Debug, Clone)]
pub enum AllocationState {
    Init,
    Validating,
    PrefixResolved { target: Entity, namespace: Namespace },
    Attempting(Round),
    CollisionRetry(Round),
    VerifyFailedRetry(Round),
    Succeeded(Assignment),
    Exhausted(Round),
}

impl AllocationState {
    pub fn name(&self) -> &'static str {
        match self {
            AllocationState::Init => "init",
            AllocationState::Validating => "validating",
            AllocationState::PrefixResolved { .. } => "prefix-resolved",
            AllocationState::Attempting(_) => "attempting",
            AllocationState::CollisionRetry(_) => "collision-retry",
            AllocationState::VerifyFailedRetry(_) => "verify-failed-retry",
            AllocationState::Succeeded(_) => "succeeded",
            AllocationState::Exhausted(_) => "exhausted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AllocationState::Succeeded(_) | AllocationState::Exhausted(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_count() {
        assert_eq!(Verification::classify(0), Verification::NotObserved);
        assert_eq!(Verification::classify(1), Verification::Unique);
        assert_eq!(Verification::classify(2), Verification::Collision(2));
        assert_eq!(Verification::classify(5), Verification::Collision(5));
    }

    #[test]
    fn only_succeeded_and_exhausted_are_terminal() {
        assert!(!AllocationState::Init.is_terminal());
        assert!(!AllocationState::Validating.is_terminal());
        assert_eq!(AllocationState::Init.name(), "init");
    }
}
