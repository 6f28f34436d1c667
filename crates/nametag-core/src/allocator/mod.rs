//! Naming allocator: picks a `prefix + n` name for one entity and verifies
//! that no other group member ended up with the same name.
//!
//! The registry offers no compare-and-swap, so the allocator commits first and
//! verifies afterwards. A verification read that counts more than one holder is
//! a collision; a read that counts none means the write was not observed yet.
//! Both cost one retry. Candidates already taken in the last known snapshot are
//! passed over for free.
mod context;
pub use context::AllocationContext;

mod pause;
pub use pause::{Pause, ThreadPause};

mod state;
pub use state::{AllocationState, Round, Verification};

mod validate;
pub use validate::{Namespace, check_target, fetch_target, resolve_namespace};

use nametag_model::{AllocationSpec, Snapshot, candidate_name};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::{
    error::{AllocError, AllocResult},
    map::to_backoff_policy,
    outcome::Assignment,
    policy::BackoffPolicy,
};

/// Drives one allocation run for [`AllocationSpec::target`].
pub struct Allocator {
    spec: AllocationSpec,
    policy: BackoffPolicy,
    ctx: AllocationContext,
    rng: StdRng,
    visited: Vec<&'static str>,
}

impl Allocator {
    /// Build an allocator; fails if the `AllocationSpec` is unusable.
    pub fn new(spec: AllocationSpec, ctx: AllocationContext) -> AllocResult<Self> {
        spec.validate()?;
        Ok(Self {
            policy: to_backoff_policy(&spec.backoff),
            spec,
            ctx,
            rng: StdRng::from_entropy(),
            visited: Vec::new(),
        })
    }

    /// Use a deterministic jitter sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn spec(&self) -> &AllocationSpec {
        &self.spec
    }

    /// Names of the states entered by the last [`Allocator::run`], in order.
    pub fn visited(&self) -> &[&'static str] {
        &self.visited
    }

    /// Run the state machine to a terminal state.
    ///
    /// Registry failures abort immediately; only the naming race is retried.
    #[instrument(level = "info", skip(self), fields(entity = %self.spec.target, retries = self.spec.retries))]
    pub fn run(&mut self) -> AllocResult<Assignment> {
        self.visited.clear();
        let mut state = AllocationState::Init;

        loop {
            self.visited.push(state.name());
            trace!(state = state.name(), terminal = state.is_terminal(), "allocator state");

            state = match state {
                AllocationState::Init => AllocationState::Validating,
                AllocationState::Validating => {
                    let target = fetch_target(self.ctx.registry(), &self.spec)?;
                    let namespace = resolve_namespace(&target, &self.spec)?;
                    AllocationState::PrefixResolved { target, namespace }
                }
                AllocationState::PrefixResolved { target, namespace } => {
                    if namespace.join {
                        if let Some(group) = namespace.group.as_deref() {
                            info!(entity = %target.id, group_tag = %self.spec.group_tag, group, "joining group");
                            self.ctx
                                .registry()
                                .write_tag(&target.id, &self.spec.group_tag, group)?;
                        }
                    }
                    let snapshot = self.snapshot(&namespace)?;
                    debug!(
                        members = snapshot.len(),
                        taken = ?snapshot.taken_by_others(&target.id),
                        "initial snapshot"
                    );
                    AllocationState::Attempting(Round::new(namespace, snapshot, self.spec.retries))
                }
                AllocationState::Attempting(round) => self.attempt(round)?,
                AllocationState::CollisionRetry(round)
                | AllocationState::VerifyFailedRetry(round) => {
                    if round.retries_left == 0 {
                        AllocationState::Exhausted(round)
                    } else {
                        AllocationState::Attempting(round)
                    }
                }
                AllocationState::Succeeded(assignment) => {
                    info!(
                        name = %assignment.name,
                        attempts = assignment.attempts,
                        skipped = assignment.skipped,
                        "name assigned"
                    );
                    return Ok(assignment);
                }
                AllocationState::Exhausted(round) => {
                    error!(
                        prefix = %round.namespace.prefix,
                        attempts = round.attempts,
                        "retry budget exhausted"
                    );
                    return Err(AllocError::Exhausted {
                        prefix: round.namespace.prefix,
                        retries: self.spec.retries,
                        last_candidate: round.last_candidate.unwrap_or_else(|| "none".to_string()),
                    });
                }
            };
        }
    }

    /// One step inside `Attempting`: skip a known-taken candidate, or commit,
    /// wait, re-read and classify.
    fn attempt(&mut self, mut round: Round) -> AllocResult<AllocationState> {
        if round.retries_left == 0 {
            return Ok(AllocationState::Exhausted(round));
        }

        let target = &self.spec.target;
        let candidate = candidate_name(&round.namespace.prefix, round.seq);

        if round.snapshot.held_by_other(target, &candidate) {
            debug!(%candidate, "candidate already taken, skipping");
            round.seq += 1;
            round.skipped += 1;
            return Ok(AllocationState::Attempting(round));
        }

        let attempt = round.attempts + 1;
        info!(%candidate, attempt, retries_left = round.retries_left, "committing candidate");
        self.ctx
            .registry()
            .write_tag(target, &self.spec.name_tag, &candidate)?;

        let wait = self.policy.sample(&mut self.rng);
        debug!(wait_ms = wait.as_millis() as u64, "waiting before verification");
        self.ctx.pause().pause(wait);

        let snapshot = self.snapshot(&round.namespace)?;
        let count = snapshot.count(&candidate);

        round.snapshot = snapshot;
        round.attempts = attempt;
        round.retries_left -= 1;
        round.seq += 1;
        round.last_candidate = Some(candidate.clone());

        let next = match Verification::classify(count) {
            Verification::Unique => {
                if let Some(holder) = round.snapshot.holder(&candidate).filter(|h| *h != target) {
                    warn!(%candidate, %holder, "sole holder is another entity; own write not observed");
                }
                AllocationState::Succeeded(Assignment {
                    entity: target.clone(),
                    name: candidate,
                    attempts: round.attempts,
                    retries: self.spec.retries,
                    skipped: round.skipped,
                })
            }
            Verification::Collision(count) => {
                warn!(%candidate, count, retries_left = round.retries_left, "name collision detected");
                AllocationState::CollisionRetry(round)
            }
            Verification::NotObserved => {
                error!(%candidate, retries_left = round.retries_left, "committed name not observed in group");
                AllocationState::VerifyFailedRetry(round)
            }
        };
        Ok(next)
    }

    fn snapshot(&self, namespace: &Namespace) -> AllocResult<Snapshot> {
        let members = self.ctx.registry().find_entities(&namespace.filter)?;
        Ok(Snapshot::capture(&members, &self.spec.name_tag))
    }
}
