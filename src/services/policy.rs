//! Named policies for turning "could not find out" into a gate answer.
//!
//! Authorization checks fail open; the capacity check fails closed.

/// How a gate resolves when its underlying query has no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePolicy {
    /// Nothing to check means nothing to protect: the gate passes.
    FailOpen,
    /// Nothing to check means nothing is certified: the gate fails.
    FailClosed,
}

/// Authorization kinds that do not exist on the running platform, or whose
/// query service is unavailable, count as satisfied.
pub const UNAVAILABLE_AUTHORIZATION: GatePolicy = GatePolicy::FailOpen;

/// A recordings directory that cannot be resolved or measured is never admissible.
pub const UNRESOLVED_CAPACITY: GatePolicy = GatePolicy::FailClosed;

impl GatePolicy {
    /// Resolve an optional answer; `None` falls back to the policy.
    pub fn resolve(self, answer: Option<bool>) -> bool {
        answer.unwrap_or(matches!(self, GatePolicy::FailOpen))
    }
}
