//! Revision gate: decides whether an incoming snapshot may supersede the
//! locally held one.

use realm_core::Revision;

/// Outcome of gating one incoming message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Apply the message; it is newer than or equal to the held state.
    Accept,
    /// Drop the message silently; it is stale redelivery.
    Reject,
}

impl GateDecision {
    pub fn is_accept(&self) -> bool {
        matches!(self, GateDecision::Accept)
    }
}

/// Decide whether an incoming revision may replace the current one.
///
/// Policy:
/// - No snapshot held yet → `Accept`; the first message establishes the
///   baseline whatever its revision.
/// - Incoming message carries no revision → `Accept` unconditionally. A
///   revision-less push is treated as a full authoritative resync and must
///   not be dropped. Note the hazard: this disables staleness filtering for
///   that message, so a producer that omits revisions on ordinary pushes
///   would defeat the gate entirely.
/// - Both present → `Accept` iff `incoming >= current`. Equal revisions are
///   idempotent redelivery, reapplied with no observable change; only a
///   strictly smaller revision is rejected.
///
/// Pure predicate: no state is touched here. The store mutates only after a
/// positive decision.
pub fn decide(current: Option<Revision>, incoming: Option<Revision>) -> GateDecision {
    match (current, incoming) {
        (None, _) => GateDecision::Accept,
        (_, None) => GateDecision::Accept,
        (Some(current), Some(incoming)) => {
            if incoming >= current {
                GateDecision::Accept
            } else {
                GateDecision::Reject
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_is_accepted_regardless_of_revision() {
        assert_eq!(decide(None, Some(Revision(0))), GateDecision::Accept);
        assert_eq!(decide(None, Some(Revision(999))), GateDecision::Accept);
        assert_eq!(decide(None, None), GateDecision::Accept);
    }

    #[test]
    fn revisionless_message_is_accepted_over_any_baseline() {
        assert_eq!(decide(Some(Revision(42)), None), GateDecision::Accept);
    }

    #[test]
    fn newer_revision_is_accepted() {
        assert_eq!(
            decide(Some(Revision(10)), Some(Revision(11))),
            GateDecision::Accept
        );
    }

    #[test]
    fn equal_revision_is_accepted_as_idempotent_redelivery() {
        assert_eq!(
            decide(Some(Revision(10)), Some(Revision(10))),
            GateDecision::Accept
        );
    }

    #[test]
    fn stale_revision_is_rejected() {
        assert_eq!(
            decide(Some(Revision(10)), Some(Revision(9))),
            GateDecision::Reject
        );
        assert_eq!(
            decide(Some(Revision(10)), Some(Revision(0))),
            GateDecision::Reject
        );
    }
}
