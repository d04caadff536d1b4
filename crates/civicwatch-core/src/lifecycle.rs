//! Issue lifecycle: the status state machine and its append-only timeline.
//!
//! Enforced transition graph:
//!
//! ```text
//! (unset) -> open -> acknowledged -> resolved
//!               \____________________^
//! ```
//!
//! `resolved` is terminal. Self-edges are permitted and append a
//! status-confirming timeline event without changing domain state.
//! The machine mutates a caller-owned snapshot only; persisting the
//! result, and the consistency of concurrent updates, belongs to the
//! storage layer.

use crate::issue::{Issue, IssueStatus, TimelineEvent};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Attribution string for automated timeline events.
pub const SYSTEM_ACTOR: &str = "system";

/// Description of the synthetic event seeded at creation.
pub const CREATION_EVENT_DESCRIPTION: &str = "Issue reported and filed.";

#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: IssueStatus, to: IssueStatus },

    #[error("issue has no status yet; only `open` may enter the lifecycle (got {to})")]
    NotEntered { to: IssueStatus },
}

/// Whether the transition graph permits `from -> to`.
///
/// An unset status (`None`) may only enter the machine at `open`,
/// which keeps the first timeline entry `open` by construction.
pub fn transition_allowed(from: Option<IssueStatus>, to: IssueStatus) -> bool {
    use IssueStatus::{Acknowledged, Open, Resolved};
    match from {
        None => to == Open,
        Some(from) => {
            from == to
                || matches!(
                    (from, to),
                    (Open, Acknowledged) | (Open, Resolved) | (Acknowledged, Resolved)
                )
        }
    }
}

/// The synthetic timeline entry seeded when a report is filed.
pub fn creation_event(submitted_at: DateTime<Utc>) -> TimelineEvent {
    TimelineEvent {
        id: new_event_id(),
        status: IssueStatus::Open,
        timestamp: submitted_at,
        description: CREATION_EVENT_DESCRIPTION.to_string(),
        updated_by: SYSTEM_ACTOR.to_string(),
    }
}

/// Apply a status transition to a caller-owned issue snapshot.
///
/// On success, appends exactly one timeline event (status = `new_status`,
/// timestamp clamped so the timeline stays non-decreasing), sets
/// `issue.status`, and returns the appended event. On rejection the
/// issue is left untouched.
pub fn apply_transition(
    issue: &mut Issue,
    new_status: IssueStatus,
    description: impl Into<String>,
    updated_by: impl Into<String>,
    now: DateTime<Utc>,
) -> Result<TimelineEvent, TransitionError> {
    if !transition_allowed(issue.status, new_status) {
        return Err(match issue.status {
            Some(from) => TransitionError::InvalidTransition {
                from,
                to: new_status,
            },
            None => TransitionError::NotEntered { to: new_status },
        });
    }

    // Timeline timestamps never decrease, even if the caller's clock does.
    let timestamp = issue
        .timeline
        .last()
        .map_or(now, |tail| tail.timestamp.max(now));

    let event = TimelineEvent {
        id: new_event_id(),
        status: new_status,
        timestamp,
        description: description.into(),
        updated_by: updated_by.into(),
    };
    issue.timeline.push(event.clone());
    issue.status = Some(new_status);
    Ok(event)
}

fn new_event_id() -> String {
    format!("evt_{}", Uuid::new_v4().simple())
}
