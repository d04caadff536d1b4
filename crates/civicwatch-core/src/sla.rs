//! SLA policy: resolution windows, deadlines, and the overdue predicate.
//!
//! "Overdue" is never stored. It is a pure function of
//! `(status, deadline, now)` so the answer always reflects wall-clock
//! time at the moment of evaluation.

use crate::issue::{Category, Issue, IssueStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_ACKNOWLEDGEMENT_HOURS: i64 = 24;
pub const DEFAULT_RESOLUTION_HOURS: i64 = 72;

/// Per-category resolution windows plus the acknowledgement window.
///
/// Immutable after construction (see `EngineConfig`). Deadline
/// arithmetic saturates at the maximum representable timestamp rather
/// than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaPolicy {
    acknowledgement_hours: i64,
    resolution_hours: BTreeMap<Category, i64>,
    default_resolution_hours: i64,
}

impl SlaPolicy {
    pub fn new(
        acknowledgement_hours: i64,
        resolution_hours: BTreeMap<Category, i64>,
        default_resolution_hours: i64,
    ) -> Self {
        Self {
            acknowledgement_hours,
            resolution_hours,
            default_resolution_hours,
        }
    }

    /// Resolution window for a category, falling back to the default
    /// for unmapped categories.
    pub fn resolution_hours(&self, category: Category) -> i64 {
        self.resolution_hours
            .get(&category)
            .copied()
            .unwrap_or(self.default_resolution_hours)
    }

    pub fn acknowledgement_hours(&self) -> i64 {
        self.acknowledgement_hours
    }

    /// Deadline = submission time + the category's resolution window.
    pub fn compute_deadline(
        &self,
        category: Category,
        submitted_at: DateTime<Utc>,
    ) -> DateTime<Utc> {
        saturating_add_hours(submitted_at, self.resolution_hours(category))
    }

    /// When the issue should have been acknowledged. Tracked separately
    /// from the resolution deadline; does not feed `is_overdue`.
    pub fn acknowledgement_due_at(&self, submitted_at: DateTime<Utc>) -> DateTime<Utc> {
        saturating_add_hours(submitted_at, self.acknowledgement_hours)
    }
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            acknowledgement_hours: DEFAULT_ACKNOWLEDGEMENT_HOURS,
            resolution_hours: BTreeMap::from([
                (Category::RoadDamage, 72),
                (Category::Garbage, 48),
                (Category::WaterLeak, 24),
                (Category::BrokenInfra, 96),
                (Category::Other, 72),
            ]),
            default_resolution_hours: DEFAULT_RESOLUTION_HOURS,
        }
    }
}

fn saturating_add_hours(at: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    Duration::try_hours(hours)
        .and_then(|window| at.checked_add_signed(window))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Whether the issue has blown its resolution SLA as of `now`.
///
/// Resolved issues are never overdue. Unrouted issues carry no
/// deadline and are never overdue either.
pub fn is_overdue(issue: &Issue, now: DateTime<Utc>) -> bool {
    if issue.status == Some(IssueStatus::Resolved) {
        return false;
    }
    issue.deadline.is_some_and(|deadline| now > deadline)
}

/// Whether the issue is still unacknowledged past its acknowledgement
/// window as of `now`.
pub fn is_acknowledgement_overdue(issue: &Issue, now: DateTime<Utc>) -> bool {
    issue.status == Some(IssueStatus::Open)
        && issue.acknowledgement_due.is_some_and(|due| now > due)
}

/// Time left until the deadline, for display surfaces. Negative once
/// past due; `None` for unrouted issues.
pub fn time_remaining(issue: &Issue, now: DateTime<Utc>) -> Option<Duration> {
    issue.deadline.map(|deadline| deadline - now)
}
