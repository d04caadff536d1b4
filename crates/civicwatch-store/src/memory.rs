//! Canonical in-memory representation of issue state.
//!
//! The store holds full records keyed by id and exposes deterministic
//! queries. It owns id assignment and the not-found boundary; edge
//! legality stays with the lifecycle in `civicwatch-core`.

use crate::geo::distance_miles;
use crate::jsonl::{JsonlError, read_issues_from_path, write_issues_to_path};
use chrono::{DateTime, Utc};
use civicwatch_core::{
    Category, Issue, IssueStatus, Severity, TimelineEvent, TransitionError, apply_transition,
};
use std::collections::BTreeMap;
use std::path::Path;

/// Errors raised while loading, querying, or mutating the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Jsonl(#[from] JsonlError),

    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Filter for `MemoryStore::query`. Unset fields match everything;
/// results are always sorted by submission time, newest first.
#[derive(Debug, Clone, Default)]
pub struct IssueQuery {
    pub category: Option<Category>,
    pub severity: Option<Severity>,
    pub status: Option<IssueStatus>,
    pub zone_id: Option<String>,
    pub limit: Option<usize>,
}

/// Canonical in-memory issue state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    issues: BTreeMap<String, Issue>,
}

impl MemoryStore {
    /// Build a store from fully-materialized issues.
    ///
    /// Duplicate ids resolve with last-write-wins semantics, matching
    /// append/overlay behavior in JSONL sync workflows.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let mut index = BTreeMap::new();
        for issue in issues {
            let id = issue.id.clone();
            index.insert(id, issue);
        }
        Self { issues: index }
    }

    /// Load store state from a JSONL file.
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let issues = read_issues_from_path(path)?;
        Ok(Self::from_issues(issues))
    }

    /// Persist store state to a JSONL file.
    pub fn save_jsonl(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let issues: Vec<Issue> = self.issues.values().cloned().collect();
        write_issues_to_path(path, &issues)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Lookup one issue by id.
    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.get(id)
    }

    /// Lookup one issue by id (mutable).
    pub fn issue_mut(&mut self, id: &str) -> Option<&mut Issue> {
        self.issues.get_mut(id)
    }

    /// Insert a new record, assigning a fresh `cw-N` id when the
    /// record arrives without one. Returns the id under which the
    /// record was stored.
    pub fn add_issue(&mut self, mut issue: Issue) -> String {
        if issue.id.is_empty() {
            issue.id = self.next_issue_id();
        }
        let id = issue.id.clone();
        tracing::debug!(issue_id = %id, "issue added to store");
        self.issues.insert(id.clone(), issue);
        id
    }

    /// Insert or replace an issue by id. Returns the previous value if
    /// present.
    pub fn upsert_issue(&mut self, issue: Issue) -> Option<Issue> {
        self.issues.insert(issue.id.clone(), issue)
    }

    /// Iterate all issues in deterministic id order.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.values()
    }

    /// Apply a status transition to a stored issue.
    ///
    /// Surfaces `IssueNotFound` for unknown ids; edge legality is
    /// delegated to the lifecycle and surfaces as a transition error.
    pub fn transition(
        &mut self,
        id: &str,
        new_status: IssueStatus,
        description: impl Into<String>,
        updated_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<TimelineEvent, StoreError> {
        let issue = self
            .issues
            .get_mut(id)
            .ok_or_else(|| StoreError::IssueNotFound(id.to_string()))?;
        let event = apply_transition(issue, new_status, description, updated_by, now)?;
        tracing::debug!(issue_id = %id, status = %new_status, "status transition applied");
        Ok(event)
    }

    /// Increment an issue's view counter. Monotonic; returns the new
    /// count.
    pub fn record_view(&mut self, id: &str) -> Result<u64, StoreError> {
        let issue = self
            .issues
            .get_mut(id)
            .ok_or_else(|| StoreError::IssueNotFound(id.to_string()))?;
        issue.view_count += 1;
        Ok(issue.view_count)
    }

    /// Public lookup by share token.
    pub fn issue_by_share_token(&self, token: &str) -> Option<&Issue> {
        if token.is_empty() {
            return None;
        }
        self.issues
            .values()
            .find(|issue| issue.share_token == token)
    }

    /// Filtered query, sorted by submission time descending (id
    /// ascending on ties), optionally capped.
    pub fn query(&self, query: &IssueQuery) -> Vec<&Issue> {
        let mut rows: Vec<&Issue> = self
            .issues
            .values()
            .filter(|issue| query.category.is_none_or(|c| issue.category == Some(c)))
            .filter(|issue| query.severity.is_none_or(|s| issue.severity == s))
            .filter(|issue| query.status.is_none_or(|s| issue.status == Some(s)))
            .filter(|issue| {
                query
                    .zone_id
                    .as_ref()
                    .is_none_or(|z| issue.zone_id.as_ref() == Some(z))
            })
            .collect();

        rows.sort_by(|left, right| {
            right
                .submitted_at
                .cmp(&left.submitted_at)
                .then_with(|| left.id.cmp(&right.id))
        });

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        rows
    }

    /// Issues within `radius_miles` of a point. Records without
    /// coordinates never match.
    pub fn nearby(&self, latitude: f64, longitude: f64, radius_miles: f64) -> Vec<&Issue> {
        self.issues
            .values()
            .filter(|issue| match (issue.latitude, issue.longitude) {
                (Some(lat), Some(lon)) => {
                    distance_miles(latitude, longitude, lat, lon) <= radius_miles
                }
                _ => false,
            })
            .collect()
    }

    fn next_issue_id(&self) -> String {
        let highest = self
            .issues
            .keys()
            .filter_map(|id| id.strip_prefix("cw-"))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("cw-{}", highest + 1)
    }
}
