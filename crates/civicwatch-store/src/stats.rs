//! Aggregate statistics for the ranking dashboard.

use crate::memory::MemoryStore;
use chrono::{DateTime, Utc};
use civicwatch_core::{Category, Severity, is_overdue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dashboard aggregates over the full store. Overdue is evaluated at
/// `now`, never read from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStats {
    pub total_issues: usize,
    pub critical_issues: usize,
    pub resolved_issues: usize,
    pub overdue_issues: usize,
    pub active_reporters: usize,
    pub issues_by_category: BTreeMap<Category, usize>,
    pub issues_by_severity: BTreeMap<Severity, usize>,
}

/// Collect aggregates in one pass over the store.
pub fn collect_stats(store: &MemoryStore, now: DateTime<Utc>) -> IssueStats {
    let mut issues_by_category: BTreeMap<Category, usize> =
        Category::ALL.iter().map(|category| (*category, 0)).collect();
    let mut issues_by_severity: BTreeMap<Severity, usize> =
        Severity::ALL.iter().map(|severity| (*severity, 0)).collect();

    let mut critical_issues = 0;
    let mut resolved_issues = 0;
    let mut overdue_issues = 0;
    let mut reporters = std::collections::BTreeSet::new();

    for issue in store.issues() {
        if let Some(category) = issue.category {
            *issues_by_category.entry(category).or_default() += 1;
        }
        *issues_by_severity.entry(issue.severity).or_default() += 1;

        if issue.severity == Severity::Critical {
            critical_issues += 1;
        }
        if issue.is_resolved() {
            resolved_issues += 1;
        }
        if is_overdue(issue, now) {
            overdue_issues += 1;
        }
        if !issue.user_id.is_empty() {
            reporters.insert(issue.user_id.as_str());
        }
    }

    IssueStats {
        total_issues: store.len(),
        critical_issues,
        resolved_issues,
        overdue_issues,
        active_reporters: reporters.len(),
        issues_by_category,
        issues_by_severity,
    }
}
