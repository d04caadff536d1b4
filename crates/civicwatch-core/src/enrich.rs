//! Enrichment: one-time derivation of routing, SLA, and initial state.
//!
//! The pipeline composes the zone directory, responsibility table, and
//! SLA policy over a raw submission. It has no side effects beyond the
//! returned record; persistence belongs to the storage collaborator.

use crate::config::EngineConfig;
use crate::issue::{Category, Issue, IssueStatus, Severity};
use crate::lifecycle::creation_event;
use crate::responsibility::ResponsibilityTable;
use crate::sla::SlaPolicy;
use crate::zone::ZoneDirectory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw report fields as they arrive from the reporting surface.
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub custom_category: Option<String>,
    pub severity: Severity,
    pub image_ref: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: String,
    pub user_id: String,
    /// Explicit submission time; defaults to the pipeline's `now`.
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Why a submission could not be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnroutedReason {
    MissingCategory,
    MissingCoordinates,
}

impl UnroutedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnroutedReason::MissingCategory => "missing_category",
            UnroutedReason::MissingCoordinates => "missing_coordinates",
        }
    }
}

/// Enrichment outcome: a fully routed record, or a partial one kept
/// for later completion. Incomplete input is defensive-path data, not
/// an error.
#[derive(Debug, Clone)]
pub enum Enrichment {
    Routed(Issue),
    Unrouted {
        issue: Issue,
        reason: UnroutedReason,
    },
}

impl Enrichment {
    pub fn is_routed(&self) -> bool {
        matches!(self, Enrichment::Routed(_))
    }

    pub fn issue(&self) -> &Issue {
        match self {
            Enrichment::Routed(issue) => issue,
            Enrichment::Unrouted { issue, .. } => issue,
        }
    }

    pub fn into_issue(self) -> Issue {
        match self {
            Enrichment::Routed(issue) => issue,
            Enrichment::Unrouted { issue, .. } => issue,
        }
    }

    pub fn unrouted_reason(&self) -> Option<UnroutedReason> {
        match self {
            Enrichment::Routed(_) => None,
            Enrichment::Unrouted { reason, .. } => Some(*reason),
        }
    }
}

/// Composes the static tables over raw submissions.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentPipeline {
    zones: ZoneDirectory,
    responsibilities: ResponsibilityTable,
    sla: SlaPolicy,
}

impl EnrichmentPipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            zones: config.zones,
            responsibilities: config.responsibilities,
            sla: config.sla,
        }
    }

    pub fn zones(&self) -> &ZoneDirectory {
        &self.zones
    }

    pub fn responsibilities(&self) -> &ResponsibilityTable {
        &self.responsibilities
    }

    pub fn sla(&self) -> &SlaPolicy {
        &self.sla
    }

    /// Enrich a raw submission into an issue record.
    ///
    /// With category and coordinates present: resolves ward,
    /// responsibility, and deadlines, seeds status `open` plus the
    /// creation timeline entry, and generates a fresh share token.
    /// With either missing: returns the partial record unrouted, with
    /// no status, deadlines, or timeline.
    ///
    /// The issue id is left empty; the store assigns it on insert.
    pub fn enrich(&self, submission: RawSubmission, now: DateTime<Utc>) -> Enrichment {
        let submitted_at = submission.submitted_at.unwrap_or(now);
        let mut issue = Issue {
            id: String::new(),
            title: submission.title,
            description: submission.description,
            category: submission.category,
            custom_category: submission.custom_category,
            severity: submission.severity,
            image_ref: submission.image_ref,
            latitude: submission.latitude,
            longitude: submission.longitude,
            address: submission.address,
            submitted_at,
            user_id: submission.user_id,
            view_count: 0,
            share_token: generate_share_token(),
            status: None,
            zone_id: None,
            department: None,
            contractor_id: None,
            deadline: None,
            acknowledgement_due: None,
            timeline: Vec::new(),
        };

        let Some(category) = issue.category else {
            return Enrichment::Unrouted {
                issue,
                reason: UnroutedReason::MissingCategory,
            };
        };
        let (Some(latitude), Some(longitude)) = (issue.latitude, issue.longitude) else {
            return Enrichment::Unrouted {
                issue,
                reason: UnroutedReason::MissingCoordinates,
            };
        };

        let zone_id = self.zones.resolve_zone(latitude, longitude).to_string();
        let assignment = self.responsibilities.resolve(&zone_id, category).clone();

        issue.zone_id = Some(zone_id);
        issue.department = Some(assignment.department);
        issue.contractor_id = Some(assignment.contractor_id);
        issue.deadline = Some(self.sla.compute_deadline(category, submitted_at));
        issue.acknowledgement_due = Some(self.sla.acknowledgement_due_at(submitted_at));
        issue.status = Some(IssueStatus::Open);
        issue.timeline.push(creation_event(submitted_at));

        Enrichment::Routed(issue)
    }
}

/// Fresh opaque token for public share links.
pub fn generate_share_token() -> String {
    Uuid::new_v4().simple().to_string()
}
