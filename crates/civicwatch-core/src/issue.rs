//! Issue types: the central record of the reporting domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Report category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RoadDamage,
    Garbage,
    WaterLeak,
    BrokenInfra,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::RoadDamage,
        Category::Garbage,
        Category::WaterLeak,
        Category::BrokenInfra,
        Category::Other,
    ];

    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RoadDamage => "road_damage",
            Category::Garbage => "garbage",
            Category::WaterLeak => "water_leak",
            Category::BrokenInfra => "broken_infra",
            Category::Other => "other",
        }
    }

    /// Human-readable label for display surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            Category::RoadDamage => "Road Damage",
            Category::Garbage => "Garbage",
            Category::WaterLeak => "Water Leak",
            Category::BrokenInfra => "Broken Infrastructure",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0} (expected road_damage, garbage, water_leak, broken_infra, other)")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "road_damage" => Ok(Category::RoadDamage),
            "garbage" => Ok(Category::Garbage),
            "water_leak" => Ok(Category::WaterLeak),
            "broken_infra" => Ok(Category::BrokenInfra),
            "other" => Ok(Category::Other),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// Reporter-assessed severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown severity: {0} (expected low, medium, critical)")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "critical" => Ok(Severity::Critical),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

/// Lifecycle status. `overdue` is a derived condition, not a status;
/// see `sla::is_overdue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    Acknowledged,
    Resolved,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 3] = [
        IssueStatus::Open,
        IssueStatus::Acknowledged,
        IssueStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::Acknowledged => "acknowledged",
            IssueStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown status: {0} (expected open, acknowledged, resolved)")]
pub struct ParseStatusError(String);

impl FromStr for IssueStatus {
    type Err = ParseStatusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "open" => Ok(IssueStatus::Open),
            "acknowledged" => Ok(IssueStatus::Acknowledged),
            "resolved" => Ok(IssueStatus::Resolved),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// One immutable entry in an issue's append-only timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub status: IssueStatus,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_by: String,
}

/// A citizen-reported issue.
///
/// Routing fields (`zone_id`, `department`, `contractor_id`, `deadline`,
/// `acknowledgement_due`) are derived once at enrichment and are either
/// all present or all absent. `status` stays unset until enrichment
/// seeds the timeline; from then on the timeline is non-empty and its
/// first entry is always `open`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Opaque unique id, assigned by the store on insert.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Free-text category, used alongside `category = other`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_category: Option<String>,
    #[serde(default)]
    pub severity: Severity,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,

    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,

    #[serde(default)]
    pub view_count: u64,
    /// Opaque random token for unauthenticated public lookup.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub share_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,

    // Derived at enrichment, thereafter immutable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgement_due: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<TimelineEvent>,
}

impl Issue {
    /// Whether enrichment produced a full routing assignment.
    pub fn is_routed(&self) -> bool {
        self.zone_id.is_some()
            && self.department.is_some()
            && self.contractor_id.is_some()
            && self.deadline.is_some()
    }

    /// Whether the issue has reached a terminal status.
    pub fn is_resolved(&self) -> bool {
        self.status == Some(IssueStatus::Resolved)
    }
}
