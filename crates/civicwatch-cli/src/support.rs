use chrono::{DateTime, Duration, Utc};
use civicwatch_core::{Category, EngineConfig, Issue, IssueStatus, Severity};
use civicwatch_store::MemoryStore;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

pub fn parse_category_or_exit(raw: &str) -> Category {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn parse_severity_or_exit(raw: &str) -> Severity {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn parse_status_or_exit(raw: &str) -> IssueStatus {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn parse_time_or_exit(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            eprintln!("error: invalid timestamp {raw:?}: {e}");
            std::process::exit(1);
        })
}

pub fn load_engine_config_or_exit(config: Option<&str>) -> EngineConfig {
    match config {
        Some(path) => EngineConfig::load(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        }),
        None => EngineConfig::default(),
    }
}

/// Load an existing store, exiting when the file is absent.
pub fn load_store_existing_or_exit(issues: &str) -> (MemoryStore, PathBuf) {
    let path = PathBuf::from(issues);
    if !path.exists() {
        eprintln!("error: issues store not found: {}", path.display());
        std::process::exit(1);
    }
    let store = MemoryStore::load_jsonl(&path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    tracing::debug!(path = %path.display(), count = store.len(), "store loaded");
    (store, path)
}

/// Load a store, starting empty when the file does not exist yet.
pub fn load_store_or_empty_or_exit(issues: &str) -> (MemoryStore, PathBuf) {
    let path = PathBuf::from(issues);
    if !path.exists() {
        return (MemoryStore::default(), path);
    }
    let store = MemoryStore::load_jsonl(&path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    (store, path)
}

pub fn save_store_or_exit(store: &MemoryStore, path: &Path) {
    store.save_jsonl(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
}

pub fn print_json_or_exit(payload: &Value) {
    match serde_json::to_string_pretty(payload) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Compact JSON summary of one issue, shared across command payloads.
pub fn issue_summary_json(issue: &Issue) -> Value {
    json!({
        "id": issue.id,
        "title": issue.title,
        "status": issue.status.map(|status| status.as_str()),
        "category": issue.category.map(|category| category.as_str()),
        "severity": issue.severity.as_str(),
        "zoneId": issue.zone_id,
        "department": issue.department,
        "contractorId": issue.contractor_id,
        "deadline": issue.deadline.map(|deadline| deadline.to_rfc3339()),
        "submittedAt": issue.submitted_at.to_rfc3339(),
        "viewCount": issue.view_count,
        "shareToken": issue.share_token,
    })
}

pub fn status_label(issue: &Issue) -> &'static str {
    issue
        .status
        .map(|status| status.as_str())
        .unwrap_or("unfiled")
}

/// Human-readable time-to-deadline, e.g. "36h20m left" or "overdue by 2h05m".
pub fn format_remaining(remaining: Duration) -> String {
    let overdue = remaining < Duration::zero();
    let magnitude = if overdue { -remaining } else { remaining };
    let hours = magnitude.num_hours();
    let minutes = magnitude.num_minutes() % 60;
    if overdue {
        format!("overdue by {hours}h{minutes:02}m")
    } else {
        format!("{hours}h{minutes:02}m left")
    }
}
