use crate::support::{
    format_remaining, issue_summary_json, load_engine_config_or_exit, print_json_or_exit,
    status_label,
};
use chrono::{DateTime, Utc};
use civicwatch_core::{EngineConfig, Issue, is_overdue, time_remaining};
use civicwatch_store::record_view_jsonl;
use serde_json::{Value, json};

pub fn run(id: String, config: Option<String>, issues: String, json_output: bool) {
    let config = load_engine_config_or_exit(config.as_deref());
    let now = Utc::now();

    let issue = record_view_jsonl(&issues, &id).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let payload = json!({
            "action": "issue.show",
            "issuesPath": issues,
            "issue": detail_json(&issue, &config, now),
        });
        print_json_or_exit(&payload);
    } else {
        print_detail(&issue, &config, now);
    }
}

pub fn detail_json(issue: &Issue, config: &EngineConfig, now: DateTime<Utc>) -> Value {
    let mut detail = issue_summary_json(issue);
    if let Value::Object(fields) = &mut detail {
        fields.insert("overdue".to_string(), json!(is_overdue(issue, now)));
        fields.insert(
            "zoneName".to_string(),
            json!(issue
                .zone_id
                .as_deref()
                .map(|zone_id| config.zones.zone_name(zone_id))),
        );
        fields.insert(
            "contractorName".to_string(),
            json!(issue
                .contractor_id
                .as_deref()
                .map(|contractor_id| config.responsibilities.contractor_name(contractor_id))),
        );
        fields.insert(
            "timeline".to_string(),
            json!(issue
                .timeline
                .iter()
                .map(|event| {
                    json!({
                        "id": event.id,
                        "status": event.status.as_str(),
                        "timestamp": event.timestamp.to_rfc3339(),
                        "description": event.description,
                        "updatedBy": event.updated_by,
                    })
                })
                .collect::<Vec<_>>()),
        );
    }
    detail
}

pub fn print_detail(issue: &Issue, config: &EngineConfig, now: DateTime<Utc>) {
    println!(
        "{} [{}] {}\n  Severity: {}\n  Submitted: {}\n  Views: {}",
        issue.id,
        status_label(issue),
        issue.title,
        issue.severity,
        issue.submitted_at.to_rfc3339(),
        issue.view_count,
    );
    if !issue.address.is_empty() {
        println!("  Address: {}", issue.address);
    }
    match (&issue.zone_id, &issue.department, &issue.contractor_id) {
        (Some(zone_id), Some(department), Some(contractor_id)) => {
            println!(
                "  Ward: {} ({})\n  Department: {}\n  Contractor: {} ({})",
                zone_id,
                config.zones.zone_name(zone_id),
                department,
                contractor_id,
                config.responsibilities.contractor_name(contractor_id),
            );
        }
        _ => println!("  Routing: not assigned"),
    }
    if let Some(remaining) = time_remaining(issue, now) {
        let marker = if is_overdue(issue, now) { " [OVERDUE]" } else { "" };
        println!("  SLA: {}{marker}", format_remaining(remaining));
    }
    if !issue.timeline.is_empty() {
        println!("  Timeline:");
        for event in &issue.timeline {
            println!(
                "    {} [{}] {} ({})",
                event.timestamp.to_rfc3339(),
                event.status,
                event.description,
                event.updated_by,
            );
        }
    }
}
