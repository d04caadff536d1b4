use crate::support::{issue_summary_json, parse_status_or_exit, print_json_or_exit};
use chrono::Utc;
use civicwatch_store::{TransitionRequest, transition_issue_jsonl};
use serde_json::json;

pub fn run(
    id: String,
    status: String,
    description: String,
    by: String,
    issues: String,
    json_output: bool,
) {
    let new_status = parse_status_or_exit(&status);

    let request = TransitionRequest {
        issue_id: id,
        new_status,
        description,
        updated_by: by,
        now: Utc::now(),
    };

    let issue = transition_issue_jsonl(&issues, request).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        let latest = issue.timeline.last().map(|event| {
            json!({
                "id": event.id,
                "status": event.status.as_str(),
                "timestamp": event.timestamp.to_rfc3339(),
                "description": event.description,
                "updatedBy": event.updated_by,
            })
        });
        let payload = json!({
            "action": "issue.update",
            "issuesPath": issues,
            "issue": issue_summary_json(&issue),
            "event": latest,
        });
        print_json_or_exit(&payload);
    } else {
        println!(
            "civicwatch update\n  {} -> {}\n  Timeline entries: {}",
            issue.id,
            new_status,
            issue.timeline.len()
        );
        if let Some(event) = issue.timeline.last() {
            println!(
                "  Latest: [{}] {} ({})",
                event.status, event.description, event.updated_by
            );
        }
    }
}
