use crate::support::{load_store_existing_or_exit, print_json_or_exit};
use chrono::Utc;
use civicwatch_store::collect_stats;
use serde_json::json;

pub fn run(issues: String, json_output: bool) {
    let (store, path) = load_store_existing_or_exit(&issues);
    let stats = collect_stats(&store, Utc::now());

    if json_output {
        let payload = json!({
            "action": "stats",
            "issuesPath": path.display().to_string(),
            "stats": stats,
        });
        print_json_or_exit(&payload);
    } else {
        println!(
            "civicwatch stats\n  Path: {}\n  Total: {}\n  Critical: {}\n  Resolved: {}\n  Overdue: {}\n  Reporters: {}",
            path.display(),
            stats.total_issues,
            stats.critical_issues,
            stats.resolved_issues,
            stats.overdue_issues,
            stats.active_reporters,
        );
        println!("  By category:");
        for (category, count) in &stats.issues_by_category {
            println!("    {} {}", category.as_str(), count);
        }
        println!("  By severity:");
        for (severity, count) in &stats.issues_by_severity {
            println!("    {} {}", severity.as_str(), count);
        }
    }
}
