use crate::support::{
    issue_summary_json, load_engine_config_or_exit, load_store_existing_or_exit,
    parse_category_or_exit, parse_severity_or_exit, parse_status_or_exit, print_json_or_exit,
    status_label,
};
use chrono::Utc;
use civicwatch_core::{Issue, is_overdue};
use civicwatch_store::IssueQuery;
use serde_json::json;

pub struct Args {
    pub category: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub zone: Option<String>,
    pub overdue: bool,
    pub limit: Option<usize>,
    pub config: Option<String>,
    pub issues: String,
    pub json: bool,
}

pub fn run(args: Args) {
    let config = load_engine_config_or_exit(args.config.as_deref());
    let (store, path) = load_store_existing_or_exit(&args.issues);
    let now = Utc::now();

    let query = IssueQuery {
        category: args.category.as_deref().map(parse_category_or_exit),
        severity: args.severity.as_deref().map(parse_severity_or_exit),
        status: args.status.as_deref().map(parse_status_or_exit),
        zone_id: args.zone,
        // The overdue filter runs after the query; cap afterwards too.
        limit: if args.overdue { None } else { args.limit },
    };

    let mut rows: Vec<&Issue> = store.query(&query);
    if args.overdue {
        rows.retain(|issue| is_overdue(issue, now));
        if let Some(limit) = args.limit {
            rows.truncate(limit);
        }
    }

    if args.json {
        let items: Vec<_> = rows.iter().map(|issue| issue_summary_json(issue)).collect();
        let payload = json!({
            "action": "issue.list",
            "issuesPath": path.display().to_string(),
            "count": items.len(),
            "items": items,
        });
        print_json_or_exit(&payload);
    } else {
        println!(
            "civicwatch list\n  Path: {}\n  Count: {}",
            path.display(),
            rows.len()
        );
        for issue in rows {
            let category = issue
                .category
                .map(|category| category.as_str())
                .unwrap_or("uncategorized");
            let ward = match issue.zone_id.as_deref() {
                Some(zone_id) => config.zones.zone_name(zone_id).to_string(),
                None => "unrouted".to_string(),
            };
            let flag = if is_overdue(issue, now) { " OVERDUE" } else { "" };
            println!(
                "  - {} [{} {} {}] {} ({ward}{flag})",
                issue.id,
                status_label(issue),
                issue.severity,
                category,
                issue.title,
            );
        }
    }
}
