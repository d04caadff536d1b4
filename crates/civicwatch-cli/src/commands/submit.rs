use crate::support::{
    issue_summary_json, load_engine_config_or_exit, load_store_or_empty_or_exit,
    parse_category_or_exit, parse_severity_or_exit, parse_time_or_exit, print_json_or_exit,
    save_store_or_exit, status_label,
};
use chrono::Utc;
use civicwatch_core::{EnrichmentPipeline, RawSubmission};
use serde_json::json;

pub struct Args {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub custom_category: Option<String>,
    pub severity: String,
    pub image: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub address: String,
    pub user: String,
    pub at: Option<String>,
    pub config: Option<String>,
    pub issues: String,
    pub json: bool,
}

pub fn run(args: Args) {
    let config = load_engine_config_or_exit(args.config.as_deref());
    let category = args.category.as_deref().map(parse_category_or_exit);
    let severity = parse_severity_or_exit(&args.severity);
    let submitted_at = args.at.as_deref().map(parse_time_or_exit);

    let pipeline = EnrichmentPipeline::new(config);
    let enrichment = pipeline.enrich(
        RawSubmission {
            title: args.title,
            description: args.description,
            category,
            custom_category: args.custom_category,
            severity,
            image_ref: args.image,
            latitude: args.lat,
            longitude: args.lon,
            address: args.address,
            user_id: args.user,
            submitted_at,
        },
        Utc::now(),
    );
    let unrouted_reason = enrichment.unrouted_reason();
    let mut issue = enrichment.into_issue();

    let (mut store, path) = load_store_or_empty_or_exit(&args.issues);
    issue.id = store.add_issue(issue.clone());
    save_store_or_exit(&store, &path);

    if args.json {
        let payload = json!({
            "action": "issue.submit",
            "issuesPath": path.display().to_string(),
            "routed": unrouted_reason.is_none(),
            "unroutedReason": unrouted_reason.map(|reason| reason.as_str()),
            "issue": issue_summary_json(&issue),
        });
        print_json_or_exit(&payload);
    } else {
        println!(
            "civicwatch submit\n  Filed: {} [{}]",
            issue.id,
            status_label(&issue)
        );
        match (&issue.zone_id, &issue.department, &issue.contractor_id) {
            (Some(zone_id), Some(department), Some(contractor_id)) => {
                println!(
                    "  Ward: {} ({})\n  Department: {}\n  Contractor: {} ({})",
                    zone_id,
                    pipeline.zones().zone_name(zone_id),
                    department,
                    contractor_id,
                    pipeline.responsibilities().contractor_name(contractor_id),
                );
                if let Some(deadline) = issue.deadline {
                    println!("  Deadline: {}", deadline.to_rfc3339());
                }
            }
            _ => {
                let reason = unrouted_reason
                    .map(|reason| reason.as_str())
                    .unwrap_or("unknown");
                println!("  Not routed: {reason}");
            }
        }
        println!(
            "  Share token: {}\n  Path: {}",
            issue.share_token,
            path.display()
        );
    }
}
