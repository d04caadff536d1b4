use crate::support::{load_engine_config_or_exit, load_store_existing_or_exit, print_json_or_exit};
use chrono::Utc;
use serde_json::json;

use super::show::{detail_json, print_detail};

pub fn run(token: String, config: Option<String>, issues: String, json_output: bool) {
    let config = load_engine_config_or_exit(config.as_deref());
    let (store, path) = load_store_existing_or_exit(&issues);
    let now = Utc::now();

    let Some(issue) = store.issue_by_share_token(&token) else {
        eprintln!("error: no issue matches share token {token:?}");
        std::process::exit(1);
    };

    if json_output {
        let payload = json!({
            "action": "issue.share",
            "issuesPath": path.display().to_string(),
            "issue": detail_json(issue, &config, now),
        });
        print_json_or_exit(&payload);
    } else {
        print_detail(issue, &config, now);
    }
}
