//! End-to-end routing scenarios over the public API: submission in,
//! routed record out, transitions and overdue checks over time.

use chrono::{DateTime, TimeZone, Utc};
use civicwatch_core::{
    Category, EnrichmentPipeline, IssueStatus, RawSubmission, Severity, apply_transition,
    is_overdue, time_remaining,
};

fn at(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .expect("fixed time")
}

fn submission(category: Category, latitude: f64) -> RawSubmission {
    RawSubmission {
        title: "Scenario report".to_string(),
        description: "Filed by the scenario suite.".to_string(),
        category: Some(category),
        severity: Severity::Critical,
        latitude: Some(latitude),
        longitude: Some(10.0),
        address: "Corner of 1st and Main".to_string(),
        user_id: "user_scenario".to_string(),
        submitted_at: Some(at(0)),
        ..Default::default()
    }
}

#[test]
fn water_leak_in_the_south_gets_the_default_ward_and_a_24h_deadline() {
    let pipeline = EnrichmentPipeline::default();
    let issue = pipeline
        .enrich(submission(Category::WaterLeak, -5.0), at(0))
        .into_issue();

    assert_eq!(issue.zone_id.as_deref(), Some("ward_001"));
    assert_eq!(
        issue.deadline.expect("deadline").timestamp_millis(),
        86_400_000
    );
}

#[test]
fn broken_infra_in_the_north_gets_the_northern_ward_and_a_96h_deadline() {
    let pipeline = EnrichmentPipeline::default();
    let issue = pipeline
        .enrich(submission(Category::BrokenInfra, 5.0), at(0))
        .into_issue();

    assert_eq!(issue.zone_id.as_deref(), Some("ward_002"));
    assert_eq!(
        issue.deadline.expect("deadline").timestamp_millis(),
        345_600_000
    );
}

#[test]
fn resolving_an_overdue_issue_clears_the_overdue_condition() {
    let pipeline = EnrichmentPipeline::default();
    let mut issue = pipeline
        .enrich(submission(Category::WaterLeak, -5.0), at(0))
        .into_issue();
    issue.id = "cw-1".to_string();
    issue.deadline = Some(at(1000));

    assert!(!is_overdue(&issue, at(500)));
    assert!(is_overdue(&issue, at(1500)));

    apply_transition(
        &mut issue,
        IssueStatus::Resolved,
        "Leak sealed.",
        "cont_water_01",
        at(1500),
    )
    .expect("open -> resolved must be allowed");

    assert!(!is_overdue(&issue, at(1500)));
    assert!(!is_overdue(&issue, at(10_000_000)));
}

#[test]
fn a_full_lifecycle_keeps_the_timeline_append_only() {
    let pipeline = EnrichmentPipeline::default();
    let mut issue = pipeline
        .enrich(submission(Category::RoadDamage, 2.0), at(0))
        .into_issue();

    apply_transition(
        &mut issue,
        IssueStatus::Acknowledged,
        "Inspection scheduled.",
        "dept:public_works",
        at(3_600_000),
    )
    .expect("open -> acknowledged");
    let first_two: Vec<_> = issue.timeline.clone();
    assert_eq!(first_two.len(), 2);

    let event = apply_transition(
        &mut issue,
        IssueStatus::Resolved,
        "Road resurfaced.",
        "cont_road_02",
        at(7_200_000),
    )
    .expect("acknowledged -> resolved");

    assert_eq!(issue.timeline.len(), 3);
    assert_eq!(event.status, IssueStatus::Resolved);
    assert_eq!(&issue.timeline[..2], &first_two[..]);
    assert!(
        issue
            .timeline
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    );
}

#[test]
fn time_remaining_shrinks_as_the_clock_advances() {
    let pipeline = EnrichmentPipeline::default();
    let issue = pipeline
        .enrich(submission(Category::Garbage, -0.5), at(0))
        .into_issue();

    let early = time_remaining(&issue, at(0)).expect("routed issue has a deadline");
    let later = time_remaining(&issue, at(3_600_000)).expect("routed issue has a deadline");
    assert_eq!(early, chrono::Duration::hours(48));
    assert_eq!(early - later, chrono::Duration::hours(1));
}
