use super::*;
use crate::models::{Fundraiser, FundraiserCategory, StoredStatus};
use chrono::{Duration, TimeZone, Utc};

fn make_fundraiser(id: &str, goal: f64, current: f64, status: StoredStatus) -> Fundraiser {
    Fundraiser {
        id: id.to_string(),
        title: format!("Fundraiser {}", id),
        goal_amount: goal,
        current_amount: current,
        stored_status: status,
        end_date: None,
        category: FundraiserCategory::Medical,
    }
}

fn test_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

#[test]
fn test_goal_reached_beats_stored_status() {
    let fundraiser = make_fundraiser("a", 100.0, 100.0, StoredStatus::Active);

    assert_eq!(resolve_status(&fundraiser, test_now()), ResolvedStatus::Completed);
}

#[test]
fn test_expiry_beats_goal_completion() {
    let mut fundraiser = make_fundraiser("a", 100.0, 150.0, StoredStatus::Active);
    fundraiser.end_date = Some(test_now() - Duration::days(1));

    assert_eq!(resolve_status(&fundraiser, test_now()), ResolvedStatus::Expired);
}

#[test]
fn test_future_end_date_does_not_expire() {
    let mut fundraiser = make_fundraiser("a", 100.0, 10.0, StoredStatus::Active);
    fundraiser.end_date = Some(test_now() + Duration::days(1));

    assert_eq!(resolve_status(&fundraiser, test_now()), ResolvedStatus::Active);
}

#[test]
fn test_stored_status_mapping() {
    let cases = [
        (StoredStatus::Active, ResolvedStatus::Active),
        (StoredStatus::Completed, ResolvedStatus::Completed),
        (StoredStatus::Cancelled, ResolvedStatus::Cancelled),
        (StoredStatus::Paused, ResolvedStatus::Paused),
        (StoredStatus::Draft, ResolvedStatus::Draft),
        (StoredStatus::Unknown, ResolvedStatus::Unknown),
    ];

    for (stored, expected) in cases {
        let fundraiser = make_fundraiser("a", 100.0, 10.0, stored);
        assert_eq!(resolve_status(&fundraiser, test_now()), expected);
    }
}

#[test]
fn test_zero_goal_never_divides() {
    let fundraiser = make_fundraiser("a", 0.0, 50.0, StoredStatus::Active);

    assert_eq!(progress_percent(&fundraiser), 0.0);
    // A zero goal also never counts as completed.
    assert_eq!(resolve_status(&fundraiser, test_now()), ResolvedStatus::Active);
}

#[test]
fn test_progress_capped_at_hundred() {
    let fundraiser = make_fundraiser("a", 100.0, 250.0, StoredStatus::Active);

    assert_eq!(progress_percent(&fundraiser), 100.0);
}

#[test]
fn test_aggregate_empty_returns_zero_stats() {
    let stats = aggregate_fundraisers(&[], test_now());

    assert_eq!(stats.total, 0);
    assert_eq!(stats.active, 0);
    assert_eq!(stats.completed, 0);
    assert_eq!(stats.expired, 0);
    assert_eq!(stats.total_raised, 0.0);
    assert_eq!(stats.total_goal, 0.0);
    assert_eq!(stats.average_progress, 0.0);
}

#[test]
fn test_aggregate_mixed_statuses() {
    let completed = make_fundraiser("a", 100.0, 100.0, StoredStatus::Active);

    let mut expired = make_fundraiser("b", 200.0, 50.0, StoredStatus::Active);
    expired.end_date = Some(test_now() - Duration::days(1));

    let mut paused = make_fundraiser("c", 300.0, 30.0, StoredStatus::Paused);
    paused.end_date = Some(test_now() + Duration::days(1));

    let stats = aggregate_fundraisers(&[completed, expired, paused], test_now());

    assert_eq!(stats.total, 3);
    assert_eq!(stats.active, 0);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.expired, 1);
    assert_eq!(stats.total_raised, 180.0);
    assert_eq!(stats.total_goal, 600.0);
    // (100 + 25 + 10) / 3
    assert!((stats.average_progress - 45.0).abs() < 1e-9);
}

#[test]
fn test_aggregate_counts_untracked_statuses_in_total_only() {
    let draft = make_fundraiser("a", 100.0, 10.0, StoredStatus::Draft);
    let cancelled = make_fundraiser("b", 100.0, 20.0, StoredStatus::Cancelled);

    let stats = aggregate_fundraisers(&[draft, cancelled], test_now());

    assert_eq!(stats.total, 2);
    assert_eq!(stats.active + stats.completed + stats.expired, 0);
    assert_eq!(stats.total_raised, 30.0);
}

#[test]
fn test_dashboard_merges_both_inputs() {
    let summary = DonationSummary {
        total_donations: 12,
        total_amount: 420.0,
        completed_donations: 10,
        pending_donations: 2,
        average_donation_amount: 35.0,
        last_donation_date: Some(test_now()),
    };
    let fundraisers = vec![make_fundraiser("a", 100.0, 100.0, StoredStatus::Active)];

    let dashboard = build_dashboard(summary, &fundraisers, test_now());

    assert_eq!(dashboard.donations.total_donations, 12);
    assert_eq!(dashboard.fundraisers.completed, 1);

    // The serialized report is one flat object with disjoint keys.
    let value = serde_json::to_value(&dashboard).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.contains_key("totalAmount"));
    assert!(object.contains_key("totalRaised"));
}

#[test]
fn test_fundraiser_index_lookup() {
    let fundraisers = vec![
        make_fundraiser("a", 100.0, 10.0, StoredStatus::Active),
        make_fundraiser("b", 200.0, 20.0, StoredStatus::Paused),
    ];

    let index = fundraiser_index(&fundraisers);

    assert_eq!(index.len(), 2);
    assert_eq!(index.get("b").unwrap().goal_amount, 200.0);
    assert!(index.get("missing").is_none());
}
