use chrono::{DateTime, Utc};
use std::collections::HashMap;
use crate::models::{
    AggregateFundraiserStats, DashboardStats, DonationSummary, Fundraiser, ResolvedStatus,
    StoredStatus,
};

/// Resolves a fundraiser's effective status at `now`.
/// The rules are checked in order: an elapsed end date wins over a reached
/// goal, and a reached goal wins over the stored status.
pub fn resolve_status(fundraiser: &Fundraiser, now: DateTime<Utc>) -> ResolvedStatus {
    if let Some(end_date) = fundraiser.end_date {
        if end_date < now {
            return ResolvedStatus::Expired;
        }
    }

    if fundraiser.goal_amount > 0.0 && fundraiser.current_amount >= fundraiser.goal_amount {
        return ResolvedStatus::Completed;
    }

    match fundraiser.stored_status {
        StoredStatus::Active => ResolvedStatus::Active,
        StoredStatus::Completed => ResolvedStatus::Completed,
        StoredStatus::Cancelled => ResolvedStatus::Cancelled,
        StoredStatus::Paused => ResolvedStatus::Paused,
        StoredStatus::Draft => ResolvedStatus::Draft,
        StoredStatus::Unknown => ResolvedStatus::Unknown,
    }
}

/// Progress toward the goal as a percentage, capped at 100.
/// A zero or missing goal yields 0 rather than a division fault.
pub fn progress_percent(fundraiser: &Fundraiser) -> f64 {
    if fundraiser.goal_amount <= 0.0 {
        return 0.0;
    }
    (fundraiser.current_amount / fundraiser.goal_amount).min(1.0) * 100.0
}

/// Folds a fundraiser collection into summary statistics. An empty input
/// returns all-zero stats. Only active/completed/expired get their own
/// counters; paused, cancelled, draft and unknown count toward `total` only.
pub fn aggregate_fundraisers(
    fundraisers: &[Fundraiser],
    now: DateTime<Utc>,
) -> AggregateFundraiserStats {
    let mut stats = AggregateFundraiserStats {
        total: 0,
        active: 0,
        completed: 0,
        expired: 0,
        total_raised: 0.0,
        total_goal: 0.0,
        average_progress: 0.0,
    };

    if fundraisers.is_empty() {
        return stats;
    }

    let mut progress_sum = 0.0;

    for fundraiser in fundraisers {
        match resolve_status(fundraiser, now) {
            ResolvedStatus::Active => stats.active += 1,
            ResolvedStatus::Completed => stats.completed += 1,
            ResolvedStatus::Expired => stats.expired += 1,
            _ => {}
        }

        stats.total_raised += fundraiser.current_amount;
        stats.total_goal += fundraiser.goal_amount;
        progress_sum += progress_percent(fundraiser);
    }

    stats.total = fundraisers.len();
    stats.average_progress = progress_sum / fundraisers.len() as f64;
    stats
}

/// Combines the backend's donation summary with freshly aggregated
/// fundraiser stats into one flat report.
pub fn build_dashboard(
    summary: DonationSummary,
    fundraisers: &[Fundraiser],
    now: DateTime<Utc>,
) -> DashboardStats {
    DashboardStats {
        donations: summary,
        fundraisers: aggregate_fundraisers(fundraisers, now),
    }
}

/// By-id lookup map over a fundraiser collection. The map borrows from the
/// collection and is owned by the caller; the engine keeps no cache of its
/// own between calls.
pub fn fundraiser_index(fundraisers: &[Fundraiser]) -> HashMap<&str, &Fundraiser> {
    fundraisers
        .iter()
        .map(|f| (f.id.as_str(), f))
        .collect()
}

#[cfg(test)]
#[path = "funding_tests.rs"]
mod funding_tests;
