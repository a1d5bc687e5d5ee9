use anyhow::{Result, anyhow, Context};
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::feed::collect_sources;
use crate::funding::build_dashboard;
use crate::models::{DashboardStats, DonationSummary, Event, FeedSources, Fundraiser, Post};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// HTTP client for the backend content API. All aggregation inputs come
/// through here; the aggregation core itself never performs I/O.
pub struct ContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    /// Creates a client against `SHELTERFEED_API_URL`, falling back to the
    /// local development backend.
    pub fn new() -> Result<Self> {
        let base_url =
            std::env::var("SHELTERFEED_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("ShelterFeed/0.1")
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("fetching {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to fetch {}: {}", path, response.status()));
        }

        Ok(response.json::<Value>().await?)
    }

    pub async fn fetch_posts(&self, shelter_id: &str) -> Result<Vec<Post>> {
        let payload = self
            .get_json(&format!("shelters/{}/posts", shelter_id))
            .await?;
        parse_records(payload, "posts")
    }

    pub async fn fetch_events(&self, shelter_id: &str) -> Result<Vec<Event>> {
        let payload = self
            .get_json(&format!("shelters/{}/events", shelter_id))
            .await?;
        parse_records(payload, "events")
    }

    pub async fn fetch_fundraisers(&self, shelter_id: &str) -> Result<Vec<Fundraiser>> {
        let payload = self
            .get_json(&format!("shelters/{}/fundraisers", shelter_id))
            .await?;
        parse_records(payload, "fundraisers")
    }

    pub async fn fetch_donation_summary(&self, shelter_id: &str) -> Result<DonationSummary> {
        let payload = self
            .get_json(&format!("shelters/{}/donations/summary", shelter_id))
            .await?;
        serde_json::from_value(payload).context("Invalid donation summary payload")
    }

    /// Fetches posts and events concurrently and folds the outcomes through
    /// the partial-failure policy: one failed source degrades to a warning,
    /// both failing fails the feed.
    pub async fn fetch_feed_sources(&self, shelter_id: &str) -> Result<FeedSources> {
        let (posts, events) = futures::future::join(
            self.fetch_posts(shelter_id),
            self.fetch_events(shelter_id),
        )
        .await;

        collect_sources(posts, events)
    }

    /// Fetches the donation summary and the fundraiser list concurrently and
    /// builds the combined report. Both inputs are required; a dashboard is
    /// meaningless with only half its data.
    pub async fn fetch_dashboard(&self, shelter_id: &str) -> Result<DashboardStats> {
        let (summary, fundraisers) = futures::future::join(
            self.fetch_donation_summary(shelter_id),
            self.fetch_fundraisers(shelter_id),
        )
        .await;

        let summary = summary.context("Donation summary unavailable")?;
        let fundraisers = fundraisers.context("Fundraiser list unavailable")?;

        Ok(build_dashboard(summary, &fundraisers, chrono::Utc::now()))
    }
}

/// Normalizes a collection payload into typed records. The backend returns
/// collections either flat (`[...]`) or wrapped in a pageable envelope
/// (`{"content": [...]}`); both shapes are accepted here so the aggregation
/// core never sees the difference.
pub fn parse_records<T: DeserializeOwned>(payload: Value, what: &str) -> Result<Vec<T>> {
    let raw_items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("content") {
            Some(Value::Array(items)) => items,
            _ => return Err(anyhow!("Unexpected {} payload: missing content array", what)),
        },
        _ => return Err(anyhow!("Unexpected {} payload shape", what)),
    };

    raw_items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).with_context(|| format!("Invalid {} record", what))
        })
        .collect()
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod fetcher_tests;
