use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub long_description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub image_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub long_description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub address: Option<String>,
    #[serde(default)]
    pub image_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Post,
    Event,
}

/// A post or event normalized into one displayable, sortable record.
/// `published` is the ordering timestamp: `created_at` for posts,
/// `start_date` for events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub kind: FeedKind,
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub long_description: Option<String>,
    pub published: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub address: Option<String>,
    #[serde(default)]
    pub image_ids: Vec<String>,
}

impl FeedItem {
    pub fn main_image_id(&self) -> Option<&str> {
        self.image_ids.first().map(String::as_str)
    }
}

impl From<Post> for FeedItem {
    fn from(post: Post) -> Self {
        FeedItem {
            kind: FeedKind::Post,
            id: post.id,
            title: post.title,
            short_description: post.short_description,
            long_description: post.long_description,
            published: post.created_at,
            end_date: None,
            address: None,
            image_ids: post.image_ids,
        }
    }
}

impl From<Event> for FeedItem {
    fn from(event: Event) -> Self {
        FeedItem {
            kind: FeedKind::Event,
            id: event.id,
            title: event.title,
            short_description: event.short_description,
            long_description: event.long_description,
            published: event.start_date,
            end_date: event.end_date,
            address: event.address,
            image_ids: event.image_ids,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoredStatus {
    Active,
    Paused,
    Completed,
    Cancelled,
    Draft,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundraiserCategory {
    Medical,
    Food,
    Supplies,
    Facility,
    Emergency,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundraiser {
    pub id: String,
    pub title: String,
    pub goal_amount: f64,
    pub current_amount: f64,
    #[serde(rename = "status")]
    pub stored_status: StoredStatus,
    pub end_date: Option<DateTime<Utc>>,
    pub category: FundraiserCategory,
}

/// Status computed from goal/date/stored-status rules, as opposed to the
/// raw stored status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedStatus {
    Expired,
    Completed,
    Active,
    Paused,
    Cancelled,
    Draft,
    Unknown,
}

impl ResolvedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedStatus::Expired => "expired",
            ResolvedStatus::Completed => "completed",
            ResolvedStatus::Active => "active",
            ResolvedStatus::Paused => "paused",
            ResolvedStatus::Cancelled => "cancelled",
            ResolvedStatus::Draft => "draft",
            ResolvedStatus::Unknown => "unknown",
        }
    }
}

/// Aggregate donation figures produced by the backend, passed through
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSummary {
    pub total_donations: usize,
    pub total_amount: f64,
    pub completed_donations: usize,
    pub pending_donations: usize,
    pub average_donation_amount: f64,
    pub last_donation_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateFundraiserStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub expired: usize,
    pub total_raised: f64,
    pub total_goal: f64,
    pub average_progress: f64,
}

/// Flat merge of the donation summary and the fundraiser aggregate. The two
/// inputs use disjoint field names, so flattening cannot collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(flatten)]
    pub donations: DonationSummary,
    #[serde(flatten)]
    pub fundraisers: AggregateFundraiserStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<FeedItem>,
    pub total: usize,
}

/// Outcome of fetching both feed sources. A failed source leaves its
/// collection empty and records a warning instead of failing the feed.
#[derive(Debug, Default)]
pub struct FeedSources {
    pub posts: Vec<Post>,
    pub events: Vec<Event>,
    pub warnings: Vec<String>,
}
