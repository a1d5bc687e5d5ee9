pub mod models;
pub mod fetcher;
pub mod feed;
pub mod funding;
