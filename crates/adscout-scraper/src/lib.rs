pub mod client;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod report;
mod retry;
pub mod types;

pub use client::AdsClient;
pub use error::ScraperError;
pub use normalize::normalize_ad;
pub use pipeline::{collect, Collection, RunPlan};
pub use report::{Item, ItemOutcome, ItemResult, RunReport};
pub use types::{AdDetail, AdSummary, VideoInfo};
