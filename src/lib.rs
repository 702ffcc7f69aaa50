// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod entry;
pub mod error;
pub mod metrics;
pub mod recommend;
pub mod sentiment;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::entry::{CheckIn, Metric, Scores, WellnessEntry};
pub use crate::error::{Result, WellnessError};
pub use crate::recommend::{recommend, RecommendationItem, RecommendationKind};
pub use crate::sentiment::{classify, SentimentClassifier, SentimentLabel};
pub use crate::store::EntryStore;
