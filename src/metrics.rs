use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::recommend::RecommendationItem;
use crate::sentiment::SentimentLabel;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and publish the configured window size.
    pub fn init(recommendation_window: usize) -> anyhow::Result<Self> {
        // Use default buckets to avoid API differences across crate versions.
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        ensure_described();
        gauge!("wellness_recommendation_window").set(recommendation_window as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("wellness_checkins_total", "Check-ins stored, by note sentiment.");
        describe_counter!(
            "wellness_checkins_replaced_total",
            "Check-ins that replaced an earlier entry for the same date."
        );
        describe_counter!(
            "wellness_sentiment_classified_total",
            "Texts classified via the API, by label."
        );
        describe_counter!(
            "wellness_recommendations_total",
            "Recommendation items emitted, by type."
        );
        describe_gauge!(
            "wellness_recommendation_window",
            "Entries averaged for recommendations."
        );
    });
}

pub fn record_check_in(sentiment: Option<SentimentLabel>, replaced: bool) {
    let label = sentiment.map(|s| s.as_str()).unwrap_or("none");
    counter!("wellness_checkins_total", "sentiment" => label).increment(1);
    if replaced {
        counter!("wellness_checkins_replaced_total").increment(1);
    }
}

pub fn record_classification(label: SentimentLabel) {
    counter!("wellness_sentiment_classified_total", "label" => label.as_str()).increment(1);
}

pub fn record_recommendations(items: &[RecommendationItem]) {
    for item in items {
        counter!("wellness_recommendations_total", "type" => item.kind.as_str()).increment(1);
    }
}
