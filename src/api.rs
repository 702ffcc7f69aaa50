use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shuttle_axum::axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::{AppConfig, WindowConfig};
use crate::dashboard::{self, Analytics, Dashboard};
use crate::entry::{CheckIn, WellnessEntry};
use crate::error::WellnessError;
use crate::metrics;
use crate::recommend::{self, RecommendationItem};
use crate::sentiment::{SentimentClassifier, SentimentLabel};
use crate::store::EntryStore;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<SentimentClassifier>,
    pub store: Arc<EntryStore>,
    pub windows: WindowConfig,
}

impl AppState {
    pub fn new(classifier: SentimentClassifier, store: EntryStore, windows: WindowConfig) -> Self {
        Self {
            classifier: Arc::new(classifier),
            store: Arc::new(store),
            windows,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self::new(cfg.build_classifier()?, cfg.build_store()?, cfg.windows))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/sentiment", post(classify_text))
        .route("/checkin", post(submit_check_in))
        .route("/checkin/preview", post(preview_notes))
        .route("/entries", get(list_entries))
        .route("/recommendations", get(recommendations))
        .route("/dashboard", get(dashboard_view))
        .route("/analytics", get(analytics_view))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

impl IntoResponse for WellnessError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Fingerprint for a note: hex of the first 6 bytes of its SHA-256.
/// Check-in logs carry this id so the note text itself never reaches them.
pub(crate) fn note_fingerprint(notes: &str) -> String {
    let digest = Sha256::digest(notes.as_bytes());
    digest[..6].iter().map(|b| format!("{b:02x}")).collect()
}

#[derive(Deserialize)]
struct SentimentReq {
    text: String,
}

#[derive(Serialize)]
struct SentimentResp {
    sentiment: SentimentLabel,
    positive: usize,
    negative: usize,
    tokens: usize,
}

async fn classify_text(
    State(state): State<AppState>,
    Json(body): Json<SentimentReq>,
) -> Json<SentimentResp> {
    let score = state.classifier.score_text(&body.text);
    let sentiment = score.label();
    metrics::record_classification(sentiment);
    Json(SentimentResp {
        sentiment,
        positive: score.positive,
        negative: score.negative,
        tokens: score.tokens,
    })
}

#[derive(Deserialize)]
struct PreviewReq {
    #[serde(default)]
    notes: String,
}

#[derive(Serialize)]
struct PreviewResp {
    sentiment: Option<SentimentLabel>,
}

async fn preview_notes(
    State(state): State<AppState>,
    Json(body): Json<PreviewReq>,
) -> Json<PreviewResp> {
    Json(PreviewResp {
        sentiment: state.classifier.preview(&body.notes),
    })
}

#[derive(Serialize)]
struct CheckInResp {
    entry: WellnessEntry,
    replaced: bool,
}

async fn submit_check_in(
    State(state): State<AppState>,
    Json(draft): Json<CheckIn>,
) -> Result<(StatusCode, Json<CheckInResp>), WellnessError> {
    let note_id = note_fingerprint(&draft.notes);
    let today = Utc::now().date_naive();

    let outcome = state
        .store
        .check_in(draft, &state.classifier, today)
        .inspect_err(|e| warn!(target: "checkin", error = %e, "check-in rejected"))?;

    let replaced = outcome.replaced.is_some();
    info!(
        target: "checkin",
        date = %outcome.entry.date(),
        note = %note_id,
        sentiment = ?outcome.entry.sentiment(),
        replaced,
        "check-in stored"
    );
    metrics::record_check_in(outcome.entry.sentiment(), replaced);

    Ok((
        StatusCode::CREATED,
        Json(CheckInResp {
            entry: outcome.entry,
            replaced,
        }),
    ))
}

#[derive(Deserialize)]
struct EntriesQuery {
    #[serde(default)]
    limit: Option<usize>,
}

async fn list_entries(
    State(state): State<AppState>,
    Query(q): Query<EntriesQuery>,
) -> Json<Vec<WellnessEntry>> {
    let rows = match q.limit {
        Some(n) => state.store.recent(n),
        None => state.store.all(),
    };
    Json(rows)
}

async fn recommendations(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecommendationItem>>, WellnessError> {
    let window = state.store.recent(state.windows.recommendation);
    let items = recommend::recommend(&window)?;
    metrics::record_recommendations(&items);
    Ok(Json(items))
}

async fn dashboard_view(State(state): State<AppState>) -> Result<Json<Dashboard>, WellnessError> {
    let entries = state.store.all();
    let d = dashboard::build_dashboard(&entries, &state.windows)?;
    metrics::record_recommendations(&d.recommendations);
    Ok(Json(d))
}

async fn analytics_view(State(state): State<AppState>) -> Json<Analytics> {
    let entries = state.store.all();
    Json(dashboard::build_analytics(&entries, &state.windows))
}
