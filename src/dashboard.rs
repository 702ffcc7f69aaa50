//! # Dashboard
//! Data shaping for the dashboard and analytics views: latest snapshot,
//! radar points, trend series and recent entries. Rendering is left to
//! whatever consumes the JSON.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::WindowConfig;
use crate::entry::{WellnessEntry, SCALE_DEFAULT, SCALE_MAX};
use crate::error::Result;
use crate::recommend::{self, RecommendationItem};
use crate::store::tail;

/// Headline numbers from the most recent check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub current_mood: Option<u8>,
    pub energy_level: Option<u8>,
    pub stress_level: Option<u8>,
    pub check_ins: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarPoint {
    pub subject: &'static str,
    pub value: u8,
    pub full_mark: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub mood: u8,
    pub energy: u8,
    pub stress: u8,
    pub anxiety: u8,
}

impl From<&WellnessEntry> for TrendPoint {
    fn from(e: &WellnessEntry) -> Self {
        Self {
            date: e.date(),
            mood: e.mood(),
            energy: e.energy(),
            stress: e.stress(),
            anxiety: e.anxiety(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub snapshot: Snapshot,
    pub radar: Vec<RadarPoint>,
    pub weekly_trend: Vec<TrendPoint>,
    pub recommendations: Vec<RecommendationItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub trend: Vec<TrendPoint>,
    /// Newest first.
    pub recent: Vec<WellnessEntry>,
}

pub fn snapshot(entries: &[WellnessEntry]) -> Snapshot {
    let latest = entries.last();
    Snapshot {
        current_mood: latest.map(|e| e.mood()),
        energy_level: latest.map(|e| e.energy()),
        stress_level: latest.map(|e| e.stress()),
        check_ins: entries.len(),
    }
}

/// Stress and anxiety are inverted so that "more" reads as "better" on
/// every axis. Missing entry falls back to the scale midpoint.
pub fn radar(latest: Option<&WellnessEntry>) -> Vec<RadarPoint> {
    let pick = |f: fn(&WellnessEntry) -> u8| latest.map(f).unwrap_or(SCALE_DEFAULT);
    let point = |subject, value| RadarPoint {
        subject,
        value,
        full_mark: SCALE_MAX,
    };

    vec![
        point("Mood", pick(WellnessEntry::mood)),
        point("Energy", pick(WellnessEntry::energy)),
        point("Low Stress", SCALE_MAX.saturating_sub(pick(WellnessEntry::stress))),
        point("Low Anxiety", SCALE_MAX.saturating_sub(pick(WellnessEntry::anxiety))),
    ]
}

pub fn trend(entries: &[WellnessEntry]) -> Vec<TrendPoint> {
    entries.iter().map(TrendPoint::from).collect()
}

/// Empty sequence → empty list. A zero-sized window over a non-empty
/// sequence is still an engine error and is returned as such.
pub fn recommendations_for(
    entries: &[WellnessEntry],
    windows: &WindowConfig,
) -> Result<Vec<RecommendationItem>> {
    if entries.is_empty() {
        debug!(target: "recommend", "no entries yet, skipping recommendations");
        return Ok(Vec::new());
    }
    recommend::recommend(tail(entries, windows.recommendation))
}

pub fn build_dashboard(entries: &[WellnessEntry], windows: &WindowConfig) -> Result<Dashboard> {
    Ok(Dashboard {
        snapshot: snapshot(entries),
        radar: radar(entries.last()),
        weekly_trend: trend(tail(entries, windows.weekly)),
        recommendations: recommendations_for(entries, windows)?,
    })
}

pub fn build_analytics(entries: &[WellnessEntry], windows: &WindowConfig) -> Analytics {
    Analytics {
        trend: trend(entries),
        recent: tail(entries, windows.recent).iter().rev().cloned().collect(),
    }
}
