//! # Recommendation Engine
//! Pure, testable logic that maps a window of recent entries → ordered
//! recommendation items. No I/O, no shared state.
//!
//! Policy: average each metric over the window, then walk the `RULES`
//! table in order; every rule whose gate holds contributes one item. If no
//! rule fired, the single maintenance item is returned instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::{Metric, WellnessEntry};
use crate::error::{Result, WellnessError};

/// Category of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Mood,
    Anxiety,
    Stress,
    Energy,
    Maintenance,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Mood => "mood",
            RecommendationKind::Anxiety => "anxiety",
            RecommendationKind::Stress => "stress",
            RecommendationKind::Energy => "energy",
            RecommendationKind::Maintenance => "maintenance",
        }
    }
}

/// One suggestion shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationItem {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub suggestion: String,
    pub icon: String,
}

/// Static text of an item; instantiated fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub kind: RecommendationKind,
    pub title: &'static str,
    pub suggestion: &'static str,
    pub icon: &'static str,
}

impl Template {
    pub fn instantiate(&self) -> RecommendationItem {
        RecommendationItem {
            kind: self.kind,
            title: self.title.to_string(),
            suggestion: self.suggestion.to_string(),
            icon: self.icon.to_string(),
        }
    }
}

/// Strict comparison against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Below,
    Above,
}

/// `(metric average, comparison, threshold) → template`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub metric: Metric,
    pub comparison: Comparison,
    pub threshold: f64,
    pub template: Template,
}

impl Rule {
    pub fn fires(&self, averages: &Averages) -> bool {
        let avg = averages.get(self.metric);
        match self.comparison {
            Comparison::Below => avg < self.threshold,
            Comparison::Above => avg > self.threshold,
        }
    }
}

/// Built-in rule table. Order here is display order.
pub const RULES: [Rule; 4] = [
    Rule {
        metric: Metric::Mood,
        comparison: Comparison::Below,
        threshold: 5.0,
        template: Template {
            kind: RecommendationKind::Mood,
            title: "Mood Enhancement",
            suggestion: "Try engaging in activities you enjoy - listen to uplifting music, spend time with friends, or practice gratitude journaling.",
            icon: "😊",
        },
    },
    Rule {
        metric: Metric::Anxiety,
        comparison: Comparison::Above,
        threshold: 6.0,
        template: Template {
            kind: RecommendationKind::Anxiety,
            title: "Anxiety Management",
            suggestion: "Practice deep breathing exercises, try progressive muscle relaxation, or consider speaking with a counselor.",
            icon: "🧘",
        },
    },
    Rule {
        metric: Metric::Stress,
        comparison: Comparison::Above,
        threshold: 6.0,
        template: Template {
            kind: RecommendationKind::Stress,
            title: "Stress Reduction",
            suggestion: "Break large tasks into smaller ones, practice time management, and ensure you're getting adequate sleep.",
            icon: "⏰",
        },
    },
    Rule {
        metric: Metric::Energy,
        comparison: Comparison::Below,
        threshold: 5.0,
        template: Template {
            kind: RecommendationKind::Energy,
            title: "Energy Boost",
            suggestion: "Focus on regular exercise, maintain consistent sleep schedule, and eat nutritious meals throughout the day.",
            icon: "⚡",
        },
    },
];

/// Emitted only when no rule fired.
pub const MAINTENANCE: Template = Template {
    kind: RecommendationKind::Maintenance,
    title: "Keep Up the Great Work!",
    suggestion: "You're maintaining good wellness habits. Continue with regular self-care and stay connected with your support network.",
    icon: "🌟",
};

/// Arithmetic means over a non-empty window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    pub mood: f64,
    pub anxiety: f64,
    pub stress: f64,
    pub energy: f64,
    pub count: usize,
}

impl Averages {
    /// Fails with `InvalidInput` on an empty window instead of dividing by zero.
    pub fn over(window: &[WellnessEntry]) -> Result<Self> {
        if window.is_empty() {
            return Err(WellnessError::InvalidInput(
                "recommendation window must contain at least one entry".into(),
            ));
        }

        let n = window.len() as f64;
        let mean = |m: Metric| window.iter().map(|e| f64::from(e.get(m))).sum::<f64>() / n;

        Ok(Self {
            mood: mean(Metric::Mood),
            anxiety: mean(Metric::Anxiety),
            stress: mean(Metric::Stress),
            energy: mean(Metric::Energy),
            count: window.len(),
        })
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Mood => self.mood,
            Metric::Anxiety => self.anxiety,
            Metric::Stress => self.stress,
            Metric::Energy => self.energy,
        }
    }
}

/// Averages together with the items they produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub averages: Averages,
    pub items: Vec<RecommendationItem>,
}

/// Recommendations for `window` using the built-in `RULES`.
pub fn recommend(window: &[WellnessEntry]) -> Result<Vec<RecommendationItem>> {
    recommend_with(&RULES, window)
}

/// Same as [`recommend`] over a caller-supplied rule table.
pub fn recommend_with(rules: &[Rule], window: &[WellnessEntry]) -> Result<Vec<RecommendationItem>> {
    assess_with(rules, window).map(|a| a.items)
}

pub fn assess(window: &[WellnessEntry]) -> Result<Assessment> {
    assess_with(&RULES, window)
}

pub fn assess_with(rules: &[Rule], window: &[WellnessEntry]) -> Result<Assessment> {
    let averages = Averages::over(window)?;

    let mut items: Vec<RecommendationItem> = rules
        .iter()
        .filter(|r| r.fires(&averages))
        .map(|r| r.template.instantiate())
        .collect();

    if items.is_empty() {
        items.push(MAINTENANCE.instantiate());
    }

    debug!(
        target: "recommend",
        window = averages.count,
        mood = averages.mood,
        anxiety = averages.anxiety,
        stress = averages.stress,
        energy = averages.energy,
        items = items.len(),
        "recommendations evaluated"
    );

    Ok(Assessment { averages, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Scores;
    use chrono::NaiveDate;

    fn entry(d: u32, mood: u8, anxiety: u8, stress: u8, energy: u8) -> WellnessEntry {
        let date = NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        WellnessEntry::new(date, Scores::new(mood, anxiety, stress, energy), "").unwrap()
    }

    fn kinds(items: &[RecommendationItem]) -> Vec<RecommendationKind> {
        items.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn empty_window_is_invalid_input() {
        let err = recommend(&[]).unwrap_err();
        assert!(matches!(err, WellnessError::InvalidInput(_)));
    }

    #[test]
    fn healthy_window_yields_only_maintenance() {
        let w = vec![entry(1, 7, 3, 4, 6), entry(2, 6, 4, 5, 5), entry(3, 8, 2, 3, 8)];
        let a = assess(&w).unwrap();
        assert!((a.averages.mood - 7.0).abs() < 1e-9);
        assert!((a.averages.anxiety - 3.0).abs() < 1e-9);
        assert!((a.averages.stress - 4.0).abs() < 1e-9);
        assert!((a.averages.energy - 19.0 / 3.0).abs() < 1e-9);
        assert_eq!(kinds(&a.items), vec![RecommendationKind::Maintenance]);
        assert_eq!(a.items[0].title, "Keep Up the Great Work!");
    }

    #[test]
    fn struggling_single_entry_fires_all_four_in_order() {
        let items = recommend(&[entry(1, 4, 7, 7, 3)]).unwrap();
        assert_eq!(
            kinds(&items),
            vec![
                RecommendationKind::Mood,
                RecommendationKind::Anxiety,
                RecommendationKind::Stress,
                RecommendationKind::Energy,
            ]
        );
        assert_eq!(items[2].icon, "⏰");
    }

    #[test]
    fn thresholds_are_strict() {
        let items = recommend(&[entry(1, 5, 6, 6, 5)]).unwrap();
        assert_eq!(kinds(&items), vec![RecommendationKind::Maintenance]);
    }

    #[test]
    fn fractional_average_crosses_threshold() {
        // mood avg = 14/3 ≈ 4.67 < 5
        let w = vec![entry(1, 5, 3, 3, 7), entry(2, 5, 3, 3, 7), entry(3, 4, 3, 3, 7)];
        assert_eq!(kinds(&recommend(&w).unwrap()), vec![RecommendationKind::Mood]);
    }

    #[test]
    fn custom_table_keeps_its_own_order() {
        let rules = [RULES[3], RULES[0]];
        let items = recommend_with(&rules, &[entry(1, 1, 1, 1, 1)]).unwrap();
        assert_eq!(
            kinds(&items),
            vec![RecommendationKind::Energy, RecommendationKind::Mood]
        );
    }

    #[test]
    fn item_serializes_type_field() {
        let v = serde_json::to_value(MAINTENANCE.instantiate()).unwrap();
        assert_eq!(v["type"], serde_json::json!("maintenance"));
        assert_eq!(v["icon"], serde_json::json!("🌟"));
    }
}
