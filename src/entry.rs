//! entry.rs — denní záznam (check-in) a jeho validace.
//!
//! A `WellnessEntry` is immutable once built: fields are private and the
//! only constructors validate the 1..=10 scale and derive the note
//! sentiment up front.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, WellnessError};
use crate::sentiment::{SentimentClassifier, SentimentLabel};

pub const SCALE_MIN: u8 = 1;
pub const SCALE_MAX: u8 = 10;

/// Default slider position of a fresh check-in form.
pub const SCALE_DEFAULT: u8 = 5;

/// The four self-reported dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Mood,
    Anxiety,
    Stress,
    Energy,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Mood, Metric::Anxiety, Metric::Stress, Metric::Energy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Mood => "mood",
            Metric::Anxiety => "anxiety",
            Metric::Stress => "stress",
            Metric::Energy => "energy",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One set of metric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub mood: u8,
    pub anxiety: u8,
    pub stress: u8,
    pub energy: u8,
}

impl Default for Scores {
    fn default() -> Self {
        Self::new(SCALE_DEFAULT, SCALE_DEFAULT, SCALE_DEFAULT, SCALE_DEFAULT)
    }
}

impl Scores {
    pub fn new(mood: u8, anxiety: u8, stress: u8, energy: u8) -> Self {
        Self {
            mood,
            anxiety,
            stress,
            energy,
        }
    }

    pub fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Mood => self.mood,
            Metric::Anxiety => self.anxiety,
            Metric::Stress => self.stress,
            Metric::Energy => self.energy,
        }
    }

    /// Reports the first metric (in `Metric::ALL` order) outside the scale.
    pub fn validate(&self) -> Result<()> {
        for metric in Metric::ALL {
            let value = self.get(metric);
            if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
                return Err(WellnessError::OutOfRange { metric, value });
            }
        }
        Ok(())
    }
}

/// Check-in form draft, owned by the caller until it is submitted.
/// `Default` is the reset form: every slider at 5, no notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    #[serde(flatten)]
    pub scores: Scores,
    #[serde(default)]
    pub notes: String,
    /// Missing date means "today" at submission time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// A stored daily record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellnessEntry {
    date: NaiveDate,
    #[serde(flatten)]
    scores: Scores,
    notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment: Option<SentimentLabel>,
}

impl WellnessEntry {
    /// Build with the built-in lexicon.
    pub fn new(date: NaiveDate, scores: Scores, notes: impl Into<String>) -> Result<Self> {
        Self::with_classifier(date, scores, notes, &SentimentClassifier::new())
    }

    /// Validates the scores; sentiment stays `None` for empty notes.
    pub fn with_classifier(
        date: NaiveDate,
        scores: Scores,
        notes: impl Into<String>,
        classifier: &SentimentClassifier,
    ) -> Result<Self> {
        scores.validate()?;
        let notes = notes.into();
        let sentiment = classifier.preview(&notes);
        Ok(Self {
            date,
            scores,
            notes,
            sentiment,
        })
    }

    /// Turn a submitted draft into an entry; `today` fills a missing date.
    pub fn from_check_in(
        draft: CheckIn,
        today: NaiveDate,
        classifier: &SentimentClassifier,
    ) -> Result<Self> {
        let date = draft.date.unwrap_or(today);
        Self::with_classifier(date, draft.scores, draft.notes, classifier)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn get(&self, metric: Metric) -> u8 {
        self.scores.get(metric)
    }

    pub fn mood(&self) -> u8 {
        self.scores.mood
    }

    pub fn anxiety(&self) -> u8 {
        self.scores.anxiety
    }

    pub fn stress(&self) -> u8 {
        self.scores.stress
    }

    pub fn energy(&self) -> u8 {
        self.scores.energy
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn sentiment(&self) -> Option<SentimentLabel> {
        self.sentiment
    }
}
