//! store.rs — in-memory sekvence záznamů (bez persistence).
//!
//! Insertion-ordered, at most one entry per date. "Recent" always means the
//! positional tail of the sequence, never date arithmetic.

use chrono::NaiveDate;
use std::sync::Mutex;
use tracing::info;

use crate::entry::{CheckIn, Scores, WellnessEntry};
use crate::error::Result;
use crate::sentiment::SentimentClassifier;

/// Hard ceiling for the configured capacity.
pub const MAX_CAPACITY: usize = 100_000;

#[derive(Debug)]
pub struct EntryStore {
    inner: Mutex<Vec<WellnessEntry>>,
    cap: usize,
}

/// Outcome of a submitted check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInOutcome {
    pub entry: WellnessEntry,
    pub replaced: Option<WellnessEntry>,
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::with_capacity(10_000)
    }
}

impl EntryStore {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.clamp(1, MAX_CAPACITY);
        Self {
            inner: Mutex::new(Vec::new()),
            cap,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Last-write-wins per date: an existing entry for the same date is
    /// removed and the new one goes to the tail. Returns the replaced entry.
    pub fn upsert(&self, entry: WellnessEntry) -> Option<WellnessEntry> {
        let mut v = self.inner.lock().expect("entry store mutex poisoned");

        let replaced = v
            .iter()
            .position(|e| e.date() == entry.date())
            .map(|idx| v.remove(idx));

        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
        replaced
    }

    /// Validate a draft, derive its sentiment, stamp the date and store it.
    pub fn check_in(
        &self,
        draft: CheckIn,
        classifier: &SentimentClassifier,
        today: NaiveDate,
    ) -> Result<CheckInOutcome> {
        let entry = WellnessEntry::from_check_in(draft, today, classifier)?;
        let replaced = self.upsert(entry.clone());
        Ok(CheckInOutcome { entry, replaced })
    }

    /// The last `k` entries in insertion order (fewer if fewer exist).
    pub fn recent(&self, k: usize) -> Vec<WellnessEntry> {
        let v = self.inner.lock().expect("entry store mutex poisoned");
        tail(&v, k).to_vec()
    }

    pub fn all(&self) -> Vec<WellnessEntry> {
        self.inner.lock().expect("entry store mutex poisoned").clone()
    }

    pub fn latest(&self) -> Option<WellnessEntry> {
        let v = self.inner.lock().expect("entry store mutex poisoned");
        v.last().cloned()
    }

    pub fn get(&self, date: NaiveDate) -> Option<WellnessEntry> {
        let v = self.inner.lock().expect("entry store mutex poisoned");
        v.iter().find(|e| e.date() == date).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("entry store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load the seven sample check-ins of the first week of January 2024.
    pub fn seed_demo(&self) -> Result<usize> {
        let seed = demo_entries()?;
        let n = seed.len();
        for e in seed {
            self.upsert(e);
        }
        info!(target: "store", entries = n, "demo entries seeded");
        Ok(n)
    }
}

/// Positional tail of a slice.
pub fn tail(entries: &[WellnessEntry], k: usize) -> &[WellnessEntry] {
    let start = entries.len().saturating_sub(k);
    &entries[start..]
}

const DEMO: [(u32, [u8; 4], &str); 7] = [
    (1, [7, 3, 4, 6], "Started new semester, feeling optimistic"),
    (2, [6, 4, 5, 5], "Lots of coursework already"),
    (3, [8, 2, 3, 8], "Great day with friends, feeling balanced"),
    (4, [5, 6, 7, 4], "Midterm stress kicking in"),
    (5, [7, 3, 4, 7], "Meditation helped a lot"),
    (6, [6, 4, 5, 6], "Regular day, staying consistent"),
    (7, [9, 1, 2, 9], "Amazing weekend with family!"),
];

fn demo_entries() -> Result<Vec<WellnessEntry>> {
    let classifier = SentimentClassifier::new();
    DEMO.iter()
        .filter_map(|(day, [mood, anxiety, stress, energy], notes)| {
            NaiveDate::from_ymd_opt(2024, 1, *day).map(|date| {
                WellnessEntry::with_classifier(
                    date,
                    Scores::new(*mood, *anxiety, *stress, *energy),
                    *notes,
                    &classifier,
                )
            })
        })
        .collect()
}
