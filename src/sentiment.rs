//! # Sentiment
//! Lexicon-based labelling of check-in notes.
//!
//! The lexicon is a plain `word → polarity` table embedded from
//! `sentiment_lexicon.json`. It can be swapped for a file on disk without
//! touching the decision rule in [`SentimentScore::label`].

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, fs, path::Path};

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    Lexicon::from_json_str(raw).expect("valid sentiment lexicon")
});

/// Label attached to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity of a single lexicon word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

/// Immutable word → polarity table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashMap<String, Polarity>,
}

impl Lexicon {
    /// The table shipped with the crate.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Parse `{"word": "positive" | "negative", ...}`. Keys are lower-cased
    /// so lookups stay case-insensitive; two spellings of one word with
    /// different polarities are rejected.
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let parsed: HashMap<String, Polarity> =
            serde_json::from_str(raw).context("parsing sentiment lexicon")?;

        let mut words = HashMap::with_capacity(parsed.len());
        for (word, polarity) in parsed {
            let key = word.to_lowercase();
            match words.insert(key.clone(), polarity) {
                Some(prev) if prev != polarity => {
                    anyhow::bail!("sentiment lexicon: conflicting polarity for {key:?}")
                }
                _ => {}
            }
        }
        Ok(Self { words })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading sentiment lexicon from {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Polarity for an already lower-cased token.
    #[inline]
    pub fn polarity(&self, token: &str) -> Option<Polarity> {
        self.words.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, Polarity)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (S, Polarity)>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|(w, p)| (w.as_ref().to_lowercase(), p))
            .collect();
        Self { words }
    }
}

/// Raw match counts for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentScore {
    pub positive: usize,
    pub negative: usize,
    pub tokens: usize,
}

impl SentimentScore {
    /// Strict majority wins; ties (including 0-0) are neutral.
    pub fn label(&self) -> SentimentLabel {
        if self.positive > self.negative {
            SentimentLabel::Positive
        } else if self.negative > self.positive {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    lexicon: Lexicon,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentClassifier {
    /// Classifier over the built-in lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::builtin().clone())
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Whole-token matching after lower-casing and whitespace splitting.
    /// Punctuation stays attached to the token ("great!" does not match "great").
    pub fn score_text(&self, text: &str) -> SentimentScore {
        score_with(&self.lexicon, text)
    }

    /// Total over all inputs: empty or unmatched text is neutral.
    pub fn classify(&self, text: &str) -> SentimentLabel {
        self.score_text(text).label()
    }

    /// Live preview for the notes field: nothing to show until notes are typed.
    pub fn preview(&self, notes: &str) -> Option<SentimentLabel> {
        if notes.is_empty() {
            None
        } else {
            Some(self.classify(notes))
        }
    }
}

/// Classify with the built-in lexicon.
pub fn classify(text: &str) -> SentimentLabel {
    // Bez klonování lexikonu při každém volání.
    score_with(Lexicon::builtin(), text).label()
}

fn score_with(lexicon: &Lexicon, text: &str) -> SentimentScore {
    let lowered = text.to_lowercase();
    let mut score = SentimentScore::default();

    for token in lowered.split_whitespace() {
        score.tokens += 1;
        match lexicon.polarity(token) {
            Some(Polarity::Positive) => score.positive += 1,
            Some(Polarity::Negative) => score.negative += 1,
            None => {}
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_examples() {
        assert_eq!(classify("I feel great and happy today"), SentimentLabel::Positive);
        assert_eq!(classify("so stressed and overwhelmed"), SentimentLabel::Negative);
        assert_eq!(classify("went to the store"), SentimentLabel::Neutral);
    }

    #[test]
    fn empty_and_whitespace_are_neutral() {
        assert_eq!(classify(""), SentimentLabel::Neutral);
        assert_eq!(classify("   \t\n "), SentimentLabel::Neutral);
    }

    #[test]
    fn tie_is_neutral() {
        // one positive ("good"), one negative ("tired")
        assert_eq!(classify("good but tired"), SentimentLabel::Neutral);
    }

    #[test]
    fn matching_is_case_insensitive_whole_token() {
        let c = SentimentClassifier::new();
        let s = c.score_text("GREAT Great great! greatly");
        assert_eq!(s.positive, 2);
        assert_eq!(s.negative, 0);
        assert_eq!(s.tokens, 4);
    }

    #[test]
    fn no_stemming() {
        // "stressed" is not "stress"
        assert_eq!(classify("stressed"), SentimentLabel::Neutral);
        assert_eq!(classify("stress"), SentimentLabel::Negative);
    }

    #[test]
    fn custom_lexicon_swaps_without_touching_rule() {
        let lex: Lexicon = [("Calm", Polarity::Positive), ("panic", Polarity::Negative)]
            .into_iter()
            .collect();
        let c = SentimentClassifier::with_lexicon(lex);
        assert_eq!(c.classify("calm calm panic"), SentimentLabel::Positive);
        // built-in words are unknown to the custom table
        assert_eq!(c.classify("great happy"), SentimentLabel::Neutral);
    }

    #[test]
    fn case_variants_must_agree() {
        let err = Lexicon::from_json_str(r#"{"Great": "positive", "great": "negative"}"#).unwrap_err();
        assert!(err.to_string().contains("great"), "{err}");

        let lex = Lexicon::from_json_str(r#"{"Calm": "positive", "calm": "positive"}"#).unwrap();
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.polarity("calm"), Some(Polarity::Positive));
    }

    #[test]
    fn preview_hides_empty_notes() {
        let c = SentimentClassifier::new();
        assert_eq!(c.preview(""), None);
        assert_eq!(c.preview("sad day"), Some(SentimentLabel::Negative));
    }

    #[test]
    fn builtin_lexicon_loads() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.len(), 23);
        assert_eq!(lex.polarity("peaceful"), Some(Polarity::Positive));
        assert_eq!(lex.polarity("frustrated"), Some(Polarity::Negative));
    }

    #[test]
    fn label_serializes_lowercase() {
        let v = serde_json::to_value(SentimentLabel::Negative).unwrap();
        assert_eq!(v, serde_json::json!("negative"));
    }
}
