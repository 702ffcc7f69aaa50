// src/config.rs
//! Runtime configuration loaded from `config/wellness.toml`.
//!
//! Resolution order:
//! 1) `$WELLNESS_CONFIG_PATH` (must exist)
//! 2) `config/wellness.toml`
//! 3) built-in defaults
//!
//! `$WELLNESS_RECOMMENDATION_WINDOW` overrides `[windows] recommendation`.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::sentiment::{Lexicon, SentimentClassifier};
use crate::store::EntryStore;

pub const DEFAULT_CONFIG_PATH: &str = "config/wellness.toml";
pub const ENV_CONFIG_PATH: &str = "WELLNESS_CONFIG_PATH";
pub const ENV_RECOMMENDATION_WINDOW: &str = "WELLNESS_RECOMMENDATION_WINDOW";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub windows: WindowConfig,
    pub store: StoreConfig,
    pub lexicon: LexiconConfig,
}

/// Tail sizes (in entries) for each view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub recommendation: usize,
    pub weekly: usize,
    pub recent: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            recommendation: 3,
            weekly: 7,
            recent: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub capacity: usize,
    pub seed_demo: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            seed_demo: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// JSON `word → polarity` file replacing the built-in lexicon.
    pub path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AppConfig = toml::from_str(s).context("parsing wellness config")?;
        Ok(cfg.sanitized())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading wellness config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Env path → default path → defaults, then env overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::from_path(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Self::from_path(&default)?
            } else {
                info!(target: "config", "no config file found, using defaults");
                Self::default()
            }
        };

        if let Some(k) = parse_window_env(std::env::var(ENV_RECOMMENDATION_WINDOW).ok()) {
            cfg.windows.recommendation = k;
        }

        Ok(cfg)
    }

    /// Zero-sized windows make no sense; fall back per field.
    fn sanitized(mut self) -> Self {
        let d = WindowConfig::default();
        if self.windows.recommendation == 0 {
            warn!(target: "config", "windows.recommendation = 0, using {}", d.recommendation);
            self.windows.recommendation = d.recommendation;
        }
        if self.windows.weekly == 0 {
            self.windows.weekly = d.weekly;
        }
        if self.windows.recent == 0 {
            self.windows.recent = d.recent;
        }
        self
    }

    pub fn build_classifier(&self) -> Result<SentimentClassifier> {
        match &self.lexicon.path {
            Some(p) => {
                let lexicon = Lexicon::from_path(p)?;
                info!(target: "config", words = lexicon.len(), path = %p.display(), "custom lexicon loaded");
                Ok(SentimentClassifier::with_lexicon(lexicon))
            }
            None => Ok(SentimentClassifier::new()),
        }
    }

    pub fn build_store(&self) -> Result<EntryStore> {
        let store = EntryStore::with_capacity(self.store.capacity);
        if self.store.seed_demo {
            store.seed_demo()?;
        }
        Ok(store)
    }
}

// positive integer only; anything else is ignored
fn parse_window_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|k| *k > 0)
}
