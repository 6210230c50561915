//! Scorer output

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Polarity evidence found in the text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSignals {
    /// Weighted positive hits
    pub positive: f64,
    /// Weighted negative hits
    pub negative: f64,
    /// Polarity words flipped by a preceding negator
    pub negated: u32,
    /// Polarity words amplified by a preceding intensifier
    pub intensified: u32,
}

impl ScoreSignals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Total weighted hits, both polarities
    pub fn total(&self) -> f64 {
        self.positive + self.negative
    }
}

/// Paragraph-level sentiment score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Score in [-1.0, 1.0], or None when the text could not be analyzed
    pub value: Option<f64>,
    /// Evidence behind the score
    pub signals: ScoreSignals,
    /// Word count of the input
    pub word_count: usize,
    /// When this was computed
    pub timestamp: DateTime<Utc>,
}

impl SentimentScore {
    pub fn new(value: f64, signals: ScoreSignals, word_count: usize) -> Self {
        Self {
            value: Some(value),
            signals,
            word_count,
            timestamp: Utc::now(),
        }
    }

    /// No usable score
    pub fn absent() -> Self {
        Self {
            value: None,
            signals: ScoreSignals::zero(),
            word_count: 0,
            timestamp: Utc::now(),
        }
    }

    pub fn is_known(&self) -> bool {
        self.value.is_some()
    }
}
