//! Mood Detector: text → sentiment score → emoji, message and gradient
//!
//! Flow: front end → MoodPresenter → SentimentScorer → Mood → PresentationState

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{MoodError, Result};

// =============================================================================
// THRESHOLDS [C] - fixed for compatibility, boundaries fall into Neutral
// =============================================================================

/// Scores strictly above this are Happy
pub const HAPPY_THRESHOLD: f64 = 0.25;

/// Scores strictly below this are Sad
pub const SAD_THRESHOLD: f64 = -0.25;

// =============================================================================
// FLOURISH TIMING
// =============================================================================

/// How long the floating emoji stays visible after an analysis (milliseconds)
pub const FLOURISH_DURATION_MS: u64 = 2500;

// =============================================================================
// LEXICON SCORER WEIGHTS
// =============================================================================

/// Multiplier applied to a polarity word preceded by an intensifier
pub const INTENSIFIER_WEIGHT: f64 = 1.5;

/// Damping added to the hit total; keeps a single weak word away from ±1.0
pub const LEXICON_DAMPING: f64 = 1.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
