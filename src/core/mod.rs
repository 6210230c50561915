//! Core modules for Mood Detector

pub mod scorer;
pub mod timer;
pub mod presenter;
pub mod api;

pub use scorer::{SentimentScorer, LexiconScorer, FixedScorer, FnScorer};
pub use timer::{Clock, SystemClock, ManualClock, FlourishTimer, HidePolicy};
pub use presenter::{MoodPresenter, Observer};
pub use api::{create_router, run_server};
