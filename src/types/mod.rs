//! Core types for Mood Detector

mod color;
mod mood;
mod presentation;
mod score;

pub use color::{Color, ColorPair, Hue};
pub use mood::Mood;
pub use presentation::{MoodPresentation, PresentationState};
pub use score::{ScoreSignals, SentimentScore};
