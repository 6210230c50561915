//! Presentation and observable state

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{ColorPair, Mood};

/// What the UI shows for one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPresentation {
    pub mood: Mood,
    pub emoji: String,
    pub message: String,
    pub colors: ColorPair,
}

impl MoodPresentation {
    pub fn for_mood(mood: Mood) -> Self {
        Self {
            mood,
            emoji: mood.emoji().to_string(),
            message: mood.message().to_string(),
            colors: mood.colors(),
        }
    }

    /// Classify a score straight into a presentation
    pub fn from_score(score: Option<f64>) -> Self {
        Self::for_mood(Mood::classify(score))
    }

    /// Format for terminal display: message in a truecolor gradient start color
    pub fn to_terminal_string(&self) -> String {
        let (r, g, b) = self.colors.start.over_black();
        format!(
            "\x1b[38;2;{};{};{}m{} {}\x1b[0m",
            r, g, b, self.emoji, self.message
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "mood={} | emoji={} | colors={}..{} | message={}",
            self.mood,
            self.emoji,
            self.colors.start.hex(),
            self.colors.end.hex(),
            self.message
        )
    }
}

/// State owned by the presenter and read by the UI layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationState {
    /// Currently displayed presentation
    pub presentation: MoodPresentation,
    /// Floating emoji visible?
    pub show_flourish: bool,
    /// Score behind the current presentation
    pub last_score: Option<f64>,
    /// Number of completed analyses
    pub analysis_count: u64,
    /// Last mutation
    pub updated_at: DateTime<Utc>,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            presentation: MoodPresentation::for_mood(Mood::Idle),
            show_flourish: false,
            last_score: None,
            analysis_count: 0,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = PresentationState::default();
        assert_eq!(state.presentation.mood, Mood::Idle);
        assert_eq!(state.presentation.emoji, "😐");
        assert_eq!(state.presentation.message, "Type something to analyze your mood!");
        assert!(!state.show_flourish);
        assert_eq!(state.analysis_count, 0);
    }

    #[test]
    fn test_parseable_string() {
        let p = MoodPresentation::from_score(Some(0.8));
        assert_eq!(
            p.to_parseable_string(),
            "mood=HAPPY | emoji=😊 | colors=#ffcc00ff..#ff9500ff | message=You seem happy and positive!"
        );
    }

    #[test]
    fn test_terminal_string_uses_start_color() {
        let p = MoodPresentation::from_score(Some(-0.6));
        let s = p.to_terminal_string();
        assert!(s.starts_with("\x1b[38;2;0;122;255m"));
        assert!(s.contains("😢"));
        assert!(s.ends_with("\x1b[0m"));
    }
}
