//! Mood classification and its fixed presentation table

use serde::{Deserialize, Serialize};
use crate::{HAPPY_THRESHOLD, SAD_THRESHOLD};
use crate::types::{Color, ColorPair, Hue};

/// The moods a presentation can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    /// Nothing analyzed yet
    Idle,
    /// s > 0.25
    Happy,
    /// s < -0.25
    Sad,
    /// -0.25 <= s <= 0.25
    Neutral,
    /// The scorer produced no usable score
    Unknown,
}

impl Mood {
    /// Classify a score. Boundaries (exactly ±0.25) are Neutral.
    /// A missing or non-finite score is Unknown.
    pub fn classify(score: Option<f64>) -> Self {
        match score {
            Some(s) if s.is_finite() => {
                if s > HAPPY_THRESHOLD {
                    Mood::Happy
                } else if s < SAD_THRESHOLD {
                    Mood::Sad
                } else {
                    Mood::Neutral
                }
            }
            _ => Mood::Unknown,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Idle | Mood::Neutral | Mood::Unknown => "😐",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Mood::Idle => "Type something to analyze your mood!",
            Mood::Happy => "You seem happy and positive!",
            Mood::Sad => "Feeling down? Take a deep breath 🌧️",
            Mood::Neutral => "You're feeling neutral today.",
            Mood::Unknown => "Couldn't understand. Try again!",
        }
    }

    /// Background gradient (start, end)
    pub fn colors(&self) -> ColorPair {
        let gray = Color::solid(Hue::Gray);
        match self {
            Mood::Idle => ColorPair::new(gray, gray.with_opacity(0.5)),
            Mood::Happy => ColorPair::new(Color::solid(Hue::Yellow), Color::solid(Hue::Orange)),
            Mood::Sad => ColorPair::new(Color::solid(Hue::Blue), Color::solid(Hue::Purple)),
            Mood::Neutral => ColorPair::new(gray, Color::solid(Hue::Black).with_opacity(0.6)),
            Mood::Unknown => ColorPair::new(gray, gray.with_opacity(0.4)),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mood::Idle => "IDLE",
            Mood::Happy => "HAPPY",
            Mood::Sad => "SAD",
            Mood::Neutral => "NEUTRAL",
            Mood::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(Mood::classify(Some(0.8)), Mood::Happy);
        assert_eq!(Mood::classify(Some(0.2500001)), Mood::Happy);
        assert_eq!(Mood::classify(Some(-0.9)), Mood::Sad);
        assert_eq!(Mood::classify(Some(-0.2500001)), Mood::Sad);
        assert_eq!(Mood::classify(Some(0.0)), Mood::Neutral);
    }

    #[test]
    fn test_boundaries_are_neutral() {
        assert_eq!(Mood::classify(Some(0.25)), Mood::Neutral);
        assert_eq!(Mood::classify(Some(-0.25)), Mood::Neutral);
    }

    #[test]
    fn test_absent_and_nan_are_unknown() {
        assert_eq!(Mood::classify(None), Mood::Unknown);
        assert_eq!(Mood::classify(Some(f64::NAN)), Mood::Unknown);
    }

    #[test]
    fn test_unknown_differs_from_neutral() {
        assert_eq!(Mood::Unknown.emoji(), Mood::Neutral.emoji());
        assert_ne!(Mood::Unknown.message(), Mood::Neutral.message());
        assert_ne!(Mood::Unknown.colors(), Mood::Neutral.colors());
    }

    #[test]
    fn test_unknown_gradient_is_faded_gray() {
        let colors = Mood::Unknown.colors();
        assert_eq!(colors.start, Color::solid(Hue::Gray));
        assert_eq!(colors.end, Color::solid(Hue::Gray).with_opacity(0.4));
    }
}
