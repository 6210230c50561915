//! Integration tests for the presenter
//!
//! Tests the full path: text → scorer → MoodPresenter → state

use mood_detector::core::{FixedScorer, FnScorer, HidePolicy, LexiconScorer, ManualClock, MoodPresenter};
use mood_detector::types::Mood;
use mood_detector::{FLOURISH_DURATION_MS, HAPPY_THRESHOLD, SAD_THRESHOLD};
use pretty_assertions::assert_eq;
use std::time::Duration;

/// Scores above 0.25 are Happy, below -0.25 Sad, everything between Neutral
#[test]
fn test_threshold_sweep() {
    let cases = [
        (1.0, Mood::Happy),
        (0.26, Mood::Happy),
        (HAPPY_THRESHOLD, Mood::Neutral),
        (0.0, Mood::Neutral),
        (SAD_THRESHOLD, Mood::Neutral),
        (-0.26, Mood::Sad),
        (-1.0, Mood::Sad),
    ];
    for (score, expected) in cases {
        let mut presenter = MoodPresenter::with_clock(FixedScorer::new(score), ManualClock::new());
        let result = presenter.analyze("text");
        assert_eq!(result.mood, expected, "score {}", score);
    }
}

#[test]
fn test_reference_scenarios() {
    let scorer = FnScorer(|t: &str| match t {
        "I am so happy today!" => Some(0.8),
        "meh" => Some(0.25),
        _ => None,
    });
    let mut presenter = MoodPresenter::with_clock(scorer, ManualClock::new());

    let happy = presenter.analyze("I am so happy today!");
    assert_eq!((happy.emoji.as_str(), happy.message.as_str()), ("😊", "You seem happy and positive!"));

    let unknown = presenter.analyze("");
    assert_eq!((unknown.emoji.as_str(), unknown.message.as_str()), ("😐", "Couldn't understand. Try again!"));

    let neutral = presenter.analyze("meh");
    assert_eq!((neutral.emoji.as_str(), neutral.message.as_str()), ("😐", "You're feeling neutral today."));
}

/// The built-in scorer drives the presenter end to end
#[test]
fn test_lexicon_end_to_end() {
    let mut presenter = MoodPresenter::with_clock(LexiconScorer::new(), ManualClock::new());

    assert_eq!(presenter.analyze("I am so happy today!").mood, Mood::Happy);
    assert_eq!(presenter.analyze("I feel sad and tired").mood, Mood::Sad);
    assert_eq!(presenter.analyze("The meeting is at noon").mood, Mood::Neutral);
    assert_eq!(presenter.analyze("").mood, Mood::Unknown);
    assert_eq!(presenter.analyze("   ").mood, Mood::Unknown);
    assert_eq!(presenter.state().analysis_count, 5);
}

#[test]
fn test_state_tracks_latest_analysis() {
    let mut presenter = MoodPresenter::with_clock(LexiconScorer::new(), ManualClock::new());
    presenter.analyze("what a wonderful day");
    let latest = presenter.analyze("this is awful");
    assert_eq!(presenter.presentation(), &latest);
    assert_eq!(presenter.state().presentation.mood, Mood::Sad);
}

#[test]
fn test_flourish_lifecycle_on_manual_clock() {
    let clock = ManualClock::new();
    let mut presenter = MoodPresenter::with_clock(FixedScorer::new(0.5), clock.clone());
    assert!(!presenter.show_flourish());

    presenter.analyze("great");
    assert!(presenter.show_flourish());

    clock.advance(Duration::from_millis(FLOURISH_DURATION_MS));
    presenter.poll();
    assert!(!presenter.show_flourish());
}

#[test]
fn test_rapid_analyses_by_policy() {
    for (policy, visible_after_first_deadline) in [(HidePolicy::Restart, true), (HidePolicy::Stack, false)] {
        let clock = ManualClock::new();
        let mut presenter = MoodPresenter::with_clock(FixedScorer::new(-0.9), clock.clone())
            .with_timer(Duration::from_millis(FLOURISH_DURATION_MS), policy);

        presenter.analyze("one");
        clock.advance_ms(1000);
        presenter.analyze("two");
        clock.advance_ms(1500);
        presenter.poll();
        assert_eq!(presenter.show_flourish(), visible_after_first_deadline, "policy {}", policy);

        clock.advance_ms(1000);
        presenter.poll();
        assert!(!presenter.show_flourish(), "policy {}", policy);
    }
}
