//! Mood Presenter: owns PresentationState, mutated only by `analyze`,
//! `clear_flourish` and due flourish hides
//!
//! Flourish states:
//! - HIDDEN → VISIBLE: every `analyze`
//! - VISIBLE → HIDDEN: `clear_flourish`, or a hide firing in `poll`

use std::time::Duration;
use chrono::Utc;
use tracing::{debug, trace};
use crate::core::scorer::SentimentScorer;
use crate::core::timer::{Clock, FlourishTimer, HidePolicy, SystemClock};
use crate::types::{MoodPresentation, PresentationState, SentimentScore};

/// Callback run after every state mutation
pub type Observer = Box<dyn FnMut(&PresentationState) + Send + Sync>;

/// Mood presenter
pub struct MoodPresenter<S, C = SystemClock> {
    scorer: S,
    clock: C,
    timer: FlourishTimer,
    state: PresentationState,
    observers: Vec<Observer>,
}

impl<S: SentimentScorer> MoodPresenter<S, SystemClock> {
    /// Presenter on the wall clock with the default timer
    pub fn new(scorer: S) -> Self {
        Self::with_clock(scorer, SystemClock::new())
    }
}

impl<S: SentimentScorer, C: Clock> MoodPresenter<S, C> {
    pub fn with_clock(scorer: S, clock: C) -> Self {
        Self {
            scorer,
            clock,
            timer: FlourishTimer::default(),
            state: PresentationState::default(),
            observers: Vec::new(),
        }
    }

    /// Replace the flourish timer (duration and hide policy)
    pub fn with_timer(mut self, duration: Duration, policy: HidePolicy) -> Self {
        self.timer = FlourishTimer::new(duration, policy);
        self
    }

    /// Register an observer
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&PresentationState) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Score text, update state, show the flourish and schedule its hide
    pub fn analyze(&mut self, text: &str) -> MoodPresentation {
        self.analyze_with_score(text).0
    }

    /// `analyze`, also returning the scorer's output
    pub fn analyze_with_score(&mut self, text: &str) -> (MoodPresentation, SentimentScore) {
        let score = self.scorer.score(text);
        let presentation = MoodPresentation::from_score(score.value);

        debug!(
            mood = %presentation.mood,
            score = ?score.value,
            words = score.word_count,
            "analyzed input"
        );

        self.state.presentation = presentation.clone();
        self.state.show_flourish = true;
        self.state.last_score = score.value.filter(|v| v.is_finite());
        self.state.analysis_count += 1;
        self.state.updated_at = Utc::now();

        let deadline = self.timer.schedule(self.clock.now());
        trace!(deadline_ms = deadline.as_millis() as u64, pending = self.timer.pending(), "flourish hide scheduled");

        self.notify();
        (presentation, score)
    }

    /// Hide the flourish
    pub fn clear_flourish(&mut self) {
        if !self.state.show_flourish {
            return;
        }
        self.state.show_flourish = false;
        self.state.updated_at = Utc::now();
        self.notify();
    }

    /// Apply every hide that is due; returns how many fired
    pub fn poll(&mut self) -> usize {
        let fired = self.timer.fire_due(self.clock.now());
        for _ in 0..fired {
            self.clear_flourish();
        }
        if fired > 0 {
            trace!(fired, "flourish hides fired");
        }
        fired
    }

    fn notify(&mut self) {
        for observer in self.observers.iter_mut() {
            observer(&self.state);
        }
    }

    /// Get current state
    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn presentation(&self) -> &MoodPresentation {
        &self.state.presentation
    }

    pub fn show_flourish(&self) -> bool {
        self.state.show_flourish
    }

    pub fn timer(&self) -> &FlourishTimer {
        &self.timer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }
}

impl<S: std::fmt::Debug, C: std::fmt::Debug> std::fmt::Debug for MoodPresenter<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodPresenter")
            .field("scorer", &self.scorer)
            .field("clock", &self.clock)
            .field("timer", &self.timer)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use pretty_assertions::assert_eq;
    use crate::core::scorer::{FixedScorer, FnScorer};
    use crate::core::timer::ManualClock;
    use crate::types::Mood;

    fn presenter(score: Option<f64>) -> (MoodPresenter<FixedScorer, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let scorer = match score {
            Some(v) => FixedScorer::new(v),
            None => FixedScorer::absent(),
        };
        (MoodPresenter::with_clock(scorer, clock.clone()), clock)
    }

    #[test]
    fn test_initial_state_is_idle_and_hidden() {
        let (p, _) = presenter(Some(0.0));
        assert_eq!(p.presentation().mood, Mood::Idle);
        assert!(!p.show_flourish());
    }

    #[test]
    fn test_happy_scenario() {
        let (mut p, _) = presenter(Some(0.8));
        let result = p.analyze("I am so happy today!");
        assert_eq!(result.emoji, "😊");
        assert_eq!(result.message, "You seem happy and positive!");
        assert_eq!(p.presentation(), &result);
        assert_eq!(p.state().last_score, Some(0.8));
    }

    #[test]
    fn test_empty_input_is_unknown() {
        let (mut p, _) = presenter(None);
        let result = p.analyze("");
        assert_eq!(result.emoji, "😐");
        assert_eq!(result.message, "Couldn't understand. Try again!");
        assert_eq!(p.state().last_score, None);
        assert!(p.show_flourish());
    }

    #[test]
    fn test_boundary_is_neutral() {
        let (mut p, _) = presenter(Some(0.25));
        let result = p.analyze("meh");
        assert_eq!(result.emoji, "😐");
        assert_eq!(result.message, "You're feeling neutral today.");
    }

    #[test]
    fn test_flourish_hides_after_duration() {
        let (mut p, clock) = presenter(Some(0.8));
        p.analyze("yay");
        assert!(p.show_flourish());

        clock.advance_ms(2499);
        assert_eq!(p.poll(), 0);
        assert!(p.show_flourish());

        clock.advance_ms(1);
        assert_eq!(p.poll(), 1);
        assert!(!p.show_flourish());
    }

    #[test]
    fn test_clear_flourish_directly() {
        let (mut p, _) = presenter(Some(-0.8));
        p.analyze("ugh");
        p.clear_flourish();
        assert!(!p.show_flourish());
        // Presentation is untouched
        assert_eq!(p.presentation().mood, Mood::Sad);
    }

    #[test]
    fn test_restart_policy_keeps_latest_flourish() {
        let (mut p, clock) = presenter(Some(0.8));
        p.analyze("first");
        clock.advance_ms(2000);
        p.analyze("second");
        clock.advance_ms(500);
        assert_eq!(p.poll(), 0);
        assert!(p.show_flourish());
        clock.advance_ms(2000);
        assert_eq!(p.poll(), 1);
        assert!(!p.show_flourish());
    }

    #[test]
    fn test_stack_policy_stale_hide_fires_early() {
        let clock = ManualClock::new();
        let mut p = MoodPresenter::with_clock(FixedScorer::new(0.8), clock.clone())
            .with_timer(Duration::from_millis(2500), HidePolicy::Stack);
        p.analyze("first");
        clock.advance_ms(2000);
        p.analyze("second");
        clock.advance_ms(500);
        assert_eq!(p.poll(), 1);
        assert!(!p.show_flourish());
        // Second hide still fires later, on an already hidden flourish
        clock.advance_ms(2000);
        assert_eq!(p.poll(), 1);
        assert!(!p.show_flourish());
    }

    #[test]
    fn test_observers_see_every_mutation() {
        let seen: Arc<Mutex<Vec<(Mood, bool)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let (mut p, clock) = presenter(Some(-0.5));
        p.subscribe(move |s| sink.lock().unwrap().push((s.presentation.mood, s.show_flourish)));

        p.analyze("rain again");
        clock.advance_ms(2500);
        p.poll();
        // Already hidden: no extra notification
        p.clear_flourish();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(Mood::Sad, true), (Mood::Sad, false)]
        );
    }

    #[test]
    fn test_same_text_same_presentation() {
        let scorer = FnScorer(|t: &str| Some(t.len() as f64 / 10.0 - 0.5));
        let mut p = MoodPresenter::with_clock(scorer, ManualClock::new());
        let a = p.analyze("hello there");
        let b = p.analyze("hello there");
        assert_eq!(a, b);
        assert_eq!(p.state().analysis_count, 2);
    }
}
