//! Flourish timer: one-shot hides driven by an injectable clock
//!
//! Deadlines are offsets from the clock's origin. `schedule` is always called
//! with a non-decreasing `now`, so the pending queue stays sorted and hides
//! fire in the order they were scheduled.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};
use crate::FLOURISH_DURATION_MS;

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall clock, origin at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms.load(Ordering::SeqCst))
    }
}

/// How a new analysis treats hides that are still pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HidePolicy {
    /// Cancel pending hides; the flourish stays up the full duration after the latest analysis
    #[default]
    Restart,
    /// Keep every hide; an older one can clear a newer flourish early
    Stack,
}

impl std::fmt::Display for HidePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HidePolicy::Restart => write!(f, "restart"),
            HidePolicy::Stack => write!(f, "stack"),
        }
    }
}

/// Pending one-shot hide callbacks
#[derive(Debug, Clone)]
pub struct FlourishTimer {
    duration: Duration,
    policy: HidePolicy,
    pending: VecDeque<Duration>,
}

impl Default for FlourishTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(FLOURISH_DURATION_MS), HidePolicy::default())
    }
}

impl FlourishTimer {
    pub fn new(duration: Duration, policy: HidePolicy) -> Self {
        Self {
            duration,
            policy,
            pending: VecDeque::new(),
        }
    }

    /// Schedule a hide at `now + duration`, returning its deadline
    pub fn schedule(&mut self, now: Duration) -> Duration {
        if self.policy == HidePolicy::Restart {
            self.pending.clear();
        }
        let deadline = now + self.duration;
        self.pending.push_back(deadline);
        deadline
    }

    /// Pop every hide due at `now`; returns how many fired
    pub fn fire_due(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some(&deadline) = self.pending.front() {
            if deadline > now {
                break;
            }
            self.pending.pop_front();
            fired += 1;
        }
        fired
    }

    /// Drop all pending hides
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.front().copied()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn policy(&self) -> HidePolicy {
        self.policy
    }
}
