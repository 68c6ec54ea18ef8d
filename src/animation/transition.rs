//! Per-node visual transition state machine.
//!
//! Nodes that appear in a new algorithm step fade/scale in; nodes that
//! disappear (a popped stack frame, a dequeued element) fade out before they
//! are removed. Instead of chaining timers, a [`Transition`] is advanced by
//! caller-driven [`tick`](Transition::tick) calls:
//!
//! ```text
//!            enter()                tick ≥ enter
//!   Idle ─────────────▶ Entering ─────────────────▶ Settled
//!    ▲                                                  │
//!    │   tick ≥ exit                       exit()       │
//!    └──────────────── Exiting ◀────────────────────────┘
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Visual phase of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Not drawn.
    Idle,
    /// Animating in.
    Entering,
    /// Drawn at rest.
    Settled,
    /// Animating out.
    Exiting,
}

impl Phase {
    /// Whether the phase is time-driven.
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }
}

/// Phase durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitionTimings {
    /// Time spent in [`Phase::Entering`], in milliseconds.
    pub enter_ms: u32,
    /// Time spent in [`Phase::Exiting`], in milliseconds.
    pub exit_ms: u32,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            enter_ms: 300,
            exit_ms: 250,
        }
    }
}

impl TransitionTimings {
    /// Entering duration.
    pub fn enter(&self) -> Duration {
        Duration::from_millis(u64::from(self.enter_ms))
    }

    /// Exiting duration.
    pub fn exit(&self) -> Duration {
        Duration::from_millis(u64::from(self.exit_ms))
    }
}

/// Transition of a single node through its visual phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    phase: Phase,
    elapsed: Duration,
    timings: TransitionTimings,
}

impl Transition {
    /// A transition that has not started.
    pub fn idle(timings: TransitionTimings) -> Self {
        Self {
            phase: Phase::Idle,
            elapsed: Duration::ZERO,
            timings,
        }
    }

    /// A transition at rest.
    pub fn settled(timings: TransitionTimings) -> Self {
        Self {
            phase: Phase::Settled,
            ..Self::idle(timings)
        }
    }

    /// A transition that has just started entering.
    pub fn entering(timings: TransitionTimings) -> Self {
        let mut transition = Self::idle(timings);
        transition.enter();
        transition
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start entering. Only valid from `Idle` or `Exiting`; otherwise a no-op.
    pub fn enter(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::Exiting) {
            self.phase = Phase::Entering;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Start exiting. Only valid from `Entering` or `Settled`; otherwise a no-op.
    pub fn exit(&mut self) {
        if matches!(self.phase, Phase::Entering | Phase::Settled) {
            self.phase = Phase::Exiting;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Advance by `dt` and return the resulting phase.
    ///
    /// Time left over after a phase completes is discarded.
    pub fn tick(&mut self, dt: Duration) -> Phase {
        let Some(limit) = self.current_limit() else {
            return self.phase;
        };
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= limit {
            self.finish();
        }
        self.phase
    }

    /// Jump to the end of the current timed phase.
    ///
    /// Used when a newer snapshot supersedes this one before it finished.
    pub fn finish(&mut self) {
        self.phase = match self.phase {
            Phase::Entering => Phase::Settled,
            Phase::Exiting => Phase::Idle,
            other => other,
        };
        self.elapsed = Duration::ZERO;
    }

    /// Fraction of the current timed phase that has elapsed, in [0.0, 1.0].
    ///
    /// `Settled` reports 1.0 and `Idle` reports 0.0.
    pub fn progress(&self) -> f32 {
        match (self.phase, self.current_limit()) {
            (_, Some(limit)) if !limit.is_zero() => {
                let t = self.elapsed.as_secs_f64() / limit.as_secs_f64();
                (t as f32).clamp(0.0, 1.0)
            }
            (Phase::Settled, _) => 1.0,
            _ => 0.0,
        }
    }

    fn current_limit(&self) -> Option<Duration> {
        match self.phase {
            Phase::Entering => Some(self.timings.enter()),
            Phase::Exiting => Some(self.timings.exit()),
            Phase::Idle | Phase::Settled => None,
        }
    }
}
