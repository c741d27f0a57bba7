use serde::{Deserialize, Serialize};

use crate::{Delta, Stats};

/// Month the first turn of every run is played in.
pub const FIRST_MONTH: u32 = 1;

/// A delta deferred to a future month.
///
/// Created by the scheduler, consumed on the turn whose month equals
/// `due_month`, never modified in between.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelayedEffect {
    due_month: u32,
    delta: Delta,
    hint: String,
    from_month: u32,
}

impl DelayedEffect {
    /// Creates a pending effect scheduled during `from_month`.
    #[must_use]
    pub fn new(due_month: u32, delta: Delta, hint: impl Into<String>, from_month: u32) -> Self {
        Self {
            due_month,
            delta,
            hint: hint.into(),
            from_month,
        }
    }

    /// Month on which the effect fires.
    #[must_use]
    pub const fn due_month(&self) -> u32 {
        self.due_month
    }

    /// Change applied when the effect fires.
    #[must_use]
    pub const fn delta(&self) -> &Delta {
        &self.delta
    }

    /// Short player-facing description of the consequence.
    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Month whose decision produced the effect.
    #[must_use]
    pub const fn from_month(&self) -> u32 {
        self.from_month
    }
}

/// Complete engine state between turns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    month: u32,
    stats: Stats,
    delayed_queue: Vec<DelayedEffect>,
}

impl GameState {
    /// Assembles a state from its parts.
    #[must_use]
    pub fn new(month: u32, stats: Stats, delayed_queue: Vec<DelayedEffect>) -> Self {
        Self {
            month,
            stats,
            delayed_queue,
        }
    }

    /// State for the first month of a run with an empty queue.
    #[must_use]
    pub fn starting(stats: Stats) -> Self {
        Self::new(FIRST_MONTH, stats, Vec::new())
    }

    /// Month the next turn will be played in.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Current company metrics.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Pending effects in insertion order.
    #[must_use]
    pub fn delayed_queue(&self) -> &[DelayedEffect] {
        &self.delayed_queue
    }

    /// Returns a state with `delta` applied to the stats; month and queue are kept.
    #[must_use]
    pub fn apply_delta_to_state(&self, delta: &Delta) -> GameState {
        Self {
            month: self.month,
            stats: self.stats.apply_delta(delta),
            delayed_queue: self.delayed_queue.clone(),
        }
    }

    /// Consumes the state, yielding month, stats and queue.
    #[must_use]
    pub fn into_parts(self) -> (u32, Stats, Vec<DelayedEffect>) {
        (self.month, self.stats, self.delayed_queue)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::starting(Stats::baseline())
    }
}
