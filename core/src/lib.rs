#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Startup Survivor economy engine.
//!
//! This crate defines the value types every other crate speaks: the bounded
//! company [`Stats`] and the [`Delta`] records applied to them, the
//! [`GameState`] carried between turns, the static difficulty [`Mode`]
//! table, the run-level [`EngineConfig`], and the narrative records that flow
//! from a draft provider into the turn pipeline. Systems read these types and
//! return new values; nothing here performs I/O or holds randomness.

mod config;
mod intent;
mod modes;
mod narrative;
mod state;
mod stats;

pub use config::{
    default_expenses, EngineConfig, Founder, Scenario, DEFAULT_SEASON_LENGTH, FOUNDERS,
    NEUTRAL_CASE_KEY, SCENARIOS,
};
pub use intent::{OptionId, Risk, Tag};
pub use modes::{Mode, ModeSpec};
pub use narrative::{
    ChoiceIntent, DelayedEffectSpec, MonthBundle, MonthDraft, OptionDraft, OptionSpec,
};
pub use state::{DelayedEffect, GameState, FIRST_MONTH};
pub use stats::{Delta, StatKey, Stats, StatsRecord, CHURN_CEILING, PERCENT_CEILING};

/// Canonical banner emitted when a run boots.
pub const WELCOME_BANNER: &str = "Welcome to Startup Survivor.";
