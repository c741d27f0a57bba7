#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Boundary between free-form narrative output and the economy engine.
//!
//! Narrative sources speak loosely typed JSON with free-text tags and risk
//! labels. This crate normalizes that output into the closed
//! [`MonthDraft`] and [`ChoiceIntent`] records the engine consumes, and
//! defines the [`DraftProvider`] seam where a narrative source plugs in.

use startup_survivor_core::{ChoiceIntent, MonthDraft};
use thiserror::Error;

mod normalize;
mod scripted;

pub use normalize::{
    draft_from_value, intent_from_value, normalize_risk, normalize_steps, normalize_tag,
    MAX_SEED_PHRASE_CHARS,
};
pub use scripted::ScriptedDraftProvider;

/// Failures while turning narrative output into engine records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NarrativeError {
    /// The payload is not a JSON object.
    #[error("narrative payload must be a JSON object")]
    NotAnObject,
    /// A list-shaped draft carried fewer than two usable options.
    #[error("draft needs at least 2 options, found {found}")]
    TooFewOptions {
        /// Usable options found.
        found: usize,
    },
}

/// Source of month drafts.
pub trait DraftProvider {
    /// Produces the narrative draft for `month_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`NarrativeError`] when the source's output cannot be normalized.
    fn draft(&mut self, month_id: u32) -> Result<MonthDraft, NarrativeError>;
}
