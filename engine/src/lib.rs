#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn pipeline for the Startup Survivor economy.
//!
//! A narrative [`MonthDraft`](startup_survivor_core::MonthDraft) becomes a
//! [`MonthBundle`](startup_survivor_core::MonthBundle) through
//! [`draft_to_bundle`], which samples every option up front. Applying a
//! choice then runs the fixed turn order:
//!
//! 1. delayed effects due this month, in enqueue order;
//! 2. fixed expenses plus macro friction as one cash charge;
//! 3. the chosen option's immediate delta;
//! 4. the option's delayed consequences, appended to the queue;
//! 5. the month counter advances and a [`TurnLog`] is emitted.
//!
//! Every function is pure over its inputs; the caller owns the state.

mod bundle;
mod error;
mod export;
mod pipeline;
mod setup;
mod status;

pub use bundle::{describe_option, draft_to_bundle, intent_to_option_spec, validate_draft};
pub use error::{DraftDefect, EngineError};
pub use export::{ExportError, RunExport, EXPORT_VERSION};
pub use pipeline::{apply_choice, apply_option_spec, DueEffectRecord, TurnLog};
pub use setup::{RunSetup, DEFAULT_BASE_SEED};
pub use status::{run_status, runway_months, tension_index, RunStatus, UNLIMITED_RUNWAY};
