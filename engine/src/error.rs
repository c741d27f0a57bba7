use startup_survivor_core::OptionId;
use thiserror::Error;

/// Failures surfaced by the turn pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The requested option is not part of the bundle.
    #[error("unknown option {choice} for month {month}")]
    InvalidOption {
        /// Identifier that was requested.
        choice: OptionId,
        /// Month of the bundle that was searched.
        month: u32,
    },
    /// The turn would push the calendar past the last representable month.
    #[error("month {month} cannot advance further")]
    MonthOverflow {
        /// Month of the turn that was rejected.
        month: u32,
    },
    /// The narrative draft cannot be turned into a bundle.
    #[error("malformed draft for month {month}: {defect}")]
    MalformedDraft {
        /// Month the draft claims to describe.
        month: u32,
        /// What is wrong with it.
        defect: DraftDefect,
    },
}

/// Structural problems detected in a month draft.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftDefect {
    /// Months are numbered from one.
    #[error("month id must be at least 1")]
    MonthOutOfRange,
    /// A required narrative field is blank.
    #[error("missing {0}")]
    MissingField(&'static str),
    /// Fewer than two or more than three options.
    #[error("expected 2 or 3 options, found {0}")]
    OptionCount(usize),
    /// Two options share an identifier.
    #[error("duplicate option id {0}")]
    DuplicateOption(OptionId),
    /// The player's identifier was used for a drafted option.
    #[error("option id {0} is reserved for player plans")]
    ReservedOption(OptionId),
    /// An option has a blank title.
    #[error("option {0} has no title")]
    UntitledOption(OptionId),
    /// An option lists no steps.
    #[error("option {0} has no steps")]
    NoSteps(OptionId),
}
