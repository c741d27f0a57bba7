use serde::{Deserialize, Serialize};

use crate::{Delta, OptionId, Risk, Tag};

/// One option as described by the narrative layer, before any numbers exist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionDraft {
    /// Identifier within the month.
    pub id: OptionId,
    /// Short headline of the move.
    pub title: String,
    /// Category of the move.
    pub tag: Tag,
    /// Declared risk tier.
    pub risk: Risk,
    /// Concrete steps the company takes.
    pub steps: Vec<String>,
    /// Phrase describing what could come back to bite later.
    pub delayed_seed: String,
    /// Narrative outcome shown once the option is picked.
    #[serde(default)]
    pub result: String,
}

/// Narrative package for a month, as produced by a draft provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthDraft {
    /// Month the draft was written for.
    pub month_id: u32,
    /// Headline of the month.
    pub month_title: String,
    /// Situation analysis leading into the crisis.
    pub situation: String,
    /// Headline of the crisis.
    pub crisis_title: String,
    /// Body of the crisis.
    pub crisis: String,
    /// Options in presentation order.
    pub options: Vec<OptionDraft>,
    /// Optional side note about risks.
    #[serde(default)]
    pub note: String,
    /// Optional teaser for the next month.
    #[serde(default)]
    pub cliffhanger: String,
    /// Optional takeaway.
    #[serde(default)]
    pub lesson: String,
    /// Optional alternative moves mentioned in passing.
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// The player's own plan, interpreted into engine signals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoiceIntent {
    /// Short headline of the plan.
    pub title: String,
    /// Category of the plan.
    pub tag: Tag,
    /// Risk tier of the plan.
    pub risk: Risk,
    /// Concrete steps of the plan.
    pub steps: Vec<String>,
    /// Phrase describing what could come back to bite later.
    pub delayed_seed: String,
    /// Narrative outcome of the plan.
    #[serde(default)]
    pub result: String,
}

/// A delayed consequence attached to an option, relative to the turn month.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelayedEffectSpec {
    /// Months after the turn month at which the effect fires.
    pub delay_months: u32,
    /// Change applied when it fires.
    pub delta: Delta,
    /// Player-facing hint.
    pub description: String,
}

/// A fully resolved, ready-to-apply option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Identifier within the month.
    pub id: OptionId,
    /// Display label.
    pub label: String,
    /// Category of the move.
    pub tag: Tag,
    /// Declared risk tier.
    pub risk: Risk,
    /// Concrete steps.
    pub steps: Vec<String>,
    /// Rendered description including risk and focus lines.
    pub description: String,
    /// Delta applied on the turn the option is chosen.
    pub immediate_effects: Delta,
    /// Consequences scheduled when the option is chosen.
    #[serde(default)]
    pub delayed_effects: Vec<DelayedEffectSpec>,
    /// Narrative outcome.
    #[serde(default)]
    pub narrative_result: String,
}

/// The deterministic set of options for one turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthBundle {
    /// Month the bundle was built for.
    pub month_id: u32,
    /// Headline of the month.
    pub title: String,
    /// Situation analysis.
    pub context: String,
    /// Headline of the crisis.
    pub crisis_title: String,
    /// Body of the crisis.
    pub crisis: String,
    /// Resolved options in presentation order.
    pub options: Vec<OptionSpec>,
    /// Tag of every option, in option order.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Side note about risks carried over from the draft.
    #[serde(default)]
    pub risk_notes: String,
    /// Teaser for the next month.
    #[serde(default)]
    pub cliffhanger: String,
    /// Takeaway.
    #[serde(default)]
    pub lesson: String,
    /// Alternative moves mentioned in passing.
    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl MonthBundle {
    /// Finds an option by identifier.
    #[must_use]
    pub fn option(&self, id: OptionId) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.id == id)
    }
}
