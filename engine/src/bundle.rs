use std::collections::BTreeSet;

use startup_survivor_core::{
    ChoiceIntent, DelayedEffectSpec, EngineConfig, MonthBundle, MonthDraft, OptionDraft,
    OptionId, OptionSpec, Risk, Tag,
};
use startup_survivor_system_sampling::sample_option_delta;
use startup_survivor_system_scheduling::{roll_delayed_effect, ScheduleRequest};
use startup_survivor_system_seeding::rng_from;

use crate::{DraftDefect, EngineError};

const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 3;

/// Borrowed view shared by drafted options and player intents.
struct OptionInput<'a> {
    id: OptionId,
    title: &'a str,
    tag: Tag,
    risk: Risk,
    steps: &'a [String],
    delayed_seed: &'a str,
    result: &'a str,
}

impl<'a> From<&'a OptionDraft> for OptionInput<'a> {
    fn from(draft: &'a OptionDraft) -> Self {
        Self {
            id: draft.id,
            title: &draft.title,
            tag: draft.tag,
            risk: draft.risk,
            steps: &draft.steps,
            delayed_seed: &draft.delayed_seed,
            result: &draft.result,
        }
    }
}

/// Converts a narrative draft into a ready-to-apply bundle.
///
/// Every option is sampled on its own `choice` stream and rolled once for a
/// delayed consequence, so building the same draft twice yields identical
/// bundles.
///
/// # Errors
///
/// Returns [`EngineError::MalformedDraft`] when the draft is not well formed.
pub fn draft_to_bundle(
    draft: &MonthDraft,
    config: &EngineConfig,
) -> Result<MonthBundle, EngineError> {
    validate_draft(draft).map_err(|defect| EngineError::MalformedDraft {
        month: draft.month_id,
        defect,
    })?;

    let options = draft
        .options
        .iter()
        .map(|option| {
            resolve_option("choice", &OptionInput::from(option), draft.month_id, config)
        })
        .collect();

    let title = match draft.month_title.trim() {
        "" => format!("Month {}: Decision Month", draft.month_id),
        title => title.to_owned(),
    };

    tracing::debug!(month = draft.month_id, options = draft.options.len(), "bundle built");

    Ok(MonthBundle {
        month_id: draft.month_id,
        title,
        context: draft.situation.clone(),
        crisis_title: draft.crisis_title.clone(),
        crisis: draft.crisis.clone(),
        options,
        tags: draft.options.iter().map(|option| option.tag).collect(),
        risk_notes: draft.note.clone(),
        cliffhanger: draft.cliffhanger.trim().to_owned(),
        lesson: draft.lesson.trim().to_owned(),
        alternatives: draft.alternatives.clone(),
    })
}

/// Converts the player's own plan into an option with id `YOU`.
///
/// Uses the `player-choice` stream with the same sampler and scheduler as
/// drafted options.
#[must_use]
pub fn intent_to_option_spec(
    intent: &ChoiceIntent,
    month_id: u32,
    config: &EngineConfig,
) -> OptionSpec {
    let input = OptionInput {
        id: OptionId::Player,
        title: &intent.title,
        tag: intent.tag,
        risk: intent.risk,
        steps: &intent.steps,
        delayed_seed: &intent.delayed_seed,
        result: &intent.result,
    };
    resolve_option("player-choice", &input, month_id, config)
}

/// Checks the structural requirements a draft must meet before sampling.
///
/// # Errors
///
/// Returns the first [`DraftDefect`] found.
pub fn validate_draft(draft: &MonthDraft) -> Result<(), DraftDefect> {
    if draft.month_id < 1 {
        return Err(DraftDefect::MonthOutOfRange);
    }

    let required = [
        ("situation", &draft.situation),
        ("crisis title", &draft.crisis_title),
        ("crisis", &draft.crisis),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(DraftDefect::MissingField(name));
        }
    }

    let count = draft.options.len();
    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
        return Err(DraftDefect::OptionCount(count));
    }

    let mut seen = BTreeSet::new();
    for option in &draft.options {
        if option.id == OptionId::Player {
            return Err(DraftDefect::ReservedOption(option.id));
        }
        if !seen.insert(option.id) {
            return Err(DraftDefect::DuplicateOption(option.id));
        }
        if option.title.trim().is_empty() {
            return Err(DraftDefect::UntitledOption(option.id));
        }
        if option.steps.iter().all(|step| step.trim().is_empty()) {
            return Err(DraftDefect::NoSteps(option.id));
        }
    }

    Ok(())
}

/// Renders steps, risk and focus into the option description.
#[must_use]
pub fn describe_option(steps: &[String], risk: Risk, tag: Tag) -> String {
    let lines: Vec<String> = steps.iter().map(|step| format!("- {step}")).collect();
    format!("{}\n\nRisk: {}\nFocus: {}", lines.join("\n"), risk.label(), tag)
}

fn resolve_option(
    stream: &str,
    input: &OptionInput<'_>,
    month: u32,
    config: &EngineConfig,
) -> OptionSpec {
    let mode = config.mode();
    let mut rng = rng_from(
        config.base_seed,
        &[
            stream.into(),
            config.scenario_seed.into(),
            month.into(),
            input.id.as_str().into(),
        ],
    );
    let immediate_effects =
        sample_option_delta(input.tag, &mut rng, mode, &config.case_key, month);

    let request = ScheduleRequest {
        base_seed: config.base_seed,
        scenario_seed: config.scenario_seed,
        month,
        choice: input.id,
        tag: input.tag,
        risk: input.risk,
        seed_phrase: input.delayed_seed,
        mode,
    };
    let delayed_effects = roll_delayed_effect(&request)
        .map(|effect| DelayedEffectSpec {
            delay_months: effect.due_month() - month,
            delta: *effect.delta(),
            description: effect.hint().to_owned(),
        })
        .into_iter()
        .collect();

    OptionSpec {
        id: input.id,
        label: input.title.to_owned(),
        tag: input.tag,
        risk: input.risk,
        steps: input.steps.to_vec(),
        description: describe_option(input.steps, input.risk, input.tag),
        immediate_effects,
        delayed_effects,
        narrative_result: input.result.trim().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use startup_survivor_core::{default_expenses, NEUTRAL_CASE_KEY};

    fn config() -> EngineConfig {
        EngineConfig {
            base_seed: 42,
            scenario_seed: 872_341,
            mode_key: "Gerçekçi".to_owned(),
            case_key: NEUTRAL_CASE_KEY.to_owned(),
            expenses: default_expenses(),
            season_length: 12,
        }
    }

    fn option(id: OptionId, tag: Tag, risk: Risk) -> OptionDraft {
        OptionDraft {
            id,
            title: format!("Option {id}"),
            tag,
            risk,
            steps: vec!["hire two engineers".to_owned(), "ship the beta".to_owned()],
            delayed_seed: "the beta leaks early".to_owned(),
            result: "  The beta lands.  ".to_owned(),
        }
    }

    fn draft() -> MonthDraft {
        MonthDraft {
            month_id: 1,
            month_title: "Month 1: First Customers".to_owned(),
            situation: "Signups are trickling in.".to_owned(),
            crisis_title: "The demo breaks".to_owned(),
            crisis: "The investor demo crashed twice.".to_owned(),
            options: vec![
                option(OptionId::A, Tag::Growth, Risk::Med),
                option(OptionId::B, Tag::Reliability, Risk::Low),
            ],
            note: "watch the burn".to_owned(),
            cliffhanger: String::new(),
            lesson: String::new(),
            alternatives: Vec::new(),
        }
    }

    #[test]
    fn bundle_is_deterministic() {
        let first = draft_to_bundle(&draft(), &config()).expect("bundle");
        let second = draft_to_bundle(&draft(), &config()).expect("bundle");
        assert_eq!(first, second);
        assert_eq!(first.tags, vec![Tag::Growth, Tag::Reliability]);
        assert_eq!(first.risk_notes, "watch the burn");
        assert_eq!(first.options[0].narrative_result, "The beta lands.");
    }

    #[test]
    fn description_lists_steps_then_risk_and_focus() {
        let text = describe_option(&["a".to_owned(), "b".to_owned()], Risk::High, Tag::Sales);
        assert_eq!(text, "- a\n- b\n\nRisk: High\nFocus: sales");
    }

    #[test]
    fn blank_title_falls_back() {
        let mut blank = draft();
        blank.month_title = "   ".to_owned();
        blank.month_id = 4;
        let bundle = draft_to_bundle(&blank, &config()).expect("bundle");
        assert_eq!(bundle.title, "Month 4: Decision Month");
    }

    #[test]
    fn delayed_specs_are_one_or_two_months_out() {
        for month in 1..=30 {
            let mut d = draft();
            d.month_id = month;
            let bundle = draft_to_bundle(&d, &config()).expect("bundle");
            for option in &bundle.options {
                assert!(option.delayed_effects.len() <= 1);
                for spec in &option.delayed_effects {
                    assert!(spec.delay_months == 1 || spec.delay_months == 2);
                    assert_eq!(spec.description, "the beta leaks early");
                }
            }
        }
    }

    #[test]
    fn option_count_is_enforced() {
        let mut single = draft();
        let _ = single.options.pop();
        assert_eq!(validate_draft(&single), Err(DraftDefect::OptionCount(1)));

        let mut crowded = draft();
        crowded.options.push(option(OptionId::C, Tag::Sales, Risk::Low));
        crowded.options.push(option(OptionId::C, Tag::Sales, Risk::Low));
        assert_eq!(validate_draft(&crowded), Err(DraftDefect::OptionCount(4)));
    }

    #[test]
    fn duplicate_and_reserved_ids_are_rejected() {
        let mut duplicate = draft();
        duplicate.options[1].id = OptionId::A;
        assert_eq!(
            validate_draft(&duplicate),
            Err(DraftDefect::DuplicateOption(OptionId::A))
        );

        let mut reserved = draft();
        reserved.options[0].id = OptionId::Player;
        assert_eq!(
            validate_draft(&reserved),
            Err(DraftDefect::ReservedOption(OptionId::Player))
        );
    }

    #[test]
    fn missing_fields_are_named() {
        let mut missing = draft();
        missing.crisis = " ".to_owned();
        let error = draft_to_bundle(&missing, &config()).expect_err("malformed");
        assert_eq!(
            error,
            EngineError::MalformedDraft {
                month: 1,
                defect: DraftDefect::MissingField("crisis"),
            }
        );
        assert_eq!(error.to_string(), "malformed draft for month 1: missing crisis");
    }

    #[test]
    fn option_without_steps_is_rejected() {
        let mut stepless = draft();
        stepless.options[1].steps = vec!["  ".to_owned()];
        assert_eq!(validate_draft(&stepless), Err(DraftDefect::NoSteps(OptionId::B)));

        let mut untitled = draft();
        untitled.options[0].title.clear();
        assert_eq!(
            validate_draft(&untitled),
            Err(DraftDefect::UntitledOption(OptionId::A))
        );
    }

    #[test]
    fn month_zero_is_rejected() {
        let mut zero = draft();
        zero.month_id = 0;
        assert_eq!(validate_draft(&zero), Err(DraftDefect::MonthOutOfRange));
    }

    #[test]
    fn player_intent_uses_its_own_stream() {
        let intent = ChoiceIntent {
            title: "Go growth".to_owned(),
            tag: Tag::Growth,
            risk: Risk::Med,
            steps: vec!["hire two engineers".to_owned(), "ship the beta".to_owned()],
            delayed_seed: "the beta leaks early".to_owned(),
            result: String::new(),
        };
        let spec = intent_to_option_spec(&intent, 1, &config());
        let bundle = draft_to_bundle(&draft(), &config()).expect("bundle");
        assert_eq!(spec.id, OptionId::Player);
        assert_ne!(spec.immediate_effects, bundle.options[0].immediate_effects);
        assert_eq!(spec, intent_to_option_spec(&intent, 1, &config()));
    }
}
