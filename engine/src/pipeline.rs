use serde::{Deserialize, Serialize};
use startup_survivor_core::{
    DelayedEffect, DelayedEffectSpec, Delta, EngineConfig, GameState, MonthBundle, OptionId,
    OptionSpec, Stats,
};
use startup_survivor_system_macro_friction::macro_breakdown;
use startup_survivor_system_scheduling::due_delayed_effects;

use crate::EngineError;

/// A delayed effect that fired during a turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DueEffectRecord {
    /// Month whose decision scheduled the effect.
    pub from_month: u32,
    /// Player-facing hint.
    pub hint: String,
    /// Change that was applied.
    pub delta: Delta,
}

impl From<&DelayedEffect> for DueEffectRecord {
    fn from(effect: &DelayedEffect) -> Self {
        Self {
            from_month: effect.from_month(),
            hint: effect.hint().to_owned(),
            delta: *effect.delta(),
        }
    }
}

/// Structured record of one processed turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnLog {
    /// Month the turn was played in.
    pub month: u32,
    /// Option that was applied.
    pub choice: OptionId,
    /// Label of the applied option.
    pub choice_label: String,
    /// Stats when the turn began.
    pub before: Stats,
    /// Stats when the turn ended.
    pub after: Stats,
    /// Delayed effects that fired, in enqueue order.
    pub due_effects: Vec<DueEffectRecord>,
    /// Fixed monthly costs charged.
    pub expenses: f64,
    /// Macro friction charged on top of the fixed costs.
    pub macro_extra: f64,
    /// Delta of the applied option.
    pub immediate_delta: Delta,
    /// Consequences newly scheduled by the option.
    pub scheduled_delays: Vec<DelayedEffectSpec>,
}

/// Applies the option `choice` from `bundle` to `state` and advances one month.
///
/// The turn month is `state.month()`. A bundle built for a different month is
/// still applied; the mismatch is logged.
///
/// # Errors
///
/// Returns [`EngineError::InvalidOption`] when `choice` is not in the bundle
/// and [`EngineError::MonthOverflow`] when the calendar cannot advance.
pub fn apply_choice(
    state: &GameState,
    bundle: &MonthBundle,
    choice: OptionId,
    config: &EngineConfig,
) -> Result<(GameState, TurnLog), EngineError> {
    let month = state.month();
    if bundle.month_id != month {
        tracing::warn!(
            state_month = month,
            bundle_month = bundle.month_id,
            "bundle month does not match state month"
        );
    }

    let option = bundle
        .option(choice)
        .ok_or(EngineError::InvalidOption {
            choice,
            month: bundle.month_id,
        })?;

    advance(state, option, month, config)
}

/// Applies a standalone option, typically a player's own plan, and advances one month.
///
/// Mechanics are identical to [`apply_choice`]. The turn month is
/// `state.month()`; an option resolved for a different `month_id` is still
/// applied and the mismatch is logged.
///
/// # Errors
///
/// Returns [`EngineError::MonthOverflow`] when the calendar cannot advance.
pub fn apply_option_spec(
    state: &GameState,
    option: &OptionSpec,
    month_id: u32,
    config: &EngineConfig,
) -> Result<(GameState, TurnLog), EngineError> {
    let month = state.month();
    if month_id != month {
        tracing::warn!(
            state_month = month,
            option_month = month_id,
            "option month does not match state month"
        );
    }
    advance(state, option, month, config)
}

fn advance(
    state: &GameState,
    option: &OptionSpec,
    month: u32,
    config: &EngineConfig,
) -> Result<(GameState, TurnLog), EngineError> {
    let next_month = month
        .checked_add(1)
        .ok_or(EngineError::MonthOverflow { month })?;
    let scheduled = option
        .delayed_effects
        .iter()
        .map(|spec| {
            let due_month = month
                .checked_add(spec.delay_months)
                .ok_or(EngineError::MonthOverflow { month })?;
            Ok(DelayedEffect::new(
                due_month,
                spec.delta,
                spec.description.clone(),
                month,
            ))
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    let before = *state.stats();

    let (due, remaining) = due_delayed_effects(state.delayed_queue(), month);
    let mut stats = before;
    for effect in &due {
        stats = stats.apply_delta(effect.delta());
        tracing::debug!(
            month,
            from_month = effect.from_month(),
            hint = effect.hint(),
            "delayed effect applied"
        );
    }

    let expenses = config.total_expenses();
    let macro_extra = if config.mode_spec().turkey() {
        let breakdown = macro_breakdown(config.base_seed, config.scenario_seed, month);
        tracing::debug!(
            month,
            inflation = breakdown.inflation,
            fx_shock = breakdown.fx_shock,
            audit = breakdown.audit,
            disaster = breakdown.disaster,
            total = breakdown.total,
            "macro friction"
        );
        breakdown.total
    } else {
        0.0
    };
    stats = stats.apply_delta(&Delta::cash_only(-(expenses + macro_extra)));
    tracing::debug!(month, expenses, macro_extra, "monthly costs charged");

    stats = stats.apply_delta(&option.immediate_effects);
    tracing::debug!(month, choice = %option.id, "option delta applied");

    let mut queue = remaining;
    queue.extend(scheduled);

    let next = GameState::new(next_month, stats, queue);

    tracing::info!(
        month,
        choice = %option.id,
        cash = next.stats().cash(),
        mrr = next.stats().mrr(),
        pending = next.delayed_queue().len(),
        "turn applied"
    );

    let log = TurnLog {
        month,
        choice: option.id,
        choice_label: option.label.clone(),
        before,
        after: *next.stats(),
        due_effects: due.iter().map(DueEffectRecord::from).collect(),
        expenses,
        macro_extra,
        immediate_delta: option.immediate_effects,
        scheduled_delays: option.delayed_effects.clone(),
    };

    Ok((next, log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use startup_survivor_core::{default_expenses, Risk, Tag, NEUTRAL_CASE_KEY};

    fn config(mode_key: &str) -> EngineConfig {
        EngineConfig {
            base_seed: 42,
            scenario_seed: 872_341,
            mode_key: mode_key.to_owned(),
            case_key: NEUTRAL_CASE_KEY.to_owned(),
            expenses: default_expenses(),
            season_length: 12,
        }
    }

    fn option(id: OptionId, delta: Delta, delays: Vec<DelayedEffectSpec>) -> OptionSpec {
        OptionSpec {
            id,
            label: format!("Option {id}"),
            tag: Tag::Product,
            risk: Risk::Med,
            steps: vec!["ship".to_owned()],
            description: String::new(),
            immediate_effects: delta,
            delayed_effects: delays,
            narrative_result: String::new(),
        }
    }

    fn bundle(month_id: u32, options: Vec<OptionSpec>) -> MonthBundle {
        MonthBundle {
            month_id,
            title: String::new(),
            context: String::new(),
            crisis_title: String::new(),
            crisis: String::new(),
            tags: options.iter().map(|o| o.tag).collect(),
            options,
            risk_notes: String::new(),
            cliffhanger: String::new(),
            lesson: String::new(),
            alternatives: Vec::new(),
        }
    }

    #[test]
    fn unknown_choice_is_rejected() {
        let b = bundle(1, vec![option(OptionId::A, Delta::ZERO, Vec::new())]);
        let error = apply_choice(&GameState::default(), &b, OptionId::C, &config("Gerçekçi"))
            .expect_err("C is missing");
        assert_eq!(
            error,
            EngineError::InvalidOption {
                choice: OptionId::C,
                month: 1
            }
        );
    }

    #[test]
    fn costs_and_choice_are_charged_in_order() {
        let b = bundle(1, vec![option(OptionId::A, Delta::cash_only(-1_000.0), Vec::new())]);
        let (next, log) =
            apply_choice(&GameState::default(), &b, OptionId::A, &config("Gerçekçi")).expect("ok");
        assert_eq!(next.month(), 2);
        assert_eq!(next.stats().cash(), 550_000.0 - 122_500.0 - 1_000.0);
        assert_eq!(log.expenses, 122_500.0);
        assert_eq!(log.macro_extra, 0.0);
        assert_eq!(log.before, Stats::baseline());
        assert_eq!(log.after, *next.stats());
    }

    #[test]
    fn due_effects_fire_before_costs() {
        let queue = vec![
            DelayedEffect::new(1, Delta::cash_only(-600_000.0), "lawsuit", 0),
            DelayedEffect::new(2, Delta::cash_only(-5.0), "later", 0),
        ];
        let state = GameState::new(1, Stats::baseline(), queue);
        let b = bundle(1, vec![option(OptionId::B, Delta::cash_only(200_000.0), Vec::new())]);
        let (next, log) = apply_choice(&state, &b, OptionId::B, &config("Gerçekçi")).expect("ok");
        // The lawsuit floors cash at zero before costs, so only the option's cash survives.
        assert_eq!(next.stats().cash(), 200_000.0);
        assert_eq!(log.due_effects.len(), 1);
        assert_eq!(log.due_effects[0].hint, "lawsuit");
        assert_eq!(next.delayed_queue().len(), 1);
        assert_eq!(next.delayed_queue()[0].hint(), "later");
    }

    #[test]
    fn delayed_specs_are_materialised_relative_to_turn_month() {
        let spec = DelayedEffectSpec {
            delay_months: 2,
            delta: Delta::cash_only(-7.0),
            description: "churn spike".to_owned(),
        };
        let state = GameState::new(5, Stats::baseline(), Vec::new());
        let b = bundle(5, vec![option(OptionId::A, Delta::ZERO, vec![spec.clone()])]);
        let (next, log) = apply_choice(&state, &b, OptionId::A, &config("Gerçekçi")).expect("ok");
        let scheduled = &next.delayed_queue()[0];
        assert_eq!(scheduled.due_month(), 7);
        assert_eq!(scheduled.from_month(), 5);
        assert_eq!(scheduled.hint(), "churn spike");
        assert_eq!(log.scheduled_delays, vec![spec]);
    }

    #[test]
    fn turkey_mode_charges_macro_friction() {
        let b = bundle(1, vec![option(OptionId::A, Delta::ZERO, Vec::new())]);
        let (next, log) =
            apply_choice(&GameState::default(), &b, OptionId::A, &config("Türkiye")).expect("ok");
        let expected = macro_breakdown(42, 872_341, 1).total;
        assert_eq!(log.macro_extra, expected);
        assert_eq!(
            next.stats().cash(),
            (550_000.0 - (122_500.0 + expected)).max(0.0)
        );
    }

    #[test]
    fn month_mismatch_still_applies_at_state_month() {
        let state = GameState::new(3, Stats::baseline(), Vec::new());
        let b = bundle(2, vec![option(OptionId::A, Delta::ZERO, Vec::new())]);
        let (next, log) = apply_choice(&state, &b, OptionId::A, &config("Gerçekçi")).expect("ok");
        assert_eq!(log.month, 3);
        assert_eq!(next.month(), 4);
    }

    #[test]
    fn option_spec_plays_at_state_month() {
        let queue = vec![
            DelayedEffect::new(3, Delta::cash_only(-1.0), "due at three", 2),
            DelayedEffect::new(4, Delta::cash_only(-2.0), "due at four", 2),
        ];
        let state = GameState::new(3, Stats::baseline(), queue);
        let spec = option(OptionId::Player, Delta::ZERO, Vec::new());
        let config = config("Gerçekçi");

        for month_id in [1, 3, 6] {
            let (next, log) = apply_option_spec(&state, &spec, month_id, &config).expect("ok");
            assert_eq!(log.month, 3);
            assert_eq!(next.month(), 4);
            assert_eq!(log.choice, OptionId::Player);
            assert_eq!(log.due_effects.len(), 1);
            assert_eq!(log.due_effects[0].hint, "due at three");

            let (last, log) = apply_option_spec(&next, &spec, month_id, &config).expect("ok");
            assert_eq!(last.month(), 5);
            assert_eq!(log.due_effects.len(), 1);
            assert_eq!(log.due_effects[0].hint, "due at four");
            assert!(last.delayed_queue().is_empty());
        }
    }

    #[test]
    fn calendar_overflow_is_an_error() {
        let spec = option(OptionId::Player, Delta::ZERO, Vec::new());
        let state = GameState::new(u32::MAX, Stats::baseline(), Vec::new());
        assert_eq!(
            apply_option_spec(&state, &spec, u32::MAX, &config("Gerçekçi")),
            Err(EngineError::MonthOverflow { month: u32::MAX })
        );

        let late = DelayedEffectSpec {
            delay_months: 2,
            delta: Delta::ZERO,
            description: "too late".to_owned(),
        };
        let b = bundle(u32::MAX - 1, vec![option(OptionId::A, Delta::ZERO, vec![late])]);
        let state = GameState::new(u32::MAX - 1, Stats::baseline(), Vec::new());
        assert_eq!(
            apply_choice(&state, &b, OptionId::A, &config("Gerçekçi")),
            Err(EngineError::MonthOverflow { month: u32::MAX - 1 })
        );
    }

    #[test]
    fn turn_log_serializes_choice_and_stats() {
        let b = bundle(1, vec![option(OptionId::A, Delta::ZERO, Vec::new())]);
        let (_, log) =
            apply_choice(&GameState::default(), &b, OptionId::A, &config("Gerçekçi")).expect("ok");
        let json = serde_json::to_value(&log).expect("serialize");
        assert_eq!(json["choice"], "A");
        assert_eq!(json["before"]["cash"], 550_000.0);
        assert_eq!(json["immediate_delta"]["tech_debt"], 0.0);
        let back: TurnLog = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, log);
    }
}
