use anyhow::{Context, Result};
use startup_survivor_core::{EngineConfig, GameState, MonthBundle, OptionId, OptionSpec};
use startup_survivor_engine::{
    apply_choice, apply_option_spec, draft_to_bundle, run_status, RunSetup, RunStatus, TurnLog,
};
use startup_survivor_narrative::DraftProvider;

/// Player plan replacing the drafted options in one month.
#[derive(Debug)]
pub(crate) struct PlannedMove {
    /// Month in which the plan is played.
    pub(crate) month: u32,
    /// Resolved option built from the player's intent.
    pub(crate) option: OptionSpec,
}

/// Everything a headless season produced.
#[derive(Debug)]
pub(crate) struct SeasonOutcome {
    pub(crate) config: EngineConfig,
    pub(crate) state: GameState,
    pub(crate) logs: Vec<TurnLog>,
    pub(crate) status: RunStatus,
}

/// Plays turns until the company goes bankrupt or the season ends.
///
/// Each month takes the lowest-risk drafted option, unless `plan` claims it.
pub(crate) fn play_season(
    setup: &RunSetup,
    provider: &mut impl DraftProvider,
    plan: Option<PlannedMove>,
) -> Result<SeasonOutcome> {
    let (config, mut state) = setup.start();
    let mut logs = Vec::new();

    loop {
        let status = run_status(&state, &config);
        if status.is_over() {
            tracing::info!(?status, month = state.month(), "season finished");
            return Ok(SeasonOutcome {
                config,
                state,
                logs,
                status,
            });
        }

        let month = state.month();
        let (next, log) = match &plan {
            Some(planned) if planned.month == month => {
                apply_option_spec(&state, &planned.option, month, &config)?
            }
            _ => {
                let draft = provider
                    .draft(month)
                    .with_context(|| format!("failed to draft month {month}"))?;
                let bundle = draft_to_bundle(&draft, &config)
                    .with_context(|| format!("draft for month {month} was rejected"))?;
                let choice = safest_option(&bundle)
                    .with_context(|| format!("bundle for month {month} has no options"))?;
                apply_choice(&state, &bundle, choice, &config)?
            }
        };
        state = next;
        logs.push(log);
    }
}

/// Lowest-risk option of the bundle; ties go to the earlier option.
pub(crate) fn safest_option(bundle: &MonthBundle) -> Option<OptionId> {
    bundle
        .options
        .iter()
        .min_by_key(|option| option.risk)
        .map(|option| option.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use startup_survivor_core::{ChoiceIntent, Risk, Tag};
    use startup_survivor_engine::intent_to_option_spec;
    use startup_survivor_narrative::ScriptedDraftProvider;

    fn short_setup(season_length: u32) -> RunSetup {
        RunSetup {
            season_length,
            ..RunSetup::default()
        }
    }

    #[test]
    fn scripted_season_takes_the_low_risk_option() {
        let outcome = play_season(&short_setup(6), &mut ScriptedDraftProvider::new(), None)
            .expect("season plays");
        assert!(outcome.status.is_over());
        assert!(!outcome.logs.is_empty());
        assert!(outcome.logs.iter().all(|log| log.choice == OptionId::B));
        assert_eq!(outcome.state.month() as usize, outcome.logs.len() + 1);
        if outcome.status == RunStatus::Bankrupt {
            assert!(outcome.state.stats().cash() <= 0.0);
        }
    }

    #[test]
    fn seasons_replay_identically() {
        let first = play_season(&short_setup(6), &mut ScriptedDraftProvider::new(), None)
            .expect("season plays");
        let second = play_season(&short_setup(6), &mut ScriptedDraftProvider::new(), None)
            .expect("season plays");
        assert_eq!(first.state, second.state);
        assert_eq!(first.logs, second.logs);
    }

    #[test]
    fn planned_month_uses_the_player_option() {
        let setup = short_setup(2);
        let intent = ChoiceIntent {
            title: "Hire a support lead".to_owned(),
            tag: Tag::People,
            risk: Risk::High,
            steps: vec!["post the role".to_owned()],
            delayed_seed: "onboarding drag".to_owned(),
            result: String::new(),
        };
        let option = intent_to_option_spec(&intent, 2, &setup.engine_config());
        let plan = PlannedMove { month: 2, option };

        let outcome = play_season(&setup, &mut ScriptedDraftProvider::new(), Some(plan))
            .expect("season plays");
        let choices: Vec<OptionId> = outcome.logs.iter().map(|log| log.choice).collect();
        assert_eq!(choices, [OptionId::B, OptionId::Player]);
    }

    #[test]
    fn empty_season_plays_no_turns() {
        let outcome = play_season(&short_setup(0), &mut ScriptedDraftProvider::new(), None)
            .expect("season plays");
        assert!(outcome.logs.is_empty());
        assert_eq!(outcome.status, RunStatus::SeasonComplete);
    }
}
