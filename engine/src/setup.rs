use serde::{Deserialize, Serialize};
use startup_survivor_core::{
    default_expenses, EngineConfig, Founder, GameState, Mode, Scenario, DEFAULT_SEASON_LENGTH,
};

/// Base seed used when a run does not pick one.
pub const DEFAULT_BASE_SEED: i64 = 42;

/// Player-facing choices that fully determine a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSetup {
    /// Seed mixed into every generator.
    pub base_seed: i64,
    /// Difficulty mode key.
    pub mode_key: String,
    /// Scenario catalog key.
    pub scenario_key: String,
    /// Founder catalog key.
    pub founder_key: String,
    /// Months in the season.
    pub season_length: u32,
}

impl Default for RunSetup {
    fn default() -> Self {
        Self {
            base_seed: DEFAULT_BASE_SEED,
            mode_key: Mode::Realistic.key().to_owned(),
            scenario_key: "free".to_owned(),
            founder_key: "anon".to_owned(),
            season_length: DEFAULT_SEASON_LENGTH,
        }
    }
}

impl RunSetup {
    /// Scenario the setup resolves to.
    #[must_use]
    pub fn scenario(&self) -> &'static Scenario {
        Scenario::by_key(&self.scenario_key)
    }

    /// Founder the setup resolves to.
    #[must_use]
    pub fn founder(&self) -> &'static Founder {
        Founder::by_key(&self.founder_key)
    }

    /// Engine configuration for the run.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        let scenario = self.scenario();
        EngineConfig {
            base_seed: self.base_seed,
            scenario_seed: scenario.scenario_seed(),
            mode_key: self.mode_key.clone(),
            case_key: scenario.case_key().to_owned(),
            expenses: default_expenses(),
            season_length: self.season_length,
        }
    }

    /// State for the first month: baseline stats with the founder's overrides.
    #[must_use]
    pub fn starting_state(&self) -> GameState {
        GameState::starting(self.founder().starting_stats())
    }

    /// Resolves the configuration and starting state together.
    #[must_use]
    pub fn start(&self) -> (EngineConfig, GameState) {
        let config = self.engine_config();
        let state = self.starting_state();
        tracing::info!(
            base_seed = config.base_seed,
            scenario_seed = config.scenario_seed,
            mode = %config.mode(),
            founder = self.founder().key(),
            "run started"
        );
        (config, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use startup_survivor_core::FIRST_MONTH;

    #[test]
    fn defaults_resolve_to_greenfield_run() {
        let (config, state) = RunSetup::default().start();
        assert_eq!(config.base_seed, 42);
        assert_eq!(config.scenario_seed, 872_341);
        assert_eq!(config.mode_key, "Gerçekçi");
        assert_eq!(config.case_key, "default");
        assert_eq!(config.total_expenses(), 122_500.0);
        assert_eq!(state.month(), FIRST_MONTH);
        assert_eq!(state.stats().cash(), 550_000.0);
    }

    #[test]
    fn scenario_and_founder_shape_the_run() {
        let setup = RunSetup {
            scenario_key: "true_story_privacy".to_owned(),
            founder_key: "hacker".to_owned(),
            ..RunSetup::default()
        };
        let (config, state) = setup.start();
        assert_eq!(config.case_key, "facebook_privacy_2019");
        assert_eq!(state.stats().infra_load(), 10.0);
        assert_eq!(state.stats().reputation(), 45.0);
    }

    #[test]
    fn partial_setups_fill_in_defaults() {
        let setup: RunSetup = serde_json::from_str(r#"{"mode_key":"Spartan"}"#).expect("parses");
        assert_eq!(setup.base_seed, DEFAULT_BASE_SEED);
        assert_eq!(setup.mode_key, "Spartan");
        assert_eq!(setup.season_length, DEFAULT_SEASON_LENGTH);
    }
}
