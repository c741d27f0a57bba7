use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Mode, ModeSpec, StatKey, Stats};

/// Season length used when a run does not specify one.
pub const DEFAULT_SEASON_LENGTH: u32 = 12;

/// Case key for scenarios without a bias table.
pub const NEUTRAL_CASE_KEY: &str = "default";

/// Immutable parameters for a single run.
///
/// Supplied once by the caller and only ever read by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Player-chosen seed mixed into every generator.
    pub base_seed: i64,
    /// Seed of the scenario being played.
    pub scenario_seed: i64,
    /// Key of the difficulty [`Mode`]; unknown keys behave as realistic.
    pub mode_key: String,
    /// Key selecting scenario-specific bias nudges.
    pub case_key: String,
    /// Fixed monthly costs by name.
    pub expenses: BTreeMap<String, f64>,
    /// Number of months in a season.
    #[serde(default = "default_season_length")]
    pub season_length: u32,
}

impl EngineConfig {
    /// Resolved difficulty mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        Mode::from_key(&self.mode_key)
    }

    /// Static tuning of the resolved mode.
    #[must_use]
    pub fn mode_spec(&self) -> &'static ModeSpec {
        self.mode().spec()
    }

    /// Sum of the fixed monthly costs, added in name order.
    #[must_use]
    pub fn total_expenses(&self) -> f64 {
        self.expenses.values().sum()
    }
}

fn default_season_length() -> u32 {
    DEFAULT_SEASON_LENGTH
}

/// Fixed monthly costs every catalog run starts with.
#[must_use]
pub fn default_expenses() -> BTreeMap<String, f64> {
    [
        ("payroll", 90_000.0),
        ("tools", 10_000.0),
        ("infra", 15_000.0),
        ("misc", 7_500.0),
    ]
    .into_iter()
    .map(|(name, amount)| (name.to_owned(), amount))
    .collect()
}

/// Playable scenario from the built-in catalog.
#[derive(Debug, PartialEq)]
pub struct Scenario {
    key: &'static str,
    title: &'static str,
    blurb: &'static str,
    scenario_seed: i64,
    case_key: &'static str,
}

impl Scenario {
    /// Catalog key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Display title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Short pitch of the situation.
    #[must_use]
    pub const fn blurb(&self) -> &'static str {
        self.blurb
    }

    /// Seed identifying the scenario's random streams.
    #[must_use]
    pub const fn scenario_seed(&self) -> i64 {
        self.scenario_seed
    }

    /// Bias table key applied to sampled deltas.
    #[must_use]
    pub const fn case_key(&self) -> &'static str {
        self.case_key
    }

    /// Looks up a scenario, falling back to the greenfield start.
    #[must_use]
    pub fn by_key(key: &str) -> &'static Scenario {
        SCENARIOS
            .iter()
            .find(|scenario| scenario.key == key)
            .unwrap_or(&SCENARIOS[0])
    }
}

/// Built-in scenarios. The first entry is the fallback.
pub static SCENARIOS: [Scenario; 7] = [
    Scenario {
        key: "free",
        title: "Greenfield",
        blurb: "A fresh product idea in an uncertain market; every call sets your rhythm and focus.",
        scenario_seed: 872_341,
        case_key: NEUTRAL_CASE_KEY,
    },
    Scenario {
        key: "true_story_privacy",
        title: "True Story: Privacy Crisis",
        blurb: "Growth looks good, but rumours of a privacy hole are spreading.",
        scenario_seed: 903_155,
        case_key: "facebook_privacy_2019",
    },
    Scenario {
        key: "pricing_wall",
        title: "Pricing Wall",
        blurb: "Users, but no payers. Pricing experiments can blow up churn.",
        scenario_seed: 441_928,
        case_key: NEUTRAL_CASE_KEY,
    },
    Scenario {
        key: "support_avalanche",
        title: "Support Avalanche",
        blurb: "Early traction, and now the tickets are piling up.",
        scenario_seed: 128_044,
        case_key: NEUTRAL_CASE_KEY,
    },
    Scenario {
        key: "funding_winter",
        title: "Funding Winter",
        blurb: "Money is expensive. Cut, sell or raise to stretch the runway.",
        scenario_seed: 770_212,
        case_key: NEUTRAL_CASE_KEY,
    },
    Scenario {
        key: "viral_but_broken",
        title: "Viral but Broken",
        blurb: "A post blew up and traffic went 10x. The servers are on fire.",
        scenario_seed: 555_901,
        case_key: NEUTRAL_CASE_KEY,
    },
    Scenario {
        key: "enterprise_trap",
        title: "Enterprise Trap?",
        blurb: "A big customer is close to yes, with heavy integration demands attached.",
        scenario_seed: 620_077,
        case_key: NEUTRAL_CASE_KEY,
    },
];

/// Founder archetype that adjusts a few starting stats.
#[derive(Debug, PartialEq)]
pub struct Founder {
    key: &'static str,
    name: &'static str,
    trait_line: &'static str,
    start_overrides: &'static [(StatKey, f64)],
}

impl Founder {
    /// Catalog key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// One-line description of the archetype.
    #[must_use]
    pub const fn trait_line(&self) -> &'static str {
        self.trait_line
    }

    /// Absolute starting values replacing the baseline.
    #[must_use]
    pub const fn start_overrides(&self) -> &'static [(StatKey, f64)] {
        self.start_overrides
    }

    /// Baseline stats with this founder's overrides applied.
    #[must_use]
    pub fn starting_stats(&self) -> Stats {
        Stats::baseline().with_overrides(self.start_overrides)
    }

    /// Looks up a founder, falling back to the anonymous founder.
    #[must_use]
    pub fn by_key(key: &str) -> &'static Founder {
        FOUNDERS
            .iter()
            .find(|founder| founder.key == key)
            .unwrap_or(&FOUNDERS[0])
    }
}

/// Built-in founders. The first entry is the fallback.
pub static FOUNDERS: [Founder; 4] = [
    Founder {
        key: "anon",
        name: "Nameless Founder",
        trait_line: "Balanced. Find the right calls and growth stays steady.",
        start_overrides: &[],
    },
    Founder {
        key: "hacker",
        name: "Hacker Founder",
        trait_line: "Ships fast, but has blind spots in marketing and sales.",
        start_overrides: &[
            (StatKey::InfraLoad, 10.0),
            (StatKey::SupportLoad, 25.0),
            (StatKey::Reputation, 45.0),
        ],
    },
    Founder {
        key: "sales",
        name: "Sales Founder",
        trait_line: "Builds pipeline and chases MRR; lets tech debt grow.",
        start_overrides: &[
            (StatKey::Mrr, 1_500.0),
            (StatKey::InfraLoad, 35.0),
            (StatKey::Reputation, 55.0),
        ],
    },
    Founder {
        key: "ops",
        name: "Ops Founder",
        trait_line: "Builds systems; may trade away growth speed.",
        start_overrides: &[
            (StatKey::SupportLoad, 15.0),
            (StatKey::InfraLoad, 15.0),
            (StatKey::Mrr, 700.0),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig {
            base_seed: 42,
            scenario_seed: 872_341,
            mode_key: "Türkiye".to_owned(),
            case_key: NEUTRAL_CASE_KEY.to_owned(),
            expenses: default_expenses(),
            season_length: DEFAULT_SEASON_LENGTH,
        }
    }

    #[test]
    fn default_expenses_total() {
        assert_eq!(config().total_expenses(), 122_500.0);
    }

    #[test]
    fn mode_resolves_from_key() {
        assert_eq!(config().mode(), Mode::Turkey);
        assert!(config().mode_spec().turkey());
    }

    #[test]
    fn season_length_defaults_when_missing() {
        let json = r#"{"base_seed":1,"scenario_seed":2,"mode_key":"Zor","case_key":"default","expenses":{}}"#;
        let parsed: EngineConfig = serde_json::from_str(json).expect("config parses");
        assert_eq!(parsed.season_length, DEFAULT_SEASON_LENGTH);
        assert_eq!(parsed.total_expenses(), 0.0);
    }

    #[test]
    fn unknown_catalog_keys_fall_back() {
        assert_eq!(Scenario::by_key("moon_base").key(), "free");
        assert_eq!(Founder::by_key("wizard").key(), "anon");
    }

    #[test]
    fn privacy_scenario_carries_its_case_key() {
        let scenario = Scenario::by_key("true_story_privacy");
        assert_eq!(scenario.scenario_seed(), 903_155);
        assert_eq!(scenario.case_key(), "facebook_privacy_2019");
    }

    #[test]
    fn founder_overrides_replace_baseline_values() {
        let stats = Founder::by_key("sales").starting_stats();
        assert_eq!(stats.mrr(), 1_500.0);
        assert_eq!(stats.infra_load(), 35.0);
        assert_eq!(stats.reputation(), 55.0);
        assert_eq!(stats.cash(), Stats::baseline().cash());
        assert_eq!(Founder::by_key("anon").starting_stats(), Stats::baseline());
    }
}
