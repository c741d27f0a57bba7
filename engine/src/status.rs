use serde::{Deserialize, Serialize};
use startup_survivor_core::{EngineConfig, GameState, Stats};

/// Runway reported when the burn is negligible.
pub const UNLIMITED_RUNWAY: f64 = 99.0;

/// Where a run stands between turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// More months remain and the company is solvent.
    InProgress,
    /// Cash ran out.
    Bankrupt,
    /// Every month of the season has been played.
    SeasonComplete,
}

impl RunStatus {
    /// Whether no further turns should be played.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Classifies `state`; bankruptcy wins over a finished season.
#[must_use]
pub fn run_status(state: &GameState, config: &EngineConfig) -> RunStatus {
    if state.stats().cash() <= 0.0 {
        RunStatus::Bankrupt
    } else if state.month() > config.season_length {
        RunStatus::SeasonComplete
    } else {
        RunStatus::InProgress
    }
}

/// Months of cash left at the given monthly burn.
#[must_use]
pub fn runway_months(cash: f64, burn: f64) -> f64 {
    if burn <= 1.0 {
        return UNLIMITED_RUNWAY;
    }
    (cash / burn).max(0.0)
}

/// Overall pressure on the company in `[0, 1]`; higher is worse.
#[must_use]
pub fn tension_index(stats: &Stats, burn: f64) -> f64 {
    let runway = runway_months(stats.cash(), burn);
    let runway_pressure = 1.0 - (runway / 10.0).min(1.0);
    let churn_pressure = unit((stats.churn() - 0.04) / 0.10);
    let support_pressure = unit((stats.support_load() - 35.0) / 60.0);
    let infra_pressure = unit((stats.infra_load() - 35.0) / 60.0);
    let debt_pressure = unit((stats.tech_debt() - 30.0) / 70.0);
    let morale_pressure = 1.0 - unit(stats.morale() / 100.0);

    unit(
        0.36 * runway_pressure
            + 0.20 * churn_pressure
            + 0.14 * support_pressure
            + 0.14 * infra_pressure
            + 0.10 * debt_pressure
            + 0.06 * morale_pressure,
    )
}

fn unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
