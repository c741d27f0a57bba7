#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Extra monthly cost from macroeconomic pressure.
//!
//! The charge combines a creeping inflation term, an FX shock, and two rare
//! one-off hits (a tax audit and a disaster). Everything is drawn from the
//! `turkey-macro` stream for the month, so the figure is reproducible.

use serde::{Deserialize, Serialize};
use startup_survivor_system_seeding::rng_from;

/// Cost basis the inflation and FX rates are applied to.
pub const MACRO_COST_BASIS: f64 = 40_000.0;

const AUDIT_CHANCE: f64 = 0.18;
const DISASTER_CHANCE: f64 = 0.06;

/// Itemised macro friction for one month.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    /// Inflation cost on the basis.
    pub inflation: f64,
    /// FX shock cost on the basis; may be negative.
    pub fx_shock: f64,
    /// Audit bill, or zero.
    pub audit: f64,
    /// Disaster bill, or zero.
    pub disaster: f64,
    /// Sum of the items, floored at zero.
    pub total: f64,
}

/// Computes the itemised macro friction for `month`.
///
/// Draw order: FX shock, audit roll, audit amount on a hit, disaster roll,
/// disaster amount on a hit.
#[must_use]
pub fn macro_breakdown(base_seed: i64, scenario_seed: i64, month: u32) -> MacroBreakdown {
    let mut rng = rng_from(
        base_seed,
        &["turkey-macro".into(), scenario_seed.into(), month.into()],
    );

    let inflation_rate = 0.03 + 0.01 * (f64::from(month) / 6.0);
    let fx_rate = rng.uniform(-0.01, 0.05);
    let audit = if rng.chance() < AUDIT_CHANCE {
        rng.uniform(15_000.0, 85_000.0)
    } else {
        0.0
    };
    let disaster = if rng.chance() < DISASTER_CHANCE {
        rng.uniform(25_000.0, 160_000.0)
    } else {
        0.0
    };

    let inflation = inflation_rate * MACRO_COST_BASIS;
    let fx_shock = fx_rate * MACRO_COST_BASIS;
    let total = ((inflation_rate + fx_rate) * MACRO_COST_BASIS + audit + disaster).max(0.0);

    MacroBreakdown {
        inflation,
        fx_shock,
        audit,
        disaster,
        total,
    }
}

/// Extra monthly cost for `month`; never negative.
#[must_use]
pub fn turkey_macro_cost(base_seed: i64, scenario_seed: i64, month: u32) -> f64 {
    macro_breakdown(base_seed, scenario_seed, month).total
}
