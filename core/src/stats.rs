use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound shared by every 0..100 stat.
pub const PERCENT_CEILING: f64 = 100.0;

/// Upper bound applied to the monthly churn rate.
pub const CHURN_CEILING: f64 = 0.50;

/// Identifies one of the eight company stats.
///
/// The declaration order is canonical: samplers draw one value per stat in
/// exactly this order, so reordering variants changes every seeded outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    /// Cash in the bank.
    Cash,
    /// Monthly recurring revenue.
    Mrr,
    /// Public reputation on a 0..100 scale.
    Reputation,
    /// Pressure on the support team on a 0..100 scale.
    SupportLoad,
    /// Pressure on infrastructure on a 0..100 scale.
    InfraLoad,
    /// Fraction of customers lost per month, 0..0.50.
    Churn,
    /// Team morale on a 0..100 scale.
    Morale,
    /// Accumulated technical debt on a 0..100 scale.
    TechDebt,
}

impl StatKey {
    /// Every stat in canonical order.
    pub const ALL: [StatKey; 8] = [
        StatKey::Cash,
        StatKey::Mrr,
        StatKey::Reputation,
        StatKey::SupportLoad,
        StatKey::InfraLoad,
        StatKey::Churn,
        StatKey::Morale,
        StatKey::TechDebt,
    ];

    /// Stable snake_case name used in logs and serialized records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Mrr => "mrr",
            Self::Reputation => "reputation",
            Self::SupportLoad => "support_load",
            Self::InfraLoad => "infra_load",
            Self::Churn => "churn",
            Self::Morale => "morale",
            Self::TechDebt => "tech_debt",
        }
    }

    /// Inclusive bounds a stat is clamped into after every apply.
    ///
    /// Cash and MRR floor at zero without a ceiling.
    #[must_use]
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::Cash | Self::Mrr => (0.0, f64::INFINITY),
            Self::Churn => (0.0, CHURN_CEILING),
            Self::Reputation
            | Self::SupportLoad
            | Self::InfraLoad
            | Self::Morale
            | Self::TechDebt => (0.0, PERCENT_CEILING),
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed change to apply to [`Stats`], one component per stat.
///
/// Absent components are zero. When read from JSON, missing keys default to
/// zero and unknown keys are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delta {
    /// Change to cash.
    pub cash: f64,
    /// Change to monthly recurring revenue.
    pub mrr: f64,
    /// Change to reputation.
    pub reputation: f64,
    /// Change to support load.
    pub support_load: f64,
    /// Change to infrastructure load.
    pub infra_load: f64,
    /// Change to the churn rate.
    pub churn: f64,
    /// Change to morale.
    pub morale: f64,
    /// Change to technical debt.
    pub tech_debt: f64,
}

impl Delta {
    /// Delta with every component at zero.
    pub const ZERO: Delta = Delta {
        cash: 0.0,
        mrr: 0.0,
        reputation: 0.0,
        support_load: 0.0,
        infra_load: 0.0,
        churn: 0.0,
        morale: 0.0,
        tech_debt: 0.0,
    };

    /// Delta that changes only cash.
    #[must_use]
    pub const fn cash_only(amount: f64) -> Self {
        Self {
            cash: amount,
            ..Self::ZERO
        }
    }

    /// Returns the component for `key`.
    #[must_use]
    pub const fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Cash => self.cash,
            StatKey::Mrr => self.mrr,
            StatKey::Reputation => self.reputation,
            StatKey::SupportLoad => self.support_load,
            StatKey::InfraLoad => self.infra_load,
            StatKey::Churn => self.churn,
            StatKey::Morale => self.morale,
            StatKey::TechDebt => self.tech_debt,
        }
    }

    /// Returns a mutable reference to the component for `key`.
    pub fn component_mut(&mut self, key: StatKey) -> &mut f64 {
        match key {
            StatKey::Cash => &mut self.cash,
            StatKey::Mrr => &mut self.mrr,
            StatKey::Reputation => &mut self.reputation,
            StatKey::SupportLoad => &mut self.support_load,
            StatKey::InfraLoad => &mut self.infra_load,
            StatKey::Churn => &mut self.churn,
            StatKey::Morale => &mut self.morale,
            StatKey::TechDebt => &mut self.tech_debt,
        }
    }

    /// Returns a copy with `amount` added to the component for `key`.
    #[must_use]
    pub fn nudged(mut self, key: StatKey, amount: f64) -> Self {
        *self.component_mut(key) += amount;
        self
    }

    /// Iterates the non-zero components in canonical order.
    pub fn nonzero(&self) -> impl Iterator<Item = (StatKey, f64)> + '_ {
        StatKey::ALL
            .into_iter()
            .map(|key| (key, self.get(key)))
            .filter(|(_, value)| *value != 0.0)
    }
}

/// Plain record mirroring [`Stats`] field for field.
///
/// Used to build stats from raw numbers and as the serialized shape. Turning a
/// record into [`Stats`] clamps every field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Cash in the bank.
    pub cash: f64,
    /// Monthly recurring revenue.
    pub mrr: f64,
    /// Reputation, 0..100.
    pub reputation: f64,
    /// Support load, 0..100.
    pub support_load: f64,
    /// Infrastructure load, 0..100.
    pub infra_load: f64,
    /// Monthly churn rate, 0..0.50.
    pub churn: f64,
    /// Team morale, 0..100.
    pub morale: f64,
    /// Technical debt, 0..100.
    pub tech_debt: f64,
}

/// Bounded snapshot of the simulated company.
///
/// Fields are private: the only ways to obtain a value are [`Stats::apply_delta`]
/// and the clamping conversions, so every reachable `Stats` satisfies the
/// bounds reported by [`StatKey::bounds`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "StatsRecord", into = "StatsRecord")]
pub struct Stats {
    cash: f64,
    mrr: f64,
    reputation: f64,
    support_load: f64,
    infra_load: f64,
    churn: f64,
    morale: f64,
    tech_debt: f64,
}

impl Stats {
    /// Starting metrics shared by every run before founder overrides.
    #[must_use]
    pub fn baseline() -> Self {
        Self::from(StatsRecord {
            cash: 550_000.0,
            mrr: 900.0,
            reputation: 50.0,
            support_load: 22.0,
            infra_load: 22.0,
            churn: 0.055,
            morale: 58.0,
            tech_debt: 22.0,
        })
    }

    /// Returns the value of the stat identified by `key`.
    #[must_use]
    pub const fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Cash => self.cash,
            StatKey::Mrr => self.mrr,
            StatKey::Reputation => self.reputation,
            StatKey::SupportLoad => self.support_load,
            StatKey::InfraLoad => self.infra_load,
            StatKey::Churn => self.churn,
            StatKey::Morale => self.morale,
            StatKey::TechDebt => self.tech_debt,
        }
    }

    /// Cash in the bank.
    #[must_use]
    pub const fn cash(&self) -> f64 {
        self.cash
    }

    /// Monthly recurring revenue.
    #[must_use]
    pub const fn mrr(&self) -> f64 {
        self.mrr
    }

    /// Reputation, 0..100.
    #[must_use]
    pub const fn reputation(&self) -> f64 {
        self.reputation
    }

    /// Support load, 0..100.
    #[must_use]
    pub const fn support_load(&self) -> f64 {
        self.support_load
    }

    /// Infrastructure load, 0..100.
    #[must_use]
    pub const fn infra_load(&self) -> f64 {
        self.infra_load
    }

    /// Monthly churn rate, 0..0.50.
    #[must_use]
    pub const fn churn(&self) -> f64 {
        self.churn
    }

    /// Team morale, 0..100.
    #[must_use]
    pub const fn morale(&self) -> f64 {
        self.morale
    }

    /// Technical debt, 0..100.
    #[must_use]
    pub const fn tech_debt(&self) -> f64 {
        self.tech_debt
    }

    /// Adds `delta` component-wise and clamps the result.
    ///
    /// Never fails; the returned value always satisfies the stat bounds.
    #[must_use]
    pub fn apply_delta(&self, delta: &Delta) -> Stats {
        let mut next = *self;
        for key in StatKey::ALL {
            *next.slot_mut(key) = clamp_stat(key, self.get(key) + delta.get(key));
        }
        next
    }

    /// Replaces the listed stats with absolute values, clamping as usual.
    #[must_use]
    pub fn with_overrides(&self, overrides: &[(StatKey, f64)]) -> Stats {
        let mut next = *self;
        for &(key, value) in overrides {
            *next.slot_mut(key) = clamp_stat(key, value);
        }
        next
    }

    /// Copies the stats into a plain record.
    #[must_use]
    pub const fn to_record(&self) -> StatsRecord {
        StatsRecord {
            cash: self.cash,
            mrr: self.mrr,
            reputation: self.reputation,
            support_load: self.support_load,
            infra_load: self.infra_load,
            churn: self.churn,
            morale: self.morale,
            tech_debt: self.tech_debt,
        }
    }

    fn slot_mut(&mut self, key: StatKey) -> &mut f64 {
        match key {
            StatKey::Cash => &mut self.cash,
            StatKey::Mrr => &mut self.mrr,
            StatKey::Reputation => &mut self.reputation,
            StatKey::SupportLoad => &mut self.support_load,
            StatKey::InfraLoad => &mut self.infra_load,
            StatKey::Churn => &mut self.churn,
            StatKey::Morale => &mut self.morale,
            StatKey::TechDebt => &mut self.tech_debt,
        }
    }
}

impl From<StatsRecord> for Stats {
    fn from(record: StatsRecord) -> Self {
        Self {
            cash: clamp_stat(StatKey::Cash, record.cash),
            mrr: clamp_stat(StatKey::Mrr, record.mrr),
            reputation: clamp_stat(StatKey::Reputation, record.reputation),
            support_load: clamp_stat(StatKey::SupportLoad, record.support_load),
            infra_load: clamp_stat(StatKey::InfraLoad, record.infra_load),
            churn: clamp_stat(StatKey::Churn, record.churn),
            morale: clamp_stat(StatKey::Morale, record.morale),
            tech_debt: clamp_stat(StatKey::TechDebt, record.tech_debt),
        }
    }
}

impl From<Stats> for StatsRecord {
    fn from(stats: Stats) -> Self {
        stats.to_record()
    }
}

/// The one clamp in the crate. NaN collapses to the lower bound.
fn clamp_stat(key: StatKey, value: f64) -> f64 {
    let (low, high) = key.bounds();
    if value.is_nan() {
        return low;
    }
    value.clamp(low, high)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_within_bounds(stats: &Stats) {
        for key in StatKey::ALL {
            let (low, high) = key.bounds();
            let value = stats.get(key);
            assert!(
                (low..=high).contains(&value),
                "{key} = {value} escaped [{low}, {high}]"
            );
        }
    }

    #[test]
    fn baseline_matches_documented_start() {
        let stats = Stats::baseline();
        assert_eq!(stats.cash(), 550_000.0);
        assert_eq!(stats.mrr(), 900.0);
        assert_eq!(stats.reputation(), 50.0);
        assert_eq!(stats.support_load(), 22.0);
        assert_eq!(stats.infra_load(), 22.0);
        assert_eq!(stats.churn(), 0.055);
        assert_eq!(stats.morale(), 58.0);
        assert_eq!(stats.tech_debt(), 22.0);
    }

    #[test]
    fn apply_adds_components() {
        let delta = Delta {
            cash: -50_000.0,
            mrr: 300.0,
            morale: 4.0,
            ..Delta::ZERO
        };
        let next = Stats::baseline().apply_delta(&delta);
        assert_eq!(next.cash(), 500_000.0);
        assert_eq!(next.mrr(), 1_200.0);
        assert_eq!(next.morale(), 62.0);
        assert_eq!(next.reputation(), 50.0);
    }

    #[test]
    fn cash_and_mrr_floor_at_zero_without_ceiling() {
        let drained = Stats::baseline().apply_delta(&Delta {
            cash: -10_000_000.0,
            mrr: -5_000.0,
            ..Delta::ZERO
        });
        assert_eq!(drained.cash(), 0.0);
        assert_eq!(drained.mrr(), 0.0);

        let flush = Stats::baseline().apply_delta(&Delta::cash_only(1.0e12));
        assert_eq!(flush.cash(), 550_000.0 + 1.0e12);
    }

    #[test]
    fn bounded_stats_clamp_both_ways() {
        let high = Stats::baseline().apply_delta(&Delta {
            reputation: 500.0,
            support_load: 500.0,
            infra_load: 500.0,
            churn: 3.0,
            morale: 500.0,
            tech_debt: 500.0,
            ..Delta::ZERO
        });
        assert_eq!(high.reputation(), PERCENT_CEILING);
        assert_eq!(high.churn(), CHURN_CEILING);
        assert_eq!(high.tech_debt(), PERCENT_CEILING);

        let low = Stats::baseline().apply_delta(&Delta {
            reputation: -500.0,
            churn: -3.0,
            morale: -500.0,
            ..Delta::ZERO
        });
        assert_eq!(low.reputation(), 0.0);
        assert_eq!(low.churn(), 0.0);
        assert_eq!(low.morale(), 0.0);
    }

    #[test]
    fn overrides_replace_and_clamp() {
        let stats = Stats::baseline()
            .with_overrides(&[(StatKey::Mrr, 1_500.0), (StatKey::Reputation, 140.0)]);
        assert_eq!(stats.mrr(), 1_500.0);
        assert_eq!(stats.reputation(), PERCENT_CEILING);
        assert_eq!(stats.infra_load(), 22.0);
    }

    #[test]
    fn records_clamp_on_conversion() {
        let stats = Stats::from(StatsRecord {
            cash: -1.0,
            mrr: 10.0,
            reputation: 101.0,
            support_load: f64::NAN,
            infra_load: 3.0,
            churn: 0.9,
            morale: 5.0,
            tech_debt: -2.0,
        });
        assert_within_bounds(&stats);
        assert_eq!(stats.support_load(), 0.0);
    }

    #[test]
    fn delta_ignores_unknown_keys_and_defaults_missing() {
        let delta: Delta =
            serde_json::from_str(r#"{"cash": -12.5, "hype": 9000, "churn": 0.01}"#)
                .expect("delta parses");
        assert_eq!(delta.cash, -12.5);
        assert_eq!(delta.churn, 0.01);
        assert_eq!(delta.mrr, 0.0);
        assert_eq!(delta.nonzero().count(), 2);
    }

    #[test]
    fn stats_serialize_as_flat_record() {
        let json = serde_json::to_value(Stats::baseline()).expect("serialize");
        assert_eq!(json["support_load"], 22.0);
        let back: Stats = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, Stats::baseline());
    }

    #[test]
    fn stats_round_trip_through_bincode() {
        let stats = Stats::baseline().apply_delta(&Delta::cash_only(-1_234.5));
        let bytes = bincode::serialize(&stats).expect("serialize");
        let restored: Stats = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, stats);
    }
}
