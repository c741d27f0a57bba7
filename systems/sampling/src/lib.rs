#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Delta templates and the seeded delta sampler.
//!
//! A sampled delta is built in three stages that share one generator: the
//! tag's template draws (one per stat, in canonical order), the mode's
//! hostile adjustments, and finally the scenario's fixed bias nudges.

use startup_survivor_core::{Delta, Mode, StatKey, Tag};
use startup_survivor_system_seeding::SeededRng;

mod bias;

pub use bias::{apply_case_bias, case_nudges, CaseNudge};

/// Lower bound of the churn component of a sampled delta.
pub const SAMPLED_CHURN_FLOOR: f64 = -0.05;

/// Upper bound of the churn component of a sampled delta.
pub const SAMPLED_CHURN_CEILING: f64 = 0.08;

const HARD_PENALTY_CHANCE: f64 = 0.35;

/// `(base, variance)` pairs for every stat, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaTemplate {
    pairs: [(f64, f64); 8],
}

impl DeltaTemplate {
    /// Centre of the draw range for `key`.
    #[must_use]
    pub const fn base(&self, key: StatKey) -> f64 {
        self.pairs[key as usize].0
    }

    /// Half-width of the draw range for `key`.
    #[must_use]
    pub const fn variance(&self, key: StatKey) -> f64 {
        self.pairs[key as usize].1
    }

    /// Template registered for `tag`.
    #[must_use]
    pub const fn for_tag(tag: Tag) -> &'static DeltaTemplate {
        match tag {
            Tag::Growth => &GROWTH,
            Tag::Efficiency => &EFFICIENCY,
            Tag::Reliability => &RELIABILITY,
            Tag::Compliance => &COMPLIANCE,
            Tag::Fundraising => &FUNDRAISING,
            Tag::People => &PEOPLE,
            Tag::Product => &PRODUCT,
            Tag::Sales => &SALES,
            Tag::Marketing => &MARKETING,
            Tag::Security => &SECURITY,
        }
    }
}

const GROWTH: DeltaTemplate = DeltaTemplate {
    pairs: [
        (-60_000.0, 55_000.0),
        (1_200.0, 900.0),
        (3.0, 4.0),
        (9.0, 6.0),
        (9.0, 6.0),
        (0.010, 0.010),
        (2.0, 4.0),
        (6.0, 5.0),
    ],
};

const EFFICIENCY: DeltaTemplate = DeltaTemplate {
    pairs: [
        (40_000.0, 50_000.0),
        (-200.0, 350.0),
        (-2.0, 4.0),
        (-6.0, 6.0),
        (-6.0, 6.0),
        (0.004, 0.008),
        (-1.0, 3.0),
        (-3.0, 4.0),
    ],
};

const RELIABILITY: DeltaTemplate = DeltaTemplate {
    pairs: [
        (-55_000.0, 45_000.0),
        (-150.0, 250.0),
        (4.0, 4.0),
        (-10.0, 7.0),
        (-10.0, 7.0),
        (-0.008, 0.010),
        (1.0, 3.0),
        (-6.0, 5.0),
    ],
};

const COMPLIANCE: DeltaTemplate = DeltaTemplate {
    pairs: [
        (-70_000.0, 55_000.0),
        (-250.0, 250.0),
        (6.0, 4.0),
        (2.0, 4.0),
        (2.0, 4.0),
        (-0.004, 0.008),
        (-1.0, 2.0),
        (1.0, 3.0),
    ],
};

const FUNDRAISING: DeltaTemplate = DeltaTemplate {
    pairs: [
        (180_000.0, 160_000.0),
        (0.0, 200.0),
        (1.0, 5.0),
        (3.0, 4.0),
        (3.0, 4.0),
        (0.000, 0.006),
        (2.0, 4.0),
        (2.0, 4.0),
    ],
};

const PEOPLE: DeltaTemplate = DeltaTemplate {
    pairs: [
        (-45_000.0, 45_000.0),
        (150.0, 250.0),
        (3.0, 4.0),
        (-8.0, 7.0),
        (-5.0, 6.0),
        (-0.003, 0.008),
        (7.0, 6.0),
        (-1.0, 3.0),
    ],
};

const PRODUCT: DeltaTemplate = DeltaTemplate {
    pairs: [
        (-50_000.0, 45_000.0),
        (700.0, 650.0),
        (3.0, 4.0),
        (-3.0, 6.0),
        (2.0, 5.0),
        (-0.006, 0.010),
        (2.0, 4.0),
        (2.0, 4.0),
    ],
};

const SALES: DeltaTemplate = DeltaTemplate {
    pairs: [
        (-25_000.0, 35_000.0),
        (900.0, 850.0),
        (1.0, 4.0),
        (4.0, 5.0),
        (3.0, 4.0),
        (0.006, 0.010),
        (1.0, 3.0),
        (4.0, 4.0),
    ],
};

const MARKETING: DeltaTemplate = DeltaTemplate {
    pairs: [
        (-45_000.0, 45_000.0),
        (650.0, 650.0),
        (4.0, 4.0),
        (2.0, 4.0),
        (2.0, 4.0),
        (-0.002, 0.009),
        (1.0, 3.0),
        (2.0, 4.0),
    ],
};

const SECURITY: DeltaTemplate = DeltaTemplate {
    pairs: [
        (-60_000.0, 50_000.0),
        (-120.0, 250.0),
        (5.0, 4.0),
        (-6.0, 6.0),
        (-5.0, 6.0),
        (-0.006, 0.010),
        (-1.0, 3.0),
        (2.0, 4.0),
    ],
};

/// Draws a raw delta for `tag`, scaled by `swing`.
///
/// Each stat is drawn uniformly from `[base - variance, base + variance]` in
/// canonical order, then multiplied by `swing`. The churn component of the
/// result is clamped to [`SAMPLED_CHURN_FLOOR`]..=[`SAMPLED_CHURN_CEILING`].
pub fn sample_delta(tag: Tag, rng: &mut SeededRng, swing: f64) -> Delta {
    let template = DeltaTemplate::for_tag(tag);
    let mut delta = Delta::ZERO;
    for key in StatKey::ALL {
        let base = template.base(key);
        let variance = template.variance(key);
        *delta.component_mut(key) = rng.uniform(base - variance, base + variance) * swing;
    }
    delta.churn = delta.churn.clamp(SAMPLED_CHURN_FLOOR, SAMPLED_CHURN_CEILING);
    delta
}

/// Applies the mode's hostile pressure using the same generator as the template draws.
///
/// Antagonistic modes always drain cash, raise churn and dent reputation. The
/// hard mode additionally has a chance of an extra cash hit.
pub fn mode_adjustments(delta: Delta, rng: &mut SeededRng, mode: Mode) -> Delta {
    let spec = mode.spec();
    let swing = spec.swing();
    let mut adjusted = delta;

    if spec.antagonistic() {
        adjusted.cash -= rng.uniform(10_000.0, 40_000.0) * swing;
        adjusted.churn += rng.uniform(0.002, 0.010) * swing;
        adjusted.reputation -= rng.uniform(0.0, 4.0) * swing;
    }

    if mode == Mode::Hard && rng.chance() < HARD_PENALTY_CHANCE {
        let penalty = rng.uniform(5_000.0, 25_000.0) * swing;
        adjusted.cash -= penalty;
        tracing::trace!(penalty, "hard mode cash penalty");
    }

    adjusted
}

/// Runs the full sampler: template draws, mode adjustments, then case bias.
pub fn sample_option_delta(
    tag: Tag,
    rng: &mut SeededRng,
    mode: Mode,
    case_key: &str,
    month: u32,
) -> Delta {
    let raw = sample_delta(tag, rng, mode.spec().swing());
    let adjusted = mode_adjustments(raw, rng, mode);
    apply_case_bias(adjusted, case_key, tag, month)
}
