#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Delayed-effect queue operations.
//!
//! Entries leave the queue only through [`due_delayed_effects`] and enter it
//! only through [`schedule_delayed_effect`], which rolls exactly once per
//! applied choice.

use startup_survivor_core::{Delta, DelayedEffect, Mode, OptionId, Risk, Tag};
use startup_survivor_system_sampling::sample_delta;
use startup_survivor_system_seeding::{rng_from, SeededRng};

/// Hint used when the option carries no seed phrase.
pub const DEFAULT_HINT: &str = "Delayed effect";

/// Longest hint kept on a scheduled effect, in characters.
pub const MAX_HINT_CHARS: usize = 80;

/// Scale applied to the mode swing when sampling a delayed delta.
pub const DELAYED_SWING_FACTOR: f64 = 0.55;

const ANTAGONISTIC_BONUS: f64 = 0.10;
const PROBABILITY_CAP: f64 = 0.95;
const NEXT_MONTH_CHANCE: f64 = 0.6;

/// Splits `queue` into the effects due in `month` and the rest, keeping order.
#[must_use]
pub fn due_delayed_effects(
    queue: &[DelayedEffect],
    month: u32,
) -> (Vec<DelayedEffect>, Vec<DelayedEffect>) {
    queue
        .iter()
        .cloned()
        .partition(|effect| effect.due_month() == month)
}

/// Identifies the choice whose consequences are being rolled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleRequest<'a> {
    /// Player-chosen run seed.
    pub base_seed: i64,
    /// Seed of the scenario.
    pub scenario_seed: i64,
    /// Month the choice is made in.
    pub month: u32,
    /// Option the roll belongs to.
    pub choice: OptionId,
    /// Tag of the option.
    pub tag: Tag,
    /// Declared risk of the option.
    pub risk: Risk,
    /// Phrase that becomes the hint.
    pub seed_phrase: &'a str,
    /// Difficulty mode of the run.
    pub mode: Mode,
}

/// Base chance that a choice of `risk` schedules a consequence.
#[must_use]
pub const fn base_probability(risk: Risk) -> f64 {
    match risk {
        Risk::Low => 0.35,
        Risk::Med => 0.60,
        Risk::High => 0.82,
    }
}

/// Chance of a consequence after the mode's hostility bonus.
#[must_use]
pub fn roll_probability(risk: Risk, mode: Mode) -> f64 {
    let base = base_probability(risk);
    if mode.spec().antagonistic() {
        (base + ANTAGONISTIC_BONUS).min(PROBABILITY_CAP)
    } else {
        base
    }
}

/// Rolls once for a delayed consequence of the requested choice.
///
/// Returns `None` when the roll misses. Draw order on the `delay-roll`
/// stream: the roll, the due-month draw, the tag remap draw for efficiency
/// and growth only, then the eight template draws.
#[must_use]
pub fn roll_delayed_effect(request: &ScheduleRequest<'_>) -> Option<DelayedEffect> {
    let mut rng = rng_from(
        request.base_seed,
        &[
            "delay-roll".into(),
            request.scenario_seed.into(),
            request.month.into(),
            request.choice.as_str().into(),
        ],
    );

    let probability = roll_probability(request.risk, request.mode);
    let roll = rng.chance();
    if roll > probability {
        tracing::debug!(
            month = request.month,
            choice = %request.choice,
            roll,
            probability,
            "no delayed effect"
        );
        return None;
    }

    let offset = if rng.chance() < NEXT_MONTH_CHANCE { 1 } else { 2 };
    let manifested = manifested_tag(request.tag, &mut rng);
    let swing = DELAYED_SWING_FACTOR * request.mode.spec().swing();
    let delta = sharpen(sample_delta(manifested, &mut rng, swing));

    tracing::debug!(
        month = request.month,
        choice = %request.choice,
        due_month = request.month + offset,
        tag = %manifested,
        "delayed effect scheduled"
    );

    Some(DelayedEffect::new(
        request.month + offset,
        delta,
        hint_from(request.seed_phrase),
        request.month,
    ))
}

/// Appends the rolled consequence, if any, to `queue`.
#[must_use]
pub fn schedule_delayed_effect(
    mut queue: Vec<DelayedEffect>,
    request: &ScheduleRequest<'_>,
) -> Vec<DelayedEffect> {
    if let Some(effect) = roll_delayed_effect(request) {
        queue.push(effect);
    }
    queue
}

fn manifested_tag(tag: Tag, rng: &mut SeededRng) -> Tag {
    match tag {
        Tag::Efficiency => {
            if rng.chance() < 0.5 {
                Tag::People
            } else {
                Tag::Reliability
            }
        }
        Tag::Growth => {
            if rng.chance() < 0.4 {
                Tag::Reliability
            } else {
                Tag::Growth
            }
        }
        other => other,
    }
}

/// Delayed consequences bite harder than they were sampled.
fn sharpen(delta: Delta) -> Delta {
    let mut sharpened = delta;
    sharpened.cash -= delta.cash.abs() * 0.25;
    sharpened.reputation -= delta.reputation.max(0.0) * 0.15;
    sharpened.churn += delta.churn.abs() * 0.35;
    sharpened
}

fn hint_from(seed_phrase: &str) -> String {
    let phrase = seed_phrase.trim();
    if phrase.is_empty() {
        DEFAULT_HINT.to_owned()
    } else {
        phrase.chars().take(MAX_HINT_CHARS).collect()
    }
}
