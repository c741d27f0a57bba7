use startup_survivor_core::{MonthDraft, OptionDraft, OptionId, Risk, Tag};

use crate::{DraftProvider, NarrativeError};

const CRISES: [(&str, &str); 5] = [
    (
        "A big customer wants proof",
        "A large prospect asks for process, security answers and delivery dates all at once.",
    ),
    (
        "Cracks in operations",
        "A small bug is triggering a chain of complaints and the support queue keeps growing.",
    ),
    (
        "A competitor cuts prices",
        "A rival slashed prices and is winning over customers quickly.",
    ),
    (
        "Decision fatigue",
        "Everyone on the team pulls in a different direction and velocity is dropping.",
    ),
    (
        "Outside pressure",
        "An audit and a supplier dispute landed on the same week.",
    ),
];

/// Offline provider that offers the same two moves every month.
///
/// Option A pushes growth at medium risk and option B stabilises at low risk;
/// only the crisis text rotates with the month.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptedDraftProvider;

impl ScriptedDraftProvider {
    /// Creates the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DraftProvider for ScriptedDraftProvider {
    fn draft(&mut self, month_id: u32) -> Result<MonthDraft, NarrativeError> {
        let (crisis_title, crisis) = CRISES[(month_id as usize) % CRISES.len()];
        Ok(MonthDraft {
            month_id,
            month_title: format!("Month {month_id}: Growth or Stability"),
            situation: "Demand is there but the system is at its limit. The right move speeds you \
                        up; the wrong one piles up load and dents perceived quality."
                .to_owned(),
            crisis_title: crisis_title.to_owned(),
            crisis: crisis.to_owned(),
            options: vec![
                OptionDraft {
                    id: OptionId::A,
                    title: "Double down on one channel".to_owned(),
                    tag: Tag::Growth,
                    risk: Risk::Med,
                    steps: steps(&[
                        "Pick the fastest channel and test one aggressive message",
                        "Simplify the landing page and onboarding",
                        "Set a single win-or-lose metric",
                        "Plan a fast iteration calendar",
                    ]),
                    delayed_seed: "short-term momentum".to_owned(),
                    result: "Visibility rises and the pipeline moves, but load builds up.".to_owned(),
                },
                OptionDraft {
                    id: OptionId::B,
                    title: "Harden the system".to_owned(),
                    tag: Tag::Reliability,
                    risk: Risk::Low,
                    steps: steps(&[
                        "List the two biggest bottlenecks and fix them",
                        "Clarify the on-call and support process",
                        "Set alerts on critical metrics",
                        "Tighten release discipline",
                    ]),
                    delayed_seed: "clean infrastructure".to_owned(),
                    result: "Visible growth slows, complaints drop and churn settles.".to_owned(),
                },
            ],
            note: String::new(),
            cliffhanger: "A rival hints at another round of price cuts.".to_owned(),
            lesson: "Growth or resilience decides how many fires you fight next.".to_owned(),
            alternatives: steps(&[
                "Throttle the growth channel but fix the one critical onboarding step.",
                "Ship a single self-serve fix to cut support load.",
            ]),
        })
    }
}

fn steps(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_owned()).collect()
}
