use startup_survivor_core::{Delta, StatKey, Tag};

/// Fixed nudge applied to deltas of certain tags within one scenario case.
#[derive(Debug, PartialEq)]
pub struct CaseNudge {
    case_key: &'static str,
    tags: &'static [Tag],
    adjustments: &'static [(StatKey, f64)],
}

impl CaseNudge {
    /// Scenario case the nudge belongs to.
    #[must_use]
    pub const fn case_key(&self) -> &'static str {
        self.case_key
    }

    /// Tags the nudge applies to.
    #[must_use]
    pub const fn tags(&self) -> &'static [Tag] {
        self.tags
    }

    /// Amounts added per stat.
    #[must_use]
    pub const fn adjustments(&self) -> &'static [(StatKey, f64)] {
        self.adjustments
    }

    fn matches(&self, case_key: &str, tag: Tag) -> bool {
        self.case_key == case_key && self.tags.contains(&tag)
    }
}

static CASE_NUDGES: [CaseNudge; 6] = [
    CaseNudge {
        case_key: "facebook_privacy_2019",
        tags: &[Tag::Compliance, Tag::Security],
        adjustments: &[(StatKey::Reputation, 3.0), (StatKey::Churn, -0.004)],
    },
    CaseNudge {
        case_key: "facebook_privacy_2019",
        tags: &[Tag::Growth, Tag::Marketing],
        adjustments: &[(StatKey::Reputation, -2.0), (StatKey::Churn, 0.004)],
    },
    CaseNudge {
        case_key: "blackberry_platform_shift",
        tags: &[Tag::Product, Tag::Growth, Tag::Marketing],
        adjustments: &[(StatKey::Mrr, 250.0)],
    },
    CaseNudge {
        case_key: "blackberry_platform_shift",
        tags: &[Tag::Reliability],
        adjustments: &[(StatKey::Mrr, -150.0)],
    },
    CaseNudge {
        case_key: "wework_ipo_2019",
        tags: &[Tag::Fundraising],
        adjustments: &[(StatKey::Cash, 60_000.0), (StatKey::Reputation, -1.5)],
    },
    CaseNudge {
        case_key: "wework_ipo_2019",
        tags: &[Tag::Efficiency],
        adjustments: &[(StatKey::Reputation, 1.5)],
    },
];

/// Every registered nudge, in application order.
#[must_use]
pub fn case_nudges() -> &'static [CaseNudge] {
    &CASE_NUDGES
}

/// Adds the scenario's fixed nudges for `tag` to `delta`. Unknown cases are neutral.
///
/// `month` is part of the lookup key but no current nudge varies by month.
#[must_use]
pub fn apply_case_bias(delta: Delta, case_key: &str, tag: Tag, month: u32) -> Delta {
    CASE_NUDGES
        .iter()
        .filter(|nudge| nudge.matches(case_key, tag))
        .flat_map(|nudge| nudge.adjustments.iter())
        .fold(delta, |biased, &(key, amount)| {
            tracing::trace!(case_key, %tag, month, %key, amount, "case bias");
            biased.nudged(key, amount)
        })
}
