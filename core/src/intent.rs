use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of business action; selects the delta template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Push acquisition and top-line growth.
    Growth,
    /// Cut costs and streamline operations.
    Efficiency,
    /// Harden systems and reduce incidents.
    Reliability,
    /// Legal, privacy and regulatory work.
    Compliance,
    /// Raise money.
    Fundraising,
    /// Hiring, culture and team health.
    People,
    /// Build or reshape the product.
    Product,
    /// Close deals.
    Sales,
    /// Campaigns and brand.
    Marketing,
    /// Security posture and incident response.
    Security,
}

impl Tag {
    /// Every tag in declaration order.
    pub const ALL: [Tag; 10] = [
        Tag::Growth,
        Tag::Efficiency,
        Tag::Reliability,
        Tag::Compliance,
        Tag::Fundraising,
        Tag::People,
        Tag::Product,
        Tag::Sales,
        Tag::Marketing,
        Tag::Security,
    ];

    /// Lowercase name used in seeds, logs and serialized records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Growth => "growth",
            Self::Efficiency => "efficiency",
            Self::Reliability => "reliability",
            Self::Compliance => "compliance",
            Self::Fundraising => "fundraising",
            Self::People => "people",
            Self::Product => "product",
            Self::Sales => "sales",
            Self::Marketing => "marketing",
            Self::Security => "security",
        }
    }

    /// Parses an exact lowercase tag name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Tag> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk tier declared for an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    /// Conservative move.
    Low,
    /// Balanced move.
    Med,
    /// Bold move.
    High,
}

impl Risk {
    /// Every risk tier from lowest to highest.
    pub const ALL: [Risk; 3] = [Risk::Low, Risk::Med, Risk::High];

    /// Short name used in serialized records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Med => "med",
            Self::High => "high",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Med => "Medium",
            Self::High => "High",
        }
    }

    /// Parses an exact short risk name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Risk> {
        Self::ALL.into_iter().find(|risk| risk.as_str() == name)
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of an option within a month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionId {
    /// First drafted option.
    A,
    /// Second drafted option.
    B,
    /// Third drafted option.
    C,
    /// The player's own free-text plan.
    #[serde(rename = "YOU")]
    Player,
}

impl OptionId {
    /// Identifiers a narrative draft may use, in default order.
    pub const DRAFT_IDS: [OptionId; 3] = [OptionId::A, OptionId::B, OptionId::C];

    /// Name used in seeds, logs and serialized records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::Player => "YOU",
        }
    }

    /// Parses an identifier, case-insensitively for the drafted letters.
    #[must_use]
    pub fn parse(value: &str) -> Option<OptionId> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "YOU" => Some(Self::Player),
            _ => None,
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
