use std::fmt;

/// Difficulty modes selectable when a run starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Grounded trade-offs, no miracles.
    Realistic,
    /// Realistic but harsher; options may mislead.
    Hard,
    /// Hostile narrator and a punishing world.
    Spartan,
    /// Local macro pressure: inflation, FX, audits, disasters.
    Turkey,
    /// Absurd crises told with a straight face.
    Extreme,
}

impl Mode {
    /// Every mode in menu order.
    pub const ALL: [Mode; 5] = [
        Mode::Realistic,
        Mode::Hard,
        Mode::Spartan,
        Mode::Turkey,
        Mode::Extreme,
    ];

    /// Resolves a configuration key, falling back to [`Mode::Realistic`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|mode| mode.key() == key)
            .unwrap_or(Mode::Realistic)
    }

    /// Key stored in run configurations.
    #[must_use]
    pub const fn key(self) -> &'static str {
        self.spec().key
    }

    /// Static tuning for the mode.
    #[must_use]
    pub const fn spec(self) -> &'static ModeSpec {
        match self {
            Self::Realistic => &REALISTIC,
            Self::Hard => &HARD,
            Self::Spartan => &SPARTAN,
            Self::Turkey => &TURKEY,
            Self::Extreme => &EXTREME,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Read-only tuning attached to a [`Mode`].
///
/// Only `swing`, `antagonistic` and `turkey` influence the economy; the rest
/// steer the narrative layer.
#[derive(Debug, PartialEq)]
pub struct ModeSpec {
    key: &'static str,
    description: &'static str,
    temperature: f64,
    swing: f64,
    require_reason: bool,
    deceptive: bool,
    antagonistic: bool,
    turkey: bool,
    absurd: bool,
    tone: &'static str,
}

impl ModeSpec {
    /// Configuration key of the mode.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// One-line description shown when picking a mode.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Creative temperature requested from the narrative model.
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Volatility multiplier applied to every sampled delta.
    #[must_use]
    pub const fn swing(&self) -> f64 {
        self.swing
    }

    /// Whether the player must justify custom plans.
    #[must_use]
    pub const fn require_reason(&self) -> bool {
        self.require_reason
    }

    /// Whether option texts may be misleading.
    #[must_use]
    pub const fn deceptive(&self) -> bool {
        self.deceptive
    }

    /// Whether the world applies extra hostile pressure to every option.
    #[must_use]
    pub const fn antagonistic(&self) -> bool {
        self.antagonistic
    }

    /// Whether macro friction is charged on top of fixed expenses.
    #[must_use]
    pub const fn turkey(&self) -> bool {
        self.turkey
    }

    /// Whether crises are deliberately absurd.
    #[must_use]
    pub const fn absurd(&self) -> bool {
        self.absurd
    }

    /// Narrative tone guidance.
    #[must_use]
    pub const fn tone(&self) -> &'static str {
        self.tone
    }
}

const REALISTIC: ModeSpec = ModeSpec {
    key: "Gerçekçi",
    description: "Full real-world feel. Clear trade-offs, no miracles.",
    temperature: 0.75,
    swing: 1.00,
    require_reason: false,
    deceptive: false,
    antagonistic: false,
    turkey: false,
    absurd: false,
    tone: "fully realistic, operational and precise; measured drama",
};

const HARD: ModeSpec = ModeSpec {
    key: "Zor",
    description: "Realistic but harder. Options can mislead; short reasoning required.",
    temperature: 0.82,
    swing: 1.25,
    require_reason: true,
    deceptive: true,
    antagonistic: false,
    turkey: false,
    absurd: false,
    tone: "tough but fair; high uncertainty; pressure to decide fast",
};

const SPARTAN: ModeSpec = ModeSpec {
    key: "Spartan",
    description: "Hardest. The narrator is antagonistic; the world is brutal but logical.",
    temperature: 0.88,
    swing: 1.45,
    require_reason: true,
    deceptive: true,
    antagonistic: true,
    turkey: false,
    absurd: false,
    tone: "brutally realistic; pointed but respectful; very high pressure",
};

const TURKEY: ModeSpec = ModeSpec {
    key: "Türkiye",
    description: "Local conditions: FX and inflation, payroll taxes, audits, collection delays, disaster risk.",
    temperature: 0.78,
    swing: 1.10,
    require_reason: false,
    deceptive: false,
    antagonistic: false,
    turkey: true,
    absurd: false,
    tone: "local business realities; detailed cost and compliance; concrete",
};

const EXTREME: ModeSpec = ModeSpec {
    key: "Extreme",
    description: "Absurd and funny. Illogical but entertaining crises.",
    temperature: 1.05,
    swing: 1.40,
    require_reason: false,
    deceptive: false,
    antagonistic: false,
    turkey: false,
    absurd: true,
    tone: "absurd events, deadpan delivery; ironic; fast pace",
};
