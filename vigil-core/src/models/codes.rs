use std::fmt;

use serde::{Deserialize, Serialize};

/// Causal role of a drug on an adverse-event report.
///
/// Store rows carry the numeric code (1..=4, lower = stronger causal role).
/// Unrecognized codes translate to `None` at the store boundary and the
/// affected row is skipped by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Characterization {
    PrimarySuspect,
    SecondarySuspect,
    Concomitant,
    Interacting,
}

impl Characterization {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::PrimarySuspect),
            2 => Some(Self::SecondarySuspect),
            3 => Some(Self::Concomitant),
            4 => Some(Self::Interacting),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::PrimarySuspect => 1,
            Self::SecondarySuspect => 2,
            Self::Concomitant => 3,
            Self::Interacting => 4,
        }
    }

    /// Causal weight: `3 − code`, floored at zero.
    ///
    /// Stronger roles carry more weight (primary suspect 2.0, secondary
    /// suspect 1.0, concomitant and interacting 0.0). The floor keeps every
    /// ratio built from these weights inside [0, 1].
    pub fn weight(self) -> f64 {
        f64::from(3u8.saturating_sub(self.code()))
    }

    /// The strongest causal role.
    pub fn is_primary_suspect(self) -> bool {
        self == Self::PrimarySuspect
    }
}

/// Clinical outcome of a single reaction, coded 1..=6.
///
/// `Unknown` (code 6) is excluded from severity scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionOutcome {
    Recovered,
    Recovering,
    Unresolved,
    RecoveredWithSequelae,
    Fatal,
    Unknown,
}

impl ReactionOutcome {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Recovered),
            2 => Some(Self::Recovering),
            3 => Some(Self::Unresolved),
            4 => Some(Self::RecoveredWithSequelae),
            5 => Some(Self::Fatal),
            6 => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Recovered => 1,
            Self::Recovering => 2,
            Self::Unresolved => 3,
            Self::RecoveredWithSequelae => 4,
            Self::Fatal => 5,
            Self::Unknown => 6,
        }
    }

    /// Whether this outcome contributes to severity scoring.
    pub fn is_scored(self) -> bool {
        self != Self::Unknown
    }

    /// Ordinal severity contribution: `code − 1`.
    ///
    /// Worse clinical outcome ⇒ larger contribution (recovered 0, fatal 4).
    pub fn severity_points(self) -> u32 {
        u32::from(self.code()) - 1
    }
}

impl fmt::Display for ReactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Recovered => "recovered",
            Self::Recovering => "recovering",
            Self::Unresolved => "unresolved",
            Self::RecoveredWithSequelae => "recovered with sequelae",
            Self::Fatal => "fatal",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}
