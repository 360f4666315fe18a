//! Risk scoring: classifier label → 0–100 percentage, and the band model the
//! gauge is drawn from.

pub mod gauge;

pub use gauge::{GaugeSpec, RiskBand};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The classifier's categorical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLabel {
    /// Case-insensitive parse; surrounding whitespace is ignored.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "very high" => Some(Self::VeryHigh),
            _ => None,
        }
    }

    pub const fn score(&self) -> u8 {
        match self {
            Self::Low => 25,
            Self::Medium => 50,
            Self::High => 75,
            Self::VeryHigh => 100,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map any label to its percentage. Unrecognized labels score 0.
pub fn risk_score(label: &str) -> u8 {
    RiskLabel::parse(label).map_or(0, |l| l.score())
}

/// Summary line shown under the gauge, e.g. `Predicted Risk Level: High (75%)`.
pub fn summary_line(label: &str, score: u8) -> String {
    format!(
        "Predicted Risk Level: {} ({}%)",
        crate::core::features::capitalize(label.trim()),
        score
    )
}
