//! Trait sliders and the canned advice keyed off them.
//!
//! Sliders are display-only: moving one changes which tips show, never the
//! prediction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stillwater::predicate::{gt, Predicate};

use crate::core::{SurveyField, SurveyRecord};

/// One of the six psychological input scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trait {
    PeerPressure,
    Confidence,
    EarnedRecognition,
    Impulsiveness,
    ExclusionAnxiety,
    PeoplePleaser,
}

impl Trait {
    pub const ALL: [Trait; 6] = [
        Self::PeerPressure,
        Self::Confidence,
        Self::EarnedRecognition,
        Self::Impulsiveness,
        Self::ExclusionAnxiety,
        Self::PeoplePleaser,
    ];

    pub const fn field(&self) -> SurveyField {
        match self {
            Self::PeerPressure => SurveyField::PeerPressure,
            Self::Confidence => SurveyField::Confidence,
            Self::EarnedRecognition => SurveyField::EarnedRecognition,
            Self::Impulsiveness => SurveyField::Impulsiveness,
            Self::ExclusionAnxiety => SurveyField::ExclusionAnxiety,
            Self::PeoplePleaser => SurveyField::PeoplePleaser,
        }
    }

    /// Slider caption.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PeerPressure => "Peer Pressure Score (%)",
            Self::Confidence => "Confidence Level (%)",
            Self::EarnedRecognition => "Earned Recognition (%)",
            Self::Impulsiveness => "Impulsiveness (%)",
            Self::ExclusionAnxiety => "Exclusion Anxiety (%)",
            Self::PeoplePleaser => "People Pleaser (%)",
        }
    }

    /// Inclusive slider range.
    pub const fn range(&self) -> (u32, u32) {
        match self {
            Self::PeerPressure => (0, 100),
            Self::Confidence | Self::Impulsiveness => (0, 15),
            Self::EarnedRecognition => (0, 10),
            Self::ExclusionAnxiety | Self::PeoplePleaser => (0, 25),
        }
    }

    pub const fn tips(&self) -> &'static [&'static str] {
        match self {
            Self::PeerPressure => &[
                "Pause and remind yourself of your values before responding to pressure.",
                "Practice saying 'no' in different scenarios to build confidence.",
                "Choose activities that align with your goals to reduce exposure to pressure.",
            ],
            Self::Confidence => &[
                "List your past achievements to remind yourself of your strengths.",
                "Set small, realistic goals and celebrate when you achieve them.",
                "Practice positive self-talk to build confidence in tough situations.",
            ],
            Self::EarnedRecognition => &[
                "Remind yourself that recognition comes from consistent effort, not risky behavior.",
                "Seek validation from within, not just from others.",
                "Surround yourself with people who value you for who you are, not what you do.",
            ],
            Self::Impulsiveness => &[
                "Pause and count to 10 before making a quick decision.",
                "Write down pros and cons before acting on an impulse.",
                "Avoid environments where you're more likely to make impulsive choices.",
            ],
            Self::ExclusionAnxiety => &[
                "Remind yourself that true friends accept you as you are.",
                "Engage in activities that boost self-esteem outside of peer validation.",
                "Challenge negative thoughts about being excluded with positive affirmations.",
            ],
            Self::PeoplePleaser => &[
                "Practice setting small boundaries, like politely declining small requests.",
                "Remember that saying 'no' doesn't make you a bad friend.",
                "Focus on your needs as much as others' to maintain balance.",
            ],
        }
    }
}

/// Inclusive range of the age field.
pub const AGE_RANGE: (u32, u32) = (12, 25);

/// Slider default from a raw cell: truncated float, clamped into range.
/// Unparsable or absent cells start at the range minimum.
pub fn slider_default(raw: Option<f64>, (min, max): (u32, u32)) -> u32 {
    match raw {
        Some(v) if v.is_finite() => {
            let truncated = v.trunc();
            if truncated <= f64::from(min) {
                min
            } else if truncated >= f64::from(max) {
                max
            } else {
                truncated as u32
            }
        }
        _ => min,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub trait_: Trait,
    pub value: u32,
}

impl Slider {
    /// Move by `delta`, staying inside the trait's range.
    pub fn adjust(&mut self, delta: i32) {
        let (min, max) = self.trait_.range();
        let next = i64::from(self.value) + i64::from(delta);
        self.value = next.clamp(i64::from(min), i64::from(max)) as u32;
    }
}

/// The six sliders plus the age field, seeded from a fetched record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitSliders {
    pub sliders: [Slider; 6],
    pub age: u32,
}

impl TraitSliders {
    pub fn from_record(record: &SurveyRecord) -> Self {
        let sliders = Trait::ALL.map(|trait_| Slider {
            trait_,
            value: slider_default(record.field(trait_.field()).as_f64(), trait_.range()),
        });
        let age = slider_default(record.field(SurveyField::Age).as_f64(), AGE_RANGE);
        Self { sliders, age }
    }

    pub fn value(&self, trait_: Trait) -> u32 {
        self.sliders
            .iter()
            .find(|s| s.trait_ == trait_)
            .map_or(0, |s| s.value)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slider> {
        self.sliders.get_mut(index)
    }

    pub fn adjust_age(&mut self, delta: i32) {
        let next = i64::from(self.age) + i64::from(delta);
        self.age = next.clamp(i64::from(AGE_RANGE.0), i64::from(AGE_RANGE.1)) as u32;
    }
}

/// Gate and per-trait cutoffs for showing advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvicePolicy {
    /// Advice appears only when the risk score is strictly above this.
    pub risk_gate: u32,
    /// A trait's tips appear only when its slider is strictly above its cutoff.
    pub cutoffs: BTreeMap<Trait, u32>,
}

pub const DEFAULT_CUTOFF: u32 = 50;

impl Default for AdvicePolicy {
    fn default() -> Self {
        Self {
            risk_gate: 50,
            cutoffs: Trait::ALL.into_iter().map(|t| (t, DEFAULT_CUTOFF)).collect(),
        }
    }
}

impl AdvicePolicy {
    pub fn cutoff(&self, trait_: Trait) -> u32 {
        self.cutoffs.get(&trait_).copied().unwrap_or(DEFAULT_CUTOFF)
    }

    pub fn gate_open(&self, score: u8) -> bool {
        gt(self.risk_gate).check(&u32::from(score))
    }

    pub fn exceeds(&self, trait_: Trait, value: u32) -> bool {
        gt(self.cutoff(trait_)).check(&value)
    }
}

/// Tips for one trait that crossed its cutoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceEntry {
    pub trait_: Trait,
    pub value: u32,
    pub tips: &'static [&'static str],
}

/// Advice to render, or `None` when the risk gate is closed.
pub fn select_advice(
    score: u8,
    sliders: &TraitSliders,
    policy: &AdvicePolicy,
) -> Option<Vec<AdviceEntry>> {
    if !policy.gate_open(score) {
        return None;
    }
    Some(
        sliders
            .sliders
            .iter()
            .filter(|s| policy.exceeds(s.trait_, s.value))
            .map(|s| AdviceEntry {
                trait_: s.trait_,
                value: s.value,
                tips: s.trait_.tips(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sliders_with(peer: u32, pleaser: u32) -> TraitSliders {
        let record = SurveyRecord::new("1")
            .with("Peer pressure score", f64::from(peer))
            .with("People Pleaser", f64::from(pleaser))
            .with("Age", 15.0);
        TraitSliders::from_record(&record)
    }

    #[test]
    fn test_slider_defaults_truncate_and_clamp() {
        assert_eq!(slider_default(Some(7.9), (0, 15)), 7);
        assert_eq!(slider_default(Some(40.0), (0, 15)), 15);
        assert_eq!(slider_default(Some(-3.0), (0, 15)), 0);
        assert_eq!(slider_default(None, AGE_RANGE), 12);
    }

    #[test]
    fn test_gate_closed_at_fifty() {
        let policy = AdvicePolicy::default();
        assert!(select_advice(50, &sliders_with(90, 0), &policy).is_none());
        assert!(select_advice(75, &sliders_with(90, 0), &policy).is_some());
    }

    #[test]
    fn test_trait_at_cutoff_gets_no_tips() {
        let policy = AdvicePolicy::default();
        let advice = select_advice(100, &sliders_with(50, 0), &policy).unwrap();
        assert!(advice.is_empty());

        let advice = select_advice(100, &sliders_with(51, 0), &policy).unwrap();
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].trait_, Trait::PeerPressure);
        assert_eq!(advice[0].tips.len(), 3);
    }

    #[test]
    fn test_per_trait_cutoff_is_configurable() {
        let mut policy = AdvicePolicy::default();
        policy.cutoffs.insert(Trait::PeoplePleaser, 10);
        let advice = select_advice(75, &sliders_with(0, 20), &policy).unwrap();
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].trait_, Trait::PeoplePleaser);
    }

    #[test]
    fn test_adjust_stays_in_range() {
        let mut sliders = sliders_with(99, 0);
        let peer = sliders.get_mut(0).unwrap();
        peer.adjust(5);
        assert_eq!(peer.value, 100);
        peer.adjust(-200);
        assert_eq!(peer.value, 0);

        sliders.adjust_age(20);
        assert_eq!(sliders.age, 25);
    }
}
