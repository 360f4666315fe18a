//! Property-based tests for scoring, normalization and advice gating
//!
//! Invariants that should hold for all inputs:
//! - Scoring is total and only ever yields one of five values
//! - Label case and surrounding whitespace never change the score
//! - Peer pressure is rescaled by exactly 1/100
//! - Unrecognised income labels normalize to the medium ordinal
//! - Advice never appears at or below the risk gate or a trait's cutoff

use peersense::advice::{select_advice, AdvicePolicy, TraitSliders};
use peersense::core::features::IncomeLevel;
use peersense::normalize::{normalize_income, rescale_peer_pressure};
use peersense::{risk_score, CellValue, GaugeSpec, SurveyRecord};
use proptest::prelude::*;

fn known_label() -> impl Strategy<Value = (&'static str, u8)> {
    prop_oneof![
        Just(("low", 25)),
        Just(("medium", 50)),
        Just(("high", 75)),
        Just(("very high", 100)),
    ]
}

/// Re-case `label` following a mask of upper/lower flags.
fn recase(label: &str, upper: &[bool]) -> String {
    label
        .chars()
        .zip(upper.iter().chain(std::iter::repeat(&false)))
        .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    #[test]
    fn prop_score_is_total(label in ".*") {
        let score = risk_score(&label);
        prop_assert!([0, 25, 50, 75, 100].contains(&score));
    }

    #[test]
    fn prop_score_ignores_case_and_padding(
        (label, expected) in known_label(),
        upper in proptest::collection::vec(any::<bool>(), 9),
        pad in " {0,3}"
    ) {
        let cased = recase(label, &upper);
        prop_assert_eq!(risk_score(&format!("{pad}{cased}{pad}")), expected);
    }

    #[test]
    fn prop_gauge_threshold_equals_score(score in 0u8..=100) {
        let gauge = GaugeSpec::new(score);
        prop_assert_eq!(gauge.threshold, score);
        prop_assert!((gauge.fraction() - f64::from(score) / 100.0).abs() < 1e-12);
    }

    #[test]
    fn prop_peer_pressure_divided_by_hundred(p in 0u32..=100) {
        let value = f64::from(p);
        prop_assert_eq!(rescale_peer_pressure(value), value / 100.0);
        prop_assert!(rescale_peer_pressure(value) <= 1.0);
    }

    #[test]
    fn prop_unknown_income_is_medium(label in "[A-Za-z/]{1,12}") {
        prop_assume!(!["low", "medium", "high"].contains(&label.to_lowercase().as_str()));
        prop_assert_eq!(normalize_income(&CellValue::Text(label)), IncomeLevel::Medium.ordinal());
    }

    #[test]
    fn prop_numeric_income_passes_through(value in -1000.0f64..1000.0) {
        prop_assert_eq!(normalize_income(&CellValue::Number(value)), value);
    }

    #[test]
    fn prop_advice_respects_cutoffs(
        score in prop_oneof![Just(0u8), Just(25), Just(50), Just(75), Just(100)],
        peer in 0u32..=100,
        pleaser in 0u32..=25
    ) {
        let record = SurveyRecord::new("1")
            .with("Peer pressure score", f64::from(peer))
            .with("People Pleaser", f64::from(pleaser));
        let sliders = TraitSliders::from_record(&record);
        let advice = select_advice(score, &sliders, &AdvicePolicy::default());

        match advice {
            None => prop_assert!(score <= 50),
            Some(entries) => {
                prop_assert!(score > 50);
                for entry in entries {
                    prop_assert!(entry.value > 50);
                }
            }
        }
    }
}
