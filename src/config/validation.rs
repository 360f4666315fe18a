//! Configuration validation with error accumulation.
//!
//! Every problem is collected before failing, so one run shows the complete
//! list.

use crate::effects::{
    combine_validations, run_validation, validation_failure, validation_success, Accumulated,
};

use super::core::PeersenseConfig;

fn require_non_empty(value: &str, what: &str) -> Accumulated<(), String> {
    if value.trim().is_empty() {
        validation_failure(format!("{} must not be empty", what))
    } else {
        validation_success(())
    }
}

fn require_percentage(value: u32, what: &str) -> Accumulated<(), String> {
    if value > 100 {
        validation_failure(format!("{} must be between 0 and 100, got {}", what, value))
    } else {
        validation_success(())
    }
}

/// Validate the whole config, returning every problem found.
pub fn validate_config(config: &PeersenseConfig) -> Result<(), Vec<String>> {
    let mut checks = vec![
        require_non_empty(&config.sheet.url, "sheet.url"),
        require_non_empty(&config.sheet.worksheet, "sheet.worksheet"),
        require_non_empty(&config.sheet.id_column, "sheet.id_column"),
        require_percentage(config.advice.risk_gate, "advice.risk_gate"),
    ];
    checks.extend(config.advice.cutoffs.iter().map(|(trait_, cutoff)| {
        require_percentage(*cutoff, &format!("advice.cutoffs.{:?}", trait_))
    }));

    run_validation(combine_validations(checks)).map(|_| ())
}
