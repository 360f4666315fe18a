//! Feature normalization: validate a raw survey record, then coerce it into
//! the form the classifier was trained on.
//!
//! Validation always runs to completion before any transform, so the caller
//! gets the full list of offending fields and the classifier is never invoked
//! on a partial record.

use tracing::debug;

use crate::core::{CellValue, FeatureVector, IncomeLevel, SurveyField, SurveyRecord};
use crate::effects::{
    combine_validations, run_validation, validation_failure, validation_success, Accumulated,
};
use crate::errors::{FieldIssue, PipelineError};

/// How a field's cell must be coercible to pass validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Numeric,
    Categorical,
    /// Numeric pass-through or a categorical label.
    Either,
}

fn field_kind(field: SurveyField) -> FieldKind {
    match field {
        SurveyField::Gender => FieldKind::Categorical,
        SurveyField::IncomeLevel => FieldKind::Either,
        _ => FieldKind::Numeric,
    }
}

/// Check one field of the record.
pub fn validate_field(record: &SurveyRecord, field: SurveyField) -> Accumulated<(), FieldIssue> {
    let cell = record.field(field);
    if cell.is_empty() {
        return validation_failure(FieldIssue::missing(field));
    }
    match field_kind(field) {
        FieldKind::Numeric if cell.as_f64().is_none() => {
            validation_failure(FieldIssue::invalid(field))
        }
        _ => validation_success(()),
    }
}

/// Check every required field, accumulating ALL issues.
///
/// Each field is checked exactly once, so an issue list never contains
/// duplicates.
pub fn validate_record(record: &SurveyRecord) -> Result<(), Vec<FieldIssue>> {
    let checks = SurveyField::ALL
        .into_iter()
        .map(|field| validate_field(record, field))
        .collect();
    run_validation(combine_validations(checks)).map(|_| ())
}

/// Rescale a 0..=100 peer-pressure score to 0..=1.
pub fn rescale_peer_pressure(raw: f64) -> f64 {
    raw / 100.0
}

/// Normalize an income cell: numbers pass through, labels map to ordinals.
pub fn normalize_income(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Number(n) => *n,
        other => IncomeLevel::from_label(&other.render()).ordinal(),
    }
}

/// Age as an integer, via float parsing so `"17.0"` is accepted.
fn normalize_age(cell: &CellValue) -> Option<i64> {
    cell.as_f64().map(|age| age.trunc() as i64)
}

/// Validate then transform. Fails with `PipelineError::Validation` carrying
/// every offending field.
pub fn normalize(record: &SurveyRecord) -> Result<FeatureVector, PipelineError> {
    validate_record(record).map_err(|issues| {
        debug!(count = issues.len(), "record failed validation");
        PipelineError::Validation { issues }
    })?;

    let number = |field: SurveyField| -> Result<f64, PipelineError> {
        record.field(field).as_f64().ok_or_else(|| {
            PipelineError::prediction(format!("could not convert {} to float", field))
        })
    };

    let age = normalize_age(record.field(SurveyField::Age)).ok_or_else(|| {
        PipelineError::prediction(format!("could not convert {} to int", SurveyField::Age))
    })?;

    Ok(FeatureVector {
        peer_pressure: rescale_peer_pressure(number(SurveyField::PeerPressure)?),
        age,
        gender: record.field(SurveyField::Gender).render(),
        confidence: number(SurveyField::Confidence)?,
        earned_recognition: number(SurveyField::EarnedRecognition)?,
        impulsiveness: number(SurveyField::Impulsiveness)?,
        exclusion_anxiety: number(SurveyField::ExclusionAnxiety)?,
        people_pleaser: number(SurveyField::PeoplePleaser)?,
        income_level: normalize_income(record.field(SurveyField::IncomeLevel)),
    })
}
