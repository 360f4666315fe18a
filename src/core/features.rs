//! The normalized, model-ready representation of one survey record.

use serde::Serialize;

use super::SurveyField;

/// Ordinal encoding of the three-level income category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IncomeLevel {
    Low,
    Medium,
    High,
}

impl IncomeLevel {
    /// Capitalise the label and look it up; anything unrecognized is `Medium`.
    pub fn from_label(label: &str) -> Self {
        match capitalize(label.trim()).as_str() {
            "Low" => Self::Low,
            "High" => Self::High,
            _ => Self::Medium,
        }
    }

    pub const fn ordinal(&self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Medium => 1.0,
            Self::High => 2.0,
        }
    }
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A single model input column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

/// Feature row consumed by the classifier. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Peer-pressure score rescaled to 0..=1.
    pub peer_pressure: f64,
    pub age: i64,
    pub gender: String,
    pub confidence: f64,
    pub earned_recognition: f64,
    pub impulsiveness: f64,
    pub exclusion_anxiety: f64,
    pub people_pleaser: f64,
    /// Either the ordinal of a categorical income or a numeric pass-through.
    pub income_level: f64,
}

impl FeatureVector {
    /// Value of a column by its model feature name.
    pub fn value_of(&self, column: &str) -> Option<FeatureValue> {
        SurveyField::from_column(column).map(|field| self.value(field))
    }

    pub fn value(&self, field: SurveyField) -> FeatureValue {
        match field {
            SurveyField::PeerPressure => FeatureValue::Number(self.peer_pressure),
            SurveyField::Age => FeatureValue::Number(self.age as f64),
            SurveyField::Gender => FeatureValue::Category(self.gender.clone()),
            SurveyField::Confidence => FeatureValue::Number(self.confidence),
            SurveyField::EarnedRecognition => FeatureValue::Number(self.earned_recognition),
            SurveyField::Impulsiveness => FeatureValue::Number(self.impulsiveness),
            SurveyField::ExclusionAnxiety => FeatureValue::Number(self.exclusion_anxiety),
            SurveyField::PeoplePleaser => FeatureValue::Number(self.people_pleaser),
            SurveyField::IncomeLevel => FeatureValue::Number(self.income_level),
        }
    }
}
