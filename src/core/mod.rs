//! Core data types shared by the fetch, normalize and classify stages.

pub mod features;

pub use features::{FeatureValue, FeatureVector, IncomeLevel};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the nine survey columns a prediction needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SurveyField {
    PeerPressure,
    Age,
    Gender,
    Confidence,
    EarnedRecognition,
    Impulsiveness,
    ExclusionAnxiety,
    PeoplePleaser,
    IncomeLevel,
}

impl SurveyField {
    /// All required fields in sheet order.
    pub const ALL: [SurveyField; 9] = [
        SurveyField::PeerPressure,
        SurveyField::Age,
        SurveyField::Gender,
        SurveyField::Confidence,
        SurveyField::EarnedRecognition,
        SurveyField::Impulsiveness,
        SurveyField::ExclusionAnxiety,
        SurveyField::PeoplePleaser,
        SurveyField::IncomeLevel,
    ];

    /// Column header as it appears in the worksheet (and in the model's
    /// feature list). `Impulsivness` is spelled the way the sheet spells it.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::PeerPressure => "Peer pressure score",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Confidence => "Confidence Level",
            Self::EarnedRecognition => "Earned Recognition",
            Self::Impulsiveness => "Impulsivness",
            Self::ExclusionAnxiety => "Exclusion Anxiety",
            Self::PeoplePleaser => "People Pleaser",
            Self::IncomeLevel => "Income level",
        }
    }

    /// Human-facing name used in error listings.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::PeerPressure => "Peer pressure score",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Confidence => "Confidence Level",
            Self::EarnedRecognition => "Earned Recognition",
            Self::Impulsiveness => "Impulsiveness",
            Self::ExclusionAnxiety => "Exclusion Anxiety",
            Self::PeoplePleaser => "People Pleaser",
            Self::IncomeLevel => "Income level",
        }
    }

    /// Look a field up by its worksheet column header.
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == column)
    }
}

impl fmt::Display for SurveyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single worksheet cell after unformatted retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Empty,
}

impl CellValue {
    /// Build a cell from raw sheet text, numericising where possible.
    ///
    /// Blank and whitespace-only text becomes `Empty`.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Float view of the cell, tolerating numeric strings with decimal points.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Bool(_) | Self::Empty => None,
        }
    }

    /// String rendering used for identifier matching and categorical fields.
    ///
    /// Integral numbers render without a fractional part, so a numeric `12345`
    /// matches the typed identifier `"12345"`.
    pub fn render(&self) -> String {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Self::Text(s) => s.clone(),
            Self::Empty => String::new(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::from_text(s)
    }
}

/// One worksheet row, keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub user_id: String,
    cells: BTreeMap<String, CellValue>,
}

impl SurveyRecord {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Builder-style insertion, mostly for tests and fixtures.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Raw cell for a column; absent columns read as `Empty`.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&CellValue::Empty)
    }

    pub fn field(&self, field: SurveyField) -> &CellValue {
        self.get(field.column())
    }

    /// Whether the column was set, even to an empty cell.
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}
