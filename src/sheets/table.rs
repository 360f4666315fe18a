//! Worksheet grid → keyed records.

use serde_json::Value;

use crate::core::{CellValue, SurveyRecord};
use crate::errors::PipelineError;

/// A whole worksheet: header row plus data rows padded to header width.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Convert one unformatted API value into a cell.
pub fn cell_from_json(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => n.as_f64().map_or(CellValue::Empty, CellValue::Number),
        Value::String(s) => CellValue::from_text(s),
        other => CellValue::Text(other.to_string()),
    }
}

impl Worksheet {
    /// Build from the API's row-major value grid. The first row is the header.
    pub fn from_values(values: &[Vec<Value>]) -> Result<Self, PipelineError> {
        let (header_row, data) = values
            .split_first()
            .ok_or_else(|| PipelineError::service("malformed sheet: worksheet is empty"))?;

        let header: Vec<String> = header_row
            .iter()
            .map(|v| cell_from_json(v).render().trim().to_string())
            .collect();

        let rows = data
            .iter()
            .map(|row| {
                let mut cells: Vec<CellValue> =
                    row.iter().take(header.len()).map(cell_from_json).collect();
                cells.resize(header.len(), CellValue::Empty);
                cells
            })
            .collect();

        Ok(Self { header, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// First row whose `id_column` renders equal to `user_id`.
    ///
    /// # Errors
    ///
    /// `Service` when the identifier column is absent, `NotFound` when no row
    /// matches.
    pub fn find_record(
        &self,
        id_column: &str,
        user_id: &str,
    ) -> Result<SurveyRecord, PipelineError> {
        let id_idx = self.column_index(id_column).ok_or_else(|| {
            PipelineError::service(format!("malformed sheet: no '{}' column", id_column))
        })?;
        let wanted = user_id.trim();

        let row = self
            .rows
            .iter()
            .find(|row| row[id_idx].render() == wanted)
            .ok_or_else(|| PipelineError::not_found(wanted))?;

        let mut record = SurveyRecord::new(wanted);
        for (name, cell) in self.header.iter().zip(row) {
            // Repeated headers: the leftmost column wins, blank or not.
            if !name.is_empty() && !record.contains(name) {
                record.insert(name.clone(), cell.clone());
            }
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SurveyField;
    use serde_json::json;

    fn grid() -> Vec<Vec<Value>> {
        serde_json::from_value(json!([
            ["ID", "Age", "Gender", "Income level"],
            [101, 15, "Male", "Low"],
            ["102", "16.0", "Female"],
            [102, 17, "Male", "High"]
        ]))
        .unwrap()
    }

    #[test]
    fn test_short_rows_are_padded() {
        let sheet = Worksheet::from_values(&grid()).unwrap();
        assert_eq!(sheet.rows[1].len(), 4);
        assert!(sheet.rows[1][3].is_empty());
    }

    #[test]
    fn test_first_match_wins_and_ids_compare_as_strings() {
        let sheet = Worksheet::from_values(&grid()).unwrap();
        let record = sheet.find_record("ID", "102").unwrap();
        assert_eq!(record.field(SurveyField::Gender), &CellValue::Text("Female".into()));
        assert_eq!(record.field(SurveyField::Age), &CellValue::Number(16.0));
        assert!(record.field(SurveyField::IncomeLevel).is_empty());
    }

    #[test]
    fn test_duplicate_header_keeps_leftmost_blank_cell() {
        let values: Vec<Vec<Value>> =
            serde_json::from_value(json!([["ID", "Age", "Age"], [1, "", 99]])).unwrap();
        let sheet = Worksheet::from_values(&values).unwrap();
        let record = sheet.find_record("ID", "1").unwrap();
        assert!(record.contains("Age"));
        assert_eq!(record.field(SurveyField::Age), &CellValue::Empty);
    }

    #[test]
    fn test_numeric_id_matches_typed_identifier() {
        let sheet = Worksheet::from_values(&grid()).unwrap();
        assert_eq!(sheet.find_record("ID", " 101 ").unwrap().user_id, "101");
    }

    #[test]
    fn test_no_match_is_not_found() {
        let sheet = Worksheet::from_values(&grid()).unwrap();
        assert_eq!(
            sheet.find_record("ID", "999").unwrap_err(),
            PipelineError::not_found("999")
        );
    }

    #[test]
    fn test_missing_id_column_is_service_error() {
        let sheet = Worksheet::from_values(&grid()).unwrap();
        assert!(matches!(
            sheet.find_record("UserID", "101"),
            Err(PipelineError::Service { .. })
        ));
    }

    #[test]
    fn test_empty_grid_is_service_error() {
        assert!(matches!(
            Worksheet::from_values(&[]),
            Err(PipelineError::Service { .. })
        ));
    }
}
