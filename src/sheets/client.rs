//! Blocking Google Sheets v4 client.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info_span, warn};

use super::auth::Authenticator;
use super::table::Worksheet;
use super::{RecordSource, SheetLocator};
use crate::core::SurveyRecord;
use crate::errors::PipelineError;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Reads a whole worksheet per lookup and keeps the last snapshot until
/// invalidated.
pub struct SheetsClient {
    locator: SheetLocator,
    auth: Authenticator,
    api_base: String,
    snapshot: Option<Worksheet>,
}

impl SheetsClient {
    pub fn new(locator: SheetLocator, auth: Authenticator) -> Self {
        Self {
            locator,
            auth,
            api_base: DEFAULT_API_BASE.to_string(),
            snapshot: None,
        }
    }

    /// Point at a different API host (e.g. a local emulator).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values:batchGet",
            self.api_base, self.locator.spreadsheet_id
        )
    }

    /// One full read of the worksheet. No pagination.
    fn read_worksheet(&mut self) -> Result<Worksheet, PipelineError> {
        let token = self.auth.access_token()?;
        let response = ureq::get(&self.values_url())
            .set("Authorization", &format!("Bearer {}", token))
            .query("ranges", &self.locator.range())
            .query("valueRenderOption", "UNFORMATTED_VALUE")
            .query("majorDimension", "ROWS")
            .call();

        let body = match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| PipelineError::service(e.to_string()))?,
            Err(ureq::Error::Status(code, resp)) => {
                if code == 401 {
                    // Token revoked or expired early; next attempt re-authenticates.
                    self.auth.reset();
                }
                let body = resp.into_string().unwrap_or_default();
                return Err(PipelineError::service(api_error_message(code, &body)));
            }
            Err(e) => return Err(PipelineError::service(e.to_string())),
        };

        parse_batch_get(&body)
    }
}

/// Turn a `values:batchGet` body into a worksheet.
pub fn parse_batch_get(body: &str) -> Result<Worksheet, PipelineError> {
    let parsed: BatchGetResponse = serde_json::from_str(body)
        .map_err(|e| PipelineError::service(format!("malformed sheet: {}", e)))?;
    let range = parsed
        .value_ranges
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::service("malformed sheet: no value range returned"))?;
    Worksheet::from_values(&range.values)
}

/// Prefer the API's own error message over the raw body.
fn api_error_message(code: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => format!("{} ({})", parsed.error.message, code),
        Err(_) if body.trim().is_empty() => format!("HTTP {}", code),
        Err(_) => format!("HTTP {}: {}", code, body.trim()),
    }
}

impl RecordSource for SheetsClient {
    fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            debug!("dropped cached worksheet snapshot");
        }
    }

    fn fetch(&mut self, user_id: &str) -> Result<SurveyRecord, PipelineError> {
        let _span = info_span!("fetch_record", worksheet = %self.locator.worksheet).entered();

        if self.snapshot.is_none() {
            let sheet = self.read_worksheet().inspect_err(|e| {
                warn!(error = %e, "worksheet read failed");
            })?;
            debug!(rows = sheet.rows.len(), "read worksheet");
            self.snapshot = Some(sheet);
        }

        match &self.snapshot {
            Some(sheet) => sheet.find_record(&self.locator.id_column, user_id),
            None => Err(PipelineError::service("worksheet snapshot unavailable")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellValue, SurveyField};

    #[test]
    fn test_parse_batch_get() {
        let body = r#"{
            "spreadsheetId": "abc",
            "valueRanges": [{
                "range": "IDS!A1:C3",
                "majorDimension": "ROWS",
                "values": [["ID", "Age", "Gender"], [7, 15, "Male"]]
            }]
        }"#;
        let sheet = parse_batch_get(body).unwrap();
        let record = sheet.find_record("ID", "7").unwrap();
        assert_eq!(record.field(SurveyField::Age), &CellValue::Number(15.0));
    }

    #[test]
    fn test_empty_range_is_malformed() {
        let body = r#"{ "valueRanges": [{ "range": "IDS!A1:Z1000" }] }"#;
        let err = parse_batch_get(body).unwrap_err();
        assert!(err.to_string().contains("malformed sheet"));
    }

    #[test]
    fn test_non_json_is_malformed() {
        assert!(matches!(
            parse_batch_get("<html>"),
            Err(PipelineError::Service { .. })
        ));
    }

    #[test]
    fn test_api_error_message_extraction() {
        let body = r#"{"error": {"code": 400, "message": "Unable to parse range: 'IDS'", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(
            api_error_message(400, body),
            "Unable to parse range: 'IDS' (400)"
        );
        assert_eq!(api_error_message(503, ""), "HTTP 503");
    }
}
