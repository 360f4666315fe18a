//! Record fetcher: authenticated lookup of one survey row in a remote
//! spreadsheet.

pub mod auth;
pub mod client;
pub mod table;

pub use auth::{Authenticator, CredentialProvider, CredentialSource, ServiceAccountKey};
pub use client::SheetsClient;
pub use table::Worksheet;

use crate::core::SurveyRecord;
use crate::errors::PipelineError;

/// Anything that can produce a survey row for an identifier.
pub trait RecordSource {
    /// Drop any cached worksheet data so the next fetch re-reads it.
    fn invalidate(&mut self);

    /// Fetch the first row whose identifier column matches `user_id`.
    ///
    /// # Errors
    ///
    /// - `PipelineError::NotFound` when no row matches
    /// - `PipelineError::Service` when the remote call fails or the sheet is
    ///   malformed
    fn fetch(&mut self, user_id: &str) -> Result<SurveyRecord, PipelineError>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn invalidate(&mut self) {
        (**self).invalidate()
    }

    fn fetch(&mut self, user_id: &str) -> Result<SurveyRecord, PipelineError> {
        (**self).fetch(user_id)
    }
}

/// Where the survey rows live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocator {
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub id_column: String,
}

impl SheetLocator {
    pub fn new(
        url_or_id: &str,
        worksheet: impl Into<String>,
        id_column: impl Into<String>,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            spreadsheet_id: spreadsheet_id(url_or_id)?,
            worksheet: worksheet.into(),
            id_column: id_column.into(),
        })
    }

    /// A1 range naming the whole worksheet; the title is always quoted.
    pub fn range(&self) -> String {
        format!("'{}'", self.worksheet.replace('\'', "''"))
    }
}

/// Extract the spreadsheet ID from a sharing URL, or accept a bare ID.
pub fn spreadsheet_id(url_or_id: &str) -> Result<String, PipelineError> {
    let trimmed = url_or_id.trim();
    let id = match trimmed.split_once("/spreadsheets/d/") {
        Some((_, rest)) => rest.split(['/', '?', '#']).next().unwrap_or_default(),
        None if trimmed.contains("://") => "",
        None => trimmed,
    };
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(id.to_string())
    } else {
        Err(PipelineError::service(format!(
            "could not find a spreadsheet ID in '{}'",
            url_or_id
        )))
    }
}
