//! Stub collaborators shared by the integration tests.
#![allow(dead_code)]

use std::cell::Cell;

use peersense::{Classifier, FeatureVector, PipelineError, RecordSource, SurveyRecord};

/// In-memory sheet that records every call made to it.
#[derive(Default)]
pub struct StubSheet {
    pub rows: Vec<SurveyRecord>,
    pub calls: Vec<String>,
    /// Returned from every fetch when set.
    pub failure: Option<PipelineError>,
}

impl StubSheet {
    pub fn with_rows(rows: Vec<SurveyRecord>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn failing(err: PipelineError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }
}

impl RecordSource for StubSheet {
    fn invalidate(&mut self) {
        self.calls.push("invalidate".to_string());
    }

    fn fetch(&mut self, user_id: &str) -> Result<SurveyRecord, PipelineError> {
        self.calls.push(format!("fetch {user_id}"));
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.rows
            .iter()
            .find(|r| r.user_id == user_id)
            .cloned()
            .ok_or_else(|| PipelineError::not_found(user_id))
    }
}

/// Classifier returning a fixed label and counting invocations.
pub struct StubClassifier {
    pub result: Result<String, PipelineError>,
    pub calls: Cell<usize>,
    pub last_features: std::cell::RefCell<Option<FeatureVector>>,
}

impl StubClassifier {
    pub fn labelled(label: &str) -> Self {
        Self {
            result: Ok(label.to_string()),
            calls: Cell::new(0),
            last_features: std::cell::RefCell::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(PipelineError::prediction(message)),
            calls: Cell::new(0),
            last_features: std::cell::RefCell::new(None),
        }
    }
}

impl Classifier for StubClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<String, PipelineError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_features.borrow_mut() = Some(features.clone());
        self.result.clone()
    }
}

/// A row with every required column filled in.
pub fn complete_record(user_id: &str) -> SurveyRecord {
    SurveyRecord::new(user_id)
        .with("Peer pressure score", 60.0)
        .with("Age", 17.0)
        .with("Gender", "Male")
        .with("Confidence Level", 7.0)
        .with("Earned Recognition", 3.0)
        .with("Impulsivness", 11.0)
        .with("Exclusion Anxiety", 14.0)
        .with("People Pleaser", 19.0)
        .with("Income level", "Medium")
}
