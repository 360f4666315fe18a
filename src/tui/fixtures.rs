//! Shared request fixtures for session tests.

use crate::core::SurveyRecord;
use crate::normalize::normalize;
use crate::pipeline::{Evaluation, Outcome, RequestContext};
use crate::risk::risk_score;

pub fn complete_record(user_id: &str, peer: f64) -> SurveyRecord {
    SurveyRecord::new(user_id)
        .with("Peer pressure score", peer)
        .with("Age", 16.0)
        .with("Gender", "Female")
        .with("Confidence Level", 9.0)
        .with("Earned Recognition", 4.0)
        .with("Impulsivness", 12.0)
        .with("Exclusion Anxiety", 20.0)
        .with("People Pleaser", 8.0)
        .with("Income level", "low")
}

/// An evaluated request whose label maps to `score`.
pub fn evaluated(score: u8, peer: f64) -> RequestContext {
    let label = match score {
        25 => "low",
        50 => "medium",
        75 => "high",
        100 => "very high",
        _ => "unknown",
    };
    let record = complete_record("7", peer);
    let features = normalize(&record).expect("fixture record is complete");
    RequestContext {
        user_id: "7".into(),
        outcome: Outcome::Evaluated(Evaluation {
            record,
            features,
            label: label.into(),
            score: risk_score(label),
        }),
    }
}
