//! One "view results" request: invalidate → fetch → normalize → classify →
//! score.
//!
//! The outcome is carried explicitly in a [`RequestContext`], so presentation
//! can tell a finished evaluation from a request that produced no data and
//! skip the slider and advice sections for the latter.

use tracing::{info, info_span, warn};

use crate::core::{FeatureVector, SurveyRecord};
use crate::errors::PipelineError;
use crate::model::Classifier;
use crate::normalize::normalize;
use crate::observability::{set_phase, set_user_id, RequestPhase};
use crate::risk::{risk_score, summary_line, GaugeSpec};
use crate::sheets::RecordSource;

/// Everything derived from a successful request.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub record: SurveyRecord,
    pub features: FeatureVector,
    pub label: String,
    pub score: u8,
}

impl Evaluation {
    pub fn gauge(&self) -> GaugeSpec {
        GaugeSpec::new(self.score)
    }

    pub fn summary(&self) -> String {
        summary_line(&self.label, self.score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Evaluated(Evaluation),
    /// The request stopped early; nothing past the failing stage exists.
    NoData(PipelineError),
}

/// Result of one request, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub user_id: String,
    pub outcome: Outcome,
}

impl RequestContext {
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match &self.outcome {
            Outcome::Evaluated(evaluation) => Some(evaluation),
            Outcome::NoData(_) => None,
        }
    }

    pub fn error(&self) -> Option<&PipelineError> {
        match &self.outcome {
            Outcome::Evaluated(_) => None,
            Outcome::NoData(err) => Some(err),
        }
    }
}

/// Run one request end to end. Never panics on bad data; every failure ends
/// up in `Outcome::NoData`.
pub fn run_request<S, C>(source: &mut S, classifier: &C, user_id: &str) -> RequestContext
where
    S: RecordSource + ?Sized,
    C: Classifier + ?Sized,
{
    let user_id = user_id.trim().to_string();
    let _span = info_span!("view_results", user_id = %user_id).entered();
    let _id = set_user_id(&user_id);

    let outcome = match evaluate(source, classifier, &user_id) {
        Ok(evaluation) => {
            info!(label = %evaluation.label, score = evaluation.score, "prediction complete");
            Outcome::Evaluated(evaluation)
        }
        Err(err) => {
            warn!(error = %err, "request aborted");
            Outcome::NoData(err)
        }
    };

    RequestContext { user_id, outcome }
}

fn evaluate<S, C>(
    source: &mut S,
    classifier: &C,
    user_id: &str,
) -> Result<Evaluation, PipelineError>
where
    S: RecordSource + ?Sized,
    C: Classifier + ?Sized,
{
    let record = {
        let _phase = set_phase(RequestPhase::Fetching);
        source.invalidate();
        source.fetch(user_id)?
    };

    let features = {
        let _phase = set_phase(RequestPhase::Normalizing);
        normalize(&record)?
    };

    let label = {
        let _phase = set_phase(RequestPhase::Predicting);
        classifier.predict(&features)?
    };

    let _phase = set_phase(RequestPhase::Scoring);
    let score = risk_score(&label);

    Ok(Evaluation {
        record,
        features,
        label,
        score,
    })
}
