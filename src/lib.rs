//! PeerSense: fetch one survey row, classify it and show the risk.
//!
//! The library holds everything but the binary's startup wiring so the
//! request pipeline can be driven with stub sources and classifiers.

pub mod advice;
pub mod cli;
pub mod config;
pub mod core;
pub mod effects;
pub mod errors;
pub mod model;
pub mod normalize;
pub mod observability;
pub mod pipeline;
pub mod risk;
pub mod sheets;
pub mod tui;

pub use crate::advice::{select_advice, AdviceEntry, AdvicePolicy, Trait, TraitSliders};
pub use crate::core::{CellValue, FeatureVector, SurveyField, SurveyRecord};
pub use crate::errors::{FieldIssue, PipelineError, StartupError};
pub use crate::model::{load_model, Classifier, TreeEnsemble};
pub use crate::normalize::normalize;
pub use crate::pipeline::{run_request, Evaluation, Outcome, RequestContext};
pub use crate::risk::{risk_score, GaugeSpec, RiskBand, RiskLabel};
pub use crate::sheets::{RecordSource, SheetLocator, SheetsClient};
