//! Risk classifier seam.
//!
//! The pipeline treats the classifier as a black box: a feature row goes in,
//! one categorical label comes out. [`TreeEnsemble`] is the shipping
//! implementation, loaded once from a JSON artifact at startup.

pub mod ensemble;

pub use ensemble::{load_model, TreeEnsemble};

use crate::core::FeatureVector;
use crate::errors::PipelineError;

/// Input/output contract of the pre-trained model.
pub trait Classifier {
    /// Predict a risk label (`low`, `medium`, `high`, `very high`).
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Prediction` with the raw cause when inference
    /// fails.
    fn predict(&self, features: &FeatureVector) -> Result<String, PipelineError>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn predict(&self, features: &FeatureVector) -> Result<String, PipelineError> {
        (**self).predict(features)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, features: &FeatureVector) -> Result<String, PipelineError> {
        (**self).predict(features)
    }
}
