//! Tree-ensemble model artifact.
//!
//! The trained scikit-learn pipeline is exported offline into a JSON document
//! of decision trees, so no Python runtime is needed here. Layout:
//!
//! ```json
//! {
//!   "classes": ["low", "medium", "high", "very high"],
//!   "features": ["Peer pressure score", "Age", "Gender", "..."],
//!   "categories": { "Gender": ["Female", "Male"] },
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
//!         { "value": [0.9, 0.1, 0.0, 0.0] },
//!         { "value": [0.0, 0.2, 0.5, 0.3] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! A split sends a row left when `x <= threshold`. Categorical features encode
//! as the index of the value in their vocabulary, `-1` when unseen.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use super::Classifier;
use crate::core::{FeatureValue, FeatureVector, SurveyField};
use crate::errors::{PipelineError, StartupError};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    pub classes: Vec<String>,
    pub features: Vec<String>,
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
    pub trees: Vec<Tree>,
}

/// Load and check a model artifact. Any problem is fatal at startup.
pub fn load_model(path: &Path) -> Result<TreeEnsemble, StartupError> {
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => StartupError::ModelNotFound {
            path: path.to_path_buf(),
        },
        _ => StartupError::ModelInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;

    let model =
        TreeEnsemble::from_json(&contents).map_err(|message| StartupError::ModelInvalid {
            path: path.to_path_buf(),
            message,
        })?;

    info!(
        path = %path.display(),
        trees = model.trees.len(),
        classes = model.classes.len(),
        "loaded model artifact"
    );
    Ok(model)
}

impl TreeEnsemble {
    /// Parse and structurally check an artifact.
    pub fn from_json(contents: &str) -> Result<Self, String> {
        let model: TreeEnsemble = serde_json::from_str(contents).map_err(|e| e.to_string())?;
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("model declares no classes".to_string());
        }
        if self.trees.is_empty() {
            return Err("model contains no trees".to_string());
        }
        if let Some(unknown) = self
            .features
            .iter()
            .find(|name| SurveyField::from_column(name).is_none())
        {
            return Err(format!("unknown feature column '{}'", unknown));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {} has no nodes", t));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                match node {
                    Node::Split {
                        feature,
                        left,
                        right,
                        ..
                    } => {
                        if *feature >= self.features.len() {
                            return Err(format!(
                                "tree {} node {}: feature index out of range",
                                t, n
                            ));
                        }
                        // Children must point forward, which also rules out cycles.
                        let in_range = |child: usize| child > n && child < tree.nodes.len();
                        if !in_range(*left) || !in_range(*right) {
                            return Err(format!("tree {} node {}: child index out of range", t, n));
                        }
                    }
                    Node::Leaf { value } => {
                        if value.len() != self.classes.len() {
                            return Err(format!(
                                "tree {} node {}: leaf has {} values for {} classes",
                                t,
                                n,
                                value.len(),
                                self.classes.len()
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Encode the feature row in the artifact's column order.
    pub fn encode(&self, features: &FeatureVector) -> Result<Vec<f64>, PipelineError> {
        self.features
            .iter()
            .map(|name| match features.value_of(name) {
                Some(FeatureValue::Number(n)) => Ok(n),
                Some(FeatureValue::Category(value)) => Ok(self.encode_category(name, &value)),
                None => Err(PipelineError::prediction(format!(
                    "feature '{}' is not available",
                    name
                ))),
            })
            .collect()
    }

    fn encode_category(&self, name: &str, value: &str) -> f64 {
        self.categories
            .get(name)
            .and_then(|vocab| vocab.iter().position(|v| v == value))
            .map_or(-1.0, |idx| idx as f64)
    }

    /// Averaged class distribution across all trees.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, PipelineError> {
        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = walk(tree, row)?;
            for (total, v) in totals.iter_mut().zip(leaf) {
                *total += v;
            }
        }
        let count = self.trees.len() as f64;
        Ok(totals.into_iter().map(|t| t / count).collect())
    }
}

fn walk<'a>(tree: &'a Tree, row: &[f64]) -> Result<&'a [f64], PipelineError> {
    let mut idx = 0;
    loop {
        match tree.nodes.get(idx) {
            Some(Node::Leaf { value }) => return Ok(value.as_slice()),
            Some(Node::Split {
                feature,
                threshold,
                left,
                right,
            }) => {
                let x = row.get(*feature).copied().ok_or_else(|| {
                    PipelineError::prediction(format!("feature index {} out of range", feature))
                })?;
                idx = if x <= *threshold { *left } else { *right };
            }
            None => {
                return Err(PipelineError::prediction(format!(
                    "node index {} out of range",
                    idx
                )))
            }
        }
    }
}

/// Index of the largest value; ties go to the lowest index.
fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

impl Classifier for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<String, PipelineError> {
        let row = self.encode(features)?;
        let proba = self.predict_proba(&row)?;
        let best = argmax(&proba)
            .ok_or_else(|| PipelineError::prediction("model produced no class scores"))?;
        debug!(?proba, class = %self.classes[best], "model prediction");
        Ok(self.classes[best].clone())
    }
}
