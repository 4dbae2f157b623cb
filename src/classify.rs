use crate::dataset::DataSource;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Evaluation output from the external classifier. The three sections are
/// opaque, pre-formatted strings; this core passes them through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub summary: String,
    pub confusion_matrix: String,
    pub class_details: String,
}

/// Predictions for an unlabeled dataset: one label per row, plus the
/// evaluation report when the caller asked for one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predictions {
    pub labels: Vec<String>,
    pub evaluation: Option<EvaluationReport>,
}

/// External classifier capability. Training, per-row classification, and
/// evaluation all happen on the collaborator's side; this core only holds the
/// contract it dispatches through.
pub trait Classifier<D: DataSource> {
    type Model;

    fn train(&self, data: &D) -> Result<Self::Model>;

    /// Predicted label for one row of `data`.
    fn classify(&self, model: &Self::Model, data: &D, row: usize) -> Result<String>;

    fn evaluate(&self, model: &Self::Model, data: &D) -> Result<EvaluationReport>;
}
