use crate::classify::{Classifier, Predictions};
use crate::command::Command;
use crate::compare::compare_columns;
use crate::dataset::DataSource;
use crate::error::{ChatError, Result};
use crate::stats::{summarize_all, ColumnSummary};
use serde::Serialize;
use tracing::info;

/// Per-command arguments, gathered by the presentation layer before dispatch.
pub enum CommandArgs<'a, D> {
    None,
    /// Two column indices (visualize axes, or the columns to compare).
    Columns { first: usize, second: usize },
    /// An unlabeled dataset to classify, and whether to include evaluation.
    Predict { unlabeled: &'a D, with_evaluation: bool },
}

/// Structured result handed back to the presentation layer for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Reply {
    /// Scatter-plot request; drawing is entirely the presentation layer's job.
    Visualization { x: usize, y: usize },
    Summaries(Vec<ColumnSummary>),
    ColumnComparison {
        first: ColumnSummary,
        second: ColumnSummary,
    },
    Predictions(Predictions),
    /// The caller should drive a `ComparisonSession` to completion.
    DatasetComparison,
}

/// Routes a resolved command to its handler. Unrecognized input never gets
/// here; the resolver already returned `None` for it.
pub struct Dispatcher<'a, D, C> {
    data: &'a D,
    classifier: &'a C,
}

impl<'a, D: DataSource, C: Classifier<D>> Dispatcher<'a, D, C> {
    pub fn new(data: &'a D, classifier: &'a C) -> Self {
        Self { data, classifier }
    }

    pub fn dispatch(&self, command: Command, args: CommandArgs<'_, D>) -> Result<Reply> {
        info!("Dispatching command '{}'", command.phrase());
        match (command, args) {
            (Command::VisualizeDataset, CommandArgs::Columns { first, second }) => {
                Ok(Reply::Visualization { x: first, y: second })
            }
            (Command::StatisticsForAllColumns, CommandArgs::None) => {
                Ok(Reply::Summaries(summarize_all(self.data)?))
            }
            (Command::CompareTwoColumns, CommandArgs::Columns { first, second }) => {
                let (a, b) = compare_columns(self.data, first, second)?;
                Ok(Reply::ColumnComparison { first: a, second: b })
            }
            (Command::Predict, CommandArgs::Predict { unlabeled, with_evaluation }) => {
                let model = self.classifier.train(self.data)?;
                let labels = (0..unlabeled.row_count())
                    .map(|row| self.classifier.classify(&model, unlabeled, row))
                    .collect::<Result<Vec<_>>>()?;
                let evaluation = if with_evaluation {
                    Some(self.classifier.evaluate(&model, unlabeled)?)
                } else {
                    None
                };
                Ok(Reply::Predictions(Predictions { labels, evaluation }))
            }
            (Command::CompareDatasets, CommandArgs::None) => Ok(Reply::DatasetComparison),
            (command, _) => Err(ChatError::MissingInput(format!(
                "arguments do not match command '{}'",
                command.phrase()
            ))),
        }
    }
}
