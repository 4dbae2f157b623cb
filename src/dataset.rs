use crate::error::{ChatError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Kind of a dataset column, determining which statistics apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Aggregate statistics for a numeric column. `std_dev` is the population
/// standard deviation (ddof = 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericAggregates {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Read-only capability over a loaded table. The analysis core only ever
/// queries a dataset through this trait; loading and parsing live behind it,
/// so the core can be tested against in-memory fakes.
pub trait DataSource {
    fn column_count(&self) -> usize;
    fn row_count(&self) -> usize;
    fn column_name(&self, index: usize) -> Result<String>;
    fn column_kind(&self, index: usize) -> Result<ColumnKind>;
    fn numeric_aggregates(&self, index: usize) -> Result<NumericAggregates>;
    fn distinct_value_count(&self, index: usize) -> Result<usize>;

    /// The designated label column, if any. Only the classifier cares.
    fn label_column(&self) -> Option<usize> {
        None
    }
}

/// Polars-backed dataset: a loaded CSV held as an immutable DataFrame.
#[derive(Debug)]
pub struct PolarsDataset {
    frame: DataFrame,
    label: Option<usize>,
}

impl PolarsDataset {
    /// Load a CSV file with a header row. The label column defaults to the
    /// last column, matching the convention of the training data this tool
    /// is pointed at.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChatError::DatasetLoad(format!(
                "file not found: {}",
                path.display()
            )));
        }

        let frame = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(1000))
            .finish()
            .map_err(|e| {
                ChatError::DatasetLoad(format!("failed to read CSV {}: {}", path.display(), e))
            })?
            .collect()
            .map_err(|e| {
                ChatError::DatasetLoad(format!("failed to parse CSV {}: {}", path.display(), e))
            })?;

        info!(
            "Loaded {}: {} rows, {} columns",
            path.display(),
            frame.height(),
            frame.width()
        );
        Ok(Self::from_frame(frame))
    }

    /// Wrap an already-built DataFrame. Label defaults to the last column.
    pub fn from_frame(frame: DataFrame) -> Self {
        let label = frame.width().checked_sub(1);
        Self { frame, label }
    }

    fn series(&self, index: usize) -> Result<&Series> {
        self.frame.get_columns().get(index).ok_or_else(|| {
            ChatError::Index(format!(
                "column index {} is out of range ({} columns)",
                index,
                self.frame.width()
            ))
        })
    }
}

impl DataSource for PolarsDataset {
    fn column_count(&self) -> usize {
        self.frame.width()
    }

    fn row_count(&self) -> usize {
        self.frame.height()
    }

    fn column_name(&self, index: usize) -> Result<String> {
        Ok(self.series(index)?.name().to_string())
    }

    fn column_kind(&self, index: usize) -> Result<ColumnKind> {
        let series = self.series(index)?;
        if series.dtype().is_numeric() {
            Ok(ColumnKind::Numeric)
        } else {
            Ok(ColumnKind::Categorical)
        }
    }

    fn numeric_aggregates(&self, index: usize) -> Result<NumericAggregates> {
        let series = self.series(index)?;
        let values = series.cast(&DataType::Float64)?;
        let values = values.f64()?;

        // Empty columns aggregate to NaN.
        Ok(NumericAggregates {
            min: values.min().unwrap_or(f64::NAN),
            max: values.max().unwrap_or(f64::NAN),
            mean: values.mean().unwrap_or(f64::NAN),
            std_dev: values.std(0).unwrap_or(f64::NAN),
        })
    }

    fn distinct_value_count(&self, index: usize) -> Result<usize> {
        let series = self.series(index)?;
        Ok(series.drop_nulls().n_unique()?)
    }

    fn label_column(&self) -> Option<usize> {
        self.label
    }
}
