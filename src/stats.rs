use crate::dataset::{ColumnKind, DataSource};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Descriptive statistics for one column. The two variants are mutually
/// exclusive: a categorical column never carries numeric aggregates and a
/// numeric column never carries a distinct count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ColumnSummary {
    Numeric {
        name: String,
        min: f64,
        max: f64,
        mean: f64,
        std_dev: f64,
    },
    Categorical {
        name: String,
        distinct_count: usize,
    },
}

impl ColumnSummary {
    pub fn name(&self) -> &str {
        match self {
            ColumnSummary::Numeric { name, .. } => name,
            ColumnSummary::Categorical { name, .. } => name,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnSummary::Numeric { .. } => ColumnKind::Numeric,
            ColumnSummary::Categorical { .. } => ColumnKind::Categorical,
        }
    }
}

/// Summarize one column. Pure query: same dataset and index always yield the
/// same summary. Values are exact; rounding is the presentation layer's job.
pub fn summarize<D: DataSource>(data: &D, index: usize) -> Result<ColumnSummary> {
    let name = data.column_name(index)?;
    match data.column_kind(index)? {
        ColumnKind::Numeric => {
            let aggregates = data.numeric_aggregates(index)?;
            Ok(ColumnSummary::Numeric {
                name,
                min: aggregates.min,
                max: aggregates.max,
                mean: aggregates.mean,
                std_dev: aggregates.std_dev,
            })
        }
        ColumnKind::Categorical => Ok(ColumnSummary::Categorical {
            name,
            distinct_count: data.distinct_value_count(index)?,
        }),
    }
}

/// Summaries for every column, in column order.
pub fn summarize_all<D: DataSource>(data: &D) -> Result<Vec<ColumnSummary>> {
    (0..data.column_count())
        .map(|index| summarize(data, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fake::FakeData;
    use crate::error::ChatError;

    fn sample() -> FakeData {
        FakeData {
            columns: vec![
                FakeData::numeric("score", 1.0, 5.0, 3.0, 2.0f64.sqrt()),
                FakeData::categorical("city", 4),
            ],
            rows: 5,
        }
    }

    #[test]
    fn numeric_summary_carries_aggregates_only() {
        let summary = summarize(&sample(), 0).unwrap();
        match summary {
            ColumnSummary::Numeric { name, min, max, mean, std_dev } => {
                assert_eq!(name, "score");
                assert_eq!(min, 1.0);
                assert_eq!(max, 5.0);
                assert_eq!(mean, 3.0);
                assert!((std_dev - 1.4142).abs() < 1e-3);
            }
            other => panic!("expected numeric summary, got {:?}", other),
        }
    }

    #[test]
    fn categorical_summary_carries_distinct_count_only() {
        let summary = summarize(&sample(), 1).unwrap();
        assert_eq!(
            summary,
            ColumnSummary::Categorical { name: "city".to_string(), distinct_count: 4 }
        );
    }

    #[test]
    fn out_of_range_column_fails() {
        assert!(matches!(summarize(&sample(), 9), Err(ChatError::Index(_))));
    }

    #[test]
    fn summarize_is_idempotent() {
        let data = sample();
        assert_eq!(summarize(&data, 0).unwrap(), summarize(&data, 0).unwrap());
    }

    #[test]
    fn summarize_all_covers_every_column_in_order() {
        let summaries = summarize_all(&sample()).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name(), "score");
        assert_eq!(summaries[1].name(), "city");
    }
}
