use crate::dataset::{ColumnKind, DataSource};
use crate::error::{ChatError, Result};
use crate::stats::{summarize, ColumnSummary};
use serde::Serialize;
use tracing::info;

/// A resolved (dataset, column) reference, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub dataset: usize,
    pub column: usize,
}

/// One compared column, tagged with the dataset it came from so the
/// presentation layer can label it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub dataset: usize,
    pub summary: ColumnSummary,
}

/// The outcome of one pairing round: one entry per requested column, in
/// request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub entries: Vec<ComparisonEntry>,
}

fn ensure_numeric<D: DataSource>(data: &D, index: usize) -> Result<()> {
    match data.column_kind(index)? {
        ColumnKind::Numeric => Ok(()),
        ColumnKind::Categorical => Err(ChatError::NonNumeric(format!(
            "column '{}' (index {}) is not numeric",
            data.column_name(index)?,
            index
        ))),
    }
}

/// Compare two numeric columns of one dataset. Both indices are validated and
/// both columns must be numeric before either summary is computed; the
/// returned pair preserves the caller's order.
pub fn compare_columns<D: DataSource>(
    data: &D,
    first: usize,
    second: usize,
) -> Result<(ColumnSummary, ColumnSummary)> {
    ensure_numeric(data, first)?;
    ensure_numeric(data, second)?;
    Ok((summarize(data, first)?, summarize(data, second)?))
}

/// Where a comparison session is in its protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    AwaitingDatasetCount,
    AwaitingDatasets,
    AwaitingRoundCount,
    AwaitingPairSize,
    AwaitingPairs,
    Done,
}

/// Multi-dataset, multi-round comparison session, driven by discrete calls so
/// it can sit behind a chat loop, a script, or a GUI without re-deriving the
/// control flow. Each session owns its state; independent sessions do not
/// interfere.
///
/// Protocol: `set_dataset_count`, then one `add_dataset` per dataset, then
/// `set_round_count`, then per round `begin_round` followed by `push_pair`
/// until the round's pair count is reached. The last `push_pair` of a round
/// validates every tuple before computing anything; the first invalid tuple
/// aborts the session with no partial results.
pub struct ComparisonSession<D> {
    datasets: Vec<D>,
    expected_datasets: usize,
    rounds_remaining: usize,
    pair_size: usize,
    // (dataset number as entered, 1-based; column index) per pending tuple.
    pending: Vec<(usize, usize)>,
    state: SessionState,
}

impl<D: DataSource> ComparisonSession<D> {
    pub fn new() -> Self {
        Self {
            datasets: Vec::new(),
            expected_datasets: 0,
            rounds_remaining: 0,
            pair_size: 0,
            pending: Vec::new(),
            state: SessionState::AwaitingDatasetCount,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    fn expect_state(&self, expected: SessionState, call: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ChatError::Protocol(format!(
                "{} called in state {:?} (expected {:?})",
                call, self.state, expected
            )))
        }
    }

    pub fn set_dataset_count(&mut self, count: usize) -> Result<()> {
        self.expect_state(SessionState::AwaitingDatasetCount, "set_dataset_count")?;
        if count == 0 {
            return Err(ChatError::Protocol(
                "a comparison session needs at least one dataset".to_string(),
            ));
        }
        self.expected_datasets = count;
        self.state = SessionState::AwaitingDatasets;
        Ok(())
    }

    pub fn add_dataset(&mut self, dataset: D) -> Result<()> {
        self.expect_state(SessionState::AwaitingDatasets, "add_dataset")?;
        self.datasets.push(dataset);
        if self.datasets.len() == self.expected_datasets {
            info!("Comparison session has all {} datasets", self.expected_datasets);
            self.state = SessionState::AwaitingRoundCount;
        }
        Ok(())
    }

    pub fn set_round_count(&mut self, rounds: usize) -> Result<()> {
        self.expect_state(SessionState::AwaitingRoundCount, "set_round_count")?;
        self.rounds_remaining = rounds;
        self.state = if rounds == 0 {
            SessionState::Done
        } else {
            SessionState::AwaitingPairSize
        };
        Ok(())
    }

    pub fn begin_round(&mut self, pair_size: usize) -> Result<()> {
        self.expect_state(SessionState::AwaitingPairSize, "begin_round")?;
        if pair_size == 0 {
            return Err(ChatError::Protocol(
                "a pairing round needs at least one column".to_string(),
            ));
        }
        self.pair_size = pair_size;
        self.pending.clear();
        self.state = SessionState::AwaitingPairs;
        Ok(())
    }

    /// Add one (dataset, column) tuple to the current round. `dataset_number`
    /// is 1-based, as users enter it. Completing the round returns its
    /// `ComparisonResult`; a validation failure aborts the whole session.
    pub fn push_pair(
        &mut self,
        dataset_number: usize,
        column_index: usize,
    ) -> Result<Option<ComparisonResult>> {
        self.expect_state(SessionState::AwaitingPairs, "push_pair")?;
        self.pending.push((dataset_number, column_index));
        if self.pending.len() < self.pair_size {
            return Ok(None);
        }

        // All tuples collected: validate every one before computing any.
        let refs = match self.validate_round() {
            Ok(refs) => refs,
            Err(e) => {
                self.state = SessionState::Done;
                return Err(e);
            }
        };

        let mut entries = Vec::with_capacity(refs.len());
        for r in refs {
            entries.push(ComparisonEntry {
                dataset: r.dataset,
                summary: summarize(&self.datasets[r.dataset], r.column)?,
            });
        }

        self.pending.clear();
        self.rounds_remaining -= 1;
        self.state = if self.rounds_remaining == 0 {
            SessionState::Done
        } else {
            SessionState::AwaitingPairSize
        };
        info!(
            "Pairing round complete: {} columns compared, {} rounds remaining",
            entries.len(),
            self.rounds_remaining
        );

        Ok(Some(ComparisonResult { entries }))
    }

    /// Check every pending tuple: dataset number in range, column index valid
    /// for its dataset, column numeric. Fails on the first invalid tuple.
    fn validate_round(&self) -> Result<Vec<ColumnRef>> {
        let mut refs = Vec::with_capacity(self.pending.len());
        for &(dataset_number, column_index) in &self.pending {
            if dataset_number == 0 || dataset_number > self.datasets.len() {
                return Err(ChatError::Index(format!(
                    "dataset index {} is out of range (valid range is 1-{})",
                    dataset_number,
                    self.datasets.len()
                )));
            }
            let dataset = dataset_number - 1;
            let data = &self.datasets[dataset];
            if column_index >= data.column_count() {
                return Err(ChatError::Index(format!(
                    "dataset {} has no column {} ({} columns)",
                    dataset_number,
                    column_index,
                    data.column_count()
                )));
            }
            if data.column_kind(column_index)? != ColumnKind::Numeric {
                return Err(ChatError::NonNumeric(format!(
                    "column '{}' (index {}) in dataset {} is not numeric",
                    data.column_name(column_index)?,
                    column_index,
                    dataset_number
                )));
            }
            refs.push(ColumnRef { dataset, column: column_index });
        }
        Ok(refs)
    }
}

impl<D: DataSource> Default for ComparisonSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fake::FakeData;

    fn numeric_dataset() -> FakeData {
        FakeData {
            columns: vec![
                FakeData::numeric("a", 1.0, 5.0, 3.0, 2.0f64.sqrt()),
                FakeData::numeric("b", 0.0, 10.0, 5.0, 3.0),
                FakeData::categorical("label", 2),
            ],
            rows: 5,
        }
    }

    #[test]
    fn compare_columns_preserves_order() {
        let data = numeric_dataset();
        let (first, second) = compare_columns(&data, 1, 0).unwrap();
        assert_eq!(first.name(), "b");
        assert_eq!(second.name(), "a");
    }

    #[test]
    fn compare_columns_rejects_categorical() {
        let data = numeric_dataset();
        let err = compare_columns(&data, 0, 2).unwrap_err();
        assert!(matches!(err, ChatError::NonNumeric(_)));
    }

    #[test]
    fn compare_columns_rejects_bad_index_before_computing() {
        let data = numeric_dataset();
        assert!(matches!(
            compare_columns(&data, 7, 0),
            Err(ChatError::Index(_))
        ));
    }

    #[test]
    fn session_runs_two_rounds() {
        let mut session = ComparisonSession::new();
        session.set_dataset_count(2).unwrap();
        session.add_dataset(numeric_dataset()).unwrap();
        session.add_dataset(numeric_dataset()).unwrap();
        session.set_round_count(2).unwrap();

        session.begin_round(2).unwrap();
        assert_eq!(session.push_pair(1, 0).unwrap(), None);
        let result = session.push_pair(2, 1).unwrap().unwrap();
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries[0].dataset, 0);
        assert_eq!(result.entries[1].dataset, 1);
        assert_eq!(result.entries[1].summary.name(), "b");
        assert_eq!(session.state(), SessionState::AwaitingPairSize);

        session.begin_round(1).unwrap();
        let result = session.push_pair(1, 1).unwrap().unwrap();
        assert_eq!(result.entries.len(), 1);
        assert!(session.is_done());
    }

    #[test]
    fn invalid_dataset_number_aborts_round_with_no_results() {
        let mut session = ComparisonSession::new();
        session.set_dataset_count(2).unwrap();
        session.add_dataset(numeric_dataset()).unwrap();
        session.add_dataset(numeric_dataset()).unwrap();
        session.set_round_count(1).unwrap();
        session.begin_round(2).unwrap();

        // First tuple is valid, second references dataset 3 of 2. The round
        // must yield no summaries at all.
        assert_eq!(session.push_pair(1, 0).unwrap(), None);
        let err = session.push_pair(3, 0).unwrap_err();
        assert!(matches!(err, ChatError::Index(_)));
        assert!(session.is_done());
    }

    #[test]
    fn non_numeric_column_aborts_round() {
        let mut session = ComparisonSession::new();
        session.set_dataset_count(1).unwrap();
        session.add_dataset(numeric_dataset()).unwrap();
        session.set_round_count(1).unwrap();
        session.begin_round(2).unwrap();

        session.push_pair(1, 0).unwrap();
        let err = session.push_pair(1, 2).unwrap_err();
        assert!(matches!(err, ChatError::NonNumeric(_)));
        assert!(session.is_done());
    }

    #[test]
    fn dataset_number_zero_is_rejected() {
        let mut session = ComparisonSession::new();
        session.set_dataset_count(1).unwrap();
        session.add_dataset(numeric_dataset()).unwrap();
        session.set_round_count(1).unwrap();
        session.begin_round(1).unwrap();

        assert!(matches!(session.push_pair(0, 0), Err(ChatError::Index(_))));
        assert!(session.is_done());
    }

    #[test]
    fn calls_out_of_order_are_protocol_errors() {
        let mut session: ComparisonSession<FakeData> = ComparisonSession::new();
        assert!(matches!(
            session.begin_round(1),
            Err(ChatError::Protocol(_))
        ));
        assert!(matches!(
            session.push_pair(1, 0),
            Err(ChatError::Protocol(_))
        ));
        // Protocol misuse does not advance the session.
        assert_eq!(session.state(), SessionState::AwaitingDatasetCount);
    }

    #[test]
    fn zero_rounds_completes_immediately() {
        let mut session = ComparisonSession::new();
        session.set_dataset_count(1).unwrap();
        session.add_dataset(numeric_dataset()).unwrap();
        session.set_round_count(0).unwrap();
        assert!(session.is_done());
    }
}
