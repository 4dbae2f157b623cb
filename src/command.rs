use serde::{Deserialize, Serialize};

/// The closed command vocabulary. Declaration order is the tie-break order
/// used by the resolver, so reordering variants changes observable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    VisualizeDataset,
    StatisticsForAllColumns,
    CompareTwoColumns,
    Predict,
    CompareDatasets,
}

impl Command {
    /// All commands, in declaration order.
    pub const ALL: [Command; 5] = [
        Command::VisualizeDataset,
        Command::StatisticsForAllColumns,
        Command::CompareTwoColumns,
        Command::Predict,
        Command::CompareDatasets,
    ];

    /// Canonical phrase the resolver matches user input against.
    pub fn phrase(&self) -> &'static str {
        match self {
            Command::VisualizeDataset => "visualize dataset",
            Command::StatisticsForAllColumns => "statistics for all columns",
            Command::CompareTwoColumns => "compare two columns",
            Command::Predict => "predict",
            Command::CompareDatasets => "compare datasets",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_fixed_and_ordered() {
        assert_eq!(Command::ALL.len(), 5);
        assert_eq!(Command::ALL[0], Command::VisualizeDataset);
        assert_eq!(Command::ALL[4], Command::CompareDatasets);
    }

    #[test]
    fn phrases_are_distinct() {
        let mut phrases: Vec<&str> = Command::ALL.iter().map(|c| c.phrase()).collect();
        phrases.sort();
        phrases.dedup();
        assert_eq!(phrases.len(), 5);
    }
}
