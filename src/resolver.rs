use crate::command::Command;
use strsim::levenshtein;

/// Maps noisy free-text input to the closest command in the fixed vocabulary,
/// rejecting input that is not within `max_distance` edits of any canonical
/// phrase. This is a nearest-neighbor classifier over five targets, not an NLP
/// system; it is only expected to absorb near-typos.
pub struct IntentResolver {
    /// Maximum edit distance for a match; anything farther is unrecognized.
    pub max_distance: usize,
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self { max_distance: 3 }
    }
}

impl IntentResolver {
    pub fn new(max_distance: usize) -> Self {
        Self { max_distance }
    }

    /// Normalize input for matching: lowercase, trim, collapse whitespace runs.
    /// Case- and whitespace-insensitivity is part of the resolution contract.
    pub fn normalize(&self, s: &str) -> String {
        let lowered = s.to_lowercase();
        regex::Regex::new(r"\s+")
            .unwrap()
            .replace_all(lowered.trim(), " ")
            .to_string()
    }

    /// Raw Levenshtein distance (unit insert/delete/substitute costs, no
    /// transposition). No normalization is applied here.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        levenshtein(a, b)
    }

    /// Resolve input to the command with the minimum edit distance.
    /// Ties break to the first-declared command; a minimum distance above
    /// `max_distance` is a normal "unrecognized" outcome, not an error.
    pub fn resolve(&self, input: &str) -> Option<Command> {
        let normalized = self.normalize(input);

        let mut best: Option<(Command, usize)> = None;
        for command in Command::ALL {
            let d = self.distance(&normalized, command.phrase());
            // Strict less-than keeps the earlier declaration on ties.
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((command, d));
            }
        }

        match best {
            Some((command, d)) if d <= self.max_distance => Some(command),
            _ => None,
        }
    }
}
