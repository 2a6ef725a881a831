//! Fitness records and per-generation statistics.

use serde::{Deserialize, Serialize};

/// Score of one individual together with its population index.
///
/// Ordering is by score first and index second, so sorting a population's
/// records puts the best (lowest) score first and keeps ties in population order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FitnessRecord {
    pub score: i32,
    pub index: usize,
}

impl FitnessRecord {
    pub fn new(score: i32, index: usize) -> Self {
        Self { score, index }
    }

    pub fn is_perfect(&self) -> bool {
        self.score == 0
    }
}

/// Pair every score with its index and sort ascending by score.
///
/// The sort is stable, individuals with equal scores stay in index order.
pub fn rank(scores: &[i32]) -> Vec<FitnessRecord> {
    let mut records: Vec<FitnessRecord> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| FitnessRecord::new(score, index))
        .collect();
    records.sort_by_key(|record| record.score);
    records
}

/// Summary of one evaluated generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u64,
    pub best_score: i32,
    pub mean_score: f64,
    pub worst_score: i32,
    /// Best program of the generation in RPN
    pub best_program: String,
    pub best_node_count: usize,
}

impl GenerationStats {
    /// Build statistics from ranked records (best first)
    pub fn from_ranked(
        generation: u64,
        ranked: &[FitnessRecord],
        best_program: String,
        best_node_count: usize,
    ) -> Self {
        let best_score = ranked.first().map(|r| r.score).unwrap_or(i32::MAX);
        let worst_score = ranked.last().map(|r| r.score).unwrap_or(i32::MAX);
        let mean_score = if ranked.is_empty() {
            0.0
        } else {
            ranked.iter().map(|r| r.score as f64).sum::<f64>() / ranked.len() as f64
        };

        Self {
            generation,
            best_score,
            mean_score,
            worst_score,
            best_program,
            best_node_count,
        }
    }
}
