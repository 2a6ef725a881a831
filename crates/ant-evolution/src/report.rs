//! Per-generation reporting.

use ant_core::GenerationStats;
use tracing::{debug, info};

/// Receives the statistics of every evaluated generation
pub trait Reporter {
    fn report(&mut self, stats: &GenerationStats);
}

impl<F> Reporter for F
where
    F: FnMut(&GenerationStats),
{
    fn report(&mut self, stats: &GenerationStats) {
        self(stats)
    }
}

/// Logs a generation summary every `interval` generations, and a debug line
/// for the others.
#[derive(Debug, Clone)]
pub struct TracingReporter {
    interval: u64,
}

impl TracingReporter {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }

    fn is_summary(&self, generation: u64) -> bool {
        generation % self.interval == 0
    }
}

impl Default for TracingReporter {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Reporter for TracingReporter {
    fn report(&mut self, stats: &GenerationStats) {
        if self.is_summary(stats.generation) {
            info!(
                event = "generation_summary",
                generation = stats.generation,
                best_score = stats.best_score,
                mean_score = stats.mean_score,
                worst_score = stats.worst_score,
                best_node_count = stats.best_node_count,
                best_program = %stats.best_program,
                "Generation {} best score {}",
                stats.generation,
                stats.best_score
            );
        } else {
            debug!(
                generation = stats.generation,
                best_score = stats.best_score,
                mean_score = stats.mean_score,
                "generation evaluated"
            );
        }
    }
}
