//! Generational evolution of ant programs.
//!
//! The engine evaluates a population in parallel, keeps the elites, breeds
//! offspring through tournament selection and subtree crossover, then refills
//! the rest with fresh random programs.

pub mod engine;
pub mod selection;
pub mod report;
pub mod checkpoint;

pub use engine::{BestProgram, EvolutionEngine, RunSummary};
pub use selection::{best_of, tournament};
pub use report::{Reporter, TracingReporter};
pub use checkpoint::{Checkpoint, RngState};
