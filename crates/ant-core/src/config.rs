//! Configuration types for simulation, generation and evolution.

use crate::error::{Error, Result};
use crate::types::{Heading, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of columns expected when loading a board
    pub board_width: i32,
    /// Number of rows expected when loading a board
    pub board_height: i32,
    /// Step budget for one evaluation
    pub max_steps: i32,
    /// Food available to score against, `None` counts the food on the board
    pub max_food: Option<i32>,
    /// Starting cell of the ant
    pub start: Position,
    /// Starting heading of the ant
    pub heading: Heading,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board_width: 32,
            board_height: 32,
            max_steps: 400,
            max_food: Some(89),
            start: Position::new(0, 0),
            heading: Heading::East,
        }
    }
}

/// Random program generation bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Depth below which only branch nodes are drawn
    pub min_height: u32,
    /// Depth at which only leaf nodes are drawn
    pub max_height: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_height: 2,
            max_height: 5,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_height < 1 {
            return Err(Error::InvalidConfig(
                "max_height must be at least 1".to_string(),
            ));
        }
        if self.min_height > self.max_height {
            return Err(Error::InvalidConfig(format!(
                "min_height {} is larger than max_height {}",
                self.min_height, self.max_height
            )));
        }
        Ok(())
    }
}

/// Evolutionary loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Individuals per generation
    pub population_size: usize,
    /// Number of generations to run
    pub generations: u64,
    /// Best individuals copied unchanged into the next generation
    pub elite_count: usize,
    /// Candidates drawn per tournament
    pub tournament_size: usize,
    /// Share of the next generation filled by crossover offspring
    pub crossover_fraction: f64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Threads in the evaluation/refill pool
    pub num_workers: usize,
    /// Stop as soon as a program collects all food
    pub stop_on_perfect: bool,
    pub generator: GeneratorConfig,
    pub simulation: SimulationConfig,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 5000,
            generations: 5000,
            elite_count: 10,
            tournament_size: 4,
            crossover_fraction: 2.0 / 3.0,
            seed: 5489,
            num_workers: 4,
            stop_on_perfect: false,
            generator: GeneratorConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl EvolutionConfig {
    /// Number of slots filled by crossover offspring (elites included)
    pub fn breed_target(&self) -> usize {
        let target = (self.population_size as f64) * self.crossover_fraction;
        // absorb representation error, e.g. 30 * (2/3)
        ((target + 1e-9).floor() as usize).min(self.population_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig(
                "population_size must be positive".to_string(),
            ));
        }
        if self.elite_count > self.population_size {
            return Err(Error::InvalidConfig(format!(
                "elite_count {} exceeds population_size {}",
                self.elite_count, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(Error::InvalidConfig(
                "tournament_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_fraction) {
            return Err(Error::InvalidConfig(format!(
                "crossover_fraction {} is outside [0, 1]",
                self.crossover_fraction
            )));
        }
        if self.num_workers == 0 {
            return Err(Error::InvalidConfig(
                "num_workers must be positive".to_string(),
            ));
        }
        if self.simulation.max_steps <= 0 {
            return Err(Error::InvalidConfig(
                "max_steps must be positive".to_string(),
            ));
        }
        self.generator.validate()
    }
}

/// Runner binary configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub evolution: EvolutionConfig,
    /// Board file, the Santa Fe trail is used when absent
    pub board_path: Option<String>,
    /// RPN program to replay instead of evolving one
    pub program: Option<String>,
    /// Where to write the final checkpoint
    pub checkpoint_path: Option<String>,
    /// Checkpoint to resume evolution from
    pub resume_from: Option<String>,
    /// Log a generation summary every this many generations
    pub report_interval: u64,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            evolution: EvolutionConfig::default(),
            board_path: None,
            program: None,
            checkpoint_path: None,
            resume_from: None,
            report_interval: 10,
            log_filter: "info,ant_evolution=debug".to_string(),
            log_json: false,
        }
    }
}

impl RunnerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
