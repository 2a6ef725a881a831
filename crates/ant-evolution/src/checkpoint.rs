//! Checkpoint and restore of an evolution run.

use crate::engine::BestProgram;
use ant_core::{Error, Result};
use ant_ir::Node;
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Format version written into every checkpoint
pub const CHECKPOINT_VERSION: u32 = 1;

/// Exact position of the controller RNG
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    seed: [u8; 32],
    stream: u64,
    /// Little-endian `u128` word position
    word_pos: [u8; 16],
}

impl RngState {
    pub fn capture(rng: &ChaCha8Rng) -> Self {
        Self {
            seed: rng.get_seed(),
            stream: rng.get_stream(),
            word_pos: rng.get_word_pos().to_le_bytes(),
        }
    }

    pub fn restore(&self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::from_seed(self.seed);
        rng.set_stream(self.stream);
        rng.set_word_pos(u128::from_le_bytes(self.word_pos));
        rng
    }
}

/// Everything needed to continue a run where it stopped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    /// Index of the next generation to evaluate
    pub generation: u64,
    /// Seed the run was started with
    pub seed: u64,
    pub rng: RngState,
    pub population: Vec<Node>,
    pub best: Option<BestProgram>,
}

impl Checkpoint {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize checkpoint: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let checkpoint: Checkpoint = bincode::deserialize(bytes).map_err(|e| {
            Error::Serialization(format!("Failed to deserialize checkpoint: {}", e))
        })?;
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(Error::Serialization(format!(
                "unsupported checkpoint version {} (expected {})",
                checkpoint.version, CHECKPOINT_VERSION
            )));
        }
        Ok(checkpoint)
    }

    /// Write the checkpoint, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_bytes()?)?;
        info!(
            generation = self.generation,
            population = self.population.len(),
            "Checkpoint written to {:?}",
            path
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let checkpoint = Self::from_bytes(&fs::read(path)?)?;
        info!(
            generation = checkpoint.generation,
            timestamp = %checkpoint.timestamp,
            "Checkpoint loaded from {:?}",
            path
        );
        Ok(checkpoint)
    }
}
