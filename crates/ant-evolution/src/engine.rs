//! Evolution engine: parallel evaluation, selection, breeding and refill.

use crate::checkpoint::{Checkpoint, RngState, CHECKPOINT_VERSION};
use crate::report::Reporter;
use crate::selection::tournament;
use ant_core::{rank, Error, EvolutionConfig, FitnessRecord, GenerationStats, Result};
use ant_ir::{crossover, to_rpn, Generator, Node};
use ant_world::{Evaluator, Fitness};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, instrument, warn};

/// Fresh programs are generated in chunks of this size, each chunk with its
/// own RNG seeded from the controller. Results do not depend on the number
/// of worker threads.
const REFILL_CHUNK: usize = 64;

/// Best program seen so far in a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestProgram {
    pub program: Node,
    pub score: i32,
    /// Generation in which it was first evaluated
    pub generation: u64,
}

/// Outcome of [`EvolutionEngine::run`]
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub generations_run: u64,
    pub stopped_early: bool,
    pub best: Option<BestProgram>,
}

pub struct EvolutionEngine<F: Fitness = Evaluator> {
    config: EvolutionConfig,
    fitness: F,
    generator: Generator,
    pool: rayon::ThreadPool,
    rng: ChaCha8Rng,
    population: Vec<Node>,
    generation: u64,
    best: Option<BestProgram>,
}

impl<F: Fitness> EvolutionEngine<F> {
    /// Start a run with a random initial population
    pub fn new(config: EvolutionConfig, fitness: F) -> Result<Self> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut engine = Self::assemble(config, fitness, rng)?;
        engine.population = engine.fresh_programs(engine.config.population_size)?;

        info!(
            population_size = engine.config.population_size,
            num_workers = engine.config.num_workers,
            seed = engine.config.seed,
            "Evolution engine initialised"
        );
        Ok(engine)
    }

    /// Continue a run from a checkpoint
    pub fn resume(config: EvolutionConfig, fitness: F, checkpoint: Checkpoint) -> Result<Self> {
        if checkpoint.population.len() != config.population_size {
            return Err(Error::InvalidConfig(format!(
                "checkpoint holds {} programs, population_size is {}",
                checkpoint.population.len(),
                config.population_size
            )));
        }
        if checkpoint.seed != config.seed {
            warn!(
                checkpoint_seed = checkpoint.seed,
                config_seed = config.seed,
                "Resuming with the checkpoint's RNG state, configured seed is ignored"
            );
        }

        let mut engine = Self::assemble(config, fitness, checkpoint.rng.restore())?;
        engine.population = checkpoint.population;
        engine.generation = checkpoint.generation;
        engine.best = checkpoint.best;

        info!(generation = engine.generation, "Evolution engine resumed");
        Ok(engine)
    }

    fn assemble(config: EvolutionConfig, fitness: F, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        let generator = Generator::new(&config.generator)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_workers)
            .thread_name(|index| format!("ant-gp-worker-{}", index))
            .build()
            .map_err(|e| Error::Worker(format!("failed to build worker pool: {}", e)))?;

        Ok(Self {
            config,
            fitness,
            generator,
            pool,
            rng,
            population: Vec::new(),
            generation: 0,
            best: None,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn population(&self) -> &[Node] {
        &self.population
    }

    /// Index of the next generation to evaluate
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn best(&self) -> Option<&BestProgram> {
        self.best.as_ref()
    }

    /// Snapshot of the run that [`EvolutionEngine::resume`] accepts
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            timestamp: chrono::Utc::now(),
            generation: self.generation,
            seed: self.config.seed,
            rng: RngState::capture(&self.rng),
            population: self.population.clone(),
            best: self.best.clone(),
        }
    }

    /// Score every program of the current population in parallel
    pub fn evaluate(&self) -> Result<Vec<i32>> {
        let fitness = &self.fitness;
        let population = &self.population;
        self.on_workers("evaluation", || {
            population
                .par_iter()
                .map(|program| fitness.fitness(program))
                .collect()
        })
    }

    /// Evaluate the current generation and replace it with the next one
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn step(&mut self) -> Result<GenerationStats> {
        let scores = self.evaluate()?;
        let ranked = rank(&scores);
        let leader = ranked.first().copied().ok_or_else(|| {
            Error::EmptyPopulation("no programs to evaluate".to_string())
        })?;

        let best_program = &self.population[leader.index];
        let stats = GenerationStats::from_ranked(
            self.generation,
            &ranked,
            to_rpn(best_program),
            best_program.node_count(),
        );
        self.record_best(leader);

        let next = self.breed(&scores, &ranked)?;
        debug!(
            best_score = stats.best_score,
            mean_score = stats.mean_score,
            next_size = next.len(),
            "Generation bred"
        );

        self.population = next;
        self.generation += 1;
        Ok(stats)
    }

    /// Step until the configured generation count is reached, or until a
    /// perfect program appears if `stop_on_perfect` is set
    #[instrument(skip(self, reporter), fields(generations = self.config.generations))]
    pub fn run<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<RunSummary> {
        info!(
            start = self.generation,
            "Starting evolution for {} generations",
            self.config.generations
        );

        let start = self.generation;
        let mut stopped_early = false;
        while self.generation < self.config.generations {
            let stats = self.step()?;
            reporter.report(&stats);

            if self.config.stop_on_perfect && stats.best_score == 0 {
                info!(
                    generation = stats.generation,
                    best_program = %stats.best_program,
                    "Perfect program found, stopping"
                );
                stopped_early = true;
                break;
            }
        }

        let summary = RunSummary {
            generations_run: self.generation - start,
            stopped_early,
            best: self.best.clone(),
        };
        info!(
            event = "run_complete",
            generations_run = summary.generations_run,
            best_score = summary.best.as_ref().map(|b| b.score),
            "Evolution finished"
        );
        Ok(summary)
    }

    fn record_best(&mut self, leader: FitnessRecord) {
        let improved = self
            .best
            .as_ref()
            .map_or(true, |best| leader.score < best.score);
        if improved {
            let program = self.population[leader.index].clone();
            info!(
                generation = self.generation,
                score = leader.score,
                program = %to_rpn(&program),
                "New best program"
            );
            self.best = Some(BestProgram {
                program,
                score: leader.score,
                generation: self.generation,
            });
        }
    }

    /// Elites, then crossover offspring up to the breed target, then fresh
    /// random programs up to the population size
    fn breed(&mut self, scores: &[i32], ranked: &[FitnessRecord]) -> Result<Vec<Node>> {
        let size = self.config.population_size;
        let target = self.config.breed_target();
        let mut next = Vec::with_capacity(size);

        next.extend(
            ranked
                .iter()
                .take(self.config.elite_count)
                .map(|record| self.population[record.index].clone()),
        );

        while next.len() < target {
            let first = self.select(scores)?;
            let second = self.select(scores)?;
            let (child_a, child_b) = crossover(
                &self.population[first],
                &self.population[second],
                &mut self.rng,
            );
            next.push(child_a);
            if next.len() < target {
                next.push(child_b);
            }
        }

        let missing = size - next.len();
        next.extend(self.fresh_programs(missing)?);
        Ok(next)
    }

    fn select(&mut self, scores: &[i32]) -> Result<usize> {
        tournament(scores, self.config.tournament_size, &mut self.rng)
            .ok_or_else(|| Error::EmptyPopulation("no parents to select from".to_string()))
    }

    /// Generate `count` random programs on the worker pool
    fn fresh_programs(&mut self, count: usize) -> Result<Vec<Node>> {
        let seeds: Vec<(u64, usize)> = (0..count)
            .step_by(REFILL_CHUNK)
            .map(|start| (self.rng.gen(), REFILL_CHUNK.min(count - start)))
            .collect();

        let generator = &self.generator;
        let chunks: Vec<Vec<Node>> = self.on_workers("refill", || {
            seeds
                .par_iter()
                .map(|&(seed, len)| {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    (0..len).map(|_| generator.generate(&mut rng)).collect()
                })
                .collect()
        })?;

        Ok(chunks.into_iter().flatten().collect())
    }

    /// Run `work` on the pool, turning a worker panic into an error
    fn on_workers<T, W>(&self, phase: &str, work: W) -> Result<T>
    where
        T: Send,
        W: FnOnce() -> T + Send,
    {
        panic::catch_unwind(AssertUnwindSafe(|| self.pool.install(work))).map_err(|payload| {
            Error::Worker(format!(
                "{} worker panicked: {}",
                phase,
                panic_message(&*payload)
            ))
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ant_core::{GeneratorConfig, SimulationConfig};
    use ant_world::Board;

    fn small_config(seed: u64) -> EvolutionConfig {
        EvolutionConfig {
            population_size: 60,
            generations: 4,
            elite_count: 3,
            tournament_size: 4,
            seed,
            num_workers: 2,
            generator: GeneratorConfig {
                min_height: 1,
                max_height: 4,
            },
            ..Default::default()
        }
    }

    fn santa_fe_engine(config: EvolutionConfig) -> EvolutionEngine {
        let evaluator = Evaluator::new(Board::santa_fe(), SimulationConfig::default()).unwrap();
        EvolutionEngine::new(config, evaluator).unwrap()
    }

    #[test]
    fn test_initial_population() {
        let engine = santa_fe_engine(small_config(1));
        assert_eq!(engine.population().len(), 60);
        assert_eq!(engine.generation(), 0);
        assert!(engine.best().is_none());
        assert!(engine.population().iter().all(|p| !p.is_terminal()));
    }

    #[test]
    fn test_population_size_is_constant() {
        let mut engine = santa_fe_engine(small_config(2));
        for _ in 0..3 {
            engine.step().unwrap();
            assert_eq!(engine.population().len(), 60);
        }
        assert_eq!(engine.generation(), 3);
    }

    #[test]
    fn test_elites_lead_next_generation() {
        let mut engine = santa_fe_engine(small_config(3));
        let scores = engine.evaluate().unwrap();
        let ranked = rank(&scores);
        let elites: Vec<Node> = ranked
            .iter()
            .take(3)
            .map(|r| engine.population()[r.index].clone())
            .collect();

        let stats = engine.step().unwrap();
        assert_eq!(&engine.population()[..3], elites.as_slice());
        assert_eq!(stats.best_score, ranked[0].score);
        assert_eq!(stats.best_program, to_rpn(&elites[0]));
    }

    #[test]
    fn test_best_score_never_regresses() {
        let mut engine = santa_fe_engine(small_config(4));
        let mut previous = i32::MAX;
        for _ in 0..4 {
            let stats = engine.step().unwrap();
            assert!(stats.best_score <= previous);
            previous = stats.best_score;
        }
        assert_eq!(engine.best().unwrap().score, previous);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = santa_fe_engine(small_config(7));
        let mut b = santa_fe_engine(EvolutionConfig {
            num_workers: 3,
            ..small_config(7)
        });
        for _ in 0..3 {
            assert_eq!(a.step().unwrap(), b.step().unwrap());
        }
        assert_eq!(a.population(), b.population());

        let c = santa_fe_engine(small_config(8));
        assert_ne!(a.population(), c.population());
    }

    #[test]
    fn test_run_reports_every_generation() {
        let mut engine = santa_fe_engine(small_config(5));
        let mut generations = Vec::new();
        let summary = engine
            .run(&mut |stats: &GenerationStats| generations.push(stats.generation))
            .unwrap();

        assert_eq!(generations, vec![0, 1, 2, 3]);
        assert_eq!(summary.generations_run, 4);
        assert!(!summary.stopped_early);
        assert!(summary.best.is_some());
    }

    #[test]
    fn test_stop_on_perfect() {
        let config = EvolutionConfig {
            stop_on_perfect: true,
            ..small_config(6)
        };
        let mut engine = EvolutionEngine::new(config, |_: &Node| 0).unwrap();
        let summary = engine.run(&mut |_: &GenerationStats| {}).unwrap();

        assert!(summary.stopped_early);
        assert_eq!(summary.generations_run, 1);
        assert_eq!(summary.best.unwrap().score, 0);
    }

    #[test]
    fn test_crossover_share_follows_fraction() {
        // no breeding: everything after the elites is a fresh random program
        let config = EvolutionConfig {
            crossover_fraction: 0.0,
            elite_count: 1,
            ..small_config(9)
        };
        let mut engine = EvolutionEngine::new(config, |program: &Node| program.node_count() as i32)
            .unwrap();
        let smallest = engine
            .population()
            .iter()
            .min_by_key(|p| p.node_count())
            .cloned()
            .unwrap();

        engine.step().unwrap();
        assert_eq!(engine.population()[0].node_count(), smallest.node_count());
        assert_eq!(engine.population().len(), 60);
    }

    #[test]
    fn test_worker_panic_becomes_error() {
        let mut engine =
            EvolutionEngine::new(small_config(10), |_: &Node| -> i32 { panic!("evaluator blew up") })
                .unwrap();
        let err = engine.step().unwrap_err();
        assert!(matches!(err, Error::Worker(msg) if msg.contains("evaluation")));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EvolutionConfig {
            population_size: 0,
            ..small_config(1)
        };
        let result = EvolutionEngine::new(config, |_: &Node| 0);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_resume_continues_identically() {
        let mut uninterrupted = santa_fe_engine(small_config(11));
        let mut interrupted = santa_fe_engine(small_config(11));

        uninterrupted.step().unwrap();
        interrupted.step().unwrap();
        let bytes = interrupted.checkpoint().to_bytes().unwrap();
        drop(interrupted);

        let checkpoint = Checkpoint::from_bytes(&bytes).unwrap();
        assert_eq!(checkpoint.generation, 1);
        let mut resumed = EvolutionEngine::resume(
            small_config(11),
            Evaluator::new(Board::santa_fe(), SimulationConfig::default()).unwrap(),
            checkpoint,
        )
        .unwrap();

        for _ in 0..2 {
            assert_eq!(uninterrupted.step().unwrap(), resumed.step().unwrap());
        }
        assert_eq!(uninterrupted.population(), resumed.population());
        assert_eq!(uninterrupted.best(), resumed.best());
    }

    #[test]
    fn test_resume_rejects_wrong_population_size() {
        let engine = santa_fe_engine(small_config(12));
        let checkpoint = engine.checkpoint();
        let config = EvolutionConfig {
            population_size: 30,
            ..small_config(12)
        };
        let result = EvolutionEngine::resume(config, |_: &Node| 0, checkpoint);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
