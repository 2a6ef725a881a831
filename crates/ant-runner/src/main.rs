//! `ant-gp`: evolve ant programs, or replay a given one step by step.
//!
//! Configuration is read from the JSON file named by `ANT_GP_CONFIG`; every
//! field is optional and falls back to the Santa Fe reference setup.

mod telemetry;

use ant_core::RunnerConfig;
use ant_evolution::{Checkpoint, EvolutionEngine, TracingReporter};
use ant_ir::{to_rpn, TokenTable};
use ant_world::{run_to_completion, Action, AntSimulation, Board, Evaluator, ObservedSimulation};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Environment variable holding the config file path
const CONFIG_ENV: &str = "ANT_GP_CONFIG";

fn main() -> Result<()> {
    let config = load_config()?;

    telemetry::init_telemetry(&config.log_filter, config.log_json)?;
    info!("Starting ant-gp");

    let evaluator = load_evaluator(&config)?;

    match config.program.as_deref() {
        Some(program) => replay(&evaluator, program)?,
        None => evolve(&config, evaluator)?,
    }

    telemetry::shutdown_telemetry()?;
    Ok(())
}

fn load_config() -> Result<RunnerConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => RunnerConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {}", path)),
        Err(_) => Ok(RunnerConfig::default()),
    }
}

fn load_board(config: &RunnerConfig) -> Result<Board> {
    let simulation = &config.evolution.simulation;
    match &config.board_path {
        Some(path) => Board::from_file(path, simulation.board_width, simulation.board_height)
            .with_context(|| format!("failed to load board from {}", path)),
        None => Ok(Board::santa_fe()),
    }
}

fn load_evaluator(config: &RunnerConfig) -> Result<Evaluator> {
    let board = load_board(config)?;
    Evaluator::new(board, config.evolution.simulation.clone())
        .context("board does not fit the simulation config")
}

/// Run one program, drawing the board after every action
fn replay(evaluator: &Evaluator, rpn: &str) -> Result<()> {
    let table = TokenTable::new();
    let program = table
        .parse_rpn(rpn)
        .with_context(|| format!("failed to parse program {:?}", rpn))?;
    info!(program = %program, nodes = program.node_count(), "Replaying program");

    let sim = evaluator.simulation();
    println!("{}", sim.render());

    let mut observed = ObservedSimulation::new(sim, |action: Action, sim: &AntSimulation| {
        debug!(%action, position = %sim.position(), "ant acted");
        println!("{}\n{}", action, sim.render());
    });
    let passes = run_to_completion(&program, &mut observed, |observed| {
        observed.simulation().is_finished()
    });

    let sim = observed.into_inner();
    info!(
        event = "replay_complete",
        score = sim.score(),
        food_eaten = sim.food_eaten(),
        steps_remaining = sim.steps_remaining(),
        passes,
        "Replay finished"
    );
    Ok(())
}

fn evolve(config: &RunnerConfig, evaluator: Evaluator) -> Result<()> {
    let mut engine = match &config.resume_from {
        Some(path) => {
            let checkpoint = Checkpoint::load(path)
                .with_context(|| format!("failed to load checkpoint {}", path))?;
            EvolutionEngine::resume(config.evolution.clone(), evaluator, checkpoint)?
        }
        None => EvolutionEngine::new(config.evolution.clone(), evaluator)?,
    };

    let mut reporter = TracingReporter::new(config.report_interval);
    let summary = engine.run(&mut reporter)?;

    if let Some(path) = &config.checkpoint_path {
        engine
            .checkpoint()
            .save(path)
            .with_context(|| format!("failed to write checkpoint {}", path))?;
    }

    match &summary.best {
        Some(best) => {
            info!(
                score = best.score,
                generation = best.generation,
                generations_run = summary.generations_run,
                "Best program found"
            );
            println!("{}", to_rpn(&best.program));
        }
        None => info!("No generation was evaluated"),
    }
    Ok(())
}
