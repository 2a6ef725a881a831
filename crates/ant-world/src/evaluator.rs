//! Fitness evaluation of ant programs.

use crate::board::Board;
use crate::simulation::{resolve_max_food, AntSimulation};
use ant_core::{Result, SimulationConfig};
use ant_ir::{execute, AntActions, Node};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Outcome of running one program to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Food left uneaten (0 is perfect)
    pub score: i32,
    pub food_eaten: i32,
    /// Can be negative, the budget is only checked between passes
    pub steps_remaining: i32,
    /// Complete runs of the program tree
    pub passes: u32,
}

/// Scores a program, lower is better.
///
/// The evolution engine is generic over this so it can run against any
/// objective, including plain closures.
pub trait Fitness: Sync {
    fn fitness(&self, program: &Node) -> i32;
}

impl<F> Fitness for F
where
    F: Fn(&Node) -> i32 + Sync,
{
    fn fitness(&self, program: &Node) -> i32 {
        self(program)
    }
}

/// Runs programs against fresh copies of one board
#[derive(Debug, Clone)]
pub struct Evaluator {
    board: Board,
    config: SimulationConfig,
    max_food: i32,
}

impl Evaluator {
    /// Fails when the configured `max_food` is below the food on `board`
    pub fn new(board: Board, config: SimulationConfig) -> Result<Self> {
        let max_food = resolve_max_food(&board, &config)?;
        Ok(Self {
            board,
            config,
            max_food,
        })
    }

    /// The Santa Fe trail under the default 400 step budget
    pub fn santa_fe() -> Self {
        let board = Board::santa_fe();
        let max_food = board.food_count() as i32;
        Self {
            board,
            config: SimulationConfig {
                max_food: Some(max_food),
                ..Default::default()
            },
            max_food,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// A fresh simulation on this evaluator's board
    pub fn simulation(&self) -> AntSimulation {
        AntSimulation::with_max_food(self.board.clone(), &self.config, self.max_food)
    }

    /// Repeat the whole program until the simulation finishes
    pub fn evaluate(&self, program: &Node) -> Evaluation {
        let mut sim = self.simulation();
        let passes = run_to_completion(program, &mut sim, |sim| sim.is_finished());

        let evaluation = Evaluation {
            score: sim.score(),
            food_eaten: sim.food_eaten(),
            steps_remaining: sim.steps_remaining(),
            passes,
        };
        trace!(
            score = evaluation.score,
            passes = evaluation.passes,
            steps_remaining = evaluation.steps_remaining,
            "program evaluated"
        );
        evaluation
    }
}

impl Fitness for Evaluator {
    fn fitness(&self, program: &Node) -> i32 {
        self.evaluate(program).score
    }
}

/// Execute `program` against `ant` until `finished` holds, checking only
/// between passes. Returns the number of passes.
pub fn run_to_completion<A>(program: &Node, ant: &mut A, finished: impl Fn(&A) -> bool) -> u32
where
    A: AntActions,
{
    let mut passes = 0;
    while !finished(ant) {
        execute(program, ant);
        passes += 1;
    }
    passes
}
