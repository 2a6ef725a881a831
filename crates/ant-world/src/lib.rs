//! The artificial-ant world.
//!
//! A toroidal food board, the ant simulation that programs drive, and the
//! evaluator that turns a program into a fitness score.

pub mod board;
pub mod santa_fe;
pub mod simulation;
pub mod observed;
pub mod evaluator;

pub use board::Board;
pub use simulation::AntSimulation;
pub use observed::{Action, ObservedSimulation};
pub use evaluator::{run_to_completion, Evaluation, Evaluator, Fitness};
