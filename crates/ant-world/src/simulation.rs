//! Ant simulation state machine.

use crate::board::Board;
use ant_core::{BoardState, Error, Heading, Position, Result, SimulationConfig};
use ant_ir::AntActions;
use std::fmt::Write;

/// One ant walking a board under a step budget.
///
/// Every action costs one step. Moving onto food eats it. The run is over
/// when the budget is spent or all food has been eaten.
#[derive(Debug, Clone)]
pub struct AntSimulation {
    board: Board,
    position: Position,
    heading: Heading,
    steps_remaining: i32,
    max_food: i32,
    food_eaten: i32,
}

impl AntSimulation {
    /// Fails when the configured `max_food` is below the food on the board
    pub fn new(board: Board, config: &SimulationConfig) -> Result<Self> {
        let max_food = resolve_max_food(&board, config)?;
        Ok(Self::with_max_food(board, config, max_food))
    }

    /// `max_food` must already cover every food cell of `board`
    pub(crate) fn with_max_food(board: Board, config: &SimulationConfig, max_food: i32) -> Self {
        let position = config.start.wrap(board.width(), board.height());

        let mut sim = Self {
            board,
            position,
            heading: config.heading,
            steps_remaining: config.max_steps,
            max_food,
            food_eaten: 0,
        };
        sim.eat();
        sim
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// May go below zero: the budget is only checked between program passes
    pub fn steps_remaining(&self) -> i32 {
        self.steps_remaining
    }

    pub fn max_food(&self) -> i32 {
        self.max_food
    }

    pub fn food_eaten(&self) -> i32 {
        self.food_eaten
    }

    /// Food still missing, lower is better
    pub fn score(&self) -> i32 {
        self.max_food - self.food_eaten
    }

    pub fn is_finished(&self) -> bool {
        self.steps_remaining <= 0 || self.score() <= 0
    }

    /// The board with the ant drawn on it, preceded by a status line
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "steps:{} score:{} fif:{}",
            self.steps_remaining,
            self.score(),
            u8::from(self.is_food_ahead())
        );
        for (y, row) in self.board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if Position::new(x as i32, y as i32) == self.position {
                    out.push(self.heading.to_char());
                } else {
                    out.push(cell.to_char());
                }
            }
            out.push('\n');
        }
        out
    }

    fn ahead(&self) -> Position {
        self.position
            .step(self.heading, self.board.width(), self.board.height())
    }

    fn eat(&mut self) {
        if self.board.get(self.position) == BoardState::Food {
            self.board.set(self.position, BoardState::ConsumedFood);
            self.food_eaten += 1;
        }
    }
}

/// Food total to score against: the configured value, or the food on `board`.
///
/// A configured total must be at least the board's food count, so that
/// `food_eaten <= max_food` holds and the score never drops below zero.
pub fn resolve_max_food(board: &Board, config: &SimulationConfig) -> Result<i32> {
    let on_board = board.food_count() as i32;
    match config.max_food {
        None => Ok(on_board),
        Some(max_food) if max_food >= on_board => Ok(max_food),
        Some(max_food) => Err(Error::InvalidConfig(format!(
            "max_food {} is below the {} food cells on the board",
            max_food, on_board
        ))),
    }
}

impl AntActions for AntSimulation {
    fn move_forward(&mut self) {
        self.steps_remaining -= 1;
        self.position = self.ahead();
        self.eat();
    }

    fn turn_left(&mut self) {
        self.steps_remaining -= 1;
        self.heading = self.heading.rotate_ccw();
    }

    fn turn_right(&mut self) {
        self.steps_remaining -= 1;
        self.heading = self.heading.rotate_cw();
    }

    fn is_food_ahead(&self) -> bool {
        self.board.get(self.ahead()) == BoardState::Food
    }
}
