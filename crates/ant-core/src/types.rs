//! Core type definitions for the ant world.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position on the board (`x` is the column, `y` the row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given board dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: ((self.x % width) + width) % width,
            y: ((self.y % height) + height) % height,
        }
    }

    /// The neighbouring cell in `heading` direction, wrapped onto the board
    pub fn step(&self, heading: Heading, width: i32, height: i32) -> Self {
        let (dx, dy) = heading.to_delta();
        self.add(dx, dy).wrap(width, height)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction the ant is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Headings in clockwise order
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }

    fn index(&self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    /// Rotate 90 degrees clockwise
    pub fn rotate_cw(&self) -> Heading {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Rotate 90 degrees counter-clockwise
    pub fn rotate_ccw(&self) -> Heading {
        Self::ALL[(self.index() + 3) % 4]
    }

    pub fn to_char(&self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }
}

impl Default for Heading {
    fn default() -> Self {
        Heading::East
    }
}

/// State of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardState {
    Empty,
    Food,
    ConsumedFood,
}

impl BoardState {
    /// Character used when drawing the board
    pub fn to_char(&self) -> char {
        match self {
            BoardState::Empty => ' ',
            BoardState::Food => 'O',
            BoardState::ConsumedFood => '*',
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::Empty
    }
}
