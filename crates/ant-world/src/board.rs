//! Toroidal food board.

use crate::santa_fe;
use ant_core::{BoardState, Error, Position, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Character marking a food cell in board text
pub const FOOD_CHAR: char = 'X';

/// A 2D toroidal grid of board cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<BoardState>,
}

impl Board {
    /// An empty board. Both dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::BoardFormat(format!(
                "board dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let cells = width.checked_mul(height).ok_or_else(|| {
            Error::BoardFormat(format!("board {}x{} has too many cells", width, height))
        })?;
        Ok(Self {
            width,
            height,
            cells: vec![BoardState::Empty; cells as usize],
        })
    }

    /// Parse `height` lines of exactly `width` characters; `X` is food, any
    /// other character is empty.
    pub fn from_text(text: &str, width: i32, height: i32) -> Result<Self> {
        let mut board = Self::new(width, height)?;
        let mut lines = text.lines().map(|line| line.trim_end_matches('\r'));

        for y in 0..height {
            let line = lines.next().ok_or_else(|| {
                Error::BoardFormat(format!("expected {} lines, found {}", height, y))
            })?;

            let length = line.chars().count();
            if length != width as usize {
                return Err(Error::BoardFormat(format!(
                    "line {} has {} characters, expected {}",
                    y + 1,
                    length,
                    width
                )));
            }

            for (x, c) in line.chars().enumerate() {
                if c == FOOD_CHAR {
                    board.set(Position::new(x as i32, y), BoardState::Food);
                }
            }
        }

        if let Some((offset, _)) = lines.enumerate().find(|(_, line)| !line.trim().is_empty()) {
            return Err(Error::BoardFormat(format!(
                "unexpected content on line {} after the last board row",
                height as usize + offset + 1
            )));
        }

        Ok(board)
    }

    /// Read a board from a text file
    pub fn from_file(path: impl AsRef<Path>, width: i32, height: i32) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text, width, height)
    }

    /// The Santa Fe trail: 32x32 with 89 food cells
    pub fn santa_fe() -> Self {
        let mut board = Self {
            width: santa_fe::WIDTH,
            height: santa_fe::HEIGHT,
            cells: vec![BoardState::Empty; (santa_fe::WIDTH * santa_fe::HEIGHT) as usize],
        };
        for (y, row) in santa_fe::TRAIL.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == FOOD_CHAR {
                    board.set(Position::new(x as i32, y as i32), BoardState::Food);
                }
            }
        }
        board
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> BoardState {
        self.cells[self.index(pos)]
    }

    /// Set cell at position (with toroidal wrapping)
    pub fn set(&mut self, pos: Position, state: BoardState) {
        let index = self.index(pos);
        self.cells[index] = state;
    }

    /// Number of cells still holding food
    pub fn food_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == BoardState::Food)
            .count()
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[BoardState]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    fn index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.width, self.height);
        (wrapped.y * self.width + wrapped.x) as usize
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(BoardState::to_char).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_santa_fe_trail() {
        let board = Board::santa_fe();
        assert_eq!(board.width(), 32);
        assert_eq!(board.height(), 32);
        assert_eq!(board.food_count(), 89);
        assert_eq!(board.get(Position::new(1, 0)), BoardState::Food);
        assert_eq!(board.get(Position::new(0, 0)), BoardState::Empty);
    }

    #[test]
    fn test_toroidal_access() {
        let mut board = Board::new(4, 3).unwrap();
        board.set(Position::new(-1, -1), BoardState::Food);
        assert_eq!(board.get(Position::new(3, 2)), BoardState::Food);
        assert_eq!(board.get(Position::new(7, 5)), BoardState::Food);
        assert_eq!(board.food_count(), 1);
    }

    #[test]
    fn test_from_text() {
        let board = Board::from_text("X.\r\n.X\n\n\n", 2, 2).unwrap();
        assert_eq!(board.get(Position::new(0, 0)), BoardState::Food);
        assert_eq!(board.get(Position::new(1, 0)), BoardState::Empty);
        assert_eq!(board.get(Position::new(1, 1)), BoardState::Food);
        assert_eq!(board.food_count(), 2);
    }

    #[test]
    fn test_santa_fe_text_matches_built_in() {
        let text = santa_fe::TRAIL.join("\n");
        let board = Board::from_text(&text, 32, 32).unwrap();
        assert_eq!(board, Board::santa_fe());
    }

    #[test]
    fn test_line_length_mismatch() {
        let err = Board::from_text("XX\nX\n", 2, 2).unwrap_err();
        assert!(matches!(err, Error::BoardFormat(msg) if msg.contains("line 2")));
    }

    #[test]
    fn test_too_few_lines() {
        let err = Board::from_text("XX\n", 2, 2).unwrap_err();
        assert!(matches!(err, Error::BoardFormat(msg) if msg.contains("found 1")));
    }

    #[test]
    fn test_extra_rows_rejected() {
        let err = Board::from_text("XX\nXX\n\nXX\n", 2, 2).unwrap_err();
        assert!(matches!(err, Error::BoardFormat(msg) if msg.contains("line 4")));
    }

    #[test]
    fn test_bad_dimensions() {
        assert!(matches!(Board::new(0, 3), Err(Error::BoardFormat(_))));
        assert!(matches!(Board::from_text("", 2, -1), Err(Error::BoardFormat(_))));
    }

    #[test]
    fn test_oversized_dimensions() {
        let err = Board::new(i32::MAX, 2).unwrap_err();
        assert!(matches!(err, Error::BoardFormat(msg) if msg.contains("too many cells")));
        assert!(matches!(
            Board::from_text("", 65536, 65536),
            Err(Error::BoardFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Board::from_file("/nonexistent/board.txt", 32, 32).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3, 1).unwrap();
        board.set(Position::new(0, 0), BoardState::Food);
        board.set(Position::new(2, 0), BoardState::ConsumedFood);
        assert_eq!(board.to_string(), "O *\n");
    }
}
