//! Grid coordinates and move directions.
//!
//! This module contains:
//! - `Cell`, a (row, column) position on the square board
//! - `Direction`, the four ways the board can be slid
//! - `LineTable`, the per-direction traversal order of every line
//!
//! A *line* is one row or column read from the edge the tiles travel
//! towards. Every direction is reduced to the same line routine by looking
//! up its coordinate table, so the merge logic only exists once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A position on the board, zero-based from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbour immediately to the right, if inside a board of `size`
    pub fn right(&self, size: usize) -> Option<Cell> {
        (self.col + 1 < size).then(|| Cell::new(self.row, self.col + 1))
    }

    /// Neighbour immediately below, if inside a board of `size`
    pub fn below(&self, size: usize) -> Option<Cell> {
        (self.row + 1 < size).then(|| Cell::new(self.row + 1, self.col))
    }

    /// All cells of a `size`×`size` board in row-major order
    pub fn all(size: usize) -> impl Iterator<Item = Cell> {
        (0..size).flat_map(move |row| (0..size).map(move |col| Cell::new(row, col)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction the tiles slide in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Error returned when a direction token is not one of `U`, `D`, `L`, `R`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl Direction {
    /// All directions, in code order U, D, L, R
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Single-letter code used for input and move logs
    pub fn code(&self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    /// Parse a single-letter code, ignoring case
    pub fn from_code(code: char) -> Option<Direction> {
        match code.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Cells of line `line` for a board of `size`, leading edge first.
    ///
    /// For Left/Right the line is row `line`; for Up/Down it is column `line`.
    pub fn line(&self, size: usize, line: usize) -> Vec<Cell> {
        (0..size)
            .map(|i| match self {
                Direction::Left => Cell::new(line, i),
                Direction::Right => Cell::new(line, size - 1 - i),
                Direction::Up => Cell::new(i, line),
                Direction::Down => Cell::new(size - 1 - i, line),
            })
            .collect()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Accepts any token whose first non-blank character is a direction code,
/// so `"u"`, `"Up"` and `" left"` all parse.
impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .chars()
            .next()
            .and_then(Direction::from_code)
            .ok_or_else(|| ParseDirectionError(s.trim().to_string()))
    }
}

/// Precomputed traversal order of every line, per direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    lines: [Vec<Vec<Cell>>; 4],
}

impl LineTable {
    pub fn new(size: usize) -> Self {
        let build = |dir: Direction| -> Vec<Vec<Cell>> {
            (0..size).map(|i| dir.line(size, i)).collect()
        };
        Self {
            lines: Direction::ALL.map(build),
        }
    }

    /// Lines for `direction`, each ordered from the leading edge
    pub fn lines(&self, direction: Direction) -> &[Vec<Cell>] {
        &self.lines[direction.index()]
    }
}
