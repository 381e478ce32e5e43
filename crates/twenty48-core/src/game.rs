//! Core game state.
//!
//! `Game` owns the board together with the win target, the best tile seen,
//! the step counter, the set of empty cells and the random source used for
//! spawning. All mutation goes through `spawn_tile`, `apply_move` and `play`,
//! which keep the empty-cell set and `best` in step with the grid.

use crate::agent::BoardView;
use crate::board::{is_tile, is_valid_tile, slide_line, Board, Tile, EMPTY};
use crate::events::GameEvent;
use crate::grid::{Cell, Direction, LineTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of tiles placed on a fresh board
const INITIAL_TILES: usize = 2;

/// Odds of a spawned tile being a 4 rather than a 2 (numerator, denominator)
const FOUR_ODDS: (u32, u32) = (1, 5);

/// Errors raised by the board engine
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("board size must be positive")]
    InvalidSize,

    #[error("target must be positive")]
    InvalidTarget,

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("{0} is not a valid tile value")]
    InvalidTileValue(Tile),

    #[error("no empty cell to spawn a tile in")]
    BoardFull,

    #[error("game is over")]
    GameOver,
}

/// Where the game stands after the last turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// A single 2048 game
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    target: Tile,
    /// Highest tile ever placed or merged
    best: Tile,
    /// Number of accepted moves
    step: u32,
    /// Always exactly the cells of `board` holding `EMPTY`
    empty: Vec<Cell>,
    lines: LineTable,
    rng: StdRng,
}

impl Game {
    /// Start a new game with two random tiles
    pub fn new(size: usize, target: Tile) -> Result<Self, GameError> {
        Self::build(size, target, StdRng::from_entropy())
    }

    /// Start a new game whose spawns are reproducible from `seed`
    pub fn with_seed(size: usize, target: Tile, seed: u64) -> Result<Self, GameError> {
        Self::build(size, target, StdRng::seed_from_u64(seed))
    }

    fn build(size: usize, target: Tile, rng: StdRng) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }
        if target == 0 {
            return Err(GameError::InvalidTarget);
        }

        let board = Board::empty(size);
        let mut game = Self {
            empty: board.empty_cells(),
            board,
            target,
            best: 0,
            step: 0,
            lines: LineTable::new(size),
            rng,
        };

        for _ in 0..INITIAL_TILES.min(size * size) {
            game.spawn_tile(None)?;
        }

        Ok(game)
    }

    /// Resume from an explicit grid without spawning anything
    pub fn from_rows(rows: &[Vec<Tile>], target: Tile) -> Result<Self, GameError> {
        if target == 0 {
            return Err(GameError::InvalidTarget);
        }
        let board = Board::from_rows(rows)
            .ok_or_else(|| GameError::InvalidBoard("rows must form a non-empty square".into()))?;
        if let Some(bad) = rows.iter().flatten().find(|&&v| !is_valid_tile(v)) {
            return Err(GameError::InvalidBoard(format!(
                "{bad} is not empty or a power of two"
            )));
        }

        let size = board.size();
        Ok(Self {
            empty: board.empty_cells(),
            best: board.max_tile(),
            board,
            target,
            step: 0,
            lines: LineTable::new(size),
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the random source, e.g. to make a resumed game reproducible
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn target(&self) -> Tile {
        self.target
    }

    pub fn best(&self) -> Tile {
        self.best
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn empty_cells(&self) -> &[Cell] {
        &self.empty
    }

    /// Column width used when rendering: the digit count of the target
    pub fn cell_width(&self) -> usize {
        self.target.to_string().len()
    }

    /// Detached copy of the board for agents
    pub fn view(&self) -> BoardView {
        BoardView::new(self.board.rows(), self.target, self.best, self.step)
    }

    /// Place a tile on a random empty cell.
    ///
    /// The value is 2 (80%) or 4 (20%) unless `value` overrides it.
    pub fn spawn_tile(&mut self, value: Option<Tile>) -> Result<Cell, GameError> {
        if self.empty.is_empty() {
            return Err(GameError::BoardFull);
        }
        if let Some(v) = value {
            if !is_tile(v) {
                return Err(GameError::InvalidTileValue(v));
            }
        }

        let idx = self.rng.gen_range(0..self.empty.len());
        let cell = self.empty.swap_remove(idx);
        let value = value.unwrap_or_else(|| self.random_tile());

        self.board.set(cell, value);
        self.best = self.best.max(value);
        Ok(cell)
    }

    fn random_tile(&mut self) -> Tile {
        let (num, den) = FOUR_ODDS;
        if self.rng.gen_ratio(num, den) {
            4
        } else {
            2
        }
    }

    /// Slide and merge every line towards `direction`.
    ///
    /// Returns whether any cell changed. An unchanged board is a normal
    /// outcome: the caller must not spawn a tile or count a step for it.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let mut changed = false;
        let mut empty = Vec::with_capacity(self.empty.len());

        for line in self.lines.lines(direction) {
            let before: Vec<Tile> = line.iter().map(|&c| self.board.get(c)).collect();
            let after = slide_line(&before);

            for ((&cell, &old), &new) in line.iter().zip(&before).zip(&after) {
                if old != new {
                    changed = true;
                    self.board.set(cell, new);
                }
                if new == EMPTY {
                    empty.push(cell);
                } else {
                    self.best = self.best.max(new);
                }
            }
        }

        self.empty = empty;
        changed
    }

    pub fn is_win(&self) -> bool {
        self.best >= self.target
    }

    /// Full board with no equal neighbours
    pub fn is_dead(&self) -> bool {
        self.empty.is_empty() && !self.board.has_adjacent_pair()
    }

    pub fn status(&self) -> GameStatus {
        if self.is_win() {
            GameStatus::Won
        } else if self.is_dead() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// Play one full turn: move, count the step, spawn, check the end.
    pub fn play(&mut self, direction: Direction) -> Result<Vec<GameEvent>, GameError> {
        if self.status() != GameStatus::InProgress {
            return Err(GameError::GameOver);
        }

        if !self.apply_move(direction) {
            return Ok(vec![GameEvent::MoveRejected { direction }]);
        }

        self.step += 1;
        let mut events = vec![GameEvent::Moved {
            direction,
            step: self.step,
        }];

        // A changed board always has room: either a tile slid away from a
        // cell or a merge freed one.
        let cell = self.spawn_tile(None)?;
        events.push(GameEvent::TileSpawned {
            cell,
            value: self.board.get(cell),
        });

        match self.status() {
            GameStatus::Won => events.push(GameEvent::GameWon {
                best: self.best,
                step: self.step,
            }),
            GameStatus::Lost => events.push(GameEvent::GameLost {
                best: self.best,
                step: self.step,
            }),
            GameStatus::InProgress => {}
        }

        Ok(events)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board.render(self.cell_width()))
    }
}
