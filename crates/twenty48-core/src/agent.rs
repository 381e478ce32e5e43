//! Move-deciding agents.
//!
//! An agent is anything that looks at a board and picks a direction: a
//! person at a prompt, a scripted closure or the weighted random mover
//! below. Agents only ever see a `BoardView`, an owned copy of the grid, so
//! they cannot reach into the live game.

use crate::board::{slide_line, Tile, EMPTY};
use crate::grid::Direction;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Read-only snapshot of a game handed to agents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: usize,
    pub rows: Vec<Vec<Tile>>,
    pub target: Tile,
    pub best: Tile,
    pub step: u32,
}

impl BoardView {
    pub fn new(rows: Vec<Vec<Tile>>, target: Tile, best: Tile, step: u32) -> Self {
        Self {
            size: rows.len(),
            rows,
            target,
            best,
            step,
        }
    }

    pub fn empty_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&v| v == EMPTY).count()
    }

    /// Whether sliding towards `direction` would change anything
    pub fn can_move(&self, direction: Direction) -> bool {
        (0..self.size).any(|i| {
            let cells = direction.line(self.size, i);
            let line: Vec<Tile> = cells.iter().map(|c| self.rows[c.row][c.col]).collect();
            slide_line(&line) != line
        })
    }

    /// Directions that would change the board, in U, D, L, R order
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.can_move(d))
            .collect()
    }

    /// JSON form of the snapshot, for logs and external tooling
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Something that decides the next move
pub trait Agent {
    /// Pick a direction for `view`. `None` means the agent has stopped
    /// playing (for example its input was closed).
    fn choose_move(&mut self, view: &BoardView) -> Option<Direction>;
}

impl<F> Agent for F
where
    F: FnMut(&BoardView) -> Option<Direction>,
{
    fn choose_move(&mut self, view: &BoardView) -> Option<Direction> {
        self(view)
    }
}

/// Relative weights of the random mover. Favouring two adjacent directions
/// keeps large tiles in a corner more often than a uniform choice would.
const MOVE_WEIGHTS: [(Direction, u32); 4] = [
    (Direction::Up, 10),
    (Direction::Down, 1),
    (Direction::Left, 10),
    (Direction::Right, 1),
];

/// Picks weighted random directions without looking at the board
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, _view: &BoardView) -> Option<Direction> {
        MOVE_WEIGHTS
            .choose_weighted(&mut self.rng, |(_, weight)| *weight)
            .ok()
            .map(|(direction, _)| *direction)
    }
}
