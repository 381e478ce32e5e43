//! Events produced by playing a turn.
//!
//! `Game::play` reports what happened as a list of events so that drivers
//! can render, log or forward them without inspecting the board.

use crate::board::Tile;
use crate::grid::{Cell, Direction};
use serde::{Deserialize, Serialize};

/// Something that happened while resolving a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The move changed nothing; no tile was spawned and the step is unchanged
    MoveRejected { direction: Direction },

    /// The board slid and the step counter advanced
    Moved { direction: Direction, step: u32 },

    /// A new tile appeared
    TileSpawned { cell: Cell, value: Tile },

    /// The target tile was reached
    GameWon { best: Tile, step: u32 },

    /// The board is full and nothing can merge
    GameLost { best: Tile, step: u32 },
}

impl GameEvent {
    /// Whether this event ends the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameWon { .. } | GameEvent::GameLost { .. })
    }
}
