//! Twenty48 - the board engine of a console 2048 puzzle
//!
//! This crate provides the core game logic, including:
//! - Grid coordinates, move directions and per-direction line tables
//! - The tile grid with its slide/merge routine and text rendering
//! - Game state with spawning, win and loss detection
//! - Agents that choose moves from a detached board view
//!
//! # Modules
//!
//! - [`grid`]: Cells, directions and line traversal order
//! - [`board`]: Tile grid, `slide_line` and rendering
//! - [`game`]: Game state and turn resolution
//! - [`events`]: What a turn reports back
//! - [`agent`]: Move-deciding agents

pub mod agent;
pub mod board;
pub mod events;
pub mod game;
pub mod grid;

// Re-export commonly used types
pub use agent::{Agent, BoardView, RandomAgent};
pub use board::{slide_line, Board, Tile, EMPTY};
pub use events::GameEvent;
pub use game::{Game, GameError, GameStatus};
pub use grid::{Cell, Direction, LineTable, ParseDirectionError};
