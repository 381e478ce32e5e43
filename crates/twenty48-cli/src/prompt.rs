//! Interactive agent that reads moves from a terminal.

use std::io::{self, BufRead, Write};
use tracing::{debug, warn};
use twenty48_core::{Agent, BoardView, Direction};

pub const PROMPT: &str = "Move (U)p / (D)own / (L)eft / (R)ight ? ";
pub const INVALID_INPUT: &str = "Not valid input.";

/// Asks for a direction until it gets one it understands.
///
/// Only the first letter of the answer counts and case is ignored, so `u`,
/// `Up` and `UP` all mean up.
pub struct PromptAgent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// `Ok(None)` once the input is exhausted
    fn read_direction(&mut self) -> io::Result<Option<Direction>> {
        let mut line = String::new();
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.parse::<Direction>() {
                Ok(direction) => return Ok(Some(direction)),
                Err(e) => {
                    debug!("{}", e);
                    writeln!(self.output, "{INVALID_INPUT}")?;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> Agent for PromptAgent<R, W> {
    fn choose_move(&mut self, _view: &BoardView) -> Option<Direction> {
        match self.read_direction() {
            Ok(direction) => direction,
            Err(e) => {
                warn!("Failed to read move: {}", e);
                None
            }
        }
    }
}
