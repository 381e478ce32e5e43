//! The game loop.
//!
//! A session owns one game and one agent. It shows the board, asks the
//! agent for a move, plays it and repeats until the game is won, lost or the
//! agent gives up. Rejected moves are retried without output.

use std::io::Write;
use tracing::{debug, info, trace};
use twenty48_core::{Agent, Game, GameEvent, GameStatus, Tile};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Won,
    Lost,
    /// The agent stopped before the game was decided
    Abandoned,
}

/// Final numbers of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub step: u32,
    pub best: Tile,
}

pub struct Session<W> {
    game: Game,
    agent: Box<dyn Agent>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(game: Game, agent: Box<dyn Agent>, out: W) -> Self {
        Self { game, agent, out }
    }

    /// Run to completion and report how it ended
    pub fn run(&mut self) -> anyhow::Result<SessionReport> {
        writeln!(self.out, "{}", self.game)?;

        let outcome = loop {
            match self.game.status() {
                GameStatus::Won => {
                    writeln!(self.out, "You WIN!!!")?;
                    break SessionOutcome::Won;
                }
                GameStatus::Lost => {
                    writeln!(self.out, "You LOSE >_<")?;
                    break SessionOutcome::Lost;
                }
                GameStatus::InProgress => {}
            }

            // The agent works on a copy; the live game is never lent out.
            let view = self.game.view();
            let Some(direction) = self.agent.choose_move(&view) else {
                info!(step = self.game.step(), "Agent stopped playing");
                break SessionOutcome::Abandoned;
            };

            let events = self.game.play(direction)?;
            for event in &events {
                match event {
                    GameEvent::MoveRejected { direction } => {
                        debug!(%direction, "Move changed nothing");
                    }
                    GameEvent::Moved { direction, step } => {
                        debug!(%direction, step, best = self.game.best(), "Move played");
                    }
                    GameEvent::TileSpawned { cell, value } => {
                        debug!(%cell, value, "Tile spawned");
                    }
                    GameEvent::GameWon { .. } | GameEvent::GameLost { .. } => {}
                }
            }
            if matches!(events.as_slice(), [GameEvent::MoveRejected { .. }]) {
                continue;
            }
            trace!(state = %self.game.view().to_json());

            writeln!(self.out, "\nStep: {}\tMove: {}", self.game.step(), direction)?;
            writeln!(self.out, "{}", self.game)?;
        };
        self.out.flush()?;

        let report = SessionReport {
            outcome,
            step: self.game.step(),
            best: self.game.best(),
        };
        info!(
            outcome = ?report.outcome,
            step = report.step,
            best = report.best,
            "Session finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48_core::{BoardView, Direction, RandomAgent};

    fn scripted(moves: Vec<Direction>) -> Box<dyn Agent> {
        let mut moves = moves.into_iter();
        Box::new(move |_: &BoardView| moves.next())
    }

    fn run(game: Game, agent: Box<dyn Agent>) -> (SessionReport, String) {
        let mut out = Vec::new();
        let report = Session::new(game, agent, &mut out).run().unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_win_is_announced() {
        let game = Game::from_rows(&[vec![4, 4], vec![0, 0]], 8).unwrap();
        let (report, out) = run(game, scripted(vec![Direction::Up, Direction::Left]));

        assert_eq!(report.outcome, SessionOutcome::Won);
        assert_eq!(report.step, 1);
        assert_eq!(report.best, 8);
        assert!(out.contains("Step: 1\tMove: L"));
        assert!(!out.contains("Move: U"), "rejected move was printed");
        assert!(out.ends_with("You WIN!!!\n"));
    }

    #[test]
    fn test_dead_board_is_lost_without_moves() {
        let game = Game::from_rows(&[vec![2, 4], vec![4, 2]], 2048).unwrap();
        let (report, out) = run(game, scripted(vec![]));

        assert_eq!(report.outcome, SessionOutcome::Lost);
        assert_eq!(report.step, 0);
        assert!(out.ends_with("You LOSE >_<\n"));
    }

    #[test]
    fn test_agent_giving_up_abandons() {
        let game = Game::with_seed(4, 2048, 3).unwrap();
        let (report, out) = run(game, scripted(vec![]));

        assert_eq!(report.outcome, SessionOutcome::Abandoned);
        assert_eq!(report.step, 0);
        assert!(!out.contains("You"));
    }

    #[test]
    fn test_initial_board_is_printed() {
        let game = Game::from_rows(&[vec![2, 0], vec![0, 0]], 16).unwrap();
        let rendered = game.to_string();
        let (_, out) = run(game, scripted(vec![]));

        assert_eq!(out, format!("{rendered}\n"));
    }

    #[test]
    fn test_random_session_finishes() {
        let game = Game::with_seed(3, 64, 21).unwrap();
        let (report, out) = run(game, Box::new(RandomAgent::with_seed(21)));

        assert_ne!(report.outcome, SessionOutcome::Abandoned);
        assert_eq!(out.matches("Step: ").count(), report.step as usize);
    }
}
