//! Twenty48 console game.

use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twenty48_core::{Agent, RandomAgent};

mod config;
mod prompt;
mod session;

use config::{AgentKind, Config};
use prompt::PromptAgent;
use session::Session;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;

    info!(
        size = config.size,
        target = config.target,
        agent = %config.agent,
        seed = ?config.seed,
        "Starting twenty48..."
    );

    let game = config.new_game()?;
    let agent: Box<dyn Agent> = match config.agent {
        AgentKind::Human => Box::new(PromptAgent::new(io::stdin().lock(), io::stdout())),
        AgentKind::Random => Box::new(match config.seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        }),
    };

    Session::new(game, agent, io::stdout()).run()?;
    Ok(())
}
