#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Scavenger in a terminal.

mod text;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use scavenger_core::STARTING_FOOD;
use scavenger_rendering::{present, FrameSource};
use scavenger_session::{Session, SessionConfig};
use scavenger_world::{BoardConfig, WorldConfig};

use crate::text::{StdinFrames, TextPresenter};

/// Turn-based scavenger roguelike played with w/a/s/d, r to restart, q to quit.
#[derive(Debug, Parser)]
#[command(name = "scavenger", version, about)]
struct CliArgs {
    /// Seed for board generation; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Board width in cells, border included.
    #[arg(long, default_value_t = 8)]
    columns: u32,
    /// Board height in cells, border included.
    #[arg(long, default_value_t = 8)]
    rows: u32,
    /// Food every new game starts with.
    #[arg(long, default_value_t = STARTING_FOOD)]
    food: i32,
}

impl CliArgs {
    fn session_config(&self) -> SessionConfig {
        let seed = self.seed.unwrap_or_else(rand::random);
        log::info!("using seed {seed}");

        SessionConfig {
            world: WorldConfig {
                board: BoardConfig {
                    columns: self.columns,
                    rows: self.rows,
                    ..BoardConfig::default()
                },
                seed,
                ..WorldConfig::default()
            },
            starting_food: self.food,
            ..SessionConfig::default()
        }
    }
}

/// Entry point for the Scavenger command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let mut session = Session::new(args.session_config());
    session
        .start_new_game()
        .context("failed to start a new game")?;

    let mut presenter = TextPresenter::new(args.columns, args.rows);
    let mut frames = StdinFrames::new(io::stdin().lock());
    let mut stdout = io::stdout().lock();

    present(&session.drain_events(), &mut presenter);
    presenter.draw(&mut stdout)?;

    while let Some(frame) = frames.next_frame()? {
        let _ = session
            .update(frame.player_input())
            .context("failed to advance the session")?;
        present(&session.drain_events(), &mut presenter);
        presenter.draw(&mut stdout)?;
        stdout.flush().context("failed to flush stdout")?;
    }

    Ok(())
}
