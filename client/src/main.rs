use std::{
    io,
    sync::{Arc, RwLock},
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use cli::{Cli, OutputMode};
use colored::Colorize;
use libgame::{Game, board::GameBoard};
use rand::{SeedableRng, rngs::StdRng};
use ticker::TickerHost;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod ascii;
mod cli;
mod loader;
mod renderer;
mod ticker;

/// What the animation thread and the window share.
pub struct State {
    game: Game,
    rounds: usize,
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = loader::load_config(&cli.input)
        .with_context(|| format!("Initialization error: file {}", cli.input.display()))?;

    let board = match cli.random {
        Some(alive_cells) => {
            let rng_seed = cli.rng_seed.unwrap_or_else(rand::random);
            info!(alive_cells, rng_seed, "scattering random cells");

            let mut rng = StdRng::seed_from_u64(rng_seed);
            GameBoard::new_random(
                config.board.rows(),
                config.board.cols(),
                alive_cells,
                &mut rng,
            )
            .context("Scattering random cells")?
        }
        None => config.board,
    };

    let game = Game::new(board);
    let rounds = config.iterations;
    debug!(mode = ?cli.mode, rounds, "starting");

    match cli.mode {
        OutputMode::None => {
            let (game, elapsed) = run_silent(game, rounds);
            print_report(elapsed, rounds, game.live_count());
        }
        OutputMode::Ascii => {
            let (game, elapsed) = run_ascii(game, rounds, cli.delay())?;
            print_report(elapsed, rounds, game.live_count());
        }
        OutputMode::Visi => run_visi(game, rounds, cli.delay())?,
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_silent(mut game: Game, rounds: usize) -> (Game, Duration) {
    let start = Instant::now();
    game.run(rounds, |_| ());

    (game, start.elapsed())
}

fn run_ascii(mut game: Game, rounds: usize, delay: Duration) -> anyhow::Result<(Game, Duration)> {
    let mut stderr = io::stderr().lock();
    ascii::show(&mut stderr, &game).context("Drawing the initial board")?;

    let start = Instant::now();
    for _ in 0..rounds {
        game.tick();
        ascii::show(&mut stderr, &game).context("Drawing the board")?;
        thread::sleep(delay);
    }

    Ok((game, start.elapsed()))
}

fn run_visi(game: Game, rounds: usize, delay: Duration) -> anyhow::Result<()> {
    let state_arc = Arc::new(RwLock::new(State { game, rounds }));

    let ticker = TickerHost::start(state_arc.clone(), delay, rounds);
    let shown = renderer::run(state_arc);
    let completed = ticker.is_finished();
    let played = ticker.stop();
    info!(played, completed, "window closed");

    shown
}

fn print_report(elapsed: Duration, rounds: usize, live_count: usize) {
    let seconds = format!("{:0.3}", elapsed.as_secs_f64());

    println!("Total time: {} seconds", seconds.bold());
    println!(
        "Number of live cells after {rounds} rounds: {}\n",
        live_count.to_string().green()
    );
}
