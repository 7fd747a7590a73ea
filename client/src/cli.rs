use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};

/// Conway's Game of Life on a wrapping board.
#[derive(Debug, Parser)]
#[command(name = "gol", version)]
pub struct Cli {
    /// Board file: rows, columns, rounds, seed count, then one row/column pair per seed.
    pub input: PathBuf,

    /// How to show the simulation while it runs.
    #[arg(value_enum)]
    pub mode: OutputMode,

    /// Pause between animated rounds, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub delay_ms: u64,

    /// Ignore the file's seeds and scatter this many alive cells instead.
    #[arg(long, value_name = "ALIVE")]
    pub random: Option<usize>,

    /// Seed for `--random`, to replay the same scatter.
    #[arg(long, value_name = "SEED", requires = "random")]
    pub rng_seed: Option<u64>,
}

impl Cli {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// No animation, just the timing report.
    #[value(alias = "0")]
    None,

    /// Redraw the board in the terminal every round.
    #[value(alias = "1")]
    Ascii,

    /// Animate the board in a window.
    #[value(alias = "2")]
    Visi,
}
