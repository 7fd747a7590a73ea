use std::{fs, io, num::ParseIntError, path::{Path, PathBuf}, str::SplitWhitespace};

use libgame::{
    board::{BoardError, GameBoard},
    pos::Position,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input ended before {field}")]
    Missing { field: String },

    #[error("{field} must be a non-negative integer, got {token:?}")]
    InvalidNumber {
        field: String,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Everything the input file fixes before the first round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board: GameBoard,
    pub iterations: usize,
}

pub fn load_config<P>(path: P) -> Result<GameConfig, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    let config = parse_config(&text)?;
    info!(
        rows = config.board.rows(),
        cols = config.board.cols(),
        iterations = config.iterations,
        alive = config.board.alive_count(),
        "loaded {}",
        path.display()
    );

    Ok(config)
}

/// Parses `rows cols iterations count` followed by `count` row/column pairs,
/// all whitespace separated.
pub fn parse_config(text: &str) -> Result<GameConfig, LoadError> {
    let mut tokens = Tokens {
        inner: text.split_whitespace(),
    };

    let rows = tokens.next_number("row count")?;
    let cols = tokens.next_number("column count")?;
    let iterations = tokens.next_number("iteration count")?;
    let seed_count = tokens.next_number("seed count")?;

    let seeds = (0..seed_count)
        .map(|index| {
            let row = tokens.next_number(format!("row of seed {index}"))?;
            let col = tokens.next_number(format!("column of seed {index}"))?;
            Ok(Position::new(row, col))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    let trailing = tokens.inner.count();
    if trailing > 0 {
        warn!(trailing, "ignoring tokens after the last seed");
    }

    let board = GameBoard::with_alive(rows, cols, seeds)?;
    Ok(GameConfig { board, iterations })
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl Tokens<'_> {
    fn next_number<F>(&mut self, field: F) -> Result<usize, LoadError>
    where
        F: Into<String>,
    {
        let Some(token) = self.inner.next() else {
            return Err(LoadError::Missing {
                field: field.into(),
            });
        };

        token.parse().map_err(|source| LoadError::InvalidNumber {
            field: field.into(),
            token: token.to_owned(),
            source,
        })
    }
}
