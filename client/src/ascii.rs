use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use libgame::Game;

const ALIVE: &[u8] = b" @";
const DEAD: &[u8] = b" .";

/// Clears the terminal and draws the current generation.
pub fn show<W>(out: &mut W, game: &Game) -> io::Result<()>
where
    W: Write,
{
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    write_frame(out, game)?;
    out.flush()
}

pub fn write_frame<W>(out: &mut W, game: &Game) -> io::Result<()>
where
    W: Write,
{
    let board = game.board();

    writeln!(out, "Round: {}", game.generation())?;
    for row in board.tiles().chunks(board.cols()) {
        for tile in row {
            out.write_all(if tile.is_alive() { ALIVE } else { DEAD })?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Live cells: {}", game.live_count())?;
    writeln!(out)
}
