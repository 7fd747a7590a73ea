mod frame;
mod sleeper;
mod window;

use std::sync::{Arc, RwLock};

use frame::{RenderFrame, Rgba};
use libgame::board::{GameBoard, TileState};
use window::{RendererWindow, RendererWindowConfig};

use crate::State;

const WINDOW_TITLE: &str = "GOL!";
const WINDOW_EXTENT: u32 = 640;
const MAX_TILE_PIXELS: u32 = 24;
const HALF_TILE_MARGIN: u32 = 1;

const BACKGROUND: Rgba = [10, 10, 10, 255];
const ALIVE: Rgba = [255, 105, 180, 255];
const DEAD: Rgba = [0, 0, 0, 255];

/// Opens the board window and blocks until it is closed. The renderer only
/// ever takes the read side of the lock, so it sees whole rounds.
pub fn run(state_arc: Arc<RwLock<State>>) -> anyhow::Result<()> {
    let (width, height) = {
        let state = state_arc
            .read()
            .map_err(|_| anyhow::anyhow!("game state lock poisoned"))?;
        window_size(state.game.board())
    };

    let window = RendererWindow::new(RendererWindowConfig {
        title: WINDOW_TITLE.to_owned(),
        width,
        height,
        target_fps: 30,
        draw_callback: Box::new(move |frame: RenderFrame<'_>| {
            let state = state_arc.read().ok()?;
            draw(&state, frame);
            Some(title(&state))
        }),
    });

    window.run()
}

fn window_size(board: &GameBoard) -> (u32, u32) {
    let longest = board.rows().max(board.cols()) as u32;
    let tile_pixels = (WINDOW_EXTENT / longest).clamp(1, MAX_TILE_PIXELS);

    (board.cols() as u32 * tile_pixels, board.rows() as u32 * tile_pixels)
}

fn title(state: &State) -> String {
    format!(
        "{WINDOW_TITLE} round {}/{}, {} alive",
        state.game.generation(),
        state.rounds,
        state.game.live_count()
    )
}

fn draw(state: &State, mut frame: RenderFrame) {
    let board = state.game.board();

    let tile_width = (frame.width / board.cols() as u32).max(1);
    let tile_height = (frame.height / board.rows() as u32).max(1);
    let margin = if tile_width > 2 * HALF_TILE_MARGIN && tile_height > 2 * HALF_TILE_MARGIN {
        HALF_TILE_MARGIN
    } else {
        0
    };

    frame.fill(BACKGROUND);

    // Row 0 is drawn at the top, matching the terminal view.
    for (tile_pos, tile) in board.enumerate_tiles() {
        let color = match tile {
            TileState::Alive => ALIVE,
            TileState::Dead => DEAD,
        };

        frame.draw_square(
            tile_pos.col as u32 * tile_width + margin,
            tile_pos.row as u32 * tile_height + margin,
            tile_width - margin * 2,
            tile_height - margin * 2,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use libgame::Game;

    use super::{frame::PIXEL_BYTES, *};

    #[test]
    fn window_scales_tiles_to_fit() {
        let board = GameBoard::new(10, 20).unwrap();
        assert_eq!(window_size(&board), (480, 240));

        let tiny = GameBoard::new(2, 3).unwrap();
        assert_eq!(window_size(&tiny), (3 * MAX_TILE_PIXELS, 2 * MAX_TILE_PIXELS));

        let huge = GameBoard::new(1000, 10).unwrap();
        assert_eq!(window_size(&huge), (10, 1000));
    }

    #[test]
    fn alive_tiles_are_pink_and_dead_tiles_black() {
        let game = Game::from_seeds(2, 2, [[0, 1]]).unwrap();
        let state = State { game, rounds: 1 };
        let mut buffer = vec![0; 8 * 8 * PIXEL_BYTES];

        draw(
            &state,
            RenderFrame {
                width: 8,
                height: 8,
                buffer: &mut buffer,
            },
        );

        let pixel = |x: usize, y: usize| {
            let index = (x + y * 8) * PIXEL_BYTES;
            <Rgba>::try_from(&buffer[index..index + PIXEL_BYTES]).unwrap()
        };
        assert_eq!(pixel(0, 0), BACKGROUND);
        assert_eq!(pixel(1, 1), DEAD);
        assert_eq!(pixel(5, 1), ALIVE);
        assert_eq!(pixel(5, 5), DEAD);
    }

    #[test]
    fn title_reports_progress() {
        let game = Game::from_seeds(3, 3, [[1, 1]]).unwrap();
        let state = State { game, rounds: 12 };

        assert_eq!(title(&state), "GOL! round 0/12, 1 alive");
    }
}
