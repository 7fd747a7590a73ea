use std::mem;

use board::{BoardError, GameBoard, TileState};
use pos::Position;

pub mod board;
pub mod pos;
pub mod rule;

const NEIGHBOR_RELATIVE_POSITIONS: &[[isize; 2]] = &[
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

/// Double-buffered simulation: `board` is the generation callers read,
/// `next` is scratch space that is only written while a round is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: GameBoard,
    next: GameBoard,
    live_count: usize,
    generation: usize,
}

impl Game {
    pub fn new(board: GameBoard) -> Self {
        let next = board.clone();
        let live_count = board.alive_count();

        Self {
            board,
            next,
            live_count,
            generation: 0,
        }
    }

    pub fn from_seeds<I, P>(rows: usize, cols: usize, seeds: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        GameBoard::with_alive(rows, cols, seeds).map(Self::new)
    }

    /// Advances one generation and returns the new live count.
    pub fn tick(&mut self) -> usize {
        self.live_count = advance_round(&self.board, &mut self.next);
        mem::swap(&mut self.board, &mut self.next);
        self.generation += 1;

        self.live_count
    }

    /// Runs `iterations` rounds, handing the finished generation to `on_round`
    /// after each one.
    pub fn run<F>(&mut self, iterations: usize, mut on_round: F)
    where
        F: FnMut(&Game),
    {
        for _ in 0..iterations {
            self.tick();
            on_round(&*self);
        }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn generation(&self) -> usize {
        self.generation
    }
}

/// Writes the generation following `current` into `next` and returns how many
/// tiles of it are alive. Both boards must have the same dimensions.
pub fn advance_round(current: &GameBoard, next: &mut GameBoard) -> usize {
    assert!(
        current.same_dimensions(next),
        "round buffers differ in size: {}x{} vs {}x{}",
        current.rows(),
        current.cols(),
        next.rows(),
        next.cols()
    );

    let mut live_count = 0;

    for (index, (tile, next_tile)) in current
        .tiles()
        .iter()
        .zip(next.tiles_mut())
        .enumerate()
    {
        let pos = current.index_to_pos(index);
        *next_tile = rule::next_state(*tile, alive_neighbor_count(current, pos));

        if next_tile.is_alive() {
            live_count += 1;
        }
    }

    live_count
}

/// Alive tiles among the 8 toroidally-adjacent positions. On boards narrower
/// than 3 in some direction the same tile may be counted more than once.
pub fn alive_neighbor_count(board: &GameBoard, pos: Position) -> usize {
    NEIGHBOR_RELATIVE_POSITIONS
        .iter()
        .map(|&[d_row, d_col]| board.wrapped_neighbor(pos, d_row, d_col))
        .filter(|&neighbor| board.tile(neighbor) == Some(&TileState::Alive))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_counts_neighbors_across_edges() {
        let board = GameBoard::with_alive(4, 4, [[3, 3], [0, 3], [3, 0]]).unwrap();

        assert_eq!(alive_neighbor_count(&board, Position::new(0, 0)), 3);
    }

    #[test]
    fn single_row_ring_counts_each_side_three_times() {
        let board = GameBoard::with_alive(1, 5, [[0, 1]]).unwrap();

        assert_eq!(alive_neighbor_count(&board, Position::new(0, 0)), 3);
        assert_eq!(alive_neighbor_count(&board, Position::new(0, 1)), 2);
        assert_eq!(alive_neighbor_count(&board, Position::new(0, 3)), 0);
    }

    #[test]
    fn tick_tracks_generation_and_live_count() {
        let mut game = Game::from_seeds(5, 5, [[2, 1], [2, 2], [2, 3]]).unwrap();
        assert_eq!(game.live_count(), 3);
        assert_eq!(game.generation(), 0);

        assert_eq!(game.tick(), 3);
        assert_eq!(game.generation(), 1);
        assert_eq!(game.board().tile([1, 2]), Some(&TileState::Alive));
        assert_eq!(game.board().tile([2, 1]), Some(&TileState::Dead));
    }

    #[test]
    #[should_panic(expected = "round buffers differ in size")]
    fn mismatched_buffers_panic() {
        let current = GameBoard::new(2, 2).unwrap();
        let mut next = GameBoard::new(2, 3).unwrap();

        advance_round(&current, &mut next);
    }
}
