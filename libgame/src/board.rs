use rand::{Rng, seq::index};
use thiserror::Error;

use super::pos::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be non-zero, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) lies outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("a {rows}x{cols} board has more tiles than can be addressed")]
    TooLarge { rows: usize, cols: usize },

    #[error("cannot place {alive} alive cells on a board of {capacity} tiles")]
    TooManyAlive { alive: usize, capacity: usize },
}

/// Fixed-size toroidal board, tiles stored row-major at `row * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    rows: usize,
    cols: usize,
    tiles: Vec<TileState>,
}

impl GameBoard {
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::ZeroDimension { rows, cols });
        }

        let tile_count = rows
            .checked_mul(cols)
            .ok_or(BoardError::TooLarge { rows, cols })?;

        Ok(Self {
            rows,
            cols,
            tiles: vec![TileState::default(); tile_count],
        })
    }

    /// A dead board with every seed position set alive.
    pub fn with_alive<I, P>(rows: usize, cols: usize, seeds: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        let mut board = Self::new(rows, cols)?;

        for seed in seeds {
            let Position { row, col } = seed.into();
            let tile = board
                .tile_mut([row, col])
                .ok_or(BoardError::OutOfBounds {
                    row,
                    col,
                    rows,
                    cols,
                })?;
            *tile = TileState::Alive;
        }

        Ok(board)
    }

    pub fn new_random<R>(
        rows: usize,
        cols: usize,
        alive_cells: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError>
    where
        R: Rng + ?Sized,
    {
        let mut board = Self::new(rows, cols)?;

        if alive_cells > board.tiles.len() {
            return Err(BoardError::TooManyAlive {
                alive: alive_cells,
                capacity: board.tiles.len(),
            });
        }

        for chosen_index in index::sample(rng, board.tiles.len(), alive_cells) {
            board.tiles[chosen_index] = TileState::Alive;
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[TileState] {
        &self.tiles
    }

    pub fn tile<P>(&self, pos: P) -> Option<&TileState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.tiles.get(index)
    }

    pub fn tile_mut<P>(&mut self, pos: P) -> Option<&mut TileState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.tiles.get_mut(index)
    }

    pub fn enumerate_tiles(&self) -> impl Iterator<Item = (Position, &TileState)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (self.index_to_pos(index), tile))
    }

    pub fn alive_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_alive()).count()
    }

    pub fn same_dimensions(&self, other: &GameBoard) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// The position reached by stepping `(d_row, d_col)` from `pos`, wrapping
    /// around both edges. Never out of bounds, even on a 1-wide board.
    pub fn wrapped_neighbor(&self, pos: Position, d_row: isize, d_col: isize) -> Position {
        Position {
            row: wrap(pos.row, d_row, self.rows),
            col: wrap(pos.col, d_col, self.cols),
        }
    }

    /// One byte per tile, row-major, 1 for alive and 0 for dead.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tiles.iter().map(|tile| u8::from(*tile)).collect()
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [TileState] {
        &mut self.tiles
    }

    pub(crate) fn index_to_pos(&self, index: usize) -> Position {
        let row = index / self.cols;
        let col = index % self.cols;
        Position { row, col }
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { row, col } = pos.into();

        if row >= self.rows {
            return None;
        }

        if col >= self.cols {
            return None;
        }

        Some(row * self.cols + col)
    }
}

fn wrap(coord: usize, offset: isize, len: usize) -> usize {
    (coord as isize + offset).rem_euclid(len as isize) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TileState {
    Alive,

    #[default]
    Dead,
}

impl TileState {
    pub fn is_alive(self) -> bool {
        self == TileState::Alive
    }
}

impl From<TileState> for u8 {
    fn from(value: TileState) -> Self {
        match value {
            TileState::Alive => 1,
            TileState::Dead => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            GameBoard::new(0, 4),
            Err(BoardError::ZeroDimension { rows: 0, cols: 4 })
        );
        assert!(GameBoard::new(3, 0).is_err());
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert_eq!(
            GameBoard::new(usize::MAX, 2),
            Err(BoardError::TooLarge {
                rows: usize::MAX,
                cols: 2
            })
        );
        assert!(matches!(
            GameBoard::with_alive(usize::MAX / 2 + 1, 2, [[0, 0]]),
            Err(BoardError::TooLarge { .. })
        ));
    }

    #[test]
    fn tiles_are_addressed_row_major() {
        let board = GameBoard::with_alive(3, 4, [[1, 2]]).unwrap();

        assert_eq!(board.tiles()[6], TileState::Alive);
        assert_eq!(board.alive_count(), 1);
        assert_eq!(board.index_to_pos(6), Position::new(1, 2));
    }

    #[test]
    fn out_of_range_seed_is_rejected() {
        let err = GameBoard::with_alive(3, 4, [[3, 0]]).unwrap_err();

        assert_eq!(
            err,
            BoardError::OutOfBounds {
                row: 3,
                col: 0,
                rows: 3,
                cols: 4
            }
        );
    }

    #[test]
    fn wrapped_neighbor_crosses_every_edge() {
        let board = GameBoard::new(5, 7).unwrap();
        let corner = Position::new(0, 0);

        assert_eq!(board.wrapped_neighbor(corner, -1, -1), Position::new(4, 6));
        assert_eq!(
            board.wrapped_neighbor(Position::new(4, 6), 1, 1),
            Position::new(0, 0)
        );
        assert_eq!(board.wrapped_neighbor(corner, 0, 1), Position::new(0, 1));
    }

    #[test]
    fn wrapped_neighbor_on_single_tile_is_itself() {
        let board = GameBoard::new(1, 1).unwrap();
        let only = Position::new(0, 0);

        for d_row in -1..=1 {
            for d_col in -1..=1 {
                assert_eq!(board.wrapped_neighbor(only, d_row, d_col), only);
            }
        }
    }

    #[test]
    fn random_board_has_exact_alive_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = GameBoard::new_random(6, 5, 12, &mut rng).unwrap();

        assert_eq!(board.alive_count(), 12);
    }

    #[test]
    fn random_board_can_fill_every_tile() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = GameBoard::new_random(3, 4, 12, &mut rng).unwrap();

        assert!(board.tiles().iter().all(|tile| tile.is_alive()));
    }

    #[test]
    fn random_board_cannot_exceed_capacity() {
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            GameBoard::new_random(2, 2, 5, &mut rng),
            Err(BoardError::TooManyAlive {
                alive: 5,
                capacity: 4
            })
        );
    }

    #[test]
    fn bytes_mirror_tiles() {
        let board = GameBoard::with_alive(2, 2, [[0, 1], [1, 0]]).unwrap();

        assert_eq!(board.to_bytes(), vec![0, 1, 1, 0]);
    }
}
