use crate::board::TileState;

/// The alive-neighbor count that lets a dead tile come alive.
pub const BIRTH: usize = 3;

/// Alive-neighbor counts that keep an alive tile alive.
pub const SURVIVE: [usize; 2] = [2, 3];

/// Classic Game of Life transition: survive on 2 or 3, birth on exactly 3.
pub fn next_state(tile: TileState, alive_neighbors: usize) -> TileState {
    let alive = match tile {
        TileState::Alive => SURVIVE.contains(&alive_neighbors),
        TileState::Dead => alive_neighbors == BIRTH,
    };

    if alive {
        TileState::Alive
    } else {
        TileState::Dead
    }
}
