//! Generation-transition rule (B3/S23).

use life_core::Cell;

/// Next state of `cell` given its live neighbor count
///
/// Only `alive` is consulted. Births are marked newly born; survivors and
/// dead cells never are.
pub fn transition(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell.alive, live_neighbors) {
        (false, 3) => Cell::born(),
        (true, 2) | (true, 3) => Cell::survivor(),
        _ => Cell::dead(),
    }
}
