// transition.rs - The Wireworld rule, applied to a whole grid per tick
//
// Every cell is computed from the pre-step grid only, so the output always
// goes to separate storage.

use std::sync::Arc;

use crate::cell::Cell;
use crate::error::{Result, WireworldError};
use crate::grid::Grid;

/// Moore neighbourhood offsets.
#[rustfmt::skip]
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Heads adjacent to `(x, y)`, skipping neighbours past the edges.
pub fn head_neighbours(grid: &Grid, x: usize, y: usize) -> usize {
    NEIGHBOURS
        .iter()
        .filter(|&&(dx, dy)| {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            grid.in_bounds(nx, ny) && grid.row(ny as usize)[nx as usize] == Cell::ElectronHead
        })
        .count()
}

/// Next state of the cell at `(x, y)`.
pub fn next_cell(grid: &Grid, x: usize, y: usize) -> Cell {
    match grid.row(y)[x] {
        Cell::Dead => Cell::Dead,
        Cell::ElectronHead => Cell::ElectronTail,
        Cell::ElectronTail => Cell::Wire,
        Cell::Wire => match head_neighbours(grid, x, y) {
            1 | 2 => Cell::ElectronHead,
            _ => Cell::Wire,
        },
    }
}

/// Produces the next generation; `source` is left untouched.
pub fn step(source: &Grid) -> Grid {
    let mut next = source.clone();
    step_into(source, &mut next);
    next
}

/// Writes the next generation of `source` into `dest`.
///
/// # Panics
/// If the two grids differ in size.
pub fn step_into(source: &Grid, dest: &mut Grid) {
    assert_eq!(
        source.dimensions(),
        dest.dimensions(),
        "step buffers must share dimensions"
    );
    for y in 0..source.height() {
        let out = dest.row_mut(y);
        for (x, slot) in out.iter_mut().enumerate() {
            *slot = next_cell(source, x, y);
        }
    }
}

/// Row coroutine: computes one output row, yielding after every cell.
async fn process_row(row_index: usize, source: Arc<Grid>) -> (usize, Vec<Cell>) {
    let mut row = Vec::with_capacity(source.width());
    for x in 0..source.width() {
        row.push(next_cell(&source, x, row_index));
        tokio::task::yield_now().await;
    }
    (row_index, row)
}

/// Same result as [`step`], with one tokio task per row.
///
/// Must be called from inside a tokio runtime.
pub async fn step_rows(source: Arc<Grid>) -> Result<Grid> {
    let (width, height) = source.dimensions();
    let mut handles = Vec::with_capacity(height);
    for y in 0..height {
        handles.push(tokio::spawn(process_row(y, Arc::clone(&source))));
    }

    let mut next = Grid::new(width, height)?;
    for handle in handles {
        let (row_index, completed) = handle
            .await
            .map_err(|e| WireworldError::StepFailed(e.to_string()))?;
        next.row_mut(row_index).copy_from_slice(&completed);
    }
    tracing::trace!(width, height, "stepped grid by rows");
    Ok(next)
}
