// region.rs - Rectangular copy buffer for copy/paste
//
// Capture is strict about its corners; paste clips silently at the grid
// edges so a shape may overhang the board.

use crate::cell::Cell;
use crate::error::{Result, WireworldError};
use crate::grid::Grid;

/// A captured block of cells. Carries no anchor of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl RegionBuffer {
    /// Builds a buffer from explicit rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(WireworldError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Copies the inclusive rectangle `(x0, y0)..=(x1, y1)` out of `source`.
    pub fn capture(source: &Grid, x0: usize, y0: usize, x1: usize, y1: usize) -> Result<Self> {
        let (width, height) = source.dimensions();
        if x0 > x1 || y0 > y1 || x1 >= width || y1 >= height {
            return Err(WireworldError::InvalidRegion {
                x0,
                y0,
                x1,
                y1,
                width,
                height,
            });
        }

        let cells = (y0..=y1)
            .flat_map(|y| source.row(y)[x0..=x1].iter().copied())
            .collect();
        Ok(Self {
            width: x1 - x0 + 1,
            height: y1 - y0 + 1,
            cells,
        })
    }

    /// Writes the buffer into `dest` with its top-left at `(anchor_x, anchor_y)`.
    ///
    /// Cells landing outside `dest` are skipped. Returns how many were written.
    pub fn paste(&self, dest: &mut Grid, anchor_x: i64, anchor_y: i64) -> usize {
        let mut written = 0;
        for (i, &cell) in self.cells.iter().enumerate() {
            let (Some(dx), Some(dy)) = (
                anchor_x.checked_add((i % self.width) as i64),
                anchor_y.checked_add((i / self.width) as i64),
            ) else {
                continue;
            };
            if dest.in_bounds(dx, dy) {
                dest.row_mut(dy as usize)[dx as usize] = cell;
                written += 1;
            }
        }
        written
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        if x >= self.width || y >= self.height {
            return Err(WireworldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.cells[y * self.width + x])
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
