// grid.rs - Fixed-size cell storage for the Wireworld board

use crate::cell::Cell;
use crate::error::{Result, WireworldError};

/// Per-state cell counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Census {
    pub dead: usize,
    pub wire: usize,
    pub heads: usize,
    pub tails: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.dead + self.wire + self.heads + self.tails
    }
}

/// A `width x height` board addressed by `(x, y)`, stored row-major.
///
/// Cloning a grid deep-copies its cells; two grids never share storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates an all-`Dead` grid.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(WireworldError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Signed bounds test, for callers that compute offsets around a cell.
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(WireworldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// One row of cells, left to right.
    ///
    /// # Panics
    /// If `y >= height`.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * self.width;
        &mut self.cells[start..start + self.width]
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Iterates `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % width, i / width, cell))
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for cell in &self.cells {
            match cell {
                Cell::Dead => census.dead += 1,
                Cell::Wire => census.wire += 1,
                Cell::ElectronHead => census.heads += 1,
                Cell::ElectronTail => census.tails += 1,
            }
        }
        census
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.dimensions(), (4, 3));
        assert!(grid.iter().all(|(_, _, c)| c == Cell::Dead));
        assert_eq!(grid.census().dead, 12);
    }

    #[test]
    fn zero_extent_is_rejected() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(WireworldError::InvalidDimension { width: 0, height: 5 })
        ));
        assert!(Grid::new(5, 0).is_err());
    }

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(2, 1, Cell::Wire).unwrap();
        assert_eq!(grid.get(2, 1).unwrap(), Cell::Wire);

        assert!(matches!(
            grid.get(3, 0),
            Err(WireworldError::OutOfBounds { x: 3, y: 0, .. })
        ));
        assert!(grid.set(0, 2, Cell::Wire).is_err());
    }

    #[test]
    fn rows_are_row_major() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(1, 1, Cell::ElectronHead).unwrap();
        assert_eq!(grid.row(0), &[Cell::Dead; 3]);
        assert_eq!(grid.row(1), &[Cell::Dead, Cell::ElectronHead, Cell::Dead]);
    }

    #[test]
    fn signed_bounds() {
        let grid = Grid::new(2, 2).unwrap();
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(1, 1));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, 2));
    }

    #[test]
    fn clone_does_not_alias() {
        let mut a = Grid::new(2, 2).unwrap();
        let b = a.clone();
        a.set(0, 0, Cell::Wire).unwrap();
        assert_eq!(b.get(0, 0).unwrap(), Cell::Dead);
    }
}
