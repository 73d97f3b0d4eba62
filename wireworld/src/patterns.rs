// patterns.rs - Named preset shapes for stamping into the edit grid

use crate::cell::Cell;
use crate::error::{Result, WireworldError};
use crate::region::RegionBuffer;

/// A named preset, drawn as rows of `.` dead, `#` wire, `H` head, `t` tail.
pub struct Pattern {
    pub name: &'static str,
    pub rows: &'static [&'static str],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Signal",
        rows: &["tH########"],
    },
    Pattern {
        // Period-10 loop feeding a pulse into the output wire on the right.
        name: "Clock",
        rows: &[
            ".##tH.....",
            "#....#####",
            ".####.....",
        ],
    },
    Pattern {
        name: "Fork",
        rows: &[
            ".....#",
            ".....#",
            "tH####",
            ".....#",
            ".....#",
        ],
    },
];

fn glyph_cell(ch: char) -> Cell {
    match ch {
        '#' => Cell::Wire,
        'H' => Cell::ElectronHead,
        't' => Cell::ElectronTail,
        _ => Cell::Dead,
    }
}

impl Pattern {
    pub fn to_region(&self) -> Result<RegionBuffer> {
        let rows = self
            .rows
            .iter()
            .map(|row| row.chars().map(glyph_cell).collect())
            .collect();
        RegionBuffer::from_rows(rows)
    }
}

/// Looks a preset up by name, ignoring case.
pub fn find(name: &str) -> Result<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| WireworldError::UnknownPattern(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::transition::step;

    fn stamped(pattern: &Pattern) -> Grid {
        let region = pattern.to_region().unwrap();
        let (w, h) = region.dimensions();
        let mut grid = Grid::new(w, h).unwrap();
        region.paste(&mut grid, 0, 0);
        grid
    }

    #[test]
    fn every_preset_is_rectangular() {
        for pattern in PATTERNS {
            let region = pattern.to_region().unwrap();
            assert_eq!(region.dimensions().1, pattern.rows.len(), "{}", pattern.name);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find("clock").unwrap().name, "Clock");
        assert!(matches!(find("glider"), Err(WireworldError::UnknownPattern(_))));
    }

    #[test]
    fn clock_repeats_every_ten_ticks() {
        let start = stamped(find("Clock").unwrap());
        let mut grid = start.clone();
        for _ in 0..10 {
            grid = step(&grid);
        }
        assert_eq!(grid, start);
    }

    #[test]
    fn fork_splits_the_signal() {
        let mut grid = stamped(find("Fork").unwrap());
        for _ in 0..5 {
            grid = step(&grid);
        }
        assert_eq!(grid.get(5, 0).unwrap(), Cell::ElectronHead);
        assert_eq!(grid.get(5, 4).unwrap(), Cell::ElectronHead);
    }
}
