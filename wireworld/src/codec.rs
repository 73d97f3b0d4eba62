// codec.rs - Line-oriented digit record for grids
//
// A record is `height` lines of exactly `width` characters. Each character
// is the conductive class of one cell: `'0'` for `Dead`, `'1'` for every
// other state. The format is lossy: loading turns every `'1'` into `Wire`,
// so heads and tails come back as plain wire.
//
// On load, characters other than `'0'` and `'1'` leave the target cell as it
// was. Records written by older builds that stored raw ordinals (`2`, `3`)
// therefore still load.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cell::Cell;
use crate::error::{Result, WireworldError};
use crate::grid::Grid;

/// Record character for a cell.
pub fn class_digit(cell: Cell) -> char {
    match cell {
        Cell::Dead => '0',
        Cell::Wire | Cell::ElectronHead | Cell::ElectronTail => '1',
    }
}

/// Cell a record character loads as, or `None` to keep the current value.
pub fn cell_for_digit(ch: char) -> Option<Cell> {
    match ch {
        '0' => Some(Cell::Dead),
        '1' => Some(Cell::Wire),
        _ => None,
    }
}

pub fn encode(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() {
        out.extend(grid.row(y).iter().map(|&c| class_digit(c)));
        out.push('\n');
    }
    out
}

/// Applies a record to `grid`. Either every line fits and the whole record is
/// applied, or `grid` is left untouched.
pub fn decode_into(text: &str, grid: &mut Grid) -> Result<()> {
    let (width, height) = grid.dimensions();
    let mut staged = grid.clone();
    let mut lines = 0;

    for (y, line) in text.lines().enumerate() {
        if y >= height {
            return Err(WireworldError::malformed(
                y + 1,
                format!("record has more than {height} lines"),
            ));
        }
        let len = line.chars().count();
        if len != width {
            return Err(WireworldError::malformed(
                y + 1,
                format!("expected {width} characters, found {len}"),
            ));
        }
        let row = staged.row_mut(y);
        for (x, ch) in line.chars().enumerate() {
            if let Some(cell) = cell_for_digit(ch) {
                row[x] = cell;
            }
        }
        lines = y + 1;
    }

    if lines != height {
        return Err(WireworldError::malformed(
            lines + 1,
            format!("expected {height} lines, found {lines}"),
        ));
    }

    *grid = staged;
    Ok(())
}

/// Builds a fresh grid sized from the record itself.
pub fn decode(text: &str) -> Result<Grid> {
    let width = text
        .lines()
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(0);
    let height = text.lines().count();
    if width == 0 || height == 0 {
        return Err(WireworldError::malformed(1, "empty record"));
    }
    let mut grid = Grid::new(width, height)?;
    decode_into(text, &mut grid)?;
    Ok(grid)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `grid` to `path` as a whole: the record goes to a sibling staging
/// file first and is renamed over `path` only once fully written.
pub fn save_file(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let staging = staging_path(path);

    let written = (|| -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(&staging)?);
        writer.write_all(encode(grid).as_bytes())?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        fs::rename(&staging, path)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    tracing::info!(path = %path.display(), "saved grid");
    Ok(())
}

/// Loads the record at `path` into `grid`, all or nothing.
pub fn load_file(path: impl AsRef<Path>, grid: &mut Grid) -> Result<()> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    decode_into(&text, grid)?;
    tracing::info!(path = %path.display(), "loaded grid");
    Ok(())
}
