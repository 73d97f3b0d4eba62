// controller.rs - Edit/run state machine driven by the presentation layer
//
// The edit grid and the running grid never share storage: starting a run
// deep-copies the edit grid, and stopping a run drops the copy.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cell::Cell;
use crate::codec;
use crate::error::Result;
use crate::grid::{Census, Grid};
use crate::patterns;
use crate::region::RegionBuffer;
use crate::transition;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Running,
}

/// Which grid a read goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Edit,
    /// The running grid, or the edit grid when no run is active.
    Running,
}

/// Grids of an active run: `current` plus a scratch buffer for the next tick.
#[derive(Debug)]
pub struct RunningState {
    current: Grid,
    scratch: Grid,
    tick: u64,
}

impl RunningState {
    fn from_snapshot(edit: &Grid) -> Self {
        Self {
            current: edit.clone(),
            scratch: edit.clone(),
            tick: 0,
        }
    }

    fn step(&mut self) {
        transition::step_into(&self.current, &mut self.scratch);
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.tick += 1;
    }

    fn install(&mut self, next: Grid) {
        self.scratch = std::mem::replace(&mut self.current, next);
        self.tick += 1;
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}

/// Owns the edit grid, the active run and the copy buffer.
#[derive(Debug)]
pub struct Simulation {
    edit: Grid,
    run: Option<RunningState>,
    clipboard: Option<RegionBuffer>,
    tick_interval: Duration,
    last_update: Instant,
}

impl Simulation {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self::from_grid(Grid::new(width, height)?))
    }

    pub fn from_grid(edit: Grid) -> Self {
        Self {
            edit,
            run: None,
            clipboard: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            last_update: Instant::now(),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.run.is_some() {
            Mode::Running
        } else {
            Mode::Editing
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    // === Run control ===

    /// Snapshots the edit grid and starts ticking from 0. Restarts an
    /// active run from a fresh snapshot.
    pub fn start_run(&mut self, now: Instant) {
        self.run = Some(RunningState::from_snapshot(&self.edit));
        self.last_update = now;
        tracing::info!("run started");
    }

    pub fn stop_run(&mut self) {
        if let Some(run) = self.run.take() {
            tracing::info!(tick = run.tick, "run stopped");
        }
    }

    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
        tracing::debug!(?interval, "tick interval changed");
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    fn tick_due(&self, now: Instant) -> bool {
        self.run.is_some() && now.saturating_duration_since(self.last_update) >= self.tick_interval
    }

    /// Applies at most one step if a full interval has passed since the last
    /// one. Returns whether a step happened.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.tick_due(now) {
            return false;
        }
        self.step_once();
        self.last_update = now;
        true
    }

    /// [`advance`](Self::advance) computed with one tokio task per row.
    pub async fn advance_concurrent(&mut self, now: Instant) -> Result<bool> {
        if !self.tick_due(now) {
            return Ok(false);
        }
        let Some(run) = self.run.as_mut() else {
            return Ok(false);
        };
        let next = transition::step_rows(Arc::new(run.current.clone())).await?;
        run.install(next);
        tracing::trace!(tick = run.tick, "tick");
        self.last_update = now;
        Ok(true)
    }

    /// Steps the active run once, ignoring pacing.
    pub fn step_once(&mut self) -> bool {
        match self.run.as_mut() {
            Some(run) => {
                run.step();
                tracing::trace!(tick = run.tick, "tick");
                true
            }
            None => false,
        }
    }

    // === Edits ===
    //
    // Every edit validates its arguments, then stops an active run and
    // applies to the edit grid.

    fn interrupt_run(&mut self) {
        if self.run.is_some() {
            tracing::debug!("edit while running, returning to editing");
            self.stop_run();
        }
    }

    /// Primary action: Dead → Wire → Head → Tail → Wire.
    pub fn cycle_cell(&mut self, x: usize, y: usize) -> Result<Cell> {
        let next = self.edit.get(x, y)?.cycled();
        self.interrupt_run();
        self.edit.set(x, y, next)?;
        tracing::debug!(x, y, %next, "cycled cell");
        Ok(next)
    }

    /// Drag action: lays wire on dead cells only.
    pub fn paint_wire(&mut self, x: usize, y: usize) -> Result<Cell> {
        let current = self.edit.get(x, y)?;
        self.interrupt_run();
        if current == Cell::Dead {
            self.edit.set(x, y, Cell::Wire)?;
            return Ok(Cell::Wire);
        }
        Ok(current)
    }

    /// Secondary action: forces the cell to Dead.
    pub fn erase_cell(&mut self, x: usize, y: usize) -> Result<()> {
        self.edit.get(x, y)?;
        self.interrupt_run();
        self.edit.set(x, y, Cell::Dead)
    }

    /// Resets the edit grid to all Dead.
    pub fn clear(&mut self) {
        self.interrupt_run();
        self.edit.fill(Cell::Dead);
        tracing::debug!("grid cleared");
    }

    // === Copy buffer ===

    /// Copies an inclusive rectangle of the edit grid into the copy buffer.
    /// Like every edit action, stops an active run once the corners check out.
    pub fn capture_region(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Result<(usize, usize)> {
        let buffer = RegionBuffer::capture(&self.edit, x0, y0, x1, y1)?;
        self.interrupt_run();
        let dims = buffer.dimensions();
        self.clipboard = Some(buffer);
        tracing::debug!(?dims, "region captured");
        Ok(dims)
    }

    /// Pastes the copy buffer at an anchor, clipping at the edges. Returns the
    /// number of cells written; nothing happens while the buffer is empty.
    pub fn paste_region(&mut self, anchor_x: i64, anchor_y: i64) -> usize {
        let Some(buffer) = self.clipboard.take() else {
            tracing::warn!("paste with an empty copy buffer");
            return 0;
        };
        self.interrupt_run();
        let written = buffer.paste(&mut self.edit, anchor_x, anchor_y);
        self.clipboard = Some(buffer);
        written
    }

    /// Pastes a named preset pattern at an anchor, clipping at the edges.
    pub fn stamp_pattern(&mut self, name: &str, anchor_x: i64, anchor_y: i64) -> Result<usize> {
        let region = patterns::find(name)?.to_region()?;
        self.interrupt_run();
        let written = region.paste(&mut self.edit, anchor_x, anchor_y);
        tracing::debug!(name, written, "pattern stamped");
        Ok(written)
    }

    // === Persistence ===

    /// Saves the edit grid.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        codec::save_file(&self.edit, path)
    }

    /// Loads into the edit grid. A failed load leaves the grid and the mode
    /// as they were.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let mut staged = self.edit.clone();
        codec::load_file(path, &mut staged)?;
        self.interrupt_run();
        self.edit = staged;
        Ok(())
    }

    // === Queries ===

    fn layer(&self, layer: Layer) -> &Grid {
        match (layer, &self.run) {
            (Layer::Running, Some(run)) => &run.current,
            _ => &self.edit,
        }
    }

    pub fn cell_at(&self, x: usize, y: usize, layer: Layer) -> Result<Cell> {
        self.layer(layer).get(x, y)
    }

    /// Tick of the active run, 0 while editing.
    pub fn current_tick(&self) -> u64 {
        self.run.as_ref().map_or(0, RunningState::tick)
    }

    pub fn grid_dimensions(&self) -> (usize, usize) {
        self.edit.dimensions()
    }

    pub fn copy_buffer_dimensions(&self) -> Option<(usize, usize)> {
        self.clipboard.as_ref().map(RegionBuffer::dimensions)
    }

    pub fn census(&self, layer: Layer) -> Census {
        self.layer(layer).census()
    }

    pub fn edit_grid(&self) -> &Grid {
        &self.edit
    }

    pub fn running_state(&self) -> Option<&RunningState> {
        self.run.as_ref()
    }

    pub fn copy_buffer(&self) -> Option<&RegionBuffer> {
        self.clipboard.as_ref()
    }
}
