//! Wireworld simulation core.
//!
//! A fixed-size [`Grid`] of four-state [`Cell`]s, the per-tick
//! [`transition`] rule, a [`RegionBuffer`] for copy/paste, a line-oriented
//! [`codec`] for persistence, and the [`Simulation`] controller that ties
//! them together behind edit and run modes.
//!
//! Rendering and input mapping live outside this crate; they read cells via
//! [`Simulation::cell_at`] and drive it with edit and `advance` calls.

pub mod cell;
pub mod codec;
pub mod controller;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod region;
pub mod transition;

pub use cell::Cell;
pub use controller::{Layer, Mode, RunningState, Simulation, DEFAULT_TICK_INTERVAL};
pub use error::{Result, WireworldError};
pub use grid::{Census, Grid};
pub use region::RegionBuffer;
