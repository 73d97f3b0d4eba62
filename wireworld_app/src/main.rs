// main.rs - Wireworld editor and runner
// Window, input and drawing live in ui.rs; the simulation is the wireworld crate

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wireworld::{patterns, Simulation};

mod config;
mod ui;

use config::{AppConfig, MAX_TILE_SIZE, MIN_TILE_SIZE};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "wireworld.toml")]
    config: PathBuf,

    /// Grid width in cells, overrides the config
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells, overrides the config
    #[arg(long)]
    height: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "wireworld=info,wireworld_app=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load(&args.config)?;
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let app = WireworldApp::new(config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Wireworld",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}

/// Rectangle being selected for copy, as two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl Selection {
    /// Inclusive `(x0, y0, x1, y1)` with the corners ordered.
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        (
            self.start.0.min(self.end.0),
            self.start.1.min(self.end.1),
            self.start.0.max(self.end.0),
            self.start.1.max(self.end.1),
        )
    }
}

pub struct WireworldApp {
    pub sim: Simulation,
    pub config: AppConfig,
    pub tile_size: f32,
    pub selection: Option<Selection>,
    pub hovered: Option<(usize, usize)>,
    pub selected_pattern: usize,
    pub status: String,

    runtime: tokio::runtime::Runtime,
}

impl WireworldApp {
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut sim = Simulation::new(config.width, config.height)
            .with_context(|| format!("creating {}x{} grid", config.width, config.height))?;
        sim.set_tick_interval(Duration::from_millis(config.tick_interval_ms));
        let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;

        Ok(Self {
            sim,
            tile_size: config.tile_size,
            config,
            selection: None,
            hovered: None,
            selected_pattern: 0,
            status: String::from("Editing"),
            runtime,
        })
    }

    /// Per-frame pacing: at most one tick.
    pub fn advance(&mut self) {
        let now = Instant::now();
        if self.config.concurrent_rows {
            if let Err(e) = self.runtime.block_on(self.sim.advance_concurrent(now)) {
                self.report(format!("step failed: {e}"));
                self.sim.stop_run();
            }
        } else {
            self.sim.advance(now);
        }
    }

    pub fn toggle_run(&mut self) {
        if self.sim.is_running() {
            self.sim.stop_run();
        } else {
            self.sim.start_run(Instant::now());
        }
    }

    pub fn apply_speed_preset(&mut self, index: usize) {
        if let Some(&ms) = self.config.speed_presets_ms.get(index) {
            self.sim.set_tick_interval(Duration::from_millis(ms));
        }
    }

    pub fn zoom_in(&mut self) {
        self.tile_size = (self.tile_size * 2.0).min(MAX_TILE_SIZE);
    }

    pub fn zoom_out(&mut self) {
        self.tile_size = (self.tile_size / 2.0).max(MIN_TILE_SIZE);
    }

    pub fn save(&mut self) {
        match self.sim.save(&self.config.save_path) {
            Ok(()) => self.status = format!("Saved {}", self.config.save_path.display()),
            Err(e) => self.report(format!("save failed: {e}")),
        }
    }

    pub fn load(&mut self) {
        match self.sim.load(&self.config.save_path) {
            Ok(()) => self.status = format!("Loaded {}", self.config.save_path.display()),
            Err(e) => self.report(format!("load failed: {e}")),
        }
    }

    pub fn copy_selection(&mut self) {
        let Some(selection) = self.selection else {
            self.report("nothing selected".to_string());
            return;
        };
        let (x0, y0, x1, y1) = selection.bounds();
        match self.sim.capture_region(x0, y0, x1, y1) {
            Ok((w, h)) => self.status = format!("Copied {w}x{h}"),
            Err(e) => self.report(format!("copy failed: {e}")),
        }
    }

    pub fn paste_at_hover(&mut self) {
        if let Some((x, y)) = self.hovered {
            let written = self.sim.paste_region(x as i64, y as i64);
            self.status = format!("Pasted {written} cells");
        }
    }

    pub fn stamp_at_hover(&mut self) {
        let Some((x, y)) = self.hovered else {
            return;
        };
        let name = patterns::PATTERNS[self.selected_pattern].name;
        if let Err(e) = self.sim.stamp_pattern(name, x as i64, y as i64) {
            self.report(format!("stamp failed: {e}"));
        }
    }

    pub fn report(&mut self, message: String) {
        tracing::warn!("{message}");
        self.status = message;
    }
}
