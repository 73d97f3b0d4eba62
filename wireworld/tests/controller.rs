use std::path::PathBuf;
use std::time::{Duration, Instant};

use wireworld::{Cell, Layer, Mode, Simulation, WireworldError};

const TICK: Duration = Duration::from_millis(50);

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wireworld-{}-{name}", std::process::id()))
}

fn signal_sim() -> Simulation {
    let mut sim = Simulation::new(10, 3).unwrap();
    sim.stamp_pattern("Signal", 0, 1).unwrap();
    sim.set_tick_interval(TICK);
    sim
}

#[test]
fn edit_while_running_returns_to_editing() {
    let mut sim = signal_sim();
    let t0 = Instant::now();
    sim.start_run(t0);
    assert_eq!(sim.mode(), Mode::Running);
    assert!(sim.advance(t0 + TICK));
    assert!(sim.advance(t0 + TICK * 2));
    assert_eq!(sim.current_tick(), 2);

    sim.erase_cell(9, 1).unwrap();
    assert!(!sim.is_running());
    assert_eq!(sim.mode(), Mode::Editing);

    // The edit landed on the edit grid, which never saw the run.
    assert_eq!(sim.cell_at(9, 1, Layer::Edit).unwrap(), Cell::Dead);
    assert_eq!(sim.cell_at(1, 1, Layer::Edit).unwrap(), Cell::ElectronHead);

    sim.start_run(t0 + TICK * 3);
    assert_eq!(sim.current_tick(), 0);
}

#[test]
fn edit_and_running_grids_never_alias() {
    let mut sim = signal_sim();
    let before = sim.edit_grid().clone();
    let t0 = Instant::now();
    sim.start_run(t0);

    let running = sim.running_state().unwrap().current();
    assert!(!std::ptr::eq(
        sim.edit_grid().row(0).as_ptr(),
        running.row(0).as_ptr()
    ));

    for i in 1..=3 {
        sim.advance(t0 + TICK * i);
    }
    assert_eq!(sim.edit_grid(), &before);
    assert_eq!(sim.cell_at(4, 1, Layer::Running).unwrap(), Cell::ElectronHead);
    assert_eq!(sim.cell_at(4, 1, Layer::Edit).unwrap(), Cell::Wire);
}

#[test]
fn set_tick_interval_changes_pacing() {
    let mut sim = signal_sim();
    let t0 = Instant::now();
    sim.start_run(t0);
    sim.set_tick_interval(Duration::from_secs(2));
    assert!(!sim.advance(t0 + Duration::from_secs(1)));
    assert!(sim.advance(t0 + Duration::from_secs(2)));
}

#[test]
fn stop_run_discards_the_snapshot() {
    let mut sim = signal_sim();
    let t0 = Instant::now();
    sim.start_run(t0);
    sim.advance(t0 + TICK);
    sim.stop_run();
    assert!(sim.running_state().is_none());
    assert_eq!(sim.current_tick(), 0);
    assert!(!sim.advance(t0 + TICK * 5));
}

#[test]
fn copy_then_paste_overhanging_the_edge() {
    let mut sim = signal_sim();
    assert_eq!(sim.capture_region(0, 1, 3, 1).unwrap(), (4, 1));
    assert_eq!(sim.copy_buffer_dimensions(), Some((4, 1)));

    let written = sim.paste_region(8, 2);
    assert_eq!(written, 2);
    assert_eq!(sim.cell_at(8, 2, Layer::Edit).unwrap(), Cell::ElectronTail);
    assert_eq!(sim.cell_at(9, 2, Layer::Edit).unwrap(), Cell::ElectronHead);
    assert_eq!(sim.cell_at(0, 2, Layer::Edit).unwrap(), Cell::Dead);
}

#[test]
fn inverted_capture_is_rejected_and_keeps_old_buffer() {
    let mut sim = signal_sim();
    sim.capture_region(0, 0, 1, 1).unwrap();
    assert!(matches!(
        sim.capture_region(3, 0, 2, 0),
        Err(WireworldError::InvalidRegion { .. })
    ));
    assert_eq!(sim.copy_buffer_dimensions(), Some((2, 2)));
}

#[test]
fn save_then_load_is_lossy_for_heads_and_tails() {
    let path = scratch_path("roundtrip.csv");
    let mut sim = signal_sim();
    sim.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "0000000000\n1111111111\n0000000000\n");

    let mut other = Simulation::new(10, 3).unwrap();
    other.load(&path).unwrap();
    let census = other.census(Layer::Edit);
    assert_eq!(census.wire, 10);
    assert_eq!(census.heads + census.tails, 0);

    sim.clear();
    sim.load(&path).unwrap();
    assert_eq!(sim.cell_at(1, 1, Layer::Edit).unwrap(), Cell::Wire);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn load_stops_a_run_only_on_success() {
    let good = scratch_path("good.csv");
    let bad = scratch_path("bad.csv");
    std::fs::write(&good, "1000000000\n0000000000\n0000000000\n").unwrap();
    std::fs::write(&bad, "10\n").unwrap();

    let mut sim = signal_sim();
    sim.start_run(Instant::now());
    let before = sim.edit_grid().clone();

    assert!(matches!(
        sim.load(&bad),
        Err(WireworldError::MalformedRecord { .. })
    ));
    assert!(sim.is_running());
    assert_eq!(sim.edit_grid(), &before);

    sim.load(&good).unwrap();
    assert!(!sim.is_running());
    assert_eq!(sim.cell_at(0, 0, Layer::Edit).unwrap(), Cell::Wire);
    // Characters other than 0/1 were absent; 0 overwrote the old signal.
    assert_eq!(sim.cell_at(1, 1, Layer::Edit).unwrap(), Cell::Dead);

    std::fs::remove_file(&good).unwrap();
    std::fs::remove_file(&bad).unwrap();
}

#[test]
fn missing_file_is_a_storage_error() {
    let mut sim = signal_sim();
    let err = sim.load(scratch_path("does-not-exist.csv")).unwrap_err();
    assert!(matches!(err, WireworldError::Storage(_)));
}

#[test]
fn save_leaves_no_staging_file_behind() {
    let path = scratch_path("staged.csv");
    let sim = signal_sim();
    sim.save(&path).unwrap();
    let mut staging = path.clone().into_os_string();
    staging.push(".tmp");
    assert!(!PathBuf::from(staging).exists());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn unknown_pattern_is_reported() {
    let mut sim = signal_sim();
    assert!(matches!(
        sim.stamp_pattern("Glider", 0, 0),
        Err(WireworldError::UnknownPattern(_))
    ));
}
