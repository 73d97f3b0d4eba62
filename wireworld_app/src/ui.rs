// ui.rs - Drawing and input for the Wireworld window
//
// Primary press cycles a cell, primary drag lays wire, secondary erases,
// shift+drag selects a region. Keys: Space run/stop, 1-4 speed, -/= zoom,
// E save, L load, C copy, V paste, P stamp pattern.

use eframe::egui;
use egui::{Color32, Key, Pos2, Rect, Sense, Stroke, Vec2};
use wireworld::{patterns, Cell, Layer, Mode};

use crate::config::Palette;
use crate::{Selection, WireworldApp};

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

fn cell_color(palette: &Palette, cell: Cell, hovered: bool) -> Color32 {
    let [r, g, b] = match cell {
        Cell::Dead => palette.dead,
        Cell::Wire => palette.wire,
        Cell::ElectronHead => palette.head,
        Cell::ElectronTail => palette.tail,
    };
    let r = if hovered { r.saturating_add(palette.hover_boost) } else { r };
    Color32::from_rgb(r, g, b)
}

/// Grid coordinate under a screen position, if it falls on the board.
pub fn cell_under(pos: Pos2, origin: Pos2, tile: f32, dims: (usize, usize)) -> Option<(usize, usize)> {
    let local = pos - origin;
    if local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    let x = (local.x / tile) as usize;
    let y = (local.y / tile) as usize;
    (x < dims.0 && y < dims.1).then_some((x, y))
}

/// What a pointer gesture over a board tile does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoardAction {
    StartSelection,
    ExtendSelection,
    Cycle,
    Paint,
    Erase,
    Nothing,
}

/// Held buttons only count once the press began on the board; drags that
/// start on a panel or outside the window pass over it untouched.
fn board_action(pressed: bool, down: bool, secondary: bool, shift: bool, on_board: bool) -> BoardAction {
    if !on_board {
        return BoardAction::Nothing;
    }
    match (shift, pressed, down, secondary) {
        (true, true, _, _) => BoardAction::StartSelection,
        (true, false, true, _) => BoardAction::ExtendSelection,
        (false, true, _, _) => BoardAction::Cycle,
        (false, false, true, _) => BoardAction::Paint,
        (_, false, false, true) => BoardAction::Erase,
        _ => BoardAction::Nothing,
    }
}

impl WireworldApp {
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let pressed = |key: Key| ctx.input(|i| i.key_pressed(key));

        if pressed(Key::Space) {
            self.toggle_run();
        }
        for (i, key) in [Key::Num1, Key::Num2, Key::Num3, Key::Num4].into_iter().enumerate() {
            if pressed(key) {
                self.apply_speed_preset(i);
            }
        }
        if pressed(Key::Minus) {
            self.zoom_out();
        }
        if pressed(Key::PlusEquals) {
            self.zoom_in();
        }
        if pressed(Key::E) {
            self.save();
        }
        if pressed(Key::L) {
            self.load();
        }
        if pressed(Key::C) {
            self.copy_selection();
        }
        if pressed(Key::V) {
            self.paste_at_hover();
        }
        if pressed(Key::P) {
            self.stamp_at_hover();
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.sim.is_running() { "⏸ Stop" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.toggle_run();
            }
            if ui.add_enabled(self.sim.is_running(), egui::Button::new("⏭ Step")).clicked() {
                self.sim.step_once();
            }
            if ui.button("⏹ Clear").clicked() {
                self.sim.clear();
                self.selection = None;
            }

            ui.separator();

            if ui.button("💾 Save").clicked() {
                self.save();
            }
            if ui.button("📂 Load").clicked() {
                self.load();
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Tick interval:");
            let mut ms = self.sim.tick_interval().as_millis() as u64;
            if ui
                .add(egui::Slider::new(&mut ms, 1..=2000).suffix(" ms").logarithmic(true))
                .changed()
            {
                self.sim.set_tick_interval(std::time::Duration::from_millis(ms));
            }

            ui.separator();

            let census = self.sim.census(Layer::Running);
            let mode = match self.sim.mode() {
                Mode::Editing => "Editing".to_string(),
                Mode::Running => format!("Running: tick {}", self.sim.current_tick()),
            };
            ui.label(mode);
            ui.label(format!(
                "wire {} · heads {} · tails {}",
                census.wire, census.heads, census.tails
            ));
            if let Some((w, h)) = self.sim.copy_buffer_dimensions() {
                ui.label(format!("buffer {w}x{h}"));
            }
        });

        ui.label(self.status.as_str());
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let dims = self.sim.grid_dimensions();
        let tile = self.tile_size;
        let total_size = Vec2::new(dims.0 as f32 * tile, dims.1 as f32 * tile);
        let (response, painter) = ui.allocate_painter(total_size, Sense::click_and_drag());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, rgb(self.config.palette.background));

        self.hovered = response
            .hover_pos()
            .and_then(|pos| cell_under(pos, origin, tile, dims));

        let (primary_pressed, primary_down, secondary_down, shift) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.secondary_down(),
                i.modifiers.shift,
            )
        });

        let on_board = response.is_pointer_button_down_on();

        if let Some((x, y)) = self.hovered {
            let result = match board_action(primary_pressed, primary_down, secondary_down, shift, on_board) {
                BoardAction::StartSelection => {
                    self.selection = Some(Selection { start: (x, y), end: (x, y) });
                    Ok(())
                }
                BoardAction::ExtendSelection => {
                    if let Some(selection) = self.selection.as_mut() {
                        selection.end = (x, y);
                    }
                    Ok(())
                }
                BoardAction::Cycle => self.sim.cycle_cell(x, y).map(|_| ()),
                BoardAction::Paint => self.sim.paint_wire(x, y).map(|_| ()),
                BoardAction::Erase => self.sim.erase_cell(x, y),
                BoardAction::Nothing => Ok(()),
            };
            if let Err(e) = result {
                self.report(format!("edit rejected: {e}"));
            }
        }

        // Only draw the tiles inside the visible part of the scroll area.
        let clip = painter.clip_rect();
        let first_x = (((clip.min.x - origin.x) / tile).floor().max(0.0)) as usize;
        let first_y = (((clip.min.y - origin.y) / tile).floor().max(0.0)) as usize;
        let last_x = ((((clip.max.x - origin.x) / tile).ceil().max(0.0)) as usize).min(dims.0);
        let last_y = ((((clip.max.y - origin.y) / tile).ceil().max(0.0)) as usize).min(dims.1);

        let running = self.sim.is_running();
        for y in first_y..last_y {
            for x in first_x..last_x {
                let Ok(cell) = self.sim.cell_at(x, y, Layer::Running) else {
                    continue;
                };
                let hovered = !running && self.hovered == Some((x, y));
                let rect = Rect::from_min_size(
                    origin + Vec2::new(x as f32 * tile, y as f32 * tile),
                    Vec2::splat(tile - 1.0),
                );
                painter.rect_filled(rect, 0.0, cell_color(&self.config.palette, cell, hovered));
            }
        }

        if let Some(selection) = self.selection {
            let (x0, y0, x1, y1) = selection.bounds();
            let rect = Rect::from_min_max(
                origin + Vec2::new(x0 as f32 * tile, y0 as f32 * tile),
                origin + Vec2::new((x1 + 1) as f32 * tile, (y1 + 1) as f32 * tile),
            );
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, Color32::YELLOW));
        }
    }
}

impl eframe::App for WireworldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance();
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.board(ui);
            });
        });

        // Keep pacing ticks coming while running
        if self.sim.is_running() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_maps_to_tiles() {
        let origin = Pos2::new(10.0, 20.0);
        assert_eq!(cell_under(Pos2::new(10.0, 20.0), origin, 16.0, (4, 4)), Some((0, 0)));
        assert_eq!(cell_under(Pos2::new(41.9, 36.0), origin, 16.0, (4, 4)), Some((1, 1)));
        assert_eq!(cell_under(Pos2::new(9.0, 30.0), origin, 16.0, (4, 4)), None);
        assert_eq!(cell_under(Pos2::new(80.0, 30.0), origin, 16.0, (4, 4)), None);
    }

    #[test]
    fn hover_boost_saturates() {
        let palette = Palette {
            head: [200, 0, 0],
            ..Palette::default()
        };
        assert_eq!(cell_color(&palette, Cell::ElectronHead, true), Color32::from_rgb(255, 0, 0));
        assert_eq!(cell_color(&palette, Cell::ElectronHead, false), Color32::from_rgb(200, 0, 0));
    }

    #[test]
    fn selection_bounds_are_ordered() {
        let selection = Selection { start: (5, 1), end: (2, 4) };
        assert_eq!(selection.bounds(), (2, 1, 5, 4));
    }

    #[test]
    fn drags_from_off_the_board_do_nothing() {
        assert_eq!(board_action(false, true, false, false, false), BoardAction::Nothing);
        assert_eq!(board_action(false, false, true, false, false), BoardAction::Nothing);
        assert_eq!(board_action(false, true, false, true, false), BoardAction::Nothing);
        assert_eq!(board_action(true, true, false, false, false), BoardAction::Nothing);
    }

    #[test]
    fn gestures_on_the_board() {
        assert_eq!(board_action(true, true, false, false, true), BoardAction::Cycle);
        assert_eq!(board_action(false, true, false, false, true), BoardAction::Paint);
        assert_eq!(board_action(false, false, true, false, true), BoardAction::Erase);
        assert_eq!(board_action(true, true, false, true, true), BoardAction::StartSelection);
        assert_eq!(board_action(false, true, false, true, true), BoardAction::ExtendSelection);
        assert_eq!(board_action(false, false, false, false, true), BoardAction::Nothing);
    }
}
