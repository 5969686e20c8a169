use egui::{Context, RichText, Ui};

use crate::config::PLANE_PARAM_RANGE;
use crate::ui::state::UiState;
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub regenerate_plane: bool,
    pub vsync_changed: bool,
}

/// Read-only numbers shown in the statistics block.
pub struct PanelStats {
    pub fps: f32,
    pub vertices: usize,
    pub triangles: usize,
    pub hovered: Option<[u32; 3]>,
    pub active_fades: usize,
}

pub fn draw_side_panel(ctx: &Context, state: &mut UiState, stats: &PanelStats) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(260.0)
        .max_width(360.0)
        .default_width(280.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(14.0))
        .show(ctx, |ui| {
            ui.heading(RichText::new("Wave Plane").strong());
            ui.add_space(4.0);
            ui.label(RichText::new("Hover the surface to light it up").color(TEXT_MUTED).size(11.0));
            ui.add_space(14.0);

            section_header(ui, "PLANE");
            if plane_controls(ui, state) {
                actions.regenerate_plane = true;
            }
            ui.add_space(14.0);

            ui.separator();
            ui.add_space(10.0);

            section_header(ui, "DISPLAY");
            ui.horizontal(|ui| {
                if ui.checkbox(&mut state.vsync_enabled, "VSync").changed() {
                    actions.vsync_changed = true;
                }
                ui.checkbox(&mut state.show_stats, "Stats");
            });
            ui.add_space(14.0);

            if state.show_stats {
                stats_panel(ui, stats);
            }
        });

    actions
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

/// Returns true when any of the four sliders moved.
fn plane_controls(ui: &mut Ui, state: &mut UiState) -> bool {
    let mut changed = false;
    let plane = &mut state.plane;

    egui::Grid::new("plane_params").num_columns(2).spacing([8.0, 6.0]).show(ui, |ui| {
        for (label, value) in [
            ("width", &mut plane.width),
            ("height", &mut plane.height),
            ("widthSegments", &mut plane.width_segments),
            ("heightSegments", &mut plane.height_segments),
        ] {
            ui.label(label);
            changed |= ui
                .add(egui::Slider::new(value, PLANE_PARAM_RANGE).step_by(1.0))
                .changed();
            ui.end_row();
        }
    });

    changed
}

fn stats_panel(ui: &mut Ui, stats: &PanelStats) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id = Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            let fps_color = if stats.fps >= 55.0 { ACCENT_GREEN } else if stats.fps >= 28.0 { ACCENT_ORANGE } else { ACCENT_RED };

            egui::Grid::new("stats").num_columns(2).spacing([20.0, 4.0]).show(ui, |ui| {
                ui.label(RichText::new("FPS").color(TEXT_MUTED));
                ui.label(RichText::new(format!("{:.0}", stats.fps)).color(fps_color));
                ui.end_row();

                ui.label(RichText::new("Vertices").color(TEXT_MUTED));
                ui.label(RichText::new(fmt_num(stats.vertices)).color(TEXT_PRIMARY));
                ui.end_row();

                ui.label(RichText::new("Triangles").color(TEXT_MUTED));
                ui.label(RichText::new(fmt_num(stats.triangles)).color(TEXT_PRIMARY));
                ui.end_row();

                ui.label(RichText::new("Hovered").color(TEXT_MUTED));
                let hovered = match stats.hovered {
                    Some([a, b, c]) => format!("{a} {b} {c}"),
                    None => "-".to_string(),
                };
                ui.label(RichText::new(hovered).color(ACCENT_BLUE));
                ui.end_row();

                ui.label(RichText::new("Fading").color(TEXT_MUTED));
                ui.label(RichText::new(stats.active_fades.to_string()).color(TEXT_PRIMARY));
                ui.end_row();
            });
        });
}

pub fn draw_help_overlay(ctx: &Context, pos: [f32; 3], distance: f32) {
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(egui::Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id = Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(RichText::new("LMB+Drag - Orbit | RMB+Drag - Pan | Scroll - Zoom").color(TEXT_MUTED));
                    ui.label(RichText::new(format!("Eye: ({:.1}, {:.1}, {:.1}) | Distance: {:.1}", pos[0], pos[1], pos[2], distance)).color(TEXT_MUTED));
                });
        });
}

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 10_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::fmt_num;

    #[test]
    fn formats_counts_compactly() {
        assert_eq!(fmt_num(5_151), "5151");
        assert_eq!(fmt_num(10_201), "10.2K");
        assert_eq!(fmt_num(2_500_000), "2.50M");
    }
}
