use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

pub const BG_PANEL: Color32 = Color32::from_rgb(6, 10, 18);
pub const BG_WIDGET: Color32 = Color32::from_rgb(14, 22, 36);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(22, 36, 58);
pub const BG_WIDGET_ACTIVE: Color32 = Color32::from_rgb(30, 50, 82);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(170, 178, 190);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(104, 112, 124);
pub const TEXT_BRIGHT: Color32 = Color32::from_rgb(222, 228, 236);

pub const ACCENT_GREEN: Color32 = Color32::from_rgb(46, 172, 35);
pub const ACCENT_RED: Color32 = Color32::from_rgb(172, 35, 35);
pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(172, 117, 35);
// hover color of the plane, (0.1, 0.5, 1.0)
pub const ACCENT_BLUE: Color32 = Color32::from_rgb(26, 128, 255);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgba_premultiplied(26, 60, 110, 77);

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = Color32::BLACK;
    visuals.faint_bg_color = BG_PANEL;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.slider_trailing_fill = true;
    visuals.selection.bg_fill = ACCENT_BLUE.gamma_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT_BLUE);

    let widgets = &mut visuals.widgets;
    for (state, fill, stroke, text) in [
        (&mut widgets.noninteractive, BG_WIDGET, BORDER_SUBTLE, TEXT_MUTED),
        (&mut widgets.inactive, BG_WIDGET, BORDER_SUBTLE, TEXT_PRIMARY),
        (&mut widgets.hovered, BG_WIDGET_HOVER, ACCENT_BLUE, TEXT_BRIGHT),
        (&mut widgets.active, BG_WIDGET_ACTIVE, ACCENT_BLUE, TEXT_BRIGHT),
        (&mut widgets.open, BG_WIDGET_ACTIVE, ACCENT_BLUE, TEXT_BRIGHT),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.bg_stroke = Stroke::new(1.0, stroke);
        state.fg_stroke = Stroke::new(1.0, text);
        state.rounding = Rounding::same(4.0);
    }

    ctx.style_mut(|style| {
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        style.spacing.slider_width = 150.0;
        style.text_styles = [
            (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        ]
        .into();
    });
}
