//! FileHook theme
//!
//! Flat light visuals, square corners, 1px outlines. The line display gets
//! its own larger text style so copied lines are easy to read at a glance.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub struct HookColors;

impl HookColors {
    pub const PAPER: Color32 = Color32::from_rgb(250, 249, 245);
    pub const INK: Color32 = Color32::from_rgb(24, 24, 24);
    pub const SKY: Color32 = Color32::from_rgb(120, 170, 220);
    pub const DANGER: Color32 = Color32::from_rgb(170, 40, 40);
}

/// Name of the text style used by [`crate::widgets::line_display`].
pub const LINE_STYLE: &str = "hook-line";

/// Theme configuration for FileHook windows
pub struct HookTheme {
    pub font_size_body: f32,
    pub font_size_line: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for HookTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_line: 18.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 6.0,
        }
    }
}

impl HookTheme {
    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_line, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
            (TextStyle::Name(LINE_STYLE.into()), FontId::new(self.font_size_line, FontFamily::Proportional)),
        ]
        .into();

        let mut visuals = Visuals::light();
        visuals.window_fill = HookColors::PAPER;
        visuals.panel_fill = HookColors::PAPER;
        visuals.extreme_bg_color = Color32::WHITE;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, HookColors::INK);

        let flat = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_stroke = Stroke::new(1.0, HookColors::INK);
            ws.fg_stroke = Stroke::new(1.0, HookColors::INK);
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.inactive);
        flat(&mut visuals.widgets.hovered);
        flat(&mut visuals.widgets.active);
        flat(&mut visuals.widgets.open);
        visuals.widgets.noninteractive.rounding = Rounding::ZERO;

        visuals.selection.bg_fill = HookColors::SKY;
        visuals.selection.stroke = Stroke::new(1.0, HookColors::INK);

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);

        ctx.set_style(style);
    }

    /// Title bar: paper fill, 1px outline
    pub fn title_bar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(HookColors::PAPER)
            .stroke(Stroke::new(1.0, HookColors::INK))
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    egui::Frame::none()
        .fill(HookColors::PAPER)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| egui::menu::bar(ui, add_contents).inner)
}

/// Strip Cmd+/Cmd- so egui does not rescale the window.
/// Call this at the start of `update()`.
pub fn consume_zoom_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|event| {
            !matches!(event,
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals))
        });
    });
}
