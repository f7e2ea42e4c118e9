//! Custom widgets

use crate::theme::{HookColors, LINE_STYLE};
use egui::{Align2, Response, RichText, TextStyle, Ui, Widget};

/// Status bar: paper bg, 1px top border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(HookColors::PAPER)
        .stroke(egui::Stroke::new(1.0, HookColors::INK))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small());
        });
}

/// Read-only, wrapped display of the current line.
///
/// Fills the remaining space of `ui`. An empty `text` renders a faint
/// placeholder instead so the box never collapses.
pub fn line_display(ui: &mut Ui, text: &str, placeholder: &str) -> Response {
    egui::Frame::none()
        .fill(egui::Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, HookColors::INK))
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let style = TextStyle::Name(LINE_STYLE.into());
                    if text.is_empty() {
                        ui.label(RichText::new(placeholder).text_style(style).weak());
                    } else {
                        ui.add(egui::Label::new(RichText::new(text).text_style(style)).wrap(true));
                    }
                });
        })
        .response
}

/// Severity of a modal message, used for the heading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// A centered, fixed-size window for modal messages.
pub fn modal_window(title: &str) -> egui::Window<'static> {
    egui::Window::new(title.to_owned())
        .collapsible(false)
        .resizable(false)
        .default_width(320.0)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
}

/// Body of a modal message: a marker line plus wrapped text.
pub fn message_body(ui: &mut Ui, kind: MessageKind, text: &str) {
    let (marker, color) = match kind {
        MessageKind::Info => ("info", HookColors::INK),
        MessageKind::Warning => ("warning", HookColors::INK),
        MessageKind::Error => ("error", HookColors::DANGER),
    };
    ui.label(RichText::new(marker).small().color(color));
    ui.add(egui::Label::new(text).wrap(true));
    ui.add_space(8.0);
}

/// File list item for open/load dialogs.
pub struct FileListItem<'a> {
    name: &'a str,
    is_directory: bool,
    selected: bool,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_directory: bool) -> Self {
        Self { name, is_directory, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FileListItem<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let fill = if self.selected {
                HookColors::SKY
            } else if response.hovered() {
                ui.visuals().widgets.hovered.weak_bg_fill
            } else {
                egui::Color32::WHITE
            };
            painter.rect_filled(rect, 0.0, fill);

            let icon = if self.is_directory { "📁" } else { "📄" };
            painter.text(
                egui::pos2(rect.min.x + 12.0, rect.center().y),
                Align2::CENTER_CENTER,
                icon,
                egui::FontId::proportional(12.0),
                HookColors::INK,
            );
            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                Align2::LEFT_CENTER,
                self.name,
                egui::FontId::proportional(12.0),
                HookColors::INK,
            );
        }

        response
    }
}
