//! FileHook application: one window, one document, one "next line" button.

use crate::clipboard::LineClipboard;
use crate::prefs::Preferences;
use crate::save::{self, LoadError, SaveError, SAVE_EXTENSION};
use crate::session::Session;
use egui::viewport::WindowLevel;
use egui::{Context, Key};
use hookcore::storage::{documents_dir, home_dir, FileBrowser};
use hookcore::text::elide_start;
use hookcore::theme::{consume_zoom_keys, menu_bar, HookColors, HookTheme};
use hookcore::widgets::{line_display, message_body, modal_window, status_bar, FileListItem, MessageKind};
use std::path::PathBuf;

pub const WINDOW_TITLE: &str = "FileHookπ";

#[derive(Clone, Copy, PartialEq)]
enum BrowserMode {
    OpenText,
    LoadProgress,
}

enum Modal {
    Message {
        kind: MessageKind,
        title: String,
        text: String,
    },
    /// Reading failed; offers to close the file.
    ReadFailed { text: String },
}

pub struct FileHookApp {
    session: Session,
    prefs: Preferences,
    prefs_path: PathBuf,
    clipboard: LineClipboard,
    show_file_browser: bool,
    file_browser: FileBrowser,
    browser_mode: BrowserMode,
    modal: Option<Modal>,
    /// Last title sent to the viewport.
    applied_title: String,
}

impl FileHookApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let prefs_path = Preferences::default_path();
        let prefs = Preferences::load(&prefs_path);
        if prefs.stay_on_top {
            cc.egui_ctx
                .send_viewport_cmd(egui::ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop));
        }

        Self {
            session: Session::new(),
            prefs,
            prefs_path,
            clipboard: LineClipboard::new(),
            show_file_browser: false,
            file_browser: FileBrowser::new(documents_dir()),
            browser_mode: BrowserMode::OpenText,
            modal: None,
            applied_title: WINDOW_TITLE.to_string(),
        }
    }

    /// Open `path` (closing any current document) and show its first line.
    pub fn open_path(&mut self, ctx: &Context, path: PathBuf, seek: Option<u64>) {
        if let Err(e) = self.session.open(&path, seek) {
            log::error!("failed to open {}: {}", path.display(), e);
            self.show_message(
                MessageKind::Error,
                "Failed to open file",
                format!("{}\n{}", path.display(), e),
            );
            return;
        }
        self.advance_line(ctx);
    }

    fn advance_line(&mut self, ctx: &Context) {
        match self.session.advance(self.prefs.blue_sky_mode) {
            Ok(Some(line)) => self.clipboard.copy(ctx, line),
            Ok(None) => {}
            Err(e) => {
                log::error!("read failed: {}", e);
                self.modal = Some(Modal::ReadFailed {
                    text: format!("Could not read the next line: {}", e),
                });
            }
        }
    }

    fn save_progress(&mut self) {
        let record = match self.session.resume_record() {
            None => {
                self.show_message(MessageKind::Warning, "Cannot save file", "No file currently open.");
                return;
            }
            Some(Err(e)) => {
                self.show_save_error(e);
                return;
            }
            Some(Ok(record)) => record,
        };

        match save::write_save(&save::saves_dir(), &record) {
            Ok(path) => self.show_message(
                MessageKind::Info,
                "Successfully saved",
                format!("Saved at {}", path.display()),
            ),
            Err(e) => self.show_save_error(e),
        }
    }

    fn show_save_error(&mut self, e: SaveError) {
        log::error!("save failed: {}", e);
        let title = match e {
            SaveError::CreateDir(_) => "Failed to create saves directory",
            SaveError::AlreadyExists(_) | SaveError::NonUtf8Path(_) => "Cannot save file",
            SaveError::Write(_) => "Failed to save",
        };
        self.show_message(MessageKind::Error, title, e.to_string());
    }

    fn load_progress(&mut self, ctx: &Context, path: PathBuf) {
        match save::read_save(&path) {
            Ok(record) => {
                self.open_path(ctx, record.path_buf(), Some(record.resume_offset()));
            }
            Err(e) => {
                if let LoadError::Structure(cause) = &e {
                    log::warn!("rejected {}: {}", path.display(), cause);
                } else {
                    log::error!("cannot read {}: {}", path.display(), e);
                }
                self.show_message(MessageKind::Error, "Failed to load progress", e.to_string());
            }
        }
    }

    fn close_file(&mut self) {
        self.session.close();
    }

    fn set_stay_on_top(&mut self, ctx: &Context) {
        let level = if self.prefs.stay_on_top {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(level));
        self.prefs.save(&self.prefs_path);
    }

    fn show_message(&mut self, kind: MessageKind, title: &str, text: impl Into<String>) {
        self.modal = Some(Modal::Message {
            kind,
            title: title.to_string(),
            text: text.into(),
        });
    }

    fn show_open_dialog(&mut self) {
        let start = self
            .prefs
            .last_dir
            .clone()
            .filter(|d| d.is_dir())
            .unwrap_or_else(documents_dir);
        self.file_browser = FileBrowser::new(start).with_filter(vec!["txt".to_string()]);
        self.browser_mode = BrowserMode::OpenText;
        self.show_file_browser = true;
    }

    fn show_load_dialog(&mut self) {
        let saves = save::saves_dir();
        let start = if saves.is_dir() { saves } else { home_dir() };
        self.file_browser = FileBrowser::new(start).with_filter(vec![SAVE_EXTENSION.to_string()]);
        self.browser_mode = BrowserMode::LoadProgress;
        self.show_file_browser = true;
    }

    fn is_blocked(&self) -> bool {
        self.modal.is_some() || self.show_file_browser
    }

    fn sync_title(&mut self, ctx: &Context) {
        let title = match self.session.path() {
            Some(path) => format!("{} - {}", WINDOW_TITLE, path.display()),
            None => WINDOW_TITLE.to_string(),
        };
        if title != self.applied_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.applied_title = title;
        }
    }

    fn handle_keyboard(&mut self, ctx: &Context) {
        consume_zoom_keys(ctx);
        if self.is_blocked() {
            return;
        }

        let widget_focused = ctx.memory(|m| m.focused().is_some());
        let (open, save_now, load, close, next) = ctx.input(|i| {
            let cmd = i.modifiers.command;
            (
                cmd && i.key_pressed(Key::O),
                cmd && i.key_pressed(Key::S),
                cmd && i.key_pressed(Key::L),
                cmd && i.key_pressed(Key::W),
                !cmd && !widget_focused
                    && (i.key_pressed(Key::Space) || i.key_pressed(Key::Enter) || i.key_pressed(Key::ArrowDown)),
            )
        });

        if open {
            self.show_open_dialog();
        } else if save_now {
            self.save_progress();
        } else if load {
            self.show_load_dialog();
        } else if close {
            self.close_file();
        } else if next {
            self.advance_line(ctx);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped = ctx.input(|i| {
            first_dropped_file(i.raw.dropped_files.iter().filter_map(|f| f.path.clone()))
        });
        if let Some(path) = dropped {
            if self.is_blocked() {
                log::debug!("ignoring drop of {} while a dialog is open", path.display());
                return;
            }
            log::info!("dropped {}", path.display());
            self.open_path(ctx, path, None);
        }
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        menu_bar(ui, |ui| {
            ui.menu_button("file", |ui| {
                if ui.button("open file       \u{2318}o").clicked() {
                    self.show_open_dialog();
                    ui.close_menu();
                }
                if ui.button("save progress   \u{2318}s").clicked() {
                    self.save_progress();
                    ui.close_menu();
                }
                if ui.button("load progress   \u{2318}l").clicked() {
                    self.show_load_dialog();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("close file      \u{2318}w").clicked() {
                    self.close_file();
                    ui.close_menu();
                }
            });
        });
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        if ui.checkbox(&mut self.prefs.blue_sky_mode, "Blue sky mode").changed() {
            self.prefs.save(&self.prefs_path);
        }
        if ui.checkbox(&mut self.prefs.stay_on_top, "Leave window on top").changed() {
            self.set_stay_on_top(ui.ctx());
        }
        let next = ui.add_enabled(
            self.session.is_open(),
            egui::Button::new("Next line").min_size(egui::vec2(ui.available_width(), 28.0)),
        );
        if next.clicked() {
            self.advance_line(ui.ctx());
        }
    }

    fn status_text(&self) -> String {
        let Some(position) = self.session.position() else {
            return "no file open. drop a text file here or use file > open".to_string();
        };
        let mut status = format!("line {}  |  byte {}", self.session.lines_read(), position);
        if self.prefs.blue_sky_mode {
            status.push_str("  |  blue sky");
        }
        if self.session.at_end() {
            status.push_str("  |  end of file");
        }
        status
    }

    fn render_file_browser(&mut self, ctx: &Context) {
        let title = match self.browser_mode {
            BrowserMode::OpenText => "open file",
            BrowserMode::LoadProgress => "load progress",
        };
        let mut chosen: Option<PathBuf> = None;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(elide_start(&self.file_browser.current_dir.to_string_lossy(), 48));
                });
                ui.separator();
                egui::ScrollArea::vertical()
                    .max_height(220.0)
                    .show(ui, |ui| {
                        let entries = self.file_browser.entries.clone();
                        for (idx, entry) in entries.iter().enumerate() {
                            let selected = self.file_browser.selected_index == Some(idx);
                            let response = ui.add(
                                FileListItem::new(&entry.name, entry.is_directory).selected(selected),
                            );
                            if response.clicked() {
                                self.file_browser.selected_index = Some(idx);
                            }
                            if response.double_clicked() {
                                if entry.is_directory {
                                    self.file_browser.navigate_to(entry.path.clone());
                                } else {
                                    chosen = Some(entry.path.clone());
                                }
                            }
                        }
                    });
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        self.show_file_browser = false;
                    }
                    let action = match self.browser_mode {
                        BrowserMode::OpenText => "open",
                        BrowserMode::LoadProgress => "load",
                    };
                    if ui.button(action).clicked() {
                        chosen = self.file_browser.selected_file();
                    }
                });
            });

        let Some(path) = chosen else { return };
        self.show_file_browser = false;
        match self.browser_mode {
            BrowserMode::OpenText => {
                self.prefs.last_dir = path.parent().map(|p| p.to_path_buf());
                self.prefs.save(&self.prefs_path);
                self.open_path(ctx, path, None);
            }
            BrowserMode::LoadProgress => self.load_progress(ctx, path),
        }
    }

    fn render_modal(&mut self, ctx: &Context) {
        let Some(modal) = self.modal.as_ref() else { return };
        let mut dismiss = false;
        let mut close_file = false;

        match modal {
            Modal::Message { kind, title, text } => {
                modal_window(title).show(ctx, |ui| {
                    message_body(ui, *kind, text);
                    ui.vertical_centered(|ui| {
                        if ui.button("ok").clicked() {
                            dismiss = true;
                        }
                    });
                });
            }
            Modal::ReadFailed { text } => {
                modal_window("Failed to read file").show(ctx, |ui| {
                    message_body(ui, MessageKind::Error, text);
                    ui.label("Close the file?");
                    ui.horizontal(|ui| {
                        if ui.button("close file").clicked() {
                            close_file = true;
                        }
                        if ui.button("keep open").clicked() {
                            dismiss = true;
                        }
                    });
                });
            }
        }

        if close_file {
            self.close_file();
        }
        if dismiss || close_file {
            self.modal = None;
        }
    }

    fn render_drop_hint(&self, ctx: &Context) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if !hovering {
            return;
        }
        let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Foreground, egui::Id::new("drop_hint")));
        let rect = ctx.screen_rect().shrink(12.0);
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, HookColors::SKY));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "drop to open",
            egui::FontId::proportional(18.0),
            HookColors::INK,
        );
    }
}

/// First dropped path that is a regular file; directories and vanished
/// paths are skipped.
fn first_dropped_file(paths: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    paths.into_iter().find(|p| p.is_file())
}

impl eframe::App for FileHookApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);
        self.handle_dropped_files(ctx);

        let blocked = self.is_blocked();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| self.render_menu_bar(ui));
        });
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            HookTheme::title_bar_frame().show(ui, |ui| {
                ui.centered_and_justified(|ui| {
                    let name = self
                        .session
                        .path()
                        .map(|p| elide_start(&p.to_string_lossy(), 64))
                        .unwrap_or_else(|| "no file".to_string());
                    ui.label(name);
                });
            });
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar(ui, &self.status_text());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                self.render_controls(ui);
                ui.add_space(4.0);
                let shown = line_display(ui, self.session.displayed(), "(no line)");
                if let Some(raw) = self.session.raw_line().filter(|r| !r.is_empty()) {
                    shown.on_hover_text(raw);
                }
            });
        });

        if self.show_file_browser {
            self.render_file_browser(ctx);
        }
        self.render_modal(ctx);
        self.render_drop_hint(ctx);
        self.sync_title(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_skips_directories() {
        let dir = std::env::temp_dir().join(format!("filehook_drop_{}", uuid::Uuid::new_v4().simple()));
        let sub = dir.join("chapter_dir");
        std::fs::create_dir_all(&sub).unwrap();
        let text = dir.join("script.txt");
        std::fs::write(&text, "line\n").unwrap();

        assert_eq!(first_dropped_file(vec![sub.clone(), text.clone()]), Some(text.clone()));
        assert_eq!(first_dropped_file(vec![sub.clone()]), None);
        assert_eq!(first_dropped_file(vec![dir.join("gone.txt")]), None);
        assert_eq!(first_dropped_file(Vec::new()), None);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
