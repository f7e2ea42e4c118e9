//! Clipboard output for advanced lines.

use hookcore::text::elide_end;

/// Writes to the system clipboard through `arboard`, falling back to
/// egui's own clipboard output when no system clipboard can be opened.
pub struct LineClipboard {
    system: Option<arboard::Clipboard>,
}

impl LineClipboard {
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::warn!("system clipboard unavailable, using egui output: {}", e);
                None
            }
        };
        Self { system }
    }

    pub fn copy(&mut self, ctx: &egui::Context, text: &str) {
        log::debug!("copying \"{}\"", elide_end(text, 60));
        if let Some(clipboard) = self.system.as_mut() {
            match clipboard.set_text(text.to_owned()) {
                Ok(()) => return,
                Err(e) => log::warn!("clipboard write failed: {}", e),
            }
        }
        ctx.output_mut(|o| o.copied_text = text.to_owned());
    }
}
