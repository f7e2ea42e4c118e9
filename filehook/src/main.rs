//! FileHook - step through a text file one line at a time
//!
//! Every line shown is copied to the clipboard. Reading position can be
//! saved to a small file and restored later.

mod app;
mod cleanup;
mod clipboard;
mod document;
mod prefs;
mod save;
mod session;

use app::{FileHookApp, WINDOW_TITLE};
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let initial_file = std::env::args().nth(1).map(std::path::PathBuf::from);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 320.0])
            .with_min_inner_size([280.0, 220.0])
            .with_drag_and_drop(true)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    log::info!("starting {} v{}", WINDOW_TITLE, env!("CARGO_PKG_VERSION"));

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            hookcore::HookTheme::default().apply(&cc.egui_ctx);
            let mut app = FileHookApp::new(cc);
            if let Some(path) = initial_file {
                if path.exists() {
                    app.open_path(&cc.egui_ctx, path, None);
                } else {
                    log::warn!("{} does not exist", path.display());
                }
            }
            Box::new(app)
        }),
    )
}
