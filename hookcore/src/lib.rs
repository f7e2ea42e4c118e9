//! hookcore — shared UI and storage helpers for FileHook

pub mod storage;
pub mod text;
pub mod theme;
pub mod widgets;

pub use theme::HookTheme;
