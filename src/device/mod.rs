//! Export media layout module

pub mod layout;

pub use layout::{CopiedFile, ExportLayout, LayoutError, MUSIC_DIR};
