//! cdjexport - Export playlists to USB media for CDJ players
//!
//! Tracks are copied into a flat `MUSIC` folder with romanized, ASCII-only
//! names prefixed by their playlist position, so players that choke on
//! Unicode filenames still play them back in order.

pub mod catalog;
pub mod config;
pub mod device;
pub mod export;
pub mod utils;
