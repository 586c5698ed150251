//! Utility functions

mod naming;
mod romanize;

pub use naming::{make_filename, split_file_name, MAX_ORDERED_TRACKS};
pub use romanize::romanize;
