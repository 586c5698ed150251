//! Order-preserving output filenames

use std::path::Path;

use super::romanize;

/// Highest 1-based track number that still sorts correctly with 3-digit padding
pub const MAX_ORDERED_TRACKS: usize = 999;

/// Build the destination filename for a track
///
/// `position` is the zero-based index in the playlist. The 1-based number is
/// zero-padded to three digits so lexical order matches playlist order up to
/// [`MAX_ORDERED_TRACKS`]; past that the field just gets wider.
///
/// `extension` must include its leading dot and is used as-is.
///
/// # Examples
///
/// ```
/// use cdjexport::utils::make_filename;
///
/// assert_eq!(make_filename(2, "Song B", ".wav"), "003_Song_B.wav");
/// ```
pub fn make_filename(position: usize, stem: &str, extension: &str) -> String {
    format!("{:03}_{}{}", position + 1, romanize(stem), extension)
}

/// Split a path's file name into stem and dotted extension
///
/// Only the last extension is split off (`a.tar.gz` gives `a.tar` and `.gz`).
/// Missing parts come back empty.
pub fn split_file_name(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, extension)
}
