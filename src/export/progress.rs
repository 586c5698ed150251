//! Export progress reporting

use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::engine::ExportSummary;
use crate::utils::MAX_ORDERED_TRACKS;

/// Progress updates sent during an export
#[derive(Debug, Clone)]
pub enum ExportProgress {
    /// Destination directories are in place
    Scaffolded { music_dir: PathBuf },
    /// Playlist resolved, about to process its tracks
    Started { playlist: String, track_count: usize },
    /// No playlist with the requested name
    PlaylistNotFound { name: String },
    /// Playlist is longer than 3-digit prefixes can keep in order
    OrderingOverflow { track_count: usize },
    /// Source file missing or not resolvable from the catalog
    TrackSkipped {
        position: usize,
        source: Option<PathBuf>,
    },
    /// A track was copied
    TrackCopied {
        position: usize,
        source: PathBuf,
        destination: PathBuf,
    },
    /// Per-copy detail, only sent when the export runs with `debug`
    CopyDetail {
        position: usize,
        filename: String,
        bytes: u64,
    },
    /// Dry run: a track would be copied
    TrackPlanned {
        position: usize,
        source: PathBuf,
        destination: PathBuf,
    },
    /// Copying a track failed
    TrackFailed {
        position: usize,
        source: PathBuf,
        message: String,
    },
    /// File copied but its timestamps could not be set
    TimesNotPreserved { destination: PathBuf, message: String },
    /// Export finished
    Complete(ExportSummary),
}

/// Receiver of export progress
pub trait ProgressSink {
    fn report(&self, event: ExportProgress);
}

/// Sink that forwards every event into a channel
impl ProgressSink for mpsc::UnboundedSender<ExportProgress> {
    fn report(&self, event: ExportProgress) {
        let _ = self.send(event);
    }
}

/// Sink that writes events to the tracing log
///
/// Missing sources are warnings and failed copies are errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report(&self, event: ExportProgress) {
        match event {
            ExportProgress::Scaffolded { music_dir } => {
                debug!("Export directory ready: {}", music_dir.display());
            }
            ExportProgress::Started {
                playlist,
                track_count,
            } => {
                info!("Exporting playlist '{}' ({} tracks)", playlist, track_count);
            }
            ExportProgress::PlaylistNotFound { name } => {
                error!("Playlist '{}' not found", name);
            }
            ExportProgress::OrderingOverflow { track_count } => {
                warn!(
                    "Playlist has {} tracks; files past #{} will not sort in playlist order",
                    track_count, MAX_ORDERED_TRACKS
                );
            }
            ExportProgress::TrackSkipped { position, source } => match source {
                Some(path) => warn!("File not found (#{}): {}", position + 1, path.display()),
                None => warn!("Track #{} has no file location in the catalog", position + 1),
            },
            ExportProgress::TrackCopied {
                source,
                destination,
                ..
            } => {
                debug!("Copied {} -> {}", source.display(), destination.display());
            }
            ExportProgress::CopyDetail {
                position,
                filename,
                bytes,
            } => {
                info!("#{:03} {} ({} bytes)", position + 1, filename, bytes);
            }
            ExportProgress::TrackPlanned {
                source,
                destination,
                ..
            } => {
                info!("[dry run] {} -> {}", source.display(), destination.display());
            }
            ExportProgress::TrackFailed {
                source, message, ..
            } => {
                error!("Failed to copy {}: {}", source.display(), message);
            }
            ExportProgress::TimesNotPreserved {
                destination,
                message,
            } => {
                warn!(
                    "Could not preserve timestamps on {}: {}",
                    destination.display(),
                    message
                );
            }
            ExportProgress::Complete(summary) => {
                info!(
                    "Export complete: {} tracks ({} copied, {} skipped, {} failed)",
                    summary.total, summary.copied, summary.skipped, summary.failed
                );
            }
        }
    }
}
