//! Export engine orchestration

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use super::progress::{ExportProgress, ProgressSink};
use crate::catalog::{CatalogError, PlaylistSource, PlaylistSummary};
use crate::config::ExportConfig;
use crate::device::{CopiedFile, ExportLayout, LayoutError};
use crate::utils::{make_filename, split_file_name, MAX_ORDERED_TRACKS};

/// Errors that abort an export run
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Where one track goes on the media
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    /// Zero-based position in the playlist
    pub position: usize,
    pub source: PathBuf,
    /// Name inside MUSIC
    pub filename: String,
    pub destination: PathBuf,
}

/// What happened to a single track
#[derive(Debug)]
pub enum TrackOutcome {
    Copied { plan: ExportPlan, bytes: u64 },
    Planned { plan: ExportPlan },
    Skipped {
        position: usize,
        source: Option<PathBuf>,
    },
    Failed { plan: ExportPlan, error: std::io::Error },
}

/// A track whose copy failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFailure {
    pub position: usize,
    pub source: PathBuf,
    pub filename: String,
    pub message: String,
}

/// Counts for one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub playlist: String,
    /// Tracks considered
    pub total: usize,
    /// Tracks copied (or that would be copied in a dry run)
    pub copied: usize,
    /// Tracks with a missing source
    pub skipped: usize,
    /// Tracks whose copy failed
    pub failed: usize,
    pub bytes_copied: u64,
    pub dry_run: bool,
    /// Names written to MUSIC (or planned), in playlist order
    pub files: Vec<String>,
    /// Copy failures, in playlist order
    pub failures: Vec<TrackFailure>,
}

impl ExportSummary {
    fn new(playlist: &str, dry_run: bool) -> Self {
        Self {
            playlist: playlist.to_string(),
            dry_run,
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: TrackOutcome) {
        self.total += 1;
        match outcome {
            TrackOutcome::Copied { plan, bytes } => {
                self.copied += 1;
                self.bytes_copied += bytes;
                self.files.push(plan.filename);
            }
            TrackOutcome::Planned { plan } => {
                self.copied += 1;
                self.files.push(plan.filename);
            }
            TrackOutcome::Skipped { .. } => self.skipped += 1,
            TrackOutcome::Failed { plan, error } => {
                self.failed += 1;
                self.failures.push(TrackFailure {
                    position: plan.position,
                    source: plan.source,
                    filename: plan.filename,
                    message: error.to_string(),
                });
            }
        }
    }
}

/// Result of an export that got past the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Completed(ExportSummary),
    PlaylistNotFound { name: String },
}

/// Copies a catalog playlist onto export media
pub struct Exporter<S> {
    source: S,
    layout: ExportLayout,
    config: ExportConfig,
}

impl<S: PlaylistSource> Exporter<S> {
    /// Create a new exporter
    pub fn new(source: S, config: ExportConfig) -> Self {
        let layout = ExportLayout::new(config.output_root.clone());
        Self {
            source,
            layout,
            config,
        }
    }

    /// Export a playlist by exact name
    ///
    /// Only catalog and directory-creation failures return an error. A missing
    /// playlist is reported and returned as [`ExportOutcome::PlaylistNotFound`];
    /// per-track problems end up in the summary.
    pub async fn export(
        &self,
        playlist_name: &str,
        sink: &dyn ProgressSink,
    ) -> Result<ExportOutcome, ExportError> {
        if !self.config.dry_run {
            self.layout.init().await?;
            sink.report(ExportProgress::Scaffolded {
                music_dir: self.layout.music_dir(),
            });
        }

        let Some(playlist) = self.source.playlist_by_name(playlist_name)? else {
            sink.report(ExportProgress::PlaylistNotFound {
                name: playlist_name.to_string(),
            });
            return Ok(ExportOutcome::PlaylistNotFound {
                name: playlist_name.to_string(),
            });
        };

        let sources = self.resolve_tracks(&playlist)?;
        let track_count = sources.len();

        sink.report(ExportProgress::Started {
            playlist: playlist.name.clone(),
            track_count,
        });
        if track_count > MAX_ORDERED_TRACKS {
            sink.report(ExportProgress::OrderingOverflow { track_count });
        }

        let mut summary = ExportSummary::new(&playlist.name, self.config.dry_run);
        for (position, source) in sources.into_iter().enumerate() {
            let outcome = self.process_track(position, source, sink).await;
            summary.record(outcome);
        }

        sink.report(ExportProgress::Complete(summary.clone()));
        Ok(ExportOutcome::Completed(summary))
    }

    /// Resolve a playlist's tracks to source paths, keeping playlist order
    fn resolve_tracks(
        &self,
        playlist: &PlaylistSummary,
    ) -> Result<Vec<Option<PathBuf>>, CatalogError> {
        let ids = self.source.playlist_track_ids(playlist)?;
        debug!("Playlist '{}' has {} entries", playlist.name, ids.len());

        ids.iter().map(|id| self.source.track_path(id)).collect()
    }

    /// Compute where a track lands in MUSIC
    pub fn plan(&self, position: usize, source: &Path) -> ExportPlan {
        let (stem, extension) = split_file_name(source);
        let filename = make_filename(position, &stem, &extension);
        ExportPlan {
            position,
            source: source.to_path_buf(),
            destination: self.layout.music_dir().join(&filename),
            filename,
        }
    }

    async fn process_track(
        &self,
        position: usize,
        source: Option<PathBuf>,
        sink: &dyn ProgressSink,
    ) -> TrackOutcome {
        let exists = match &source {
            Some(path) => matches!(fs::try_exists(path).await, Ok(true)),
            None => false,
        };
        let source = match source {
            Some(path) if exists => path,
            source => {
                sink.report(ExportProgress::TrackSkipped {
                    position,
                    source: source.clone(),
                });
                return TrackOutcome::Skipped { position, source };
            }
        };

        let plan = self.plan(position, &source);

        if self.config.dry_run {
            sink.report(ExportProgress::TrackPlanned {
                position,
                source: plan.source.clone(),
                destination: plan.destination.clone(),
            });
            return TrackOutcome::Planned { plan };
        }

        match self.layout.copy_track(&plan.source, &plan.filename).await {
            Ok(copied) => self.copied(plan, copied, sink),
            Err(error) => {
                sink.report(ExportProgress::TrackFailed {
                    position,
                    source: plan.source.clone(),
                    message: error.to_string(),
                });
                TrackOutcome::Failed { plan, error }
            }
        }
    }

    /// Report a finished copy
    fn copied(&self, plan: ExportPlan, copied: CopiedFile, sink: &dyn ProgressSink) -> TrackOutcome {
        if let Some(e) = copied.times_error {
            sink.report(ExportProgress::TimesNotPreserved {
                destination: plan.destination.clone(),
                message: e.to_string(),
            });
        }
        sink.report(ExportProgress::TrackCopied {
            position: plan.position,
            source: plan.source.clone(),
            destination: plan.destination.clone(),
        });
        if self.config.debug {
            sink.report(ExportProgress::CopyDetail {
                position: plan.position,
                filename: plan.filename.clone(),
                bytes: copied.bytes,
            });
        }

        TrackOutcome::Copied {
            plan,
            bytes: copied.bytes,
        }
    }
}
