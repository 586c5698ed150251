//! Terminal progress for exports

use cdjexport::export::{ExportProgress, LogSink, ProgressSink};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress bar that also forwards every event to the log
///
/// Log lines are printed through the bar so they don't tear the display.
pub struct ProgressBarSink {
    bar: ProgressBar,
    log: LogSink,
}

impl ProgressBarSink {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            log: LogSink,
        }
    }
}

impl Default for ProgressBarSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressBarSink {
    fn report(&self, event: ExportProgress) {
        match &event {
            ExportProgress::Started { track_count, .. } => {
                self.bar.set_length(*track_count as u64);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                {
                    self.bar.set_style(style.progress_chars("#>-"));
                }
                self.bar.set_draw_target(ProgressDrawTarget::stderr());
            }
            ExportProgress::TrackCopied { destination, .. }
            | ExportProgress::TrackPlanned { destination, .. } => {
                self.bar.inc(1);
                if let Some(name) = destination.file_name() {
                    self.bar.set_message(name.to_string_lossy().into_owned());
                }
            }
            ExportProgress::TrackSkipped { .. } | ExportProgress::TrackFailed { .. } => {
                self.bar.inc(1);
            }
            ExportProgress::Complete(_) | ExportProgress::PlaylistNotFound { .. } => {
                self.bar.finish_and_clear();
            }
            _ => {}
        }

        let log = self.log;
        self.bar.suspend(|| log.report(event));
    }
}
