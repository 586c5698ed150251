//! Playlist export module

pub mod engine;
pub mod progress;

pub use engine::{ExportError, ExportOutcome, ExportPlan, ExportSummary, Exporter, TrackOutcome};
pub use progress::{ExportProgress, LogSink, ProgressSink};
