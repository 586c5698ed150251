//! Destination media layout

use std::fs::FileTimes;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Folder reserved for player index data
pub const PIONEER_DIR: &str = "PIONEER";
/// Content folder inside [`PIONEER_DIR`]
pub const CONTENTS_DIR: &str = "CONTENTS";
/// Flat folder receiving every exported track
pub const MUSIC_DIR: &str = "MUSIC";

/// A layout directory could not be created
#[derive(Debug, Error)]
#[error("failed to create {}: {source}", .path.display())]
pub struct LayoutError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Result of copying one track onto the media
#[derive(Debug)]
pub struct CopiedFile {
    /// Bytes written
    pub bytes: u64,
    /// Set when content was copied but timestamps could not be carried over
    pub times_error: Option<io::Error>,
}

/// Manages the directory structure on the export media
#[derive(Debug, Clone)]
pub struct ExportLayout {
    root: PathBuf,
}

impl ExportLayout {
    /// Create a layout rooted at the media mount point
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get path to the PIONEER/CONTENTS directory
    pub fn contents_dir(&self) -> PathBuf {
        self.root.join(PIONEER_DIR).join(CONTENTS_DIR)
    }

    /// Get path to the MUSIC directory
    pub fn music_dir(&self) -> PathBuf {
        self.root.join(MUSIC_DIR)
    }

    /// Create the base directory structure
    ///
    /// Existing directories are left as they are.
    pub async fn init(&self) -> Result<(), LayoutError> {
        for dir in [self.root.clone(), self.contents_dir(), self.music_dir()] {
            if let Err(source) = fs::create_dir_all(&dir).await {
                return Err(LayoutError { path: dir, source });
            }
        }

        debug!("Initialized export layout at {}", self.root.display());
        Ok(())
    }

    /// Copy a track into MUSIC under `filename`
    ///
    /// Content and permissions are copied, then access and modification times
    /// are carried over. An existing file with the same name is overwritten.
    /// If the copy fails, whatever ended up under `filename` is removed so
    /// MUSIC never holds a truncated track.
    pub async fn copy_track(&self, source: &Path, filename: &str) -> io::Result<CopiedFile> {
        let destination = self.music_dir().join(filename);
        let bytes = match fs::copy(source, &destination).await {
            Ok(bytes) => bytes,
            Err(e) => {
                if fs::remove_file(&destination).await.is_ok() {
                    debug!("Removed incomplete {}", destination.display());
                }
                return Err(e);
            }
        };

        let times_error = match fs::metadata(source).await {
            Ok(metadata) => copy_times(&metadata, &destination).await.err(),
            Err(e) => Some(e),
        };

        debug!("Copied {} -> {}", source.display(), destination.display());
        Ok(CopiedFile { bytes, times_error })
    }
}

async fn copy_times(metadata: &std::fs::Metadata, destination: &Path) -> io::Result<()> {
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    // Copied read-only files can't be opened for writing
    let file = match fs::OpenOptions::new().write(true).open(destination).await {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => fs::File::open(destination).await?,
        Err(e) => return Err(e),
    };

    file.into_std().await.set_times(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[tokio::test]
    async fn test_init_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ExportLayout::new(dir.path().join("usb"));

        layout.init().await.unwrap();

        assert!(layout.contents_dir().is_dir());
        assert!(layout.music_dir().is_dir());
        assert!(dir.path().join("usb/PIONEER/CONTENTS").is_dir());
        assert!(dir.path().join("usb/MUSIC").is_dir());
    }

    #[tokio::test]
    async fn test_init_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ExportLayout::new(dir.path().to_path_buf());
        layout.init().await.unwrap();

        let keep = layout.music_dir().join("000_keep.mp3");
        std::fs::write(&keep, b"keep").unwrap();

        layout.init().await.unwrap();
        assert_eq!(std::fs::read(&keep).unwrap(), b"keep");
    }

    #[tokio::test]
    async fn test_copy_track_preserves_content_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.mp3");
        std::fs::write(&source, b"audio").unwrap();

        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        std::fs::File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(mtime)
            .unwrap();

        let layout = ExportLayout::new(dir.path().join("usb"));
        layout.init().await.unwrap();

        let copied = layout.copy_track(&source, "001_source.mp3").await.unwrap();
        assert_eq!(copied.bytes, 5);
        assert!(copied.times_error.is_none());

        let destination = layout.music_dir().join("001_source.mp3");
        assert_eq!(std::fs::read(&destination).unwrap(), b"audio");
        assert_eq!(std::fs::metadata(&destination).unwrap().modified().unwrap(), mtime);
    }

    #[tokio::test]
    async fn test_copy_track_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ExportLayout::new(dir.path().to_path_buf());
        layout.init().await.unwrap();

        let result = layout.copy_track(&dir.path().join("gone.mp3"), "001_gone.mp3").await;
        assert!(result.is_err());
        assert!(!layout.music_dir().join("001_gone.mp3").exists());
    }

    #[tokio::test]
    async fn test_failed_copy_leaves_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ExportLayout::new(dir.path().join("usb"));
        layout.init().await.unwrap();

        // Leftover from an earlier, interrupted export
        let destination = layout.music_dir().join("001_folder.mp3");
        std::fs::write(&destination, b"trunc").unwrap();

        // A directory can't be copied as a file
        let source = dir.path().join("folder.mp3");
        std::fs::create_dir(&source).unwrap();

        let result = layout.copy_track(&source, "001_folder.mp3").await;
        assert!(result.is_err());
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_init_fails_when_root_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("not-a-dir");
        std::fs::write(&root, b"").unwrap();

        let err = ExportLayout::new(root.clone()).init().await.unwrap_err();
        assert_eq!(err.path, root);
    }
}
