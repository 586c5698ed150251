//! Playlist catalogs
//!
//! The exporter only talks to a catalog through [`PlaylistSource`], so any
//! library backend (a Rekordbox XML export, an in-memory fixture) can feed it.

pub mod memory;
pub mod rekordbox_xml;

use std::path::PathBuf;
use thiserror::Error;

pub use memory::MemoryCatalog;
pub use rekordbox_xml::RekordboxXml;

/// Source-assigned track identifier
pub type TrackId = String;

/// A playlist as listed by a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    /// Catalog-specific identifier
    pub id: String,
    /// Display name, used as the lookup key
    pub name: String,
}

/// Errors raised while reading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("playlist id '{0}' is not in the catalog")]
    UnknownPlaylist(String),
}

/// Read access to playlists and track locations
pub trait PlaylistSource {
    /// All playlists, in catalog order
    fn playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError>;

    /// Find a playlist by exact, case-sensitive name
    fn playlist_by_name(&self, name: &str) -> Result<Option<PlaylistSummary>, CatalogError> {
        Ok(self.playlists()?.into_iter().find(|p| p.name == name))
    }

    /// Track ids of a playlist in playback order
    fn playlist_track_ids(&self, playlist: &PlaylistSummary) -> Result<Vec<TrackId>, CatalogError>;

    /// Resolve a track id to its file path, `None` if the catalog has no location for it
    fn track_path(&self, id: &TrackId) -> Result<Option<PathBuf>, CatalogError>;
}

impl<S: PlaylistSource + ?Sized> PlaylistSource for &S {
    fn playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError> {
        (**self).playlists()
    }

    fn playlist_by_name(&self, name: &str) -> Result<Option<PlaylistSummary>, CatalogError> {
        (**self).playlist_by_name(name)
    }

    fn playlist_track_ids(&self, playlist: &PlaylistSummary) -> Result<Vec<TrackId>, CatalogError> {
        (**self).playlist_track_ids(playlist)
    }

    fn track_path(&self, id: &TrackId) -> Result<Option<PathBuf>, CatalogError> {
        (**self).track_path(id)
    }
}

/// Render the numbered playlist listing shown by `cdjexport playlists`
pub fn format_playlist_listing(playlists: &[PlaylistSummary]) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    for (i, playlist) in playlists.iter().enumerate() {
        out.push_str(&format!("{:3}. {}\n", i + 1, playlist.name));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_playlist_listing() {
        let playlists = vec![
            PlaylistSummary {
                id: "1".to_string(),
                name: "Friday Set".to_string(),
            },
            PlaylistSummary {
                id: "2".to_string(),
                name: "朝のミックス".to_string(),
            },
        ];

        let listing = format_playlist_listing(&playlists);
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[1], "  1. Friday Set");
        assert_eq!(lines[2], "  2. 朝のミックス");
        assert_eq!(lines[3], "=".repeat(60));
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let catalog = MemoryCatalog::new()
            .with_playlist("Friday Set", Vec::<(&str, &str)>::new())
            .with_playlist("friday set", Vec::<(&str, &str)>::new());

        let found = catalog.playlist_by_name("friday set").unwrap().unwrap();
        assert_eq!(found.name, "friday set");
        assert!(catalog.playlist_by_name("Friday").unwrap().is_none());
        assert!(catalog.playlist_by_name("FRIDAY SET").unwrap().is_none());
    }
}
