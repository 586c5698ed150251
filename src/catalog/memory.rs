//! In-memory catalog

use std::collections::HashMap;
use std::path::PathBuf;

use super::{CatalogError, PlaylistSource, PlaylistSummary, TrackId};

/// Catalog held entirely in memory
///
/// Handy for embedding callers that already know their tracks, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    playlists: Vec<(PlaylistSummary, Vec<TrackId>)>,
    tracks: HashMap<TrackId, PathBuf>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single track location
    pub fn with_track(mut self, id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.tracks.insert(id.into(), path.into());
        self
    }

    /// Add a playlist along with the locations of its tracks, in order
    pub fn with_playlist<I, K, P>(mut self, name: &str, tracks: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        let mut ids = Vec::new();
        for (id, path) in tracks {
            let id = id.into();
            self.tracks.insert(id.clone(), path.into());
            ids.push(id);
        }
        self.push_playlist(name, ids);
        self
    }

    /// Add a playlist referencing track ids only
    ///
    /// Ids without a registered location resolve to `None`.
    pub fn with_playlist_ids<I, K>(mut self, name: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let ids = ids.into_iter().map(Into::into).collect();
        self.push_playlist(name, ids);
        self
    }

    fn push_playlist(&mut self, name: &str, ids: Vec<TrackId>) {
        let summary = PlaylistSummary {
            id: self.playlists.len().to_string(),
            name: name.to_string(),
        };
        self.playlists.push((summary, ids));
    }
}

impl PlaylistSource for MemoryCatalog {
    fn playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError> {
        Ok(self.playlists.iter().map(|(p, _)| p.clone()).collect())
    }

    fn playlist_track_ids(&self, playlist: &PlaylistSummary) -> Result<Vec<TrackId>, CatalogError> {
        self.playlists
            .iter()
            .find(|(p, _)| p.id == playlist.id)
            .map(|(_, ids)| ids.clone())
            .ok_or_else(|| CatalogError::UnknownPlaylist(playlist.id.clone()))
    }

    fn track_path(&self, id: &TrackId) -> Result<Option<PathBuf>, CatalogError> {
        Ok(self.tracks.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_order_preserved() {
        let catalog = MemoryCatalog::new().with_playlist(
            "Set",
            [("3", "/c.mp3"), ("1", "/a.mp3"), ("2", "/b.mp3")],
        );

        let playlist = catalog.playlist_by_name("Set").unwrap().unwrap();
        let ids = catalog.playlist_track_ids(&playlist).unwrap();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(
            catalog.track_path(&"1".to_string()).unwrap(),
            Some(PathBuf::from("/a.mp3"))
        );
    }

    #[test]
    fn test_unresolved_ids() {
        let catalog = MemoryCatalog::new()
            .with_track("1", "/a.mp3")
            .with_playlist_ids("Set", ["1", "99"]);

        assert!(catalog.track_path(&"99".to_string()).unwrap().is_none());
    }

    #[test]
    fn test_unknown_playlist_id() {
        let catalog = MemoryCatalog::new();
        let ghost = PlaylistSummary {
            id: "7".to_string(),
            name: "Ghost".to_string(),
        };

        assert!(matches!(
            catalog.playlist_track_ids(&ghost),
            Err(CatalogError::UnknownPlaylist(id)) if id == "7"
        ));
    }
}
