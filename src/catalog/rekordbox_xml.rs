//! Rekordbox collection XML catalog
//!
//! Reads the `DJ_PLAYLISTS` document written by Rekordbox's
//! "Export Collection in xml format". Playlists live in a `NODE` tree under
//! `PLAYLISTS`: `Type="0"` nodes are folders, `Type="1"` nodes are playlists
//! whose `TRACK` entries point into `COLLECTION` either by `TrackID`
//! (`KeyType="0"`) or by `Location` (`KeyType="1"`).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use super::{CatalogError, PlaylistSource, PlaylistSummary, TrackId};

const NODE_FOLDER: u8 = 0;
const NODE_PLAYLIST: u8 = 1;
const KEY_BY_LOCATION: u8 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename = "DJ_PLAYLISTS")]
struct DjPlaylists {
    #[serde(rename = "COLLECTION")]
    collection: Collection,
    #[serde(rename = "PLAYLISTS")]
    playlists: Option<Playlists>,
}

#[derive(Debug, Deserialize)]
struct Collection {
    #[serde(rename = "TRACK", default)]
    tracks: Vec<CollectionTrack>,
}

#[derive(Debug, Deserialize)]
struct CollectionTrack {
    #[serde(rename = "@TrackID")]
    track_id: String,
    #[serde(rename = "@Location", default)]
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Playlists {
    #[serde(rename = "NODE", default)]
    nodes: Vec<Node>,
}

#[derive(Debug, Deserialize)]
struct Node {
    #[serde(rename = "@Type")]
    kind: u8,
    #[serde(rename = "@Name")]
    name: String,
    #[serde(rename = "@KeyType", default)]
    key_type: Option<u8>,
    #[serde(rename = "NODE", default)]
    children: Vec<Node>,
    #[serde(rename = "TRACK", default)]
    tracks: Vec<NodeTrack>,
}

#[derive(Debug, Deserialize)]
struct NodeTrack {
    #[serde(rename = "@Key")]
    key: String,
}

/// A playlist flattened out of the node tree
#[derive(Debug, Clone)]
struct XmlPlaylist {
    summary: PlaylistSummary,
    track_ids: Vec<TrackId>,
}

/// Catalog backed by a Rekordbox collection XML export
#[derive(Debug, Clone)]
pub struct RekordboxXml {
    playlists: Vec<XmlPlaylist>,
    locations: HashMap<TrackId, PathBuf>,
}

impl RekordboxXml {
    /// Read and parse an XML export
    ///
    /// This is the catalog's "connection": a missing or malformed file fails here.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::parse(&content).map_err(|message| CatalogError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        debug!(
            "Loaded {} tracks and {} playlists from {}",
            catalog.locations.len(),
            catalog.playlists.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse an XML export held in memory
    pub fn parse(content: &str) -> Result<Self, String> {
        let document: DjPlaylists =
            quick_xml::de::from_str(content).map_err(|e| e.to_string())?;

        let mut locations = HashMap::new();
        let mut ids_by_location = HashMap::new();
        for track in document.collection.tracks {
            let Some(location) = track.location else {
                debug!("Track {} has no location", track.track_id);
                continue;
            };
            locations.insert(track.track_id.clone(), location_to_path(&location));
            ids_by_location.insert(location, track.track_id);
        }

        let mut playlists = Vec::new();
        if let Some(tree) = document.playlists {
            for node in &tree.nodes {
                collect_playlists(node, &ids_by_location, &mut playlists);
            }
        }

        Ok(Self {
            playlists,
            locations,
        })
    }
}

/// Walk the node tree depth-first, collecting playlists in document order
fn collect_playlists(
    node: &Node,
    ids_by_location: &HashMap<String, TrackId>,
    out: &mut Vec<XmlPlaylist>,
) {
    match node.kind {
        NODE_FOLDER => {
            for child in &node.children {
                collect_playlists(child, ids_by_location, out);
            }
        }
        NODE_PLAYLIST => {
            let by_location = node.key_type == Some(KEY_BY_LOCATION);
            let track_ids = node
                .tracks
                .iter()
                .map(|t| {
                    if by_location {
                        // Unknown locations keep the raw key so they resolve to None
                        ids_by_location
                            .get(&t.key)
                            .cloned()
                            .unwrap_or_else(|| t.key.clone())
                    } else {
                        t.key.clone()
                    }
                })
                .collect();

            out.push(XmlPlaylist {
                summary: PlaylistSummary {
                    id: out.len().to_string(),
                    name: node.name.clone(),
                },
                track_ids,
            });
        }
        other => debug!("Ignoring playlist node '{}' of type {}", node.name, other),
    }
}

/// Convert a Rekordbox `Location` into a filesystem path
///
/// Locations are normally `file://localhost/...` URLs with percent-encoding;
/// anything that isn't a file URL is taken as a literal path.
fn location_to_path(location: &str) -> PathBuf {
    Url::parse(location)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
        .unwrap_or_else(|| PathBuf::from(location))
}

impl PlaylistSource for RekordboxXml {
    fn playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError> {
        Ok(self.playlists.iter().map(|p| p.summary.clone()).collect())
    }

    fn playlist_track_ids(&self, playlist: &PlaylistSummary) -> Result<Vec<TrackId>, CatalogError> {
        self.playlists
            .iter()
            .find(|p| p.summary.id == playlist.id)
            .map(|p| p.track_ids.clone())
            .ok_or_else(|| CatalogError::UnknownPlaylist(playlist.id.clone()))
    }

    fn track_path(&self, id: &TrackId) -> Result<Option<PathBuf>, CatalogError> {
        Ok(self.locations.get(id).cloned())
    }
}
