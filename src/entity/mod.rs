//! Catalog entity model
//!
//! The three indexed entity kinds (tracks, artists, playlists), the
//! oneof-style payload wrapper used on the write path, and the mapping
//! from entity kind to store collection and search field weights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of indexed entity kinds.
///
/// `ALL` doubles as the documented merge-tie order: sub-query results are
/// always concatenated Track, Artist, Playlist so equal-score ordering is
/// reproducible across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Track,
    Artist,
    Playlist,
}

impl EntityType {
    /// Fixed type order used for fan-out dispatch and merge tie-breaking.
    pub const ALL: [EntityType; 3] = [EntityType::Track, EntityType::Artist, EntityType::Playlist];

    /// Collection (index alias) a document of this type lives in.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityType::Track => "tracks",
            EntityType::Artist => "artists",
            EntityType::Playlist => "playlists",
        }
    }

    /// Field weighting scheme for this type's sub-query.
    ///
    /// Title/name fields rank highest, secondary descriptive fields lower.
    /// The exact numbers mirror the store's index configuration.
    pub fn field_weights(&self) -> &'static [(&'static str, f32)] {
        match self {
            EntityType::Track => &[("title", 3.0), ("artistName", 2.0), ("albumTitle", 1.0)],
            EntityType::Artist => &[("name", 3.0), ("tags", 1.0)],
            EntityType::Playlist => &[("title", 3.0), ("description", 1.0), ("ownerName", 1.0)],
        }
    }

    /// Parse a caller-supplied type name leniently.
    ///
    /// Unrecognized names return `None` and are silently dropped by the
    /// caller rather than rejected.
    pub fn parse(s: &str) -> Option<EntityType> {
        match s.trim().to_ascii_lowercase().as_str() {
            "track" | "tracks" => Some(EntityType::Track),
            "artist" | "artists" => Some(EntityType::Artist),
            "playlist" | "playlists" => Some(EntityType::Playlist),
            _ => None,
        }
    }

    /// Lowercase name as used on the wire and in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            EntityType::Track => "track",
            EntityType::Artist => "artist",
            EntityType::Playlist => "playlist",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A track document.
///
/// Absent scalar fields deserialize to their zero values so partially
/// populated feed items are accepted as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist_id: String,
    pub artist_name: String,
    pub album_title: String,
    pub tags: Vec<String>,
    pub genre: String,
    pub year: i32,
    pub duration_sec: i32,
    pub popularity: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// An artist document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub country: String,
    pub tags: Vec<String>,
    pub popularity: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// A playlist document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub owner_name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub track_count: i32,
    pub popularity: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// A typed entity payload on the write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityPayload {
    Track(Track),
    Artist(Artist),
    Playlist(Playlist),
}

impl EntityPayload {
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityPayload::Track(_) => EntityType::Track,
            EntityPayload::Artist(_) => EntityType::Artist,
            EntityPayload::Playlist(_) => EntityType::Playlist,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntityPayload::Track(t) => &t.id,
            EntityPayload::Artist(a) => &a.id,
            EntityPayload::Playlist(p) => &p.id,
        }
    }

    /// Convert the payload into the store's generic document representation.
    pub fn to_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            EntityPayload::Track(t) => serde_json::to_value(t),
            EntityPayload::Artist(a) => serde_json::to_value(a),
            EntityPayload::Playlist(p) => serde_json::to_value(p),
        }
    }
}

/// Wire-level entity wrapper: at most one of the fields is set.
///
/// Mirrors a oneof, so an item with no field set can still occupy its
/// position in a batch and be rejected individually.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<Artist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<Playlist>,
}

impl EntityEnvelope {
    /// Extract the payload, if any field is set. First set field wins in
    /// the fixed type order.
    pub fn payload(&self) -> Option<EntityPayload> {
        if let Some(t) = &self.track {
            Some(EntityPayload::Track(t.clone()))
        } else if let Some(a) = &self.artist {
            Some(EntityPayload::Artist(a.clone()))
        } else {
            self.playlist.clone().map(EntityPayload::Playlist)
        }
    }
}

impl From<Track> for EntityEnvelope {
    fn from(t: Track) -> Self {
        EntityEnvelope {
            track: Some(t),
            ..Default::default()
        }
    }
}

impl From<Artist> for EntityEnvelope {
    fn from(a: Artist) -> Self {
        EntityEnvelope {
            artist: Some(a),
            ..Default::default()
        }
    }
}

impl From<Playlist> for EntityEnvelope {
    fn from(p: Playlist) -> Self {
        EntityEnvelope {
            playlist: Some(p),
            ..Default::default()
        }
    }
}
