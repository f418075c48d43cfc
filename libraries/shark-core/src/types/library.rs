/// Library (top-level collection) types
use serde::{Deserialize, Serialize};

/// Server classification of a library's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    Movies,
    TvShows,
    Music,
    MusicVideos,
    HomeVideos,
    BoxSets,
    Books,
    Photos,
    LiveTv,
    Playlists,
    Folders,
    /// Missing, or a value this client does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl CollectionType {
    /// Every known classification, in server order
    pub const KNOWN: [Self; 11] = [
        Self::Movies,
        Self::TvShows,
        Self::Music,
        Self::MusicVideos,
        Self::HomeVideos,
        Self::BoxSets,
        Self::Books,
        Self::Photos,
        Self::LiveTv,
        Self::Playlists,
        Self::Folders,
    ];

    /// Server string for this classification
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::TvShows => "tvshows",
            Self::Music => "music",
            Self::MusicVideos => "musicvideos",
            Self::HomeVideos => "homevideos",
            Self::BoxSets => "boxsets",
            Self::Books => "books",
            Self::Photos => "photos",
            Self::LiveTv => "livetv",
            Self::Playlists => "playlists",
            Self::Folders => "folders",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a server string. Never fails: unrecognized values map to `Unknown`.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for CollectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A library visible to the current user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Library {
    /// Library identifier (empty when the server omitted it)
    pub id: String,

    /// Display name
    pub name: String,

    /// Content classification
    pub collection_type: CollectionType,

    /// Tag of the library's primary image
    pub primary_image_tag: Option<String>,

    /// Number of direct children, when the server reports it
    pub child_count: Option<u32>,
}

impl Library {
    /// Create a library with only the required fields set
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        collection_type: CollectionType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            collection_type,
            primary_image_tag: None,
            child_count: None,
        }
    }
}
