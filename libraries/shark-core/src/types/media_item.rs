/// Media item types (movies, episodes, albums, ...)
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server duration unit: one tick is 100 nanoseconds
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Server classification of a media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    Series,
    Season,
    Episode,
    BoxSet,
    MusicAlbum,
    MusicArtist,
    Audio,
    Video,
    Folder,
    CollectionFolder,
    /// Missing, or a kind this client does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl MediaType {
    /// Every known classification
    pub const KNOWN: [Self; 11] = [
        Self::Movie,
        Self::Series,
        Self::Season,
        Self::Episode,
        Self::BoxSet,
        Self::MusicAlbum,
        Self::MusicArtist,
        Self::Audio,
        Self::Video,
        Self::Folder,
        Self::CollectionFolder,
    ];

    /// Server string for this classification
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "Series",
            Self::Season => "Season",
            Self::Episode => "Episode",
            Self::BoxSet => "BoxSet",
            Self::MusicAlbum => "MusicAlbum",
            Self::MusicArtist => "MusicArtist",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Folder => "Folder",
            Self::CollectionFolder => "CollectionFolder",
            Self::Unknown => "Unknown",
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

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Image kinds served by the image endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageType {
    Primary,
    Backdrop,
    Banner,
    Thumb,
    Logo,
}

impl ImageType {
    /// Path segment used by the server for this kind
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Backdrop => "Backdrop",
            Self::Banner => "Banner",
            Self::Thumb => "Thumb",
            Self::Logo => "Logo",
        }
    }
}

impl std::fmt::Display for ImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Image tags for an item, one optional tag per kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageTags {
    pub primary: Option<String>,
    pub backdrop: Option<String>,
    pub banner: Option<String>,
    pub thumb: Option<String>,
    pub logo: Option<String>,
}

impl ImageTags {
    /// Tag for the given image kind
    #[must_use]
    pub fn get(&self, image_type: ImageType) -> Option<&str> {
        match image_type {
            ImageType::Primary => self.primary.as_deref(),
            ImageType::Backdrop => self.backdrop.as_deref(),
            ImageType::Banner => self.banner.as_deref(),
            ImageType::Thumb => self.thumb.as_deref(),
            ImageType::Logo => self.logo.as_deref(),
        }
    }
}

/// Per-user state of an item (watch progress, favorite, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserData {
    /// Resume position in ticks
    pub playback_position_ticks: Option<i64>,

    /// Number of completed plays
    pub play_count: Option<u32>,

    pub is_favorite: bool,

    pub played: bool,

    pub last_played_date: Option<DateTime<Utc>>,
}

/// A movie, episode, album or any other browsable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Item identifier (empty when the server omitted it)
    pub id: String,

    /// Display name
    pub name: String,

    /// Original title, if different from `name`
    pub original_title: Option<String>,

    pub media_type: MediaType,

    pub overview: Option<String>,

    pub production_year: Option<i32>,

    /// Runtime in ticks
    pub run_time_ticks: Option<i64>,

    /// Community rating (e.g. 7.4)
    pub community_rating: Option<f64>,

    /// Official content rating (e.g. "PG-13")
    pub official_rating: Option<String>,

    pub genres: Option<Vec<String>>,

    pub image_tags: Option<ImageTags>,

    pub user_data: Option<UserData>,

    // Series linkage, set for seasons and episodes
    pub series_id: Option<String>,
    pub series_name: Option<String>,
    pub season_id: Option<String>,
    pub season_name: Option<String>,
    /// Episode number
    pub index_number: Option<i32>,
    /// Season number
    pub parent_index_number: Option<i32>,
}

impl MediaItem {
    /// Create an item with only the required fields set
    pub fn new(id: impl Into<String>, name: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            original_title: None,
            media_type,
            overview: None,
            production_year: None,
            run_time_ticks: None,
            community_rating: None,
            official_rating: None,
            genres: None,
            image_tags: None,
            user_data: None,
            series_id: None,
            series_name: None,
            season_id: None,
            season_name: None,
            index_number: None,
            parent_index_number: None,
        }
    }

    /// Set the runtime in ticks
    #[must_use]
    pub fn with_run_time_ticks(mut self, ticks: i64) -> Self {
        self.run_time_ticks = Some(ticks);
        self
    }

    /// Set the per-user data
    #[must_use]
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = Some(user_data);
        self
    }

    /// Runtime as "2h 5m", or "45m" when under an hour
    pub fn formatted_runtime(&self) -> Option<String> {
        let ticks = self.run_time_ticks.filter(|ticks| *ticks >= 0)?;
        let total_minutes = ticks / TICKS_PER_SECOND / 60;
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;

        if hours > 0 {
            Some(format!("{}h {}m", hours, minutes))
        } else {
            Some(format!("{}m", minutes))
        }
    }

    /// Playback progress as a ratio of position to runtime
    pub fn progress_percentage(&self) -> Option<f64> {
        let position = self.user_data.as_ref()?.playback_position_ticks?;
        let total = self.run_time_ticks.filter(|total| *total > 0)?;
        Some(position as f64 / total as f64)
    }

    /// True once the user has started but not finished the item
    pub fn has_progress(&self) -> bool {
        self.progress_percentage()
            .is_some_and(|progress| progress > 0.0 && progress < 1.0)
    }

    /// "S01E05 - Pilot" for episodes with both indices known
    pub fn episode_display_title(&self) -> Option<String> {
        if self.media_type != MediaType::Episode {
            return None;
        }
        let season = self.parent_index_number?;
        let episode = self.index_number?;
        Some(format!("S{:02}E{:02} - {}", season, episode, self.name))
    }
}
