//! Conversion from server payloads to domain types.
//!
//! Conversions here never fail. Missing identifiers become empty strings,
//! missing names become "Unknown", unknown classifications become the
//! `Unknown` variant and absent flags become `false`. The only failure is
//! [`decode`], for bodies that are not the expected JSON shape at all.

use crate::error::{ApiError, Result};
use crate::types::{
    AuthenticationResultDto, BaseItemDto, ItemsResultDto, PublicSystemInfoDto, UserDto,
    UserItemDataDto,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use shark_core::{
    CollectionType, ImageTags, Library, MediaItem, MediaType, ServerInfo, User, UserData,
};
use std::collections::HashMap;

const UNKNOWN_NAME: &str = "Unknown";

/// Parse a response body, failing only if it is not the expected shape.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::decoding(format!("Failed to parse {}: {}", what, e)))
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id.unwrap_or_default(),
            name: dto.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            server_id: dto.server_id,
            is_administrator: dto
                .policy
                .and_then(|policy| policy.is_administrator)
                .unwrap_or(false),
            primary_image_tag: dto.primary_image_tag,
        }
    }
}

/// Split an authentication result into the session token and the user.
///
/// Returns `None` unless both are present; the session client treats that as
/// rejected credentials.
pub(crate) fn session_from_auth(result: AuthenticationResultDto) -> Option<(String, User)> {
    let token = result.access_token.filter(|token| !token.is_empty())?;
    let mut user = User::from(result.user?);
    if user.server_id.is_none() {
        user.server_id = result.server_id;
    }
    Some((token, user))
}

impl From<PublicSystemInfoDto> for ServerInfo {
    fn from(dto: PublicSystemInfoDto) -> Self {
        Self {
            server_name: dto.server_name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            version: dto.version.unwrap_or_default(),
            id: dto.id.unwrap_or_default(),
            operating_system: dto.operating_system,
            startup_wizard_completed: dto.startup_wizard_completed,
        }
    }
}

impl From<UserItemDataDto> for UserData {
    fn from(dto: UserItemDataDto) -> Self {
        Self {
            playback_position_ticks: dto.playback_position_ticks,
            play_count: dto.play_count.and_then(|count| u32::try_from(count).ok()),
            is_favorite: dto.is_favorite.unwrap_or(false),
            played: dto.played.unwrap_or(false),
            last_played_date: dto.last_played_date.as_deref().and_then(parse_date),
        }
    }
}

fn image_tags(mut tags: HashMap<String, String>) -> ImageTags {
    ImageTags {
        primary: tags.remove("Primary"),
        backdrop: tags.remove("Backdrop"),
        banner: tags.remove("Banner"),
        thumb: tags.remove("Thumb"),
        logo: tags.remove("Logo"),
    }
}

// Server dates are RFC 3339, sometimes without an offset (then UTC).
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

impl From<BaseItemDto> for MediaItem {
    fn from(dto: BaseItemDto) -> Self {
        Self {
            id: dto.id.unwrap_or_default(),
            name: dto.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            original_title: dto.original_title,
            media_type: dto
                .item_type
                .as_deref()
                .map(MediaType::from_wire)
                .unwrap_or(MediaType::Unknown),
            overview: dto.overview,
            production_year: dto.production_year,
            run_time_ticks: dto.run_time_ticks,
            community_rating: dto.community_rating,
            official_rating: dto.official_rating,
            genres: dto.genres,
            image_tags: dto.image_tags.map(image_tags),
            user_data: dto.user_data.map(UserData::from),
            series_id: dto.series_id,
            series_name: dto.series_name,
            season_id: dto.season_id,
            season_name: dto.season_name,
            index_number: dto.index_number,
            parent_index_number: dto.parent_index_number,
        }
    }
}

impl From<BaseItemDto> for Library {
    fn from(dto: BaseItemDto) -> Self {
        let primary_image_tag = dto
            .image_tags
            .and_then(|mut tags| tags.remove("Primary"));

        Self {
            id: dto.id.unwrap_or_default(),
            name: dto.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            collection_type: dto
                .collection_type
                .as_deref()
                .map(CollectionType::from_wire)
                .unwrap_or(CollectionType::Unknown),
            primary_image_tag,
            child_count: dto.child_count.and_then(|count| u32::try_from(count).ok()),
        }
    }
}

/// Convert every item of a listing.
pub(crate) fn items_from<T: From<BaseItemDto>>(result: ItemsResultDto) -> Vec<T> {
    result
        .items
        .unwrap_or_default()
        .into_iter()
        .map(T::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shark_core::TICKS_PER_SECOND;

    fn item(value: serde_json::Value) -> BaseItemDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_user_from_full_payload() {
        let dto: UserDto = serde_json::from_value(json!({
            "Id": "user-1",
            "Name": "demo",
            "ServerId": "server-1",
            "PrimaryImageTag": "tag",
            "Policy": { "IsAdministrator": true }
        }))
        .unwrap();

        let user = User::from(dto);
        assert_eq!(user.id, "user-1");
        assert_eq!(user.name, "demo");
        assert_eq!(user.server_id.as_deref(), Some("server-1"));
        assert!(user.is_administrator);
        assert_eq!(user.primary_image_tag.as_deref(), Some("tag"));
    }

    #[test]
    fn test_user_without_policy_or_id() {
        let user = User::from(UserDto::default());
        assert_eq!(user.id, "");
        assert_eq!(user.name, "Unknown");
        assert!(!user.is_administrator);

        let dto: UserDto = serde_json::from_value(json!({ "Id": "u", "Policy": {} })).unwrap();
        assert!(!User::from(dto).is_administrator);
    }

    #[test]
    fn test_session_requires_user_and_token() {
        let no_user: AuthenticationResultDto =
            serde_json::from_value(json!({ "AccessToken": "token" })).unwrap();
        assert!(session_from_auth(no_user).is_none());

        let no_token: AuthenticationResultDto =
            serde_json::from_value(json!({ "User": { "Id": "u", "Name": "n" } })).unwrap();
        assert!(session_from_auth(no_token).is_none());

        let empty_token: AuthenticationResultDto = serde_json::from_value(json!({
            "User": { "Id": "u", "Name": "n" },
            "AccessToken": ""
        }))
        .unwrap();
        assert!(session_from_auth(empty_token).is_none());
    }

    #[test]
    fn test_session_falls_back_to_result_server_id() {
        let result: AuthenticationResultDto = serde_json::from_value(json!({
            "User": { "Id": "u", "Name": "n" },
            "AccessToken": "token",
            "ServerId": "server-9"
        }))
        .unwrap();

        let (token, user) = session_from_auth(result).unwrap();
        assert_eq!(token, "token");
        assert_eq!(user.server_id.as_deref(), Some("server-9"));
    }

    #[test]
    fn test_episode_item() {
        let media = MediaItem::from(item(json!({
            "Id": "ep-1",
            "Name": "Pilot",
            "Type": "Episode",
            "RunTimeTicks": 30 * 60 * TICKS_PER_SECOND,
            "SeriesId": "series-1",
            "SeriesName": "Show",
            "SeasonId": "season-1",
            "SeasonName": "Season 1",
            "IndexNumber": 5,
            "ParentIndexNumber": 1,
            "ImageTags": { "Primary": "p", "Thumb": "t", "Art": "ignored" },
            "UserData": {
                "PlaybackPositionTicks": 0,
                "PlayCount": 2,
                "IsFavorite": true,
                "Played": true,
                "LastPlayedDate": "2024-03-01T20:15:00.1234567Z"
            }
        })));

        assert_eq!(media.media_type, MediaType::Episode);
        assert_eq!(media.episode_display_title().as_deref(), Some("S01E05 - Pilot"));
        assert_eq!(media.formatted_runtime().as_deref(), Some("30m"));
        assert_eq!(media.series_name.as_deref(), Some("Show"));

        let tags = media.image_tags.unwrap();
        assert_eq!(tags.primary.as_deref(), Some("p"));
        assert_eq!(tags.thumb.as_deref(), Some("t"));
        assert!(tags.backdrop.is_none());

        let user_data = media.user_data.unwrap();
        assert_eq!(user_data.play_count, Some(2));
        assert!(user_data.is_favorite);
        assert!(user_data.played);
        assert!(user_data.last_played_date.is_some());
    }

    #[test]
    fn test_empty_item_degrades_to_defaults() {
        let media = MediaItem::from(item(json!({})));

        assert_eq!(media.id, "");
        assert_eq!(media.name, "Unknown");
        assert_eq!(media.media_type, MediaType::Unknown);
        assert!(media.image_tags.is_none());
        assert!(media.user_data.is_none());
    }

    #[test]
    fn test_user_data_defaults() {
        let data = UserData::from(UserItemDataDto::default());
        assert!(!data.is_favorite);
        assert!(!data.played);
        assert!(data.play_count.is_none());
    }

    #[test]
    fn test_unknown_item_type() {
        let media = MediaItem::from(item(json!({ "Id": "1", "Type": "Trailer" })));
        assert_eq!(media.media_type, MediaType::Unknown);
    }

    #[test]
    fn test_library_from_view() {
        let library = Library::from(item(json!({
            "Id": "lib-1",
            "Name": "Shows",
            "CollectionType": "tvshows",
            "ImageTags": { "Primary": "lib-tag" },
            "ChildCount": 12
        })));

        assert_eq!(library.id, "lib-1");
        assert_eq!(library.collection_type, CollectionType::TvShows);
        assert_eq!(library.primary_image_tag.as_deref(), Some("lib-tag"));
        assert_eq!(library.child_count, Some(12));
    }

    #[test]
    fn test_library_unknown_collection_type() {
        let library = Library::from(item(json!({ "Id": "x", "CollectionType": "mixed" })));
        assert_eq!(library.collection_type, CollectionType::Unknown);

        let missing = Library::from(item(json!({ "Id": "y" })));
        assert_eq!(missing.collection_type, CollectionType::Unknown);
    }

    #[test]
    fn test_server_info() {
        let dto: PublicSystemInfoDto = serde_json::from_value(json!({
            "ServerName": "Home",
            "Version": "10.9.11",
            "Id": "abc",
            "OperatingSystem": "Linux",
            "StartupWizardCompleted": true
        }))
        .unwrap();

        let info = ServerInfo::from(dto);
        assert_eq!(info.server_name, "Home");
        assert!(info.is_supported());
        assert_eq!(info.operating_system.as_deref(), Some("Linux"));
        assert_eq!(info.startup_wizard_completed, Some(true));
    }

    #[test]
    fn test_parse_dates() {
        assert!(parse_date("2024-03-01T20:15:00Z").is_some());
        assert!(parse_date("2024-03-01T20:15:00.1234567").is_some());
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let result: Result<ItemsResultDto> = decode(b"<html>", "items");
        match result {
            Err(ApiError::Decoding(msg)) => assert!(msg.contains("items")),
            other => panic!("Expected Decoding error, got: {:?}", other),
        }
    }

    #[test]
    fn test_items_from_null_items() {
        let result: ItemsResultDto = serde_json::from_value(json!({ "Items": null })).unwrap();
        let items: Vec<MediaItem> = items_from(result);
        assert!(items.is_empty());
    }
}
