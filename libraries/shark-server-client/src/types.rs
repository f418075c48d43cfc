//! Types for media server API requests and responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Identity this client presents to the server.
///
/// Sent on every request in the `Authorization` header, together with the
/// session token once authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub client_name: String,
    pub client_version: String,
    pub device_name: String,
    pub device_id: String,
}

impl ClientInfo {
    /// Client info with this crate's name and version and the given device.
    pub fn new(device_name: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            client_name: "Jelly Shark".to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            device_name: device_name.into(),
            device_id: device_id.into(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self, access_token: Option<&str>) -> String {
        let mut header = format!(
            "MediaBrowser Client=\"{}\", Device=\"{}\", DeviceId=\"{}\", Version=\"{}\"",
            urlencoding::encode(&self.client_name),
            urlencoding::encode(&self.device_name),
            urlencoding::encode(&self.device_id),
            urlencoding::encode(&self.client_version),
        );
        if let Some(token) = access_token {
            header.push_str(&format!(", Token=\"{}\"", token));
        }
        header
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}

/// Deserialize an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for `POST /Users/AuthenticateByName`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticateByNameRequest {
    pub username: String,
    pub pw: String,
}

/// Response from `POST /Users/AuthenticateByName`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResultDto {
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<UserDto>,
    #[serde(default, deserialize_with = "lenient")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub server_id: Option<String>,
}

/// User as returned by the server.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserDto {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub server_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub primary_image_tag: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub policy: Option<UserPolicyDto>,
}

/// Subset of the user's policy this client reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPolicyDto {
    #[serde(default, deserialize_with = "lenient")]
    pub is_administrator: Option<bool>,
}

// =============================================================================
// Server Info Types
// =============================================================================

/// Response from `GET /System/Info/Public`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicSystemInfoDto {
    #[serde(default, deserialize_with = "lenient")]
    pub server_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub operating_system: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub startup_wizard_completed: Option<bool>,
}

// =============================================================================
// Item Types
// =============================================================================

/// Any item (library view, movie, episode, folder, ...) as returned by the server.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseItemDto {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub original_title: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "lenient")]
    pub item_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub collection_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub production_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub run_time_ticks: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub community_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub official_rating: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub genres: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_tags: Option<HashMap<String, String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub user_data: Option<UserItemDataDto>,
    #[serde(default, deserialize_with = "lenient")]
    pub child_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub series_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub series_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub season_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub season_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub index_number: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub parent_index_number: Option<i32>,
}

/// Per-user item state as returned by the server.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserItemDataDto {
    #[serde(default, deserialize_with = "lenient")]
    pub playback_position_ticks: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub play_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_favorite: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub played: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_played_date: Option<String>,
}

/// Paged item listing (`{"Items": [...], "TotalRecordCount": n}`).
///
/// `Items` itself is strict: anything other than an array or null is a
/// decoding error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResultDto {
    #[serde(default)]
    pub items: Option<Vec<BaseItemDto>>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_record_count: Option<i64>,
}
