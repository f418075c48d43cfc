//! Library and item requests for an authenticated session.

use crate::adapters::items_from;
use crate::endpoints::{endpoint_url, with_query, ITEM_FIELDS};
use crate::error::{ApiError, Result};
use crate::request::send_json;
use crate::transport::{Transport, WireRequest};
use crate::types::{BaseItemDto, ItemsResultDto};
use shark_core::{Library, MediaItem};
use tracing::debug;
use url::Url;

/// Library client for a signed-in user.
pub struct LibraryClient<'a> {
    transport: &'a dyn Transport,
    server_url: &'a Url,
    authorization: &'a str,
    user_id: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(
        transport: &'a dyn Transport,
        server_url: &'a Url,
        authorization: &'a str,
        user_id: &'a str,
    ) -> Self {
        Self {
            transport,
            server_url,
            authorization,
            user_id,
        }
    }

    fn get(&self, url: Url) -> WireRequest {
        WireRequest::get(url).header("Authorization", self.authorization)
    }

    /// Get the libraries (user views) visible to the user.
    pub async fn get_libraries(&self) -> Result<Vec<Library>> {
        let url = endpoint_url(self.server_url, &["Users", self.user_id, "Views"]);
        debug!(url = %url, "Fetching libraries");

        let result: ItemsResultDto =
            send_json(self.transport, self.get(url), "library listing").await?;
        let libraries: Vec<Library> = items_from(result);

        debug!(libraries = libraries.len(), "Fetched libraries");
        Ok(libraries)
    }

    /// Get the items of a library, recursively, sorted by name.
    ///
    /// # Arguments
    /// * `limit` - Page size (None for the server default)
    /// * `start_index` - Offset of the first item (None for the server default)
    pub async fn get_library_items(
        &self,
        library_id: &str,
        limit: Option<u32>,
        start_index: Option<u32>,
    ) -> Result<Vec<MediaItem>> {
        let url = with_query(
            endpoint_url(self.server_url, &["Users", self.user_id, "Items"]),
            &[
                ("ParentId", Some(library_id.to_string())),
                ("Recursive", Some("true".to_string())),
                ("SortBy", Some("SortName".to_string())),
                ("SortOrder", Some("Ascending".to_string())),
                ("Fields", Some(ITEM_FIELDS.to_string())),
                ("Limit", limit.map(|l| l.to_string())),
                ("StartIndex", start_index.map(|s| s.to_string())),
            ],
        );
        debug!(url = %url, library_id = %library_id, "Fetching library items");

        let result: ItemsResultDto =
            send_json(self.transport, self.get(url), "item listing").await?;
        let items: Vec<MediaItem> = items_from(result);

        debug!(items = items.len(), "Fetched library items");
        Ok(items)
    }

    /// Get a single item by ID.
    pub async fn get_media_item(&self, item_id: &str) -> Result<MediaItem> {
        let url = endpoint_url(self.server_url, &["Users", self.user_id, "Items", item_id]);
        debug!(url = %url, item_id = %item_id, "Fetching item");

        match send_json::<BaseItemDto>(self.transport, self.get(url), "item").await {
            Ok(dto) => Ok(MediaItem::from(dto)),
            Err(ApiError::NotFound) => {
                debug!(item_id = %item_id, "Item not found");
                Err(ApiError::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Get partially watched items, most recent first.
    pub async fn get_resume_items(&self, limit: Option<u32>) -> Result<Vec<MediaItem>> {
        let url = with_query(
            endpoint_url(self.server_url, &["Users", self.user_id, "Items", "Resume"]),
            &[
                ("Fields", Some(ITEM_FIELDS.to_string())),
                ("Limit", limit.map(|l| l.to_string())),
            ],
        );
        debug!(url = %url, "Fetching resume items");

        let result: ItemsResultDto =
            send_json(self.transport, self.get(url), "resume listing").await?;
        Ok(items_from(result))
    }

    /// Get recently added items, optionally restricted to one library.
    ///
    /// This endpoint answers with a bare array rather than an item envelope.
    pub async fn get_latest_items(
        &self,
        library_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<MediaItem>> {
        let url = with_query(
            endpoint_url(self.server_url, &["Users", self.user_id, "Items", "Latest"]),
            &[
                ("Fields", Some(ITEM_FIELDS.to_string())),
                ("ParentId", library_id.map(str::to_string)),
                ("Limit", limit.map(|l| l.to_string())),
            ],
        );
        debug!(url = %url, "Fetching latest items");

        let items: Vec<BaseItemDto> =
            send_json(self.transport, self.get(url), "latest listing").await?;
        Ok(items.into_iter().map(MediaItem::from).collect())
    }
}
