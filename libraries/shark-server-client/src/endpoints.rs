//! Server endpoint paths and URL construction.
//!
//! Server URLs may carry a path prefix (`https://host/jellyfin`); every
//! endpoint is appended below it.

use shark_core::ImageType;
use url::Url;

/// Item fields requested on every listing
pub(crate) const ITEM_FIELDS: &str = "Overview,Genres,OriginalTitle,ChildCount";

/// Append path segments below the server URL.
pub(crate) fn endpoint_url(server_url: &Url, segments: &[&str]) -> Url {
    let mut url = server_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Append query parameters, skipping the ones without a value.
pub(crate) fn with_query(mut url: Url, params: &[(&str, Option<String>)]) -> Url {
    let present: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value)))
        .collect();

    if !present.is_empty() {
        url.query_pairs_mut().extend_pairs(present);
    }
    url
}

/// URL of an item image, optionally resized by the server.
///
/// Dimensions that are not given are left out of the query entirely.
pub fn image_url(
    server_url: &Url,
    item_id: &str,
    image_type: ImageType,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> Url {
    let url = endpoint_url(server_url, &["Items", item_id, "Images", image_type.as_str()]);
    with_query(
        url,
        &[
            ("maxWidth", max_width.map(|w| w.to_string())),
            ("maxHeight", max_height.map(|h| h.to_string())),
        ],
    )
}
