//! Sending requests and classifying their outcome.

use crate::adapters::decode;
use crate::error::{ApiError, Result};
use crate::transport::{Transport, WireRequest, WireResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Execute a request, turning transport failures and non-success statuses
/// into [`ApiError`]s.
pub(crate) async fn send(transport: &dyn Transport, request: WireRequest) -> Result<WireResponse> {
    let url = request.url.clone();
    let response = transport.execute(request).await.map_err(|e| {
        warn!(url = %url, error = %e, "Request failed without a response");
        ApiError::from(e)
    })?;

    if response.is_success() {
        Ok(response)
    } else {
        debug!(
            url = %url,
            status = response.status,
            body = %response.text(),
            "Server returned an error status"
        );
        Err(ApiError::from_status(response.status))
    }
}

/// Execute a request and decode a JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: WireRequest,
    what: &str,
) -> Result<T> {
    let response = send(transport, request).await?;
    decode(&response.body, what)
}
