//! Server address normalization.

use shark_server_client::{ApiError, Result};
use url::Url;

/// Scheme assumed when the user types a bare host
pub const DEFAULT_SCHEME: &str = "https";

/// A validated server address: http(s) with a host, optional path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    url: Url,
}

impl ServerEndpoint {
    /// Normalize user input into an endpoint.
    ///
    /// Surrounding whitespace is dropped and `https://` is prepended when no
    /// scheme is given. Fails without touching the network if no host results.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ApiError::invalid_endpoint("server address is empty"));
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("{}://{}", DEFAULT_SCHEME, trimmed)
        };

        let mut url = Url::parse(&candidate)
            .map_err(|e| ApiError::invalid_endpoint(format!("{}: {}", trimmed, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::invalid_endpoint(format!(
                "{}: scheme must be http or https",
                trimmed
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ApiError::invalid_endpoint(format!("{}: missing host", trimmed)));
        }

        url.set_query(None);
        url.set_fragment(None);

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

impl std::fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url.as_str().trim_end_matches('/'))
    }
}
