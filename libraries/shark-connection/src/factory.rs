//! Construction of session clients for a chosen server.

use crate::endpoint::ServerEndpoint;
use shark_server_client::{
    ClientInfo, HttpTransport, JellyfinClient, MediaServerClient, Result, Transport,
};
use std::sync::Arc;

/// Creates a fresh session client for each connection attempt.
pub trait ClientFactory: Send + Sync {
    fn create(&self, endpoint: &ServerEndpoint) -> Result<Arc<dyn MediaServerClient>>;
}

/// Factory for [`JellyfinClient`]s sharing one transport.
#[derive(Clone)]
pub struct HttpClientFactory {
    client_info: ClientInfo,
    transport: Arc<dyn Transport>,
}

impl HttpClientFactory {
    pub fn new(client_info: ClientInfo, transport: Arc<dyn Transport>) -> Self {
        Self {
            client_info,
            transport,
        }
    }

    /// Factory using an [`HttpTransport`] with default timeouts.
    pub fn with_default_transport(client_info: ClientInfo) -> Result<Self> {
        let transport = HttpTransport::new()?;
        Ok(Self::new(client_info, Arc::new(transport)))
    }

    pub fn client_info(&self) -> &ClientInfo {
        &self.client_info
    }
}

impl ClientFactory for HttpClientFactory {
    fn create(&self, endpoint: &ServerEndpoint) -> Result<Arc<dyn MediaServerClient>> {
        let client = JellyfinClient::new(
            endpoint.url().clone(),
            self.client_info.clone(),
            Arc::clone(&self.transport),
        )?;
        Ok(Arc::new(client))
    }
}
