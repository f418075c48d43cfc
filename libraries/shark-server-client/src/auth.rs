//! Authentication and server discovery requests.

use crate::adapters::{decode, session_from_auth};
use crate::endpoints::endpoint_url;
use crate::error::{ApiError, Result};
use crate::request::{send, send_json};
use crate::transport::{Transport, WireRequest};
use crate::types::{AuthenticateByNameRequest, AuthenticationResultDto, ClientInfo, PublicSystemInfoDto};
use shark_core::{ServerInfo, User};
use tracing::{debug, info, warn};
use url::Url;

/// Authentication client for a media server.
pub struct AuthClient<'a> {
    transport: &'a dyn Transport,
    server_url: &'a Url,
    client_info: &'a ClientInfo,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(
        transport: &'a dyn Transport,
        server_url: &'a Url,
        client_info: &'a ClientInfo,
    ) -> Self {
        Self {
            transport,
            server_url,
            client_info,
        }
    }

    /// Fetch the server's public information. Does not require authentication.
    pub async fn server_info(&self) -> Result<ServerInfo> {
        let url = endpoint_url(self.server_url, &["System", "Info", "Public"]);
        debug!(url = %url, "Fetching public server info");

        let request = WireRequest::get(url)
            .header("Authorization", self.client_info.authorization_header(None));
        let dto: PublicSystemInfoDto = send_json(self.transport, request, "server info").await?;
        let info = ServerInfo::from(dto);

        info!(
            name = %info.server_name,
            version = %info.version,
            supported = info.is_supported(),
            "Fetched server info"
        );

        Ok(info)
    }

    /// Exchange username and password for a session token.
    ///
    /// A response without a user or token is treated as rejected credentials.
    pub async fn authenticate_by_name(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(String, User)> {
        let url = endpoint_url(self.server_url, &["Users", "AuthenticateByName"]);
        debug!(url = %url, username = %username, "Attempting login");

        let body = serde_json::to_value(AuthenticateByNameRequest {
            username: username.to_string(),
            pw: password.to_string(),
        })
        .map_err(|e| ApiError::Generic(format!("Failed to encode login request: {}", e)))?;

        let request = WireRequest::post(url)
            .header("Authorization", self.client_info.authorization_header(None))
            .json(body);

        let response = match send(self.transport, request).await {
            Ok(response) => response,
            Err(ApiError::Unauthorized) => {
                warn!(username = %username, "Login failed: invalid credentials");
                return Err(ApiError::Unauthorized);
            }
            Err(e) => return Err(e),
        };

        let result: AuthenticationResultDto = decode(&response.body, "login response")?;
        let Some((token, user)) = session_from_auth(result) else {
            warn!(username = %username, "Login response carried no user session");
            return Err(ApiError::Unauthorized);
        };

        info!(username = %user.name, user_id = %user.id, "Login successful");
        Ok((token, user))
    }

    /// Invalidate a session token on the server.
    pub async fn logout(&self, access_token: &str) -> Result<()> {
        let url = endpoint_url(self.server_url, &["Sessions", "Logout"]);
        debug!(url = %url, "Invalidating remote session");

        let request = WireRequest::post(url).header(
            "Authorization",
            self.client_info.authorization_header(Some(access_token)),
        );
        send(self.transport, request).await?;

        Ok(())
    }
}
