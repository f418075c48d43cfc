//! Session client for a Jellyfin-compatible media server.

use crate::auth::AuthClient;
use crate::endpoints::image_url;
use crate::error::{ApiError, Result};
use crate::library::LibraryClient;
use crate::transport::{HttpTransport, Transport};
use crate::types::ClientInfo;
use async_trait::async_trait;
use shark_core::{ImageType, Library, MediaItem, ServerInfo, User};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Operations the rest of the application needs from a media server.
///
/// Every error is already classified into [`ApiError`]. Calls that need a
/// session fail with [`ApiError::NotAuthenticated`] until `authenticate`
/// has succeeded. Callers sequence calls themselves: a data call issued
/// concurrently with `authenticate` sees whichever session was current.
#[async_trait]
pub trait MediaServerClient: Send + Sync {
    /// Base URL of the server
    fn server_url(&self) -> &Url;

    /// The signed-in user, if any
    async fn current_user(&self) -> Option<User>;

    /// Whether a session is active
    async fn is_authenticated(&self) -> bool;

    /// Public server information. Does not require a session.
    async fn server_info(&self) -> Result<ServerInfo>;

    /// Sign in. On success the session is replaced; on failure it is left as it was.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User>;

    /// Sign out. Always clears the local session; remote failures are ignored.
    async fn sign_out(&self);

    /// Libraries visible to the signed-in user
    async fn get_libraries(&self) -> Result<Vec<Library>>;

    /// Items of a library, recursive and sorted by name
    async fn get_library_items(
        &self,
        library_id: &str,
        limit: Option<u32>,
        start_index: Option<u32>,
    ) -> Result<Vec<MediaItem>>;

    /// A single item
    async fn get_media_item(&self, item_id: &str) -> Result<MediaItem>;

    /// Image URL for an item; pure, needs no session
    fn get_image_url(
        &self,
        item_id: &str,
        image_type: ImageType,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Url;

    /// Partially watched items
    async fn get_resume_items(&self, limit: Option<u32>) -> Result<Vec<MediaItem>>;

    /// Recently added items
    async fn get_latest_items(
        &self,
        library_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<MediaItem>>;
}

/// Token and user of a signed-in session. Always present together.
#[derive(Debug, Clone)]
struct Session {
    access_token: String,
    user: User,
}

/// [`MediaServerClient`] speaking the Jellyfin REST API.
///
/// # Example
///
/// ```ignore
/// use shark_server_client::{ClientInfo, JellyfinClient, MediaServerClient};
///
/// let client = JellyfinClient::with_http(
///     "https://demo.jellyfin.org/stable",
///     ClientInfo::new("Laptop", "device-id"),
/// )?;
///
/// let user = client.authenticate("demo", "").await?;
/// println!("Signed in as {}", user.name);
///
/// for library in client.get_libraries().await? {
///     println!("{} ({})", library.name, library.collection_type);
/// }
/// ```
pub struct JellyfinClient {
    transport: Arc<dyn Transport>,
    server_url: Url,
    client_info: ClientInfo,
    session: RwLock<Option<Session>>,
}

impl JellyfinClient {
    /// Create a client for the given server using the given transport.
    ///
    /// The URL must be http(s) with a host.
    pub fn new(
        server_url: Url,
        client_info: ClientInfo,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        if !matches!(server_url.scheme(), "http" | "https") {
            return Err(ApiError::invalid_endpoint(format!(
                "unsupported scheme '{}'",
                server_url.scheme()
            )));
        }
        if server_url.host_str().map_or(true, str::is_empty) {
            return Err(ApiError::invalid_endpoint("missing host"));
        }

        Ok(Self {
            transport,
            server_url,
            client_info,
            session: RwLock::new(None),
        })
    }

    /// Create a client backed by a default [`HttpTransport`].
    pub fn with_http(server_url: &str, client_info: ClientInfo) -> Result<Self> {
        let url = Url::parse(server_url.trim())
            .map_err(|e| ApiError::invalid_endpoint(format!("{}: {}", server_url, e)))?;
        let transport = HttpTransport::new().map_err(ApiError::from)?;
        Self::new(url, client_info, Arc::new(transport))
    }

    fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self.transport.as_ref(), &self.server_url, &self.client_info)
    }

    /// Snapshot of the current session, or `NotAuthenticated`.
    async fn session(&self) -> Result<Session> {
        self.session
            .read()
            .await
            .clone()
            .ok_or(ApiError::NotAuthenticated)
    }
}

/// Library client bound to a session snapshot.
struct SessionScope<'a> {
    client: &'a JellyfinClient,
    authorization: String,
    user_id: String,
}

impl<'a> SessionScope<'a> {
    async fn open(client: &'a JellyfinClient) -> Result<Self> {
        let session = client.session().await?;
        Ok(Self {
            client,
            authorization: client
                .client_info
                .authorization_header(Some(&session.access_token)),
            user_id: session.user.id,
        })
    }

    fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(
            self.client.transport.as_ref(),
            &self.client.server_url,
            &self.authorization,
            &self.user_id,
        )
    }
}

#[async_trait]
impl MediaServerClient for JellyfinClient {
    fn server_url(&self) -> &Url {
        &self.server_url
    }

    async fn current_user(&self) -> Option<User> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.user.clone())
    }

    async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    async fn server_info(&self) -> Result<ServerInfo> {
        self.auth().server_info().await
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let (access_token, user) = self.auth().authenticate_by_name(username, password).await?;

        *self.session.write().await = Some(Session {
            access_token,
            user: user.clone(),
        });

        Ok(user)
    }

    async fn sign_out(&self) {
        let Some(session) = self.session.write().await.take() else {
            debug!("Sign out requested without a session");
            return;
        };

        if let Err(e) = self.auth().logout(&session.access_token).await {
            warn!(error = %e, "Remote sign out failed, local session cleared anyway");
        }

        info!(username = %session.user.name, "Signed out");
    }

    async fn get_libraries(&self) -> Result<Vec<Library>> {
        let scope = SessionScope::open(self).await?;
        scope.library().get_libraries().await
    }

    async fn get_library_items(
        &self,
        library_id: &str,
        limit: Option<u32>,
        start_index: Option<u32>,
    ) -> Result<Vec<MediaItem>> {
        let scope = SessionScope::open(self).await?;
        scope
            .library()
            .get_library_items(library_id, limit, start_index)
            .await
    }

    async fn get_media_item(&self, item_id: &str) -> Result<MediaItem> {
        let scope = SessionScope::open(self).await?;
        scope.library().get_media_item(item_id).await
    }

    fn get_image_url(
        &self,
        item_id: &str,
        image_type: ImageType,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Url {
        image_url(&self.server_url, item_id, image_type, max_width, max_height)
    }

    async fn get_resume_items(&self, limit: Option<u32>) -> Result<Vec<MediaItem>> {
        let scope = SessionScope::open(self).await?;
        scope.library().get_resume_items(limit).await
    }

    async fn get_latest_items(
        &self,
        library_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<MediaItem>> {
        let scope = SessionScope::open(self).await?;
        scope.library().get_latest_items(library_id, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{TransportError, TransportErrorKind, WireRequest, WireResponse};
    use std::sync::Mutex;

    /// Replies with canned responses in order and records requests.
    struct ScriptedTransport {
        replies: Mutex<Vec<std::result::Result<WireResponse, TransportError>>>,
        requests: Mutex<Vec<WireRequest>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<std::result::Result<WireResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<WireRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(
            &self,
            request: WireRequest,
        ) -> std::result::Result<WireResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(WireResponse::new(500, "no reply scripted")))
        }
    }

    fn json(status: u16, value: serde_json::Value) -> std::result::Result<WireResponse, TransportError> {
        Ok(WireResponse::new(status, value.to_string()))
    }

    fn login_ok() -> std::result::Result<WireResponse, TransportError> {
        json(
            200,
            serde_json::json!({
                "User": { "Id": "user-1", "Name": "demo" },
                "AccessToken": "token-1"
            }),
        )
    }

    fn client(transport: Arc<ScriptedTransport>) -> JellyfinClient {
        JellyfinClient::new(
            Url::parse("https://media.example.com").unwrap(),
            ClientInfo::new("Test Device", "device-1"),
            transport,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_http_urls() {
        let transport = ScriptedTransport::new(vec![]);
        let result = JellyfinClient::new(
            Url::parse("ftp://example.com").unwrap(),
            ClientInfo::new("d", "id"),
            transport,
        );
        assert!(matches!(result, Err(ApiError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_with_http_rejects_garbage() {
        let result = JellyfinClient::with_http("not a url", ClientInfo::new("d", "id"));
        assert!(matches!(result, Err(ApiError::InvalidEndpoint(_))));
    }

    #[tokio::test]
    async fn test_authenticate_stores_session() {
        let transport = ScriptedTransport::new(vec![login_ok()]);
        let client = client(transport.clone());

        let user = client.authenticate("demo", "secret").await.unwrap();

        assert_eq!(user.id, "user-1");
        assert!(client.is_authenticated().await);
        assert_eq!(client.current_user().await, Some(user));

        let requests = transport.requests();
        let body = requests[0].body.clone().unwrap();
        assert_eq!(body["Username"], "demo");
        assert_eq!(body["Pw"], "secret");
    }

    #[tokio::test]
    async fn test_failed_authenticate_keeps_previous_session() {
        let transport = ScriptedTransport::new(vec![
            login_ok(),
            json(401, serde_json::json!({})),
            Err(TransportError::new(TransportErrorKind::Timeout, "slow")),
        ]);
        let client = client(transport);

        client.authenticate("demo", "secret").await.unwrap();

        assert_eq!(
            client.authenticate("demo", "wrong").await,
            Err(ApiError::Unauthorized)
        );
        assert!(matches!(
            client.authenticate("demo", "secret").await,
            Err(ApiError::Network(_))
        ));

        let user = client.current_user().await.unwrap();
        assert_eq!(user.id, "user-1");
    }

    #[tokio::test]
    async fn test_authenticated_calls_send_token() {
        let transport = ScriptedTransport::new(vec![
            login_ok(),
            json(200, serde_json::json!({ "Items": [] })),
        ]);
        let client = client(transport.clone());
        client.authenticate("demo", "secret").await.unwrap();

        let libraries = client.get_libraries().await.unwrap();
        assert!(libraries.is_empty());

        let requests = transport.requests();
        assert_eq!(requests[1].url.path(), "/Users/user-1/Views");
        let auth = requests[1].header_value("Authorization").unwrap();
        assert!(auth.contains("Token=\"token-1\""));
    }

    #[tokio::test]
    async fn test_sign_out_swallows_remote_failure() {
        let transport = ScriptedTransport::new(vec![
            login_ok(),
            Err(TransportError::new(TransportErrorKind::Connect, "refused")),
        ]);
        let client = client(transport.clone());
        client.authenticate("demo", "secret").await.unwrap();

        client.sign_out().await;

        assert!(!client.is_authenticated().await);
        assert!(client.current_user().await.is_none());
        assert_eq!(
            client.get_libraries().await,
            Err(ApiError::NotAuthenticated)
        );
    }

    #[tokio::test]
    async fn test_sign_out_without_session_sends_nothing() {
        let transport = ScriptedTransport::new(vec![]);
        let client = client(transport.clone());

        client.sign_out().await;
        client.sign_out().await;

        assert!(transport.requests().is_empty());
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_data_calls_require_session() {
        let transport = ScriptedTransport::new(vec![]);
        let client = client(transport.clone());

        assert_eq!(client.get_libraries().await, Err(ApiError::NotAuthenticated));
        assert_eq!(
            client.get_library_items("lib", None, None).await,
            Err(ApiError::NotAuthenticated)
        );
        assert_eq!(client.get_media_item("x").await, Err(ApiError::NotAuthenticated));
        assert_eq!(client.get_resume_items(None).await, Err(ApiError::NotAuthenticated));
        assert_eq!(
            client.get_latest_items(None, None).await,
            Err(ApiError::NotAuthenticated)
        );
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_image_url_needs_no_session() {
        let client = client(ScriptedTransport::new(vec![]));
        let url = client.get_image_url("item-1", ImageType::Thumb, None, Some(200));
        assert_eq!(
            url.as_str(),
            "https://media.example.com/Items/item-1/Images/Thumb?maxHeight=200"
        );
    }
}
