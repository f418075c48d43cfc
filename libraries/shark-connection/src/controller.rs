//! Connect / sign-in / disconnect sequencing for a front end.

use crate::endpoint::ServerEndpoint;
use crate::factory::ClientFactory;
use crate::state::ConnectionState;
use serde::{Deserialize, Serialize};
use shark_core::{Library, ServerInfo, User, MINIMUM_SERVER_VERSION};
use shark_server_client::{ApiError, MediaServerClient, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Behavior switches for [`ConnectionController`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Probe the server's public info and refuse versions below the minimum
    #[serde(default = "default_verify_server_version")]
    pub verify_server_version: bool,
}

fn default_verify_server_version() -> bool {
    true
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            verify_server_version: default_verify_server_version(),
        }
    }
}

/// What a successful connect attempt produced.
struct Established {
    client: Arc<dyn MediaServerClient>,
    user: User,
    libraries: Vec<Library>,
}

/// Drives `Disconnected → Connecting → Authenticating → Connected` for the UI.
///
/// The controller owns the live client. Failures never propagate out of
/// `connect`: they become a user-facing message in [`error_message`] and a
/// return to `Disconnected`.
///
/// Both operations take `&mut self`, so one controller runs one attempt at a
/// time. If a `connect` future is dropped mid-flight the controller is left
/// in `Connecting`/`Authenticating`; the next `connect` or `disconnect`
/// resets it.
///
/// [`error_message`]: ConnectionController::error_message
pub struct ConnectionController<F> {
    factory: F,
    settings: ConnectionSettings,
    state: ConnectionState,
    state_tx: watch::Sender<ConnectionState>,
    error_message: Option<String>,
    server_info: Option<ServerInfo>,
    connected_user: Option<User>,
    libraries: Vec<Library>,
    client: Option<Arc<dyn MediaServerClient>>,
}

impl<F: ClientFactory> ConnectionController<F> {
    pub fn new(factory: F) -> Self {
        Self::with_settings(factory, ConnectionSettings::default())
    }

    pub fn with_settings(factory: F, settings: ConnectionSettings) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            factory,
            settings,
            state: ConnectionState::Disconnected,
            state_tx,
            error_message: None,
            server_info: None,
            connected_user: None,
            libraries: Vec::new(),
            client: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// Message describing the last failed attempt
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn server_info(&self) -> Option<&ServerInfo> {
        self.server_info.as_ref()
    }

    pub fn connected_user(&self) -> Option<&User> {
        self.connected_user.as_ref()
    }

    /// Libraries fetched when the connection was established
    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// The live client, while connected
    pub fn client(&self) -> Option<Arc<dyn MediaServerClient>> {
        self.client.clone()
    }

    /// Validate the address, create a client, sign in and load libraries.
    ///
    /// An invalid address is reported without any network call and without
    /// leaving `Disconnected`. Calling this while connected disconnects first.
    pub async fn connect(&mut self, server_url: &str, username: &str, password: &str) {
        if self.state != ConnectionState::Disconnected {
            debug!(state = %self.state, "Resetting before new connection attempt");
            self.disconnect().await;
        }
        self.error_message = None;

        let endpoint = match ServerEndpoint::parse(server_url) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!(input = %server_url, error = %e, "Rejected server address");
                self.fail(&e);
                return;
            }
        };

        self.transition(ConnectionState::Connecting);
        info!(server = %endpoint, username = %username, "Connecting");

        match self.establish(&endpoint, username, password).await {
            Ok(established) => {
                info!(
                    server = %endpoint,
                    user = %established.user.name,
                    libraries = established.libraries.len(),
                    "Connected"
                );
                self.client = Some(established.client);
                self.connected_user = Some(established.user);
                self.libraries = established.libraries;
                self.transition(ConnectionState::Connected);
            }
            Err(e) => {
                warn!(server = %endpoint, error = %e, "Connection attempt failed");
                self.fail(&e);
            }
        }
    }

    async fn establish(
        &mut self,
        endpoint: &ServerEndpoint,
        username: &str,
        password: &str,
    ) -> Result<Established> {
        let client = self.factory.create(endpoint)?;

        if self.settings.verify_server_version {
            let info = client.server_info().await?;
            if !info.is_supported() {
                return Err(ApiError::UnsupportedServerVersion {
                    version: info.version,
                    minimum: MINIMUM_SERVER_VERSION.to_string(),
                });
            }
            self.server_info = Some(info);
        }

        self.transition(ConnectionState::Authenticating);
        let user = client.authenticate(username, password).await?;

        // Listing libraries proves the session works end to end
        match client.get_libraries().await {
            Ok(libraries) => Ok(Established {
                client,
                user,
                libraries,
            }),
            Err(e) => {
                client.sign_out().await;
                Err(e)
            }
        }
    }

    /// Sign out and clear everything. Always ends in `Disconnected`.
    pub async fn disconnect(&mut self) {
        if let Some(client) = self.client.take() {
            client.sign_out().await;
        }

        self.connected_user = None;
        self.libraries.clear();
        self.server_info = None;
        self.error_message = None;
        self.transition(ConnectionState::Disconnected);
        info!("Disconnected");
    }

    fn fail(&mut self, error: &ApiError) {
        self.error_message = Some(error.to_string());
        self.client = None;
        self.connected_user = None;
        self.libraries.clear();
        self.server_info = None;
        self.transition(ConnectionState::Disconnected);
    }

    fn transition(&mut self, next: ConnectionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        if self.state != next {
            debug!(from = %self.state, to = %next, "Connection state changed");
        }
        self.state = next;
        self.state_tx.send_replace(next);
    }
}
