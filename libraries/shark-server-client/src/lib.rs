//! Jelly Shark Server Client
//!
//! Session client for Jellyfin-compatible media servers.
//!
//! # Features
//!
//! - **Session**: sign in with username/password, sign out, session state
//! - **Browsing**: libraries, library items, single items, resume and latest rows
//! - **Images**: deterministic image URLs with optional server-side resizing
//! - **Wire adapter**: tolerant conversion of server payloads into `shark-core` types
//! - **Errors**: every failure classified into one [`ApiError`] taxonomy
//!
//! # Example
//!
//! ```ignore
//! use shark_server_client::{ClientInfo, JellyfinClient, MediaServerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JellyfinClient::with_http(
//!         "https://demo.jellyfin.org/stable",
//!         ClientInfo::new("Laptop", "3f1c..."),
//!     )?;
//!
//!     let info = client.server_info().await?;
//!     println!("Connected to {} v{}", info.server_name, info.version);
//!
//!     let user = client.authenticate("demo", "").await?;
//!     println!("Signed in as {}", user.name);
//!
//!     for library in client.get_libraries().await? {
//!         let items = client.get_library_items(&library.id, Some(20), None).await?;
//!         println!("{}: {} items", library.name, items.len());
//!     }
//!
//!     client.sign_out().await;
//!     Ok(())
//! }
//! ```

mod adapters;
mod auth;
mod client;
mod endpoints;
mod error;
mod library;
mod request;
mod transport;
mod types;

// Re-export main types
pub use client::{JellyfinClient, MediaServerClient};
pub use endpoints::image_url;
pub use error::{ApiError, Result};
pub use transport::{
    HttpTransport, Transport, TransportError, TransportErrorKind, WireRequest, WireResponse,
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT,
};
pub use types::ClientInfo;

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use library::LibraryClient;

// Domain types returned by the client
pub use shark_core::{
    CollectionType, ImageTags, ImageType, Library, MediaItem, MediaType, ServerInfo, User,
    UserData,
};
