//! Jelly Shark Connection
//!
//! Connection state controller sitting between a front end and the session
//! client: normalizes the server address, sequences sign-in, and turns every
//! failure into a stored message plus a return to `Disconnected`.
//!
//! # Example
//!
//! ```ignore
//! use shark_connection::{ConnectionController, ConnectionState, HttpClientFactory};
//! use shark_server_client::ClientInfo;
//!
//! let factory = HttpClientFactory::with_default_transport(ClientInfo::new("Laptop", "id"))?;
//! let mut controller = ConnectionController::new(factory);
//!
//! controller.connect("demo.jellyfin.org/stable", "demo", "").await;
//! match controller.state() {
//!     ConnectionState::Connected => println!("{} libraries", controller.libraries().len()),
//!     _ => println!("{}", controller.error_message().unwrap_or_default()),
//! }
//! ```

mod controller;
mod endpoint;
mod factory;
mod state;

pub use controller::{ConnectionController, ConnectionSettings};
pub use endpoint::{ServerEndpoint, DEFAULT_SCHEME};
pub use factory::{ClientFactory, HttpClientFactory};
pub use state::ConnectionState;
