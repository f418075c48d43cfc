//! Jelly Shark Core
//!
//! Domain types shared by the server client, the connection controller and
//! any front end that renders them.
//!
//! Values in this crate are plain immutable data. They are built by the wire
//! adapter in `shark-server-client` and handed to callers as independent
//! copies; nothing here talks to the network.
//!
//! # Example
//!
//! ```rust
//! use shark_core::{MediaItem, MediaType, ServerInfo};
//!
//! let movie = MediaItem::new("movie-1", "Test Movie", MediaType::Movie)
//!     .with_run_time_ticks(72_000_000_000);
//! assert_eq!(movie.formatted_runtime().as_deref(), Some("2h 0m"));
//!
//! let server = ServerInfo::new("Home", "10.9.0", "server-1");
//! assert!(server.is_supported());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{
    compare_versions, CollectionType, ImageTags, ImageType, Library, MediaItem, MediaType,
    ServerInfo, User, UserData, MINIMUM_SERVER_VERSION, TICKS_PER_SECOND,
};
