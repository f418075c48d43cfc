mod library;
mod media_item;
mod server_info;
mod user;

pub use library::{CollectionType, Library};
pub use media_item::{ImageTags, ImageType, MediaItem, MediaType, UserData, TICKS_PER_SECOND};
pub use server_info::{compare_versions, ServerInfo, MINIMUM_SERVER_VERSION};
pub use user::User;
