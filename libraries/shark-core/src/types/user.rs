/// User domain type
use serde::{Deserialize, Serialize};

/// An authenticated account on a media server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier, unique per server (empty when the server omitted it)
    pub id: String,

    /// Display name
    pub name: String,

    /// Server this account belongs to
    pub server_id: Option<String>,

    /// Whether the account has administrator rights
    pub is_administrator: bool,

    /// Tag of the profile image, if one is set
    pub primary_image_tag: Option<String>,
}

impl User {
    /// Create a user with only the required fields set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            server_id: None,
            is_administrator: false,
            primary_image_tag: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("123", "Test User");

        assert_eq!(user.id, "123");
        assert_eq!(user.name, "Test User");
        assert!(user.server_id.is_none());
        assert!(!user.is_administrator);
        assert!(user.primary_image_tag.is_none());
    }
}
