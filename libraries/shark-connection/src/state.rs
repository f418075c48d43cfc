/// Connection lifecycle states
use serde::{Deserialize, Serialize};

/// Where the controller is in the connect/sign-in sequence.
///
/// Forward moves go one step at a time
/// (`Disconnected → Connecting → Authenticating → Connected`); any state may
/// fall back to `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Authenticating,
    Connected,
}

impl ConnectionState {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Authenticating => "authenticating",
            Self::Connected => "connected",
        }
    }

    /// Whether moving from `self` to `next` is allowed
    #[must_use]
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (_, Self::Disconnected)
                | (Self::Disconnected, Self::Connecting)
                | (Self::Connecting, Self::Authenticating)
                | (Self::Authenticating, Self::Connected)
        )
    }

    /// True while a connect attempt is underway
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Connecting | Self::Authenticating)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
