/// Server identity and version support
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Oldest server version this client talks to
pub const MINIMUM_SERVER_VERSION: &str = "10.8.0";

/// Public information about a media server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Display name of the server
    pub server_name: String,

    /// Version string, e.g. "10.9.11"
    pub version: String,

    /// Server identifier
    pub id: String,

    /// Operating system the server runs on
    pub operating_system: Option<String>,

    /// Whether the first-run setup has been completed
    pub startup_wizard_completed: Option<bool>,
}

impl ServerInfo {
    /// Create server info with only the required fields set
    pub fn new(
        server_name: impl Into<String>,
        version: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            version: version.into(),
            id: id.into(),
            operating_system: None,
            startup_wizard_completed: None,
        }
    }

    /// Whether the version is at least `MINIMUM_SERVER_VERSION`
    pub fn is_supported(&self) -> bool {
        compare_versions(&self.version, MINIMUM_SERVER_VERSION) != Ordering::Less
    }
}

/// Compare dotted numeric versions component by component.
///
/// Missing trailing components count as zero, so "10.8" equals "10.8.0".
/// Each component contributes its leading digits only ("0-rc1" reads as 0).
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = version_components(left);
    let right = version_components(right);
    let len = left.len().max(right.len());

    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn version_components(version: &str) -> Vec<u64> {
    version
        .trim()
        .split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}
