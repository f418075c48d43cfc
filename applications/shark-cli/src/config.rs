/// Command-line client configuration
use serde::{Deserialize, Serialize};
use shark_connection::ConnectionSettings;
use shark_server_client::ClientInfo;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "jellyshark.toml";

/// Prefix of environment variable overrides (`SHARK_SERVER__URL`, ...)
pub const ENV_PREFIX: &str = "SHARK";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} already exists")]
    AlreadyExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub connection: ConnectionSettings,
}

/// Where to connect and as whom. The password is never read from a file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientSettings {
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Stable device identifier; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            device_id: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Identity sent to the server, with a fresh device id if none is configured
    pub fn client_info(&self) -> ClientInfo {
        let device_id = self
            .device_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        ClientInfo::new(self.device_name.clone(), device_id)
    }
}

impl AppConfig {
    /// Load from `path` (or `jellyshark.toml` if present) and `SHARK_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Double underscore separates sections so field names keep theirs
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Write a starter file with a generated device id
    pub fn write_default(path: &Path, overwrite: bool) -> Result<Self> {
        if path.exists() && !overwrite {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        let mut config = Self::default();
        config.client.device_id = Some(uuid::Uuid::new_v4().to_string());

        let contents = toml::to_string_pretty(&config)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(config)
    }
}

// Default values
fn default_device_name() -> String {
    "Jelly Shark CLI".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("jellyshark.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.server.url.is_none());
        assert_eq!(config.client.device_name, "Jelly Shark CLI");
        assert_eq!(config.client.timeout(), Duration::from_secs(30));
        assert_eq!(config.client.connect_timeout(), Duration::from_secs(10));
        assert!(config.connection.verify_server_version);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[server]
url = "http://192.168.1.20:8096"
username = "alice"

[client]
device_name = "Living Room"
device_id = "device-42"
timeout_secs = 5

[connection]
verify_server_version = false
"#,
        );

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.url.as_deref(), Some("http://192.168.1.20:8096"));
        assert_eq!(config.server.username.as_deref(), Some("alice"));
        assert_eq!(config.client.device_name, "Living Room");
        assert_eq!(config.client.timeout_secs, 5);
        assert_eq!(config.client.connect_timeout_secs, 10);
        assert!(!config.connection.verify_server_version);

        let info = config.client.client_info();
        assert_eq!(info.device_id, "device-42");
        assert_eq!(info.device_name, "Living Room");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[server]\nurl = \"demo.jellyfin.org\"\n");

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.url.as_deref(), Some("demo.jellyfin.org"));
        assert_eq!(config.client.device_name, "Jelly Shark CLI");
        assert!(config.connection.verify_server_version);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_generates_device_id_when_missing() {
        let settings = ClientSettings {
            device_id: Some("  ".to_string()),
            ..ClientSettings::default()
        };
        let first = settings.client_info();
        let second = settings.client_info();

        assert!(uuid::Uuid::parse_str(&first.device_id).is_ok());
        assert_ne!(first.device_id, second.device_id);
    }

    #[test]
    fn test_write_default_round_trips_through_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jellyshark.toml");

        let written = AppConfig::write_default(&path, false).unwrap();
        let loaded = AppConfig::load(Some(&path)).unwrap();

        assert!(written.client.device_id.is_some());
        assert_eq!(loaded.client.device_id, written.client.device_id);
        assert_eq!(loaded.client.timeout_secs, 30);
    }

    #[test]
    fn test_write_default_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        assert!(matches!(
            AppConfig::write_default(&path, false),
            Err(ConfigError::AlreadyExists(_))
        ));
        assert!(AppConfig::write_default(&path, true).is_ok());
    }
}
