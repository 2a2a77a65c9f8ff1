//! Board client configuration loaded with Figment
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. `projectboard.toml`, `projectboard.yaml`, `projectboard.json` in the config directory
//! 3. `PROJECTBOARD_*` environment variables

use crate::error::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, trace};

/// Base name of the configuration files
pub const CONFIG_FILE_STEM: &str = "projectboard";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PROJECTBOARD_";

/// Default project service endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Settings for talking to the project service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Project service base URL, e.g. `http://localhost:8080/api`
    pub base_url: String,
    /// Sent in the `x-access-token` header when set
    pub access_token: Option<String>,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Re-fetch the board after every confirmed move
    pub reconcile_after_move: bool,
    /// Actor recorded on activity log entries
    pub actor: Option<String>,
    pub user_agent: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            timeout_ms: 10_000,
            reconcile_after_move: false,
            actor: None,
            user_agent: format!("projectboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl BoardConfig {
    /// Load from the current directory and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(".")
    }

    /// Load from config files in `dir` and the environment
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self> {
        let config: Self = Self::figment(dir.as_ref()).extract()?;
        debug!(base_url = %config.base_url, reconcile = config.reconcile_after_move, "loaded board config");
        Ok(config)
    }

    fn figment(dir: &Path) -> Figment {
        let toml = dir.join(format!("{CONFIG_FILE_STEM}.toml"));
        let yaml = dir.join(format!("{CONFIG_FILE_STEM}.yaml"));
        let json = dir.join(format!("{CONFIG_FILE_STEM}.json"));
        trace!(dir = %dir.display(), "building board config figment");

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(toml))
            .merge(Yaml::file(yaml))
            .merge(Json::file(json))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_reconcile_after_move(mut self, reconcile: bool) -> Self {
        self.reconcile_after_move = reconcile;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        for key in [
            "PROJECTBOARD_BASE_URL",
            "PROJECTBOARD_ACCESS_TOKEN",
            "PROJECTBOARD_TIMEOUT_MS",
            "PROJECTBOARD_RECONCILE_AFTER_MOVE",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_files() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let config = BoardConfig::load_from(temp.path()).unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.user_agent.starts_with("projectboard/"));
    }

    #[test]
    #[serial]
    fn test_toml_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("projectboard.toml"),
            r#"
base_url = "https://boards.example.com/api"
access_token = "secret"
reconcile_after_move = true
"#,
        )
        .unwrap();

        let config = BoardConfig::load_from(temp.path()).unwrap();
        assert_eq!(config.base_url, "https://boards.example.com/api");
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert!(config.reconcile_after_move);
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    #[serial]
    fn test_json_overrides_yaml() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("projectboard.yaml"), "timeout_ms: 500\nactor: yaml\n").unwrap();
        fs::write(temp.path().join("projectboard.json"), r#"{"actor": "json"}"#).unwrap();

        let config = BoardConfig::load_from(temp.path()).unwrap();
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.actor.as_deref(), Some("json"));
    }

    #[test]
    #[serial]
    fn test_environment_overrides_files() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("projectboard.toml"),
            "base_url = \"https://file.example.com\"\ntimeout_ms = 2000\n",
        )
        .unwrap();
        std::env::set_var("PROJECTBOARD_BASE_URL", "https://env.example.com");

        let config = BoardConfig::load_from(temp.path());
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.base_url, "https://env.example.com");
        assert_eq!(config.timeout_ms, 2000);
    }

    #[test]
    #[serial]
    fn test_invalid_value_is_config_error() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("projectboard.toml"), "timeout_ms = \"soon\"\n").unwrap();

        let err = BoardConfig::load_from(temp.path()).unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }
}
