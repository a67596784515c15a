// rest-client/src/config.rs
use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_TIMEOUT: &str = "REST_CLIENT_TIMEOUT";
pub const ENV_CONNECT_TIMEOUT: &str = "REST_CLIENT_CONNECT_TIMEOUT";
pub const ENV_USER_AGENT: &str = "REST_CLIENT_USER_AGENT";

/// Options for the transport engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Redirects followed before giving up; 0 disables redirects
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_redirects() -> usize {
    3
}

fn default_user_agent() -> String {
    concat!("rest-client/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_tcp_nodelay() -> bool {
    true
}

fn default_pool_max_idle_per_host() -> usize {
    4
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            tcp_nodelay: default_tcp_nodelay(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
        }
    }
}

impl ClientConfig {
    /// Load `config.toml` from the user config directory, then apply
    /// environment overrides. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_dir()?.join("config.toml");

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `REST_CLIENT_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_TIMEOUT) {
            self.timeout_secs = parse_secs(ENV_TIMEOUT, &value)?;
        }

        if let Some(value) = lookup(ENV_CONNECT_TIMEOUT) {
            self.connect_timeout_secs = parse_secs(ENV_CONNECT_TIMEOUT, &value)?;
        }

        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            self.user_agent = user_agent;
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    fn config_dir() -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
        Ok(base_dirs.config_dir().join("rest-client"))
    }
}

fn parse_secs(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("{} must be a number of seconds, got '{}'", name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.connect_timeout(), Duration::from_secs(15));
        assert_eq!(config.max_redirects, 3);
        assert!(config.user_agent.starts_with("rest-client/"));
        assert!(config.tcp_nodelay);
        assert_eq!(config.pool_max_idle_per_host, 4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml_str("timeout_secs = 60\nmax_redirects = 0\n").unwrap();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_redirects, 0);
        assert_eq!(config.connect_timeout_secs, 15);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ClientConfig::from_toml_str("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ClientConfig::from_toml_str("timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "user_agent = \"my-app/2.0\"\n").unwrap();

        let config = ClientConfig::from_path(&path).unwrap();
        assert_eq!(config.user_agent, "my-app/2.0");

        assert!(ClientConfig::from_path(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_TIMEOUT, "5"),
            (ENV_CONNECT_TIMEOUT, " 2 "),
            (ENV_USER_AGENT, "agent/1"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config
            .apply_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 2);
        assert_eq!(config.user_agent, "agent/1");
    }

    #[test]
    fn test_invalid_override() {
        let mut config = ClientConfig::default();
        let result = config.apply_overrides(|name| {
            (name == ENV_TIMEOUT).then(|| "fifteen".to_string())
        });
        assert!(result.is_err());
        assert_eq!(config.timeout_secs, 15);
    }
}
