use crate::error::{Result, XrError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// xr-loopback user settings
///
/// The settings file lives at ~/.xr-loopback/config.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for running-config backups
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    /// Delete loopbacks whose only sub-command was a description on rollback
    #[serde(default = "default_delete_empty")]
    pub delete_empty_loopbacks: bool,

    /// `commit confirmed` timer in seconds (0 = plain commit)
    #[serde(default)]
    pub commit_confirmed_secs: u32,

    /// SSH port of the device
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,

    /// SSH connect timeout
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Diff output cap
    #[serde(default = "default_diff_max_lines")]
    pub diff_max_lines: usize,

    /// Ask before applying changes to the device
    #[serde(default)]
    pub confirm_before_apply: bool,
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("backups")
}

fn default_delete_empty() -> bool {
    true
}

fn default_ssh_port() -> u16 {
    22
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_diff_max_lines() -> usize {
    1200
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backup_dir: default_backup_dir(),
            delete_empty_loopbacks: default_delete_empty(),
            commit_confirmed_secs: 0,
            ssh_port: default_ssh_port(),
            connect_timeout_secs: default_connect_timeout(),
            diff_max_lines: default_diff_max_lines(),
            confirm_before_apply: false,
        }
    }
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".xr-loopback")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load settings (defaults when the file does not exist)
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| XrError::Config(e.to_string()))
    }
}

/// Connection details for one device
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub host: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub connect_timeout_secs: u64,
}

impl std::fmt::Debug for DeviceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceProfile")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"***")
            .field("port", &self.port)
            .finish()
    }
}

impl DeviceProfile {
    /// Resolve credentials from CLI overrides, then `XR_HOST`/`XR_USER`/`XR_PASS`.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env(
        host: Option<&str>,
        user: Option<&str>,
        password: Option<&str>,
        config: &Config,
    ) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::resolve(host, user, password, config, |key| std::env::var(key).ok())
    }

    fn resolve(
        host: Option<&str>,
        user: Option<&str>,
        password: Option<&str>,
        config: &Config,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let pick = |cli: Option<&str>, key: &str| {
            cli.map(str::to_string)
                .or_else(|| env(key))
                .filter(|value| !value.is_empty())
        };

        let host = pick(host, "XR_HOST");
        let username = pick(user, "XR_USER");
        let password = pick(password, "XR_PASS");

        match (host, username, password) {
            (Some(host), Some(username), Some(password)) => Ok(Self {
                host,
                username,
                password,
                port: config.ssh_port,
                connect_timeout_secs: config.connect_timeout_secs,
            }),
            (host, username, password) => {
                let missing: Vec<&str> = [
                    ("XR_HOST", host.is_none()),
                    ("XR_USER", username.is_none()),
                    ("XR_PASS", password.is_none()),
                ]
                .iter()
                .filter(|(_, missing)| *missing)
                .map(|(key, _)| *key)
                .collect();

                Err(XrError::Config(format!(
                    "Missing credentials/env: {}. Use env or --host/--user/--password.",
                    missing.join(", ")
                )))
            }
        }
    }
}
