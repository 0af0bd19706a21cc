// ABOUTME: Configuration parsing from TOML file with environment variable overrides
// ABOUTME: An empty remote API URL selects local-only storage
use crate::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the question API, e.g. "https://backend.example.com".
    /// Empty disables remote mode.
    #[serde(default)]
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file holding the local question slot
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_host")]
    pub host: String,
    #[serde(default = "default_admin_port")]
    pub port: u16,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: default_admin_host(),
            port: default_admin_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// IANA timezone used when rendering dates. Defaults to system local timezone.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Render years in the Buddhist era (Gregorian + 543)
    #[serde(default = "default_true")]
    pub buddhist_era: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            buddhist_era: true,
        }
    }
}

impl DisplayConfig {
    /// Parsed timezone. Falls back to UTC; `Config::load` rejects bad names up front.
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

fn default_timezone() -> String {
    // Always validate that the timezone is parseable by chrono-tz
    if let Ok(tz) = std::env::var("TZ") {
        if tz.parse::<chrono_tz::Tz>().is_ok() {
            return tz;
        }
    }
    #[cfg(unix)]
    {
        if let Ok(link) = std::fs::read_link("/etc/localtime") {
            if let Some(tz) = link.to_str() {
                // e.g. /usr/share/zoneinfo/Asia/Bangkok
                if let Some(pos) = tz.find("zoneinfo/") {
                    let detected = tz[pos + 9..].to_string();
                    if detected.parse::<chrono_tz::Tz>().is_ok() {
                        return detected;
                    }
                }
            }
        }
    }
    "UTC".to_string()
}

fn default_storage_path() -> String {
    paths::storage_file().to_string_lossy().to_string()
}

fn default_admin_host() -> String {
    "127.0.0.1".to_string()
}

fn default_admin_port() -> u16 {
    8090
}

fn default_true() -> bool {
    true
}

/// Expand tilde (~) to home directory in paths
/// Logs a warning if expansion fails and falls back to the original path
fn expand_tilde(path: &str) -> String {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(base_dirs) = directories::BaseDirs::new() {
            return base_dirs
                .home_dir()
                .join(stripped)
                .to_string_lossy()
                .to_string();
        } else {
            tracing::warn!(
                path = %path,
                "Failed to expand tilde in path: could not determine home directory"
            );
        }
    } else if path == "~" {
        if let Some(base_dirs) = directories::BaseDirs::new() {
            return base_dirs.home_dir().to_string_lossy().to_string();
        } else {
            tracing::warn!("Failed to expand tilde: could not determine home directory");
        }
    }
    path.to_string()
}

impl Config {
    /// Find the config file, checking multiple locations in order:
    /// 1. QA_CONFIG_PATH env var (if set)
    /// 2. ./config.toml (current directory - for development)
    /// 3. ~/.config/qa-admin/config.toml (XDG config dir)
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var("QA_CONFIG_PATH") {
            let path = PathBuf::from(&env_path);
            if path.exists() {
                return Some(path);
            }
        }

        let local_config = PathBuf::from("config.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        let xdg_config = paths::config_file();
        if xdg_config.exists() {
            return Some(xdg_config);
        }

        None
    }

    /// Load configuration from config.toml with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if let Some(config_path) = Self::find_config_file() {
            tracing::info!(
                path = %config_path.display(),
                "Loading configuration from file"
            );
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            tracing::info!("No config file found, using environment variables and defaults");
            Config::default()
        };

        config.apply_env_overrides()?;
        config.finalize()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("QA_API_URL") {
            self.remote.api_url = val;
        }
        if let Ok(val) = std::env::var("QA_STORAGE_PATH") {
            self.storage.path = val;
        }
        if let Ok(val) = std::env::var("QA_ADMIN_HOST") {
            self.admin.host = val;
        }
        if let Ok(val) = std::env::var("QA_ADMIN_PORT") {
            self.admin.port = val.parse().with_context(|| {
                format!("QA_ADMIN_PORT must be a valid port number, got: {}", val)
            })?;
        }
        if let Ok(val) = std::env::var("QA_TIMEZONE") {
            self.display.timezone = val;
        }
        if let Ok(val) = std::env::var("QA_BUDDHIST_ERA") {
            self.display.buddhist_era = val.parse().with_context(|| {
                format!("QA_BUDDHIST_ERA must be true or false, got: {}", val)
            })?;
        }
        Ok(())
    }

    /// Normalize paths and URLs, then validate
    pub fn finalize(&mut self) -> Result<()> {
        self.storage.path = expand_tilde(&self.storage.path);
        self.remote.api_url = self.remote.api_url.trim().trim_end_matches('/').to_string();

        if !self.remote.api_url.is_empty() {
            let url = url::Url::parse(&self.remote.api_url).with_context(|| {
                format!("remote.api_url is not a valid URL: {}", self.remote.api_url)
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                anyhow::bail!(
                    "remote.api_url must use http or https, got scheme '{}'",
                    url.scheme()
                );
            }
        }

        if self.storage.path.trim().is_empty() {
            anyhow::bail!("storage.path must not be empty");
        }

        if self.display.timezone.parse::<chrono_tz::Tz>().is_err() {
            anyhow::bail!(
                "Invalid timezone '{}'. Use IANA timezone names like 'Asia/Bangkok', 'Europe/London', 'UTC'",
                self.display.timezone
            );
        }

        Ok(())
    }

    /// True when a remote API URL is configured
    pub fn remote_enabled(&self) -> bool {
        !self.remote.api_url.is_empty()
    }

    /// Address the admin panel binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.admin.host, self.admin.port)
    }
}
