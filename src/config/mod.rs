//! Configuration management

use serde::Deserialize;
#[cfg(feature = "server")]
use std::sync::OnceLock;
use std::time::Duration;

/// Environment prefix for overrides (`VOYAGE_ADMIN_API_BASE_URL`, ...)
pub const ENV_PREFIX: &str = "VOYAGE_ADMIN";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Base URL of the booking backend. Empty means same origin as the page.
    #[serde(default)]
    pub api_base_url: String,

    /// Upper bound for a whole sign-in attempt
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,

    /// Per-request bound for every HTTP call (login and collaborators)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_login_timeout_secs() -> u64 {
    15
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            login_timeout_secs: default_login_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Reject base URLs that are neither empty nor absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.is_empty() {
            return Ok(());
        }
        match url::Url::parse(&self.api_base_url) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => Ok(()),
            Ok(u) => Err(format!("unsupported scheme '{}' in api_base_url", u.scheme())),
            Err(e) => Err(format!("invalid api_base_url '{}': {}", self.api_base_url, e)),
        }
    }
}

/// Configuration the UI runs with.
///
/// The browser build bakes `VOYAGE_ADMIN_API_BASE_URL` in at compile time.
/// Native builds load the full layered configuration once per process; every
/// later call (one per server-rendered request) gets the cached copy.
pub fn client_config() -> AppConfig {
    #[cfg(feature = "server")]
    {
        static LOADED: OnceLock<AppConfig> = OnceLock::new();
        load_once(&LOADED, load_config)
    }

    #[cfg(not(feature = "server"))]
    {
        compiled_config()
    }
}

/// Defaults plus whatever base URL was set when the crate was built
fn compiled_config() -> AppConfig {
    let mut config = AppConfig::default();
    if let Some(base) = option_env!("VOYAGE_ADMIN_API_BASE_URL") {
        config.api_base_url = base.to_string();
    }
    config
}

#[cfg(feature = "server")]
fn load_once<F>(cell: &OnceLock<AppConfig>, load: F) -> AppConfig
where
    F: FnOnce() -> anyhow::Result<AppConfig>,
{
    cell.get_or_init(|| match load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Falling back to default configuration: {:#}", e);
            compiled_config()
        }
    })
    .clone()
}

/// Directory holding `config.{toml,json,yaml}`.
#[cfg(feature = "server")]
pub fn get_config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("VOYAGE_ADMIN_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }
    dirs::config_dir()
        .map(|dir| dir.join("voyage-admin"))
        .unwrap_or_else(|| std::path::PathBuf::from("."))
}

#[cfg(feature = "server")]
pub fn load_config() -> anyhow::Result<AppConfig> {
    let config_dir = get_config_dir();

    let config = ::config::Config::builder()
        // Start with defaults
        .set_default("api_base_url", "")?
        .set_default("login_timeout_secs", default_login_timeout_secs())?
        .set_default("request_timeout_secs", default_request_timeout_secs())?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy())
                .required(false),
        )
        // Override with environment variables (VOYAGE_ADMIN_API_BASE_URL, etc.)
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = config.try_deserialize()?;
    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}
