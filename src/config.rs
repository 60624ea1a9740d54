use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// File looked up in the working directory when `--config` is not given
pub const LOCAL_CONFIG_FILE: &str = "estimator.toml";
/// Environment override prefix, e.g. `ESTIMATOR__API__TOKEN`
pub const ENV_PREFIX: &str = "ESTIMATOR";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend estimate API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request; refreshing it is the backend's job
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Per-user config location, `<config dir>/sales-estimator/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sales-estimator").join("config.toml"))
}

/// Pick the config file: an explicit path, else `estimator.toml` in the
/// working directory, else the per-user file. Only an explicit path is
/// required to exist.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<(PathBuf, bool)> {
    if let Some(path) = explicit {
        return Some((path.to_path_buf(), true));
    }
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some((local, false));
    }
    user_config_path().map(|path| (path, false))
}

/// Load configuration: defaults, then the config file, then `ESTIMATOR__*`
/// environment variables.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let mut builder = config::Config::builder();

    if let Some((path, required)) = resolve_config_path(explicit) {
        builder = builder.add_source(config::File::from(path).required(required));
    }

    let config = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    let base_url = cfg.api.base_url.trim();
    if base_url.is_empty() {
        anyhow::bail!("api.base_url cannot be empty");
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        anyhow::bail!("api.base_url must start with http:// or https://, got '{}'", base_url);
    }

    if cfg.api.timeout_seconds == 0 {
        anyhow::bail!("api.timeout_seconds must be greater than zero");
    }

    if let Some(token) = &cfg.api.token {
        if token.trim().is_empty() {
            anyhow::bail!("api.token is set but empty; remove it or provide a token");
        }
    }

    validate_log_level(&cfg.logging.level)?;

    match cfg.logging.format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("logging.format must be 'text' or 'json', got '{}'", other),
    }

    Ok(())
}

/// Accepts a bare level (`info`) or `EnvFilter` directives whose levels are
/// all known (`info,sales_estimator=debug`).
fn validate_log_level(level: &str) -> anyhow::Result<()> {
    if level.trim().is_empty() {
        anyhow::bail!("logging.level cannot be empty");
    }

    for directive in level.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let level_part = directive.rsplit('=').next().unwrap_or(directive);
        if LevelFilter::from_str(level_part).is_err() {
            anyhow::bail!(
                "logging.level has unknown level '{}' (use trace, debug, info, warn, error or off)",
                level_part
            );
        }
    }

    EnvFilter::try_new(level)
        .map_err(|e| anyhow::anyhow!("logging.level '{}' is invalid: {}", level, e))?;

    Ok(())
}
