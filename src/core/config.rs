//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.hookchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HookchatConfig {
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub title: Option<String>,
    pub status: Option<String>,
    pub greeting: Option<String>,
    pub placeholder: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "AI Assistant";
pub const DEFAULT_STATUS: &str = "Online";
pub const DEFAULT_GREETING: &str = "👋 Hello! I'm your AI assistant. How can I help you today?";
pub const DEFAULT_PLACEHOLDER: &str = "Type a message...";

pub const ENV_WEBHOOK_URL: &str = "HOOKCHAT_WEBHOOK_URL";
pub const ENV_TIMEOUT_SECS: &str = "HOOKCHAT_TIMEOUT_SECS";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub webhook_url: String,
    /// Client-side request timeout. `None` leaves it to the HTTP stack.
    pub timeout: Option<Duration>,
    pub title: String,
    pub status: String,
    pub greeting: String,
    pub placeholder: String,
}

/// Values supplied on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub webhook_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No webhook URL from CLI, env, or config file.
    MissingWebhookUrl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingWebhookUrl => write!(
                f,
                "no webhook URL configured (use --webhook-url, {ENV_WEBHOOK_URL}, or [webhook] url in the config file)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.hookchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hookchat").join("config.toml"))
}

/// Load config from `~/.hookchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HookchatConfig::default()`.
pub fn load_config() -> Result<HookchatConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path, true),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(HookchatConfig::default())
        }
    }
}

/// Load config from an explicit path. A missing file yields defaults; when
/// `generate_if_missing` is set, a commented template is written there.
pub fn load_config_from(path: &Path, generate_if_missing: bool) -> Result<HookchatConfig, ConfigError> {
    if !path.exists() {
        if generate_if_missing {
            info!("No config file found, generating default at {}", path.display());
            generate_default_config(path);
        } else {
            warn!("Config file {} not found, using defaults", path.display());
        }
        return Ok(HookchatConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HookchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# hookchat configuration
# All settings are optional except the webhook URL, which may also come from
# the HOOKCHAT_WEBHOOK_URL env var or the --webhook-url flag.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [webhook]
# url = "https://automation.example.com/webhook/chat"
# timeout_secs = 30                   # Or set HOOKCHAT_TIMEOUT_SECS

# [ui]
# title = "AI Assistant"
# status = "Online"
# greeting = "👋 Hello! I'm your AI assistant. How can I help you today?"
# placeholder = "Type a message..."
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HookchatConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &HookchatConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Webhook URL: CLI → env → config. A blank layer falls through to the
    // next one. The value is otherwise opaque; no validation.
    let webhook_url = non_blank(cli.webhook_url.clone())
        .or_else(|| non_blank(env(ENV_WEBHOOK_URL)))
        .or_else(|| non_blank(config.webhook.url.clone()))
        .ok_or(ConfigError::MissingWebhookUrl)?;

    // Timeout: env → config → none
    let timeout_secs = match env(ENV_TIMEOUT_SECS) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(e) => {
                warn!("Ignoring invalid {ENV_TIMEOUT_SECS}={raw:?}: {e}");
                config.webhook.timeout_secs
            }
        },
        None => config.webhook.timeout_secs,
    };

    let ui = &config.ui;
    Ok(ResolvedConfig {
        webhook_url,
        timeout: timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
        title: ui.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        status: ui.status.clone().unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        greeting: ui
            .greeting
            .clone()
            .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        placeholder: ui
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
    })
}
