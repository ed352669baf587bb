//! Configuration file management for fridgeflow.
//!
//! Provides a TOML-based config file at `~/.config/fridgeflow/config.toml`
//! and a resolution chain: CLI flag > env var > config file > default.
//!
//! The language-model credential is never stored here. Only the name of the
//! environment variable it is read from is configurable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fridgeflow_core::LlmSettings;

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub llm: LlmSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LlmSection {
    /// OpenAI-compatible base URL (e.g. `https://api.openai.com/v1`).
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
}

impl ConfigFile {
    /// A config file with every default spelled out.
    pub fn with_defaults() -> Self {
        let llm = LlmSettings::default();
        Self {
            server: ServerSection {
                bind: Some(DEFAULT_BIND.to_string()),
                port: Some(DEFAULT_PORT),
            },
            llm: LlmSection {
                base_url: Some(llm.base_url),
                model: Some(llm.model),
                temperature: Some(llm.temperature),
                api_key_env: Some(llm.api_key_env),
            },
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the fridgeflow config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/fridgeflow` or
/// `~/.config/fridgeflow`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("fridgeflow");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("fridgeflow")
}

/// Return the path to the fridgeflow config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Load the config file from its default location, if there is one.
///
/// A missing file is not an error; a malformed one is.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Serialize and write a config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Overrides passed on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone)]
pub struct FridgeflowConfig {
    pub bind: String,
    pub port: u16,
    pub llm: LlmSettings,
}

impl FridgeflowConfig {
    /// Resolve configuration from the default config file location.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let file = load_config()?;
        Self::resolve_with(cli, file.unwrap_or_default())
    }

    /// Resolve using the chain: CLI flag > env var > config file > default.
    ///
    /// - bind: `--bind` > `FRIDGEFLOW_BIND` > `server.bind` > `127.0.0.1`
    /// - port: `--port` > `FRIDGEFLOW_PORT` > `server.port` > `8000`
    /// - model: `--model` > `FRIDGEFLOW_LLM_MODEL` > `llm.model` > default
    /// - base URL: `FRIDGEFLOW_LLM_BASE_URL` > `llm.base_url` > default
    pub fn resolve_with(cli: &CliOverrides, file: ConfigFile) -> Result<Self> {
        let defaults = LlmSettings::default();

        let bind = cli
            .bind
            .clone()
            .or_else(|| env_var("FRIDGEFLOW_BIND"))
            .or(file.server.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let port = match (cli.port, env_var("FRIDGEFLOW_PORT")) {
            (Some(port), _) => port,
            (None, Some(raw)) => raw
                .parse()
                .with_context(|| format!("FRIDGEFLOW_PORT is not a valid port: {raw:?}"))?,
            (None, None) => file.server.port.unwrap_or(DEFAULT_PORT),
        };

        let model = cli
            .model
            .clone()
            .or_else(|| env_var("FRIDGEFLOW_LLM_MODEL"))
            .or(file.llm.model)
            .unwrap_or(defaults.model);

        let base_url = env_var("FRIDGEFLOW_LLM_BASE_URL")
            .or(file.llm.base_url)
            .unwrap_or(defaults.base_url);

        let llm = LlmSettings {
            base_url,
            model,
            temperature: file.llm.temperature.unwrap_or(defaults.temperature),
            api_key_env: file.llm.api_key_env.unwrap_or(defaults.api_key_env),
        };

        Ok(Self { bind, port, llm })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
