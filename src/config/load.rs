use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::error::{DuabookError, Result};

/// Configuration loading helpers.
///
/// `Settings::load` layers an optional config file under environment
/// variables (prefix `DUABOOK__`) and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("DUABOOK")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        tracing::debug!(path = ?config_path, "settings loaded");
        Ok(settings)
    }

    /// Reject settings the player cannot run with.
    pub fn validate(&self) -> Result<()> {
        let p = &self.playback;
        let problem = if p.tick_ms == 0 {
            Some("playback.tick_ms must be >= 1")
        } else if p.simulated_duration_ms < p.tick_ms {
            Some("playback.simulated_duration_ms must be at least one tick")
        } else if self
            .share
            .command
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            Some("share.command must not be blank")
        } else {
            None
        };

        match problem {
            Some(msg) => Err(DuabookError::Config(msg.to_string())),
            None => Ok(()),
        }
    }
}

/// Resolve the config path from `DUABOOK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("DUABOOK_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/duabook/config.toml`
/// or `~/.config/duabook/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("duabook").join("config.toml"))
}
