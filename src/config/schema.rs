use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/duabook/config.toml` or `~/.config/duabook/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DUABOOK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub share: ShareSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Theme the viewer starts in; `t` toggles it at runtime.
    pub theme: ThemeMode,
    /// Subtitle rendered under the "Eternah" title.
    pub header_text: String,
    /// Whether cards render the transliteration line.
    pub show_transliteration: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Light,
            header_text: "Daily Adhkar & Du'a".to_string(),
            show_transliteration: true,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Timings for cards without an audio file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Total length of a simulated recitation (milliseconds).
    pub simulated_duration_ms: u64,
    /// Interval between simulated progress ticks (milliseconds).
    pub tick_ms: u64,
    /// How long a finished simulated card shows a full bar before resetting (milliseconds).
    pub reset_delay_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            simulated_duration_ms: 8000,
            tick_ms: 100,
            reset_delay_ms: 500,
        }
    }
}

impl PlaybackSettings {
    pub fn simulated_duration(&self) -> Duration {
        Duration::from_millis(self.simulated_duration_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// TOML file with `[[dua]]` records. The built-in set is used when unset.
    pub data_path: Option<PathBuf>,
    /// Directory relative audio locators resolve against.
    /// Defaults to the data file's directory.
    pub audio_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// External command acting as the platform share sheet.
    ///
    /// It receives the title, text and url on stdin separated by blank lines.
    /// When unset, sharing falls back to the clipboard.
    pub command: Option<String>,
    /// Link attached to shared duas.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, overridden by `DUABOOK_LOG`.
    pub level: String,
    /// Log file path. Defaults to `$XDG_STATE_HOME/duabook/duabook.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
