//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so events go to a log file. Failing to
//! open it only means running without logs.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// Environment variable overriding `logging.level`.
pub const LOG_ENV: &str = "DUABOOK_LOG";

/// Install the global subscriber. Returns the log file path on success.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings.file.clone().or_else(default_log_path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .ok()?;

    Some(path)
}

/// `$XDG_STATE_HOME/duabook/duabook.log`, or `~/.local/state/duabook/duabook.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("duabook").join("duabook.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EnvGuard, env_lock};

    #[test]
    fn default_log_path_prefers_xdg_state_home() {
        let _lock = env_lock();
        let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
        let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

        assert_eq!(
            default_log_path().unwrap(),
            PathBuf::from("/tmp/xdg-state")
                .join("duabook")
                .join("duabook.log")
        );
    }

    #[test]
    fn default_log_path_falls_back_to_home() {
        let _lock = env_lock();
        let _g1 = EnvGuard::remove("XDG_STATE_HOME");
        let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

        assert_eq!(
            default_log_path().unwrap(),
            PathBuf::from("/tmp/home-dir/.local/state/duabook/duabook.log")
        );
    }
}
