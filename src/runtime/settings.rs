use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use crate::config;
use crate::error::Result;

/// Load and validate settings, falling back to defaults on any failure.
pub fn load_settings(path: Option<&Path>) -> config::Settings {
    match try_load(path) {
        Ok(s) => s,
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            tracing::warn!(error = %e, "failed to load config, using defaults");
            config::Settings::default()
        }
    }
}

fn try_load(path: Option<&Path>) -> Result<config::Settings> {
    let settings = config::Settings::load_from(path)?;
    settings.validate()?;
    Ok(settings)
}

/// Polls the config file's modification time and reloads it when it changes.
pub struct SettingsWatcher {
    path: PathBuf,
    interval: Duration,
    last_check: Instant,
    modified: Option<SystemTime>,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf, interval: Duration) -> Self {
        let modified = modified_time(&path);
        Self {
            path,
            interval,
            last_check: Instant::now(),
            modified,
        }
    }

    /// New settings if the file changed since the last check and still
    /// loads; `None` otherwise.
    pub fn poll(&mut self, now: Instant) -> Option<config::Settings> {
        if now.saturating_duration_since(self.last_check) < self.interval {
            return None;
        }
        self.last_check = now;

        let modified = modified_time(&self.path);
        if modified == self.modified {
            return None;
        }
        self.modified = modified;

        match try_load(Some(&self.path)) {
            Ok(s) => {
                tracing::info!(path = %self.path.display(), "config changed, reloading");
                Some(s)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "config reload failed, keeping previous settings"
                );
                None
            }
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
