use std::{env, path::Path, path::PathBuf};

use crate::error::{LyricastError, Result};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load_from` tries environment variables first (prefix `LYRICAST__`), then
/// an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and an optional config file.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("LYRICAST")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<()> {
        let d = &self.display;
        if !positive(d.width_px) {
            return Err(invalid("display.width_px must be > 0"));
        }
        if !positive(d.width_scale) {
            return Err(invalid("display.width_scale must be > 0"));
        }
        if !positive(d.px_per_cell) || !positive(d.px_per_char) {
            return Err(invalid("display.px_per_cell and display.px_per_char must be > 0"));
        }
        if self.publish.tick_ms == 0 {
            return Err(invalid("publish.tick_ms must be >= 1"));
        }
        if self.runtime.reload_poll_ms == 0 {
            return Err(invalid("runtime.reload_poll_ms must be >= 1"));
        }
        Ok(())
    }

    /// Render the settings as a TOML document.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn positive(v: f32) -> bool {
    v > 0.0
}

fn invalid(msg: &str) -> LyricastError {
    LyricastError::InvalidSettings(msg.to_string())
}

/// Resolve the config path from `LYRICAST_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("LYRICAST_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/lyricast/config.toml`
/// or `~/.config/lyricast/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("lyricast").join("config.toml"))
}
