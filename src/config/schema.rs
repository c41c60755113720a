use serde::{Deserialize, Serialize};

use crate::display::FieldMapping;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lyricast/config.toml` or `~/.config/lyricast/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LYRICAST__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub scroll: ScrollSettings,
    pub publish: PublishSettings,
    pub mapping: FieldMapping,
    pub library: LibrarySettings,
    pub audio: AudioSettings,
    pub runtime: RuntimeSettings,
}

/// How text width is measured against the head unit's field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeasureKind {
    /// Terminal cell widths (wide CJK and emoji count double).
    #[serde(alias = "cell")]
    Cells,
    /// Every grapheme costs the same.
    #[serde(alias = "fixed-advance", alias = "fallback")]
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub measure: MeasureKind,
    /// Width of one head unit text field, in pixels, before scaling.
    pub width_px: f32,
    /// Multiplier applied to `width_px` (clamped to 0.1..=10).
    pub width_scale: f32,
    /// Pixels per terminal cell, for `measure = "cells"`.
    pub px_per_cell: f32,
    /// Pixels per grapheme, for `measure = "fixed"`.
    pub px_per_char: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            measure: MeasureKind::Cells,
            width_px: 200.0,
            width_scale: 1.0,
            px_per_cell: 10.0,
            px_per_char: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Share of each line during which the first window is held.
    pub dwell_start: f32,
    /// Share of each line during which the last window is held.
    pub dwell_end: f32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            dwell_start: 0.2,
            dwell_end: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PublishSettings {
    /// Minimum spacing between metadata updates (clamped to 10..=5000 ms).
    pub min_interval_ms: u64,
    /// Show track metadata for at least this long after a track starts
    /// (clamped to 0..=30 s).
    pub min_hold_seconds: f64,
    /// Playback position polling period (milliseconds).
    pub tick_ms: u64,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            min_interval_ms: 500,
            min_hold_seconds: 3.0,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Extensions of sidecar lyric files, tried in order.
    pub lyric_extensions: Vec<String>,
    /// Cover image file names looked up in each track's directory, in order.
    pub cover_names: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            lyric_extensions: vec!["lrc".into()],
            cover_names: vec![
                "cover.jpg".into(),
                "cover.png".into(),
                "folder.jpg".into(),
                "front.jpg".into(),
            ],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Re-read the config file when it changes on disk.
    pub reload_config: bool,
    /// How often to check the config file's modification time (milliseconds).
    pub reload_poll_ms: u64,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            reload_config: true,
            reload_poll_ms: 1_000,
        }
    }
}
