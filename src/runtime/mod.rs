use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crate::audio::AudioPlayer;
use crate::config;
use crate::library::scan;
use crate::mpris::ControlCmd;

mod event_loop;
mod pipeline;
mod settings;
mod startup;

pub use settings::load_settings;

/// What the command line asked for.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub dir: Option<PathBuf>,
    /// 1-based track to start with.
    pub track: Option<usize>,
    pub config: Option<PathBuf>,
}

impl RunOptions {
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(config::resolve_config_path)
    }
}

pub fn run(opts: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = opts.config_path();
    let settings = load_settings(config_path.as_deref());

    let dir = opts
        .dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("Music"));

    let tracks = scan(&dir, &settings.library);
    if tracks.is_empty() {
        tracing::warn!(dir = %dir.display(), "no playable tracks found");
    }

    let audio_player = AudioPlayer::new(tracks.clone());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    let watcher = match config_path {
        Some(path) if settings.runtime.reload_config => Some(settings::SettingsWatcher::new(
            path,
            Duration::from_millis(settings.runtime.reload_poll_ms.max(1)),
        )),
        _ => None,
    };

    startup::start_playback(&audio_player, tracks.len(), opts.track);

    let mut pipeline = pipeline::Pipeline::new(settings);
    let result = event_loop::run(
        &tracks,
        &mut pipeline,
        watcher,
        &audio_player,
        &mpris,
        &control_rx,
    );

    mpris.clear();
    result
}
