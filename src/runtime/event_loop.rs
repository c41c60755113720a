use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crate::audio::{AudioCmd, AudioPlayer, PlaybackHandle, PlaybackState};
use crate::config;
use crate::display::Payload;
use crate::library::Track;
use crate::mpris::{ControlCmd, MprisHandle};

use super::pipeline::Pipeline;
use super::settings::SettingsWatcher;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

struct Snapshot {
    index: Option<usize>,
    playback: PlaybackState,
    position_ms: u64,
}

fn snapshot(handle: &PlaybackHandle) -> Snapshot {
    match handle.lock() {
        Ok(info) => Snapshot {
            index: info.index,
            playback: info.state(),
            position_ms: u64::try_from(info.position().as_millis()).unwrap_or(u64::MAX),
        },
        Err(_) => Snapshot {
            index: None,
            playback: PlaybackState::Stopped,
            position_ms: 0,
        },
    }
}

/// Main loop: follows the audio clock, publishes lyric payloads and handles
/// MPRIS control commands. Returns `Ok(())` when shutdown is requested.
pub fn run(
    tracks: &[Track],
    pipeline: &mut Pipeline,
    mut watcher: Option<SettingsWatcher>,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    control_rx: &Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let clock = Instant::now();
    let now_ms = || u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);
    let handle = audio_player.playback_handle();
    let mut state = EventLoopState::default();

    loop {
        let snap = snapshot(&handle);

        if snap.index != state.last_mpris_index {
            let track = snap.index.and_then(|i| tracks.get(i).map(|t| (i, t)));
            pipeline.set_track(track);
            mpris.set_track(snap.index, track.and_then(|(_, t)| t.duration));
            state.last_mpris_index = snap.index;
        }
        if snap.playback != state.last_mpris_playback {
            mpris.set_playback(snap.playback);
            state.last_mpris_playback = snap.playback;
        }

        if let Some(payload) = pipeline.tick(snap.position_ms, now_ms()) {
            publish(mpris, payload);
        }

        if let Some(new) = watcher.as_mut().and_then(|w| w.poll(Instant::now())) {
            pipeline.apply(new);
        }

        match control_rx.recv_timeout(pipeline.wait_timeout(now_ms())) {
            Ok(cmd) => {
                let settings = pipeline.settings();
                if handle_control_cmd(cmd, settings, tracks.len(), &snap, audio_player) {
                    pipeline.shutdown();
                    return Ok(());
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                std::thread::sleep(pipeline.wait_timeout(now_ms()));
            }
        }

        if let Some(payload) = pipeline.poll(now_ms()) {
            publish(mpris, payload);
        }
    }
}

fn publish(mpris: &MprisHandle, payload: Payload) {
    tracing::debug!(
        title = %payload.title,
        artist = %payload.artist,
        album = %payload.album,
        "publish"
    );
    mpris.publish(payload);
}

/// Forward a control command to the audio thread. Returns `true` on quit.
fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    track_count: usize,
    snap: &Snapshot,
    audio_player: &AudioPlayer,
) -> bool {
    tracing::debug!(?cmd, "control command");
    let cmd = match cmd {
        ControlCmd::Quit => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return true;
        }
        ControlCmd::Play => match snap.playback {
            PlaybackState::Paused => Some(AudioCmd::TogglePause),
            PlaybackState::Stopped => play_current(snap, track_count),
            PlaybackState::Playing => None,
        },
        ControlCmd::Pause => {
            (snap.playback == PlaybackState::Playing).then_some(AudioCmd::TogglePause)
        }
        ControlCmd::PlayPause => match snap.playback {
            PlaybackState::Stopped => play_current(snap, track_count),
            PlaybackState::Playing | PlaybackState::Paused => Some(AudioCmd::TogglePause),
        },
        ControlCmd::Stop => Some(AudioCmd::Stop),
        ControlCmd::Next => (track_count > 0).then_some(AudioCmd::Next),
        ControlCmd::Prev => (track_count > 0).then_some(AudioCmd::Prev),
        ControlCmd::SeekBy(secs) => Some(AudioCmd::SeekBy(secs)),
    };
    if let Some(cmd) = cmd {
        let _ = audio_player.send(cmd);
    }
    false
}

fn play_current(snap: &Snapshot, track_count: usize) -> Option<AudioCmd> {
    (track_count > 0).then(|| AudioCmd::Play(snap.index.unwrap_or(0).min(track_count - 1)))
}
