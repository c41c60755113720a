use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::error::LyricastError;
use crate::library::Track;

use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle};

/// State owned by the audio thread.
struct Transport {
    tracks: Vec<Track>,
    stream: OutputStream,
    sink: Option<Sink>,
    index: Option<usize>,
    paused: bool,
    playback: PlaybackHandle,
}

impl Transport {
    /// Play `start`, or the first track after it that decodes.
    fn play_from(&mut self, start: usize) {
        for i in start..self.tracks.len() {
            match create_sink_at(&self.stream, &self.tracks[i], Duration::ZERO) {
                Ok(new_sink) => {
                    if let Some(old) = self.sink.take() {
                        old.stop();
                    }
                    new_sink.play();
                    self.sink = Some(new_sink);
                    self.index = Some(i);
                    self.paused = false;
                    if let Ok(mut info) = self.playback.lock() {
                        info.start(i, Duration::ZERO, Instant::now());
                    }
                    tracing::info!(index = i, track = %self.tracks[i].display, "playing");
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        track = %self.tracks[i].path.display(),
                        error = %e,
                        "skipping track"
                    );
                }
            }
        }
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.index = None;
        self.paused = true;
        if let Ok(mut info) = self.playback.lock() {
            info.stop();
        }
    }

    fn toggle_pause(&mut self) {
        let Some(ref s) = self.sink else {
            return;
        };
        let now = Instant::now();
        if self.paused {
            s.play();
        } else {
            s.pause();
        }
        self.paused = !self.paused;
        if let Ok(mut info) = self.playback.lock() {
            if self.paused {
                info.pause(now);
            } else {
                info.resume(now);
            }
        }
    }

    /// Scrubbing: rebuild the current sink and skip into the file.
    fn seek_by(&mut self, secs: i32) {
        let Some(i) = self.index else {
            return;
        };
        let current = self
            .playback
            .lock()
            .map(|info| info.position())
            .unwrap_or_default();
        let target = if secs >= 0 {
            current + Duration::from_secs(secs as u64)
        } else {
            current.saturating_sub(Duration::from_secs(u64::from(secs.unsigned_abs())))
        };

        let new_sink = match create_sink_at(&self.stream, &self.tracks[i], target) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "seek failed");
                return;
            }
        };
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        if !self.paused {
            new_sink.play();
        }
        self.sink = Some(new_sink);
        if let Ok(mut info) = self.playback.lock() {
            info.seek(target, Instant::now());
        }
    }

    fn next(&mut self) {
        let next = self.index.map_or(0, |i| i + 1);
        if next < self.tracks.len() {
            self.play_from(next);
        }
    }

    fn prev(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        let prev = self.index.map_or(0, |i| i.saturating_sub(1));
        self.play_from(prev);
    }

    /// Move on when the current sink has drained.
    fn advance_if_finished(&mut self) {
        let finished = !self.paused && self.sink.as_ref().is_some_and(|s| s.empty());
        if !finished {
            return;
        }
        match self.index {
            Some(i) if i + 1 < self.tracks.len() => self.play_from(i + 1),
            _ => {
                tracing::info!("reached end of library");
                self.stop();
            }
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(ref s) = self.sink {
            // Fade out gently before stopping.
            fade_out_sink(s, fade_out_ms);
            s.stop();
        }
        // Update shared state so the runtime doesn't keep showing Playing.
        if let Ok(mut info) = self.playback.lock() {
            info.pause(Instant::now());
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let err = LyricastError::AudioOutput(e.to_string());
                tracing::error!(error = %err, "no audio output device");
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped.
        stream.log_on_drop(false);

        let mut transport = Transport {
            tracks,
            stream,
            sink: None,
            index: None,
            paused: true,
            playback: playback_info,
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(AudioCmd::Play(i)) => transport.play_from(i),
                Ok(AudioCmd::Stop) => transport.stop(),
                Ok(AudioCmd::TogglePause) => transport.toggle_pause(),
                Ok(AudioCmd::Next) => transport.next(),
                Ok(AudioCmd::Prev) => transport.prev(),
                Ok(AudioCmd::SeekBy(secs)) => transport.seek_by(secs),
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    transport.quit(fade_out_ms);
                    break;
                }
                // Periodic check for auto-advance.
                Err(RecvTimeoutError::Timeout) => transport.advance_if_finished(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
