//! Audio-related small types and handles.
//!
//! This module defines the commands accepted by the audio thread and the
//! playback info it shares with the runtime.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// The playback state reported over MPRIS.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Start playing the track at the given index.
    Play(usize),
    /// Stop playback immediately.
    Stop,
    /// Toggle pause/resume.
    TogglePause,
    /// Skip to the next track.
    Next,
    /// Go to the previous track.
    Prev,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
    /// Seek by the specified number of seconds (positive or negative).
    SeekBy(i32),
}

/// Runtime playback information shared with the runtime loop.
///
/// The position is kept as time accumulated before the last resume plus the
/// instant of that resume, so readers get a smooth monotonic clock without
/// the audio thread having to tick it.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Currently playing track index in the library (if any).
    pub index: Option<usize>,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Playback time accumulated up to `resumed_at`.
    pub accumulated: Duration,
    /// When playback last resumed; `None` while paused or stopped.
    pub resumed_at: Option<Instant>,
}

impl PlaybackInfo {
    /// Position within the current track as of `now`.
    pub fn position_at(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .resumed_at
                .map_or(Duration::ZERO, |at| now.saturating_duration_since(at))
    }

    pub fn position(&self) -> Duration {
        self.position_at(Instant::now())
    }

    pub fn state(&self) -> PlaybackState {
        match (self.index, self.playing) {
            (None, _) => PlaybackState::Stopped,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Reset for `index`, starting at `start` and playing from `now`.
    pub fn start(&mut self, index: usize, start: Duration, now: Instant) {
        self.index = Some(index);
        self.playing = true;
        self.accumulated = start;
        self.resumed_at = Some(now);
    }

    pub fn pause(&mut self, now: Instant) {
        self.accumulated = self.position_at(now);
        self.resumed_at = None;
        self.playing = false;
    }

    pub fn resume(&mut self, now: Instant) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(now);
        }
        self.playing = true;
    }

    /// Jump to `position`, keeping the play/pause state.
    pub fn seek(&mut self, position: Duration, now: Instant) {
        self.accumulated = position;
        if self.playing {
            self.resumed_at = Some(now);
        }
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
