use std::path::Path;

use url::Url;

use crate::display::{FieldMapping, HoldPolicy, LyricSlots, Payload, TrackMetadata, compose};
use crate::library::Track;
use crate::lyrics::{LrcTags, Timeline, load_document};
use crate::marquee::{
    ScrollProfile, TextMeasure, fit_windows, line_end_ms, mapped_progress, select_window,
};

/// Runtime display settings handed to every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    pub mapping: FieldMapping,
    pub profile: ScrollProfile,
    /// Pixel budget for one display field.
    pub max_width_px: f32,
    pub hold: HoldPolicy,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mapping: FieldMapping::default(),
            profile: ScrollProfile::default(),
            max_width_px: 200.0,
            hold: HoldPolicy::default(),
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Active timeline entry, `None` before the first line.
    pub active_index: Option<usize>,
    /// Marquee window shown for the active line; `None` while metadata is shown.
    pub window_index: Option<usize>,
    pub payload: Payload,
}

#[derive(Debug, Clone)]
struct WindowCache {
    line: usize,
    text: String,
    width_bits: u32,
    windows: Vec<String>,
}

/// Lyric state for the track that is currently playing.
#[derive(Debug, Clone)]
pub struct LyricSession {
    metadata: TrackMetadata,
    timeline: Timeline,
    cache: Option<WindowCache>,
}

impl LyricSession {
    pub fn new(metadata: TrackMetadata, timeline: Timeline) -> Self {
        Self {
            metadata,
            timeline,
            cache: None,
        }
    }

    /// Build the session for `track`, reading its lyric file if it has one.
    ///
    /// A lyric file that cannot be read leaves the session with an empty
    /// timeline, so only track metadata is shown.
    pub fn for_track(track: &Track) -> Self {
        let mut metadata = TrackMetadata {
            title: track.title.clone(),
            artist: track.artist.clone().unwrap_or_default(),
            album: track.album.clone().unwrap_or_default(),
            artwork: track.cover.as_deref().and_then(file_url),
        };

        let Some(path) = track.lyrics.as_deref() else {
            return Self::new(metadata, Timeline::default());
        };

        match load_document(path) {
            Ok(doc) => {
                fill_from_tags(&mut metadata, &doc.tags, track);
                tracing::info!(
                    lyrics = %path.display(),
                    lines = doc.timeline.len(),
                    "loaded lyrics"
                );
                Self::new(metadata, doc.timeline)
            }
            Err(e) => {
                tracing::warn!(lyrics = %path.display(), error = %e, "failed to read lyrics");
                Self::new(metadata, Timeline::default())
            }
        }
    }

    pub fn metadata(&self) -> &TrackMetadata {
        &self.metadata
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Forget the fitted windows, e.g. after the text measurer changed.
    pub fn invalidate_windows(&mut self) {
        self.cache = None;
    }

    /// Compose the payload for `position_ms`.
    pub fn tick(
        &mut self,
        position_ms: u64,
        config: &DisplayConfig,
        measure: &dyn TextMeasure,
    ) -> Frame {
        let active_index = self.timeline.active_index(position_ms);

        let lyric_index =
            active_index.filter(|_| config.hold.lyrics_active(&self.timeline, position_ms));
        let Some(i) = lyric_index else {
            return Frame {
                active_index,
                window_index: None,
                payload: compose(&config.mapping, None, &self.metadata),
            };
        };

        let lines = self.timeline.lines();
        let line = &lines[i];
        let next = lines.get(i + 1);
        let windows = fitted_windows(&mut self.cache, i, &line.text, config.max_width_px, measure);

        let end_ms = line_end_ms(line.time_ms, next.map(|l| l.time_ms));
        let progress = mapped_progress(line.time_ms, end_ms, position_ms, &config.profile);
        let window_index = select_window(progress, windows.len());

        let slots = LyricSlots {
            previous: i.checked_sub(1).map_or("", |p| lines[p].text.as_str()),
            current: windows.get(window_index).map_or("", String::as_str),
            next: next.map_or("", |l| l.text.as_str()),
        };

        Frame {
            active_index,
            window_index: Some(window_index),
            payload: compose(&config.mapping, Some(slots), &self.metadata),
        }
    }
}

/// Windows of line `line`, refitted only when the line, its text or the
/// width changed since the last call.
fn fitted_windows<'c>(
    cache: &'c mut Option<WindowCache>,
    line: usize,
    text: &str,
    max_width: f32,
    measure: &dyn TextMeasure,
) -> &'c [String] {
    let width_bits = max_width.to_bits();
    let stale = !matches!(
        &*cache,
        Some(c) if c.line == line && c.width_bits == width_bits && c.text == text
    );
    if stale {
        let windows = fit_windows(text, max_width, measure);
        tracing::trace!(line, windows = windows.len(), "fitted lyric line");
        *cache = Some(WindowCache {
            line,
            text: text.to_string(),
            width_bits,
            windows,
        });
    }
    match &*cache {
        Some(c) => &c.windows,
        None => &[],
    }
}

/// LRC header tags fill whatever the audio tags did not provide.
fn fill_from_tags(metadata: &mut TrackMetadata, tags: &LrcTags, track: &Track) {
    let title_is_file_stem = track
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem == track.title);
    if let Some(t) = tags.title.as_ref().filter(|_| title_is_file_stem) {
        metadata.title = t.clone();
    }
    if metadata.artist.trim().is_empty() {
        if let Some(a) = &tags.artist {
            metadata.artist = a.clone();
        }
    }
    if metadata.album.trim().is_empty() {
        if let Some(a) = &tags.album {
            metadata.album = a.clone();
        }
    }
}

/// `file://` URL for `path`, resolved against the working directory and
/// percent-encoded.
pub(crate) fn file_url(path: &Path) -> Option<String> {
    let absolute = std::path::absolute(path).ok()?;
    Url::from_file_path(&absolute).ok().map(String::from)
}
