//! Dwell/scroll curve mapping time within a lyric line to a window index.

/// Smallest share of a line's duration reserved for scrolling.
pub const MIN_SCROLL_PORTION: f32 = 0.1;
/// Upper bound for either dwell fraction, and for their sum.
pub const MAX_DWELL: f32 = 1.0 - MIN_SCROLL_PORTION;
/// Floor for a line's duration, so near-identical timestamps do not flicker.
pub const MIN_LINE_DURATION_MS: u64 = 300;
/// Assumed length of the last line of a timeline.
pub const LAST_LINE_SPAN_MS: u64 = 4_000;

/// How long the first and last window of a line are held, as fractions of the
/// line's duration.
///
/// The setters clamp each fraction to `0..=MAX_DWELL` and then shrink the
/// other one so that the pair never exceeds `MAX_DWELL`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollProfile {
    dwell_start: f32,
    dwell_end: f32,
}

impl Default for ScrollProfile {
    fn default() -> Self {
        Self {
            dwell_start: 0.2,
            dwell_end: 0.2,
        }
    }
}

impl ScrollProfile {
    /// Build a profile by setting `dwell_start` first, then `dwell_end`.
    pub fn new(dwell_start: f32, dwell_end: f32) -> Self {
        let mut p = Self {
            dwell_start: 0.0,
            dwell_end: 0.0,
        };
        p.set_dwell_start(dwell_start);
        p.set_dwell_end(dwell_end);
        p
    }

    pub fn dwell_start(&self) -> f32 {
        self.dwell_start
    }

    pub fn dwell_end(&self) -> f32 {
        self.dwell_end
    }

    pub fn set_dwell_start(&mut self, value: f32) {
        self.dwell_start = clamp_fraction(value);
        if self.dwell_start + self.dwell_end > MAX_DWELL {
            self.dwell_end = (MAX_DWELL - self.dwell_start).max(0.0);
        }
    }

    pub fn set_dwell_end(&mut self, value: f32) {
        self.dwell_end = clamp_fraction(value);
        if self.dwell_start + self.dwell_end > MAX_DWELL {
            self.dwell_start = (MAX_DWELL - self.dwell_end).max(0.0);
        }
    }
}

fn clamp_fraction(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_DWELL)
    }
}

/// End of the active line: the next line's start, or a fixed span after the
/// last line.
pub fn line_end_ms(active_ms: u64, next_ms: Option<u64>) -> u64 {
    next_ms.unwrap_or_else(|| active_ms.saturating_add(LAST_LINE_SPAN_MS))
}

/// Progress through the scrolling part of a line, in `0.0..=1.0`.
///
/// Stays at 0 during the start dwell and at 1 from the end of the scroll
/// portion onwards.
pub fn mapped_progress(
    active_ms: u64,
    next_ms: u64,
    position_ms: u64,
    profile: &ScrollProfile,
) -> f32 {
    let duration = next_ms.saturating_sub(active_ms).max(MIN_LINE_DURATION_MS);
    let elapsed = position_ms.saturating_sub(active_ms);
    let raw = (elapsed as f64 / duration as f64).clamp(0.0, 1.0) as f32;

    let start = profile.dwell_start;
    let portion = (1.0 - start - profile.dwell_end).max(MIN_SCROLL_PORTION);
    let scroll_end = (start + portion).min(MAX_DWELL);

    if raw <= start {
        0.0
    } else if raw >= scroll_end {
        1.0
    } else {
        (raw - start) / (scroll_end - start)
    }
}

/// Index of the window to show for `progress` when the line has `count` windows.
pub fn select_window(progress: f32, count: usize) -> usize {
    if count <= 1 {
        return 0;
    }
    let last = count - 1;
    let idx = (progress * last as f32).floor();
    if idx <= 0.0 { 0 } else { (idx as usize).min(last) }
}
