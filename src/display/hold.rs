use crate::lyrics::Timeline;

/// Upper bound for the metadata hold.
pub const MAX_HOLD_SECS: f64 = 30.0;

/// Keeps the track's own metadata on screen for a while after a track starts,
/// and until the first lyric line is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldPolicy {
    min_hold_secs: f64,
}

impl Default for HoldPolicy {
    fn default() -> Self {
        Self { min_hold_secs: 3.0 }
    }
}

impl HoldPolicy {
    /// `min_hold_secs` is clamped to `0..=MAX_HOLD_SECS`.
    pub fn new(min_hold_secs: f64) -> Self {
        let min_hold_secs = if min_hold_secs.is_nan() {
            0.0
        } else {
            min_hold_secs.clamp(0.0, MAX_HOLD_SECS)
        };
        Self { min_hold_secs }
    }

    pub fn min_hold_secs(&self) -> f64 {
        self.min_hold_secs
    }

    /// Whether the display should show lyrics rather than track metadata.
    pub fn lyrics_active(&self, timeline: &Timeline, position_ms: u64) -> bool {
        let Some(first_ms) = timeline.first_time_ms() else {
            return false;
        };
        let hold_ms = (self.min_hold_secs * 1000.0).round() as u64;
        position_ms >= first_ms.max(hold_ms)
    }
}
