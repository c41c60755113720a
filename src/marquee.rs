//! Marquee engine: fits a lyric line into a pixel budget as a sequence of
//! overlapping windows and picks the window to show at a given instant.

mod fit;
mod measure;
mod scroll;

pub use fit::fit_windows;
pub use measure::{CellMeasure, FixedAdvanceMeasure, TextMeasure};
pub use scroll::{
    LAST_LINE_SPAN_MS, MIN_LINE_DURATION_MS, MIN_SCROLL_PORTION, MAX_DWELL, ScrollProfile,
    line_end_ms, mapped_progress, select_window,
};
