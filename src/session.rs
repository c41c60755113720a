//! Per-track lyric session: owns the timeline and the fitted windows of the
//! active line, and turns a playback position into a display payload.

mod model;

pub use model::*;
