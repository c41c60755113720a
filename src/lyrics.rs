//! Lyric timelines: LRC parsing and active-line lookup.
//!
//! A `Timeline` is built once per track from the sidecar lyric file and then
//! queried on every playback tick.

mod load;
mod model;
mod parse;

pub use load::load_document;
pub use model::*;
pub use parse::{LrcDocument, LrcTags, PLACEHOLDER_TEXT, parse_document, parse_timeline};

#[cfg(test)]
mod tests;
