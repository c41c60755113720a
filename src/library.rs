//! Track discovery: audio files, their tags, and the lyric and cover files
//! that sit next to them.

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;

#[cfg(test)]
mod tests;
