//! Audio transport: a rodio-backed playback thread and the shared clock the
//! lyric pipeline reads.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;
