use crate::audio::{AudioCmd, AudioPlayer};

/// Start playback of the requested track (1-based), or the first one.
///
/// Returns the library index that was started.
pub fn start_playback(
    audio_player: &AudioPlayer,
    track_count: usize,
    requested: Option<usize>,
) -> Option<usize> {
    let index = autoplay_index(track_count, requested)?;
    let _ = audio_player.send(AudioCmd::Play(index));
    Some(index)
}

pub fn autoplay_index(track_count: usize, requested: Option<usize>) -> Option<usize> {
    if track_count == 0 {
        tracing::warn!("library is empty, nothing to play");
        return None;
    }
    match requested {
        None => Some(0),
        Some(n) if (1..=track_count).contains(&n) => Some(n - 1),
        Some(n) => {
            tracing::warn!(requested = n, tracks = track_count, "no such track, starting at 1");
            Some(0)
        }
    }
}
