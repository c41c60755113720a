use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Track, make_display};

fn normalized_exts(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

pub(super) fn is_audio_file(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Lyric file sharing the track's stem, e.g. `song.mp3` -> `song.lrc`.
pub(super) fn find_sidecar(track: &Path, lyric_exts: &[String]) -> Option<PathBuf> {
    lyric_exts
        .iter()
        .flat_map(|e| [e.clone(), e.to_ascii_uppercase()])
        .map(|e| track.with_extension(e))
        .find(|p| p.is_file())
}

/// First configured cover image present in `dir`.
pub(super) fn find_cover(dir: &Path, names: &[String]) -> Option<PathBuf> {
    names
        .iter()
        .map(|n| dir.join(n.trim()))
        .find(|p| p.is_file())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn read_track(path: &Path, settings: &LibrarySettings, lyric_exts: &[String]) -> Track {
    let mut track = Track::from_path(path);

    if let Ok(tagged) = lofty::read_from_path(path) {
        track.duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = non_blank(tag.title().as_deref()) {
                track.title = v;
            }
            track.artist = non_blank(tag.artist().as_deref());
            track.album = non_blank(tag.album().as_deref());
        }
    } else {
        tracing::debug!(path = %path.display(), "no readable tags");
    }

    track.display = make_display(&track.title, track.artist.as_deref());
    track.lyrics = find_sidecar(path, lyric_exts);
    track.cover = path
        .parent()
        .and_then(|dir| find_cover(dir, &settings.cover_names));
    track
}

/// Walk `dir` for audio files according to `settings`, sorted by display
/// name, case-insensitively.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let audio_exts = normalized_exts(&settings.extensions);
    let lyric_exts = normalized_exts(&settings.lyric_extensions);
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, &audio_exts)
        {
            tracks.push(read_track(path, settings, &lyric_exts));
        }
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    let with_lyrics = tracks.iter().filter(|t| t.lyrics.is_some()).count();
    tracing::info!(dir = %dir.display(), tracks = tracks.len(), with_lyrics, "library scanned");
    tracks
}
