use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    /// Tag title, or the file stem when the file has none.
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    /// "Artist - Title", used for ordering and log lines.
    pub display: String,
    /// Sidecar lyric file.
    pub lyrics: Option<PathBuf>,
    /// Cover image in the track's directory.
    pub cover: Option<PathBuf>,
}

impl Track {
    /// A track with no tags, named after its file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        Self {
            display: title.clone(),
            path,
            title,
            artist: None,
            album: None,
            duration: None,
            lyrics: None,
            cover: None,
        }
    }
}

pub(super) fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}
