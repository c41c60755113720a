use super::mapping::{DisplaySlot, FieldMapping, LyricSlots};

/// Stand-in for an empty field; the display channel rejects empty strings.
pub const EMPTY_FIELD: &str = " ";

/// Static metadata of the playing track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// URL of the cover image, if one was found.
    pub artwork: Option<String>,
}

/// Fully resolved strings for one update of the display channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork: Option<String>,
}

impl Payload {
    /// Build a payload, trimming each field and replacing blank ones with
    /// [`EMPTY_FIELD`].
    pub fn new(title: &str, artist: &str, album: &str, artwork: Option<String>) -> Self {
        Self {
            title: resolve_field(title),
            artist: resolve_field(artist),
            album: resolve_field(album),
            artwork,
        }
    }
}

fn resolve_field(value: &str) -> String {
    match value.trim() {
        "" => EMPTY_FIELD.to_string(),
        v => v.to_string(),
    }
}

/// Fill the three display slots.
///
/// With `lyrics` present each slot shows its mapped lyric role; otherwise the
/// slots show the track's own title, artist and album.
pub fn compose(
    mapping: &FieldMapping,
    lyrics: Option<LyricSlots<'_>>,
    metadata: &TrackMetadata,
) -> Payload {
    let artwork = metadata.artwork.clone();
    match lyrics {
        Some(slots) => {
            let text = |slot| slots.get(mapping.role(slot));
            Payload::new(
                text(DisplaySlot::Title),
                text(DisplaySlot::Artist),
                text(DisplaySlot::Album),
                artwork,
            )
        }
        None => Payload::new(&metadata.title, &metadata.artist, &metadata.album, artwork),
    }
}
