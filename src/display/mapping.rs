use serde::{Deserialize, Serialize};

/// Which lyric line a display slot shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LyricRole {
    #[serde(alias = "prev")]
    Previous,
    #[serde(alias = "active")]
    Current,
    Next,
}

/// The three text fields the display channel carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisplaySlot {
    Title,
    Artist,
    Album,
}

/// Binding of every display slot to a lyric role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldMapping {
    pub title: LyricRole,
    pub artist: LyricRole,
    pub album: LyricRole,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            title: LyricRole::Current,
            artist: LyricRole::Next,
            album: LyricRole::Previous,
        }
    }
}

impl FieldMapping {
    pub fn role(&self, slot: DisplaySlot) -> LyricRole {
        match slot {
            DisplaySlot::Title => self.title,
            DisplaySlot::Artist => self.artist,
            DisplaySlot::Album => self.album,
        }
    }
}

/// Lyric text available for one tick.
///
/// `current` is the marquee window of the active line; the neighbours carry
/// their full text, or nothing at the edges of the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LyricSlots<'a> {
    pub previous: &'a str,
    pub current: &'a str,
    pub next: &'a str,
}

impl<'a> LyricSlots<'a> {
    pub fn get(&self, role: LyricRole) -> &'a str {
        match role {
            LyricRole::Previous => self.previous,
            LyricRole::Current => self.current,
            LyricRole::Next => self.next,
        }
    }
}
