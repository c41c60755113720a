use std::sync::LazyLock;

use regex::Regex;

use super::model::{LyricLine, Timeline};

/// Text shown for a timed line that carries no words (instrumental breaks).
pub const PLACEHOLDER_TEXT: &str = "…";

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d{1,3}):([0-5]\d)(?:[.:](\d{1,3}))?\]").expect("timestamp pattern")
});

static ID_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\[(ti|ar|al|offset):([^\]]*)\]").expect("id tag pattern")
});

/// Header tags of an LRC file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LrcTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Milliseconds; positive values make lyrics appear earlier.
    pub offset_ms: i64,
}

/// A parsed LRC file: the timeline plus its header tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LrcDocument {
    pub timeline: Timeline,
    pub tags: LrcTags,
}

/// Parse LRC text into a sorted timeline, ignoring header tags.
pub fn parse_timeline(source: &str) -> Timeline {
    parse_document(source).timeline
}

/// Parse LRC text.
///
/// Never fails: lines without a well-formed timestamp are skipped, and a timed
/// line with no words gets [`PLACEHOLDER_TEXT`].
pub fn parse_document(source: &str) -> LrcDocument {
    let mut tags = LrcTags::default();
    let mut lines: Vec<LyricLine> = Vec::new();

    for raw in source.lines() {
        let stamps: Vec<u64> = TIMESTAMP
            .captures_iter(raw)
            .filter_map(|c| {
                let minutes: u64 = c[1].parse().ok()?;
                let seconds: u64 = c[2].parse().ok()?;
                let millis = c.get(3).map_or(Some(0), |m| fraction_ms(m.as_str()))?;
                Some((minutes * 60 + seconds) * 1000 + millis)
            })
            .collect();

        if stamps.is_empty() {
            read_id_tag(raw, &mut tags);
            continue;
        }

        let stripped = TIMESTAMP.replace_all(raw, "");
        let text = match stripped.trim() {
            "" => PLACEHOLDER_TEXT,
            t => t,
        };
        lines.extend(stamps.into_iter().map(|t| LyricLine::new(t, text)));
    }

    if tags.offset_ms != 0 {
        for line in &mut lines {
            line.time_ms = apply_offset(line.time_ms, tags.offset_ms);
        }
    }

    LrcDocument {
        timeline: Timeline::new(lines),
        tags,
    }
}

/// Right-pad a 1-3 digit fraction to milliseconds: "5" -> 500, "05" -> 50.
fn fraction_ms(digits: &str) -> Option<u64> {
    format!("{digits:0<3}").parse().ok()
}

fn apply_offset(time_ms: u64, offset_ms: i64) -> u64 {
    if offset_ms >= 0 {
        time_ms.saturating_sub(offset_ms as u64)
    } else {
        time_ms.saturating_add(offset_ms.unsigned_abs())
    }
}

fn read_id_tag(raw: &str, tags: &mut LrcTags) {
    let Some(c) = ID_TAG.captures(raw) else {
        return;
    };
    let value = c[2].trim();
    match c[1].to_ascii_lowercase().as_str() {
        "offset" => {
            if let Ok(v) = value.trim_start_matches('+').parse::<i64>() {
                tags.offset_ms = v;
            }
        }
        _ if value.is_empty() => {}
        "ti" => tags.title = Some(value.to_string()),
        "ar" => tags.artist = Some(value.to_string()),
        "al" => tags.album = Some(value.to_string()),
        _ => {}
    }
}
