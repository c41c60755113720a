/// One timed lyric entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    pub time_ms: u64,
    pub text: String,
}

impl LyricLine {
    pub fn new(time_ms: u64, text: impl Into<String>) -> Self {
        Self {
            time_ms,
            text: text.into(),
        }
    }
}

/// Lyric lines sorted ascending by `time_ms`.
///
/// Entries sharing a timestamp keep the order they were emitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    lines: Vec<LyricLine>,
}

impl Timeline {
    /// Build a timeline, stable-sorting `lines` by time.
    pub fn new(mut lines: Vec<LyricLine>) -> Self {
        lines.sort_by_key(|l| l.time_ms);
        Self { lines }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn first_time_ms(&self) -> Option<u64> {
        self.lines.first().map(|l| l.time_ms)
    }

    /// Index of the last line whose timestamp is at or before `position_ms`.
    ///
    /// Returns `None` before the first line and for an empty timeline.
    pub fn active_index(&self, position_ms: u64) -> Option<usize> {
        // Number of lines with time_ms <= position_ms.
        let mut lo = 0usize;
        let mut hi = self.lines.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.lines[mid].time_ms <= position_ms {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo.checked_sub(1)
    }
}
