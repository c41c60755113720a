use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Host capability that reports how wide a string renders, in device pixels.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f32,
{
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Monospace cell metrics: East Asian wide characters and most emoji take two
/// cells, combining marks take none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasure {
    pub px_per_cell: f32,
}

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str) -> f32 {
        text.width() as f32 * self.px_per_cell
    }
}

/// Degraded estimate used when no real metrics are available: every grapheme
/// costs the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasure {
    pub px_per_char: f32,
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure(&self, text: &str) -> f32 {
        text.graphemes(true).count() as f32 * self.px_per_char
    }
}
