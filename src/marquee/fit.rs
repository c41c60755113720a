use unicode_segmentation::UnicodeSegmentation;

use super::measure::TextMeasure;

/// Split `text` into the ordered windows a marquee steps through.
///
/// Each window is a run of whole grapheme clusters with leading whitespace
/// trimmed, as wide as fits in `max_width`. Start positions advance one
/// grapheme at a time; a window equal to the one recorded just before it is
/// dropped, and the scan ends at the first window that reaches the end of the
/// text. A grapheme wider than the budget on its own still gets a window.
///
/// The result is never empty. Text that already fits (after trimming leading
/// whitespace) yields exactly one window.
pub fn fit_windows(text: &str, max_width: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let trimmed = text.trim_start();
    if measure.measure(trimmed) <= max_width {
        return vec![trimmed.to_string()];
    }

    // bounds[i]..bounds[i + 1] is grapheme i.
    let mut bounds: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
    bounds.push(text.len());
    let count = bounds.len() - 1;

    let mut windows: Vec<String> = Vec::new();
    for start in 0..count {
        let mut end = start + 1;
        while end < count
            && measure.measure(text[bounds[start]..bounds[end + 1]].trim_start()) <= max_width
        {
            end += 1;
        }

        let window = text[bounds[start]..bounds[end]].trim_start();
        if windows.last().map(String::as_str) != Some(window) {
            windows.push(window.to_string());
        }
        if end == count {
            break;
        }
    }

    if windows.is_empty() {
        windows.push(String::new());
    }
    windows
}
