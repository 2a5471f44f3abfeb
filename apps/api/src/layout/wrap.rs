//! Greedy word wrap against measured widths.

use crate::layout::font_metrics::FontMetricTable;

/// Splits `text` into lines no wider than `max_width_pt` at `size_pt`.
///
/// Words are appended while the running width stays within the limit; the
/// line breaks before the word that would overflow. A single word wider than
/// the limit still gets a line of its own. Whitespace runs collapse to one
/// space. Empty or blank text yields no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let space_w = metrics.space_width * size_pt;
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_pt(word, size_pt);

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width_pt {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
