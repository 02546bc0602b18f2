//! Shared text formatting helpers used by terminal rendering.
//!
//! All widths are char counts: one `char` occupies one terminal column.

/// Count visible character width (single-cell approximation).
pub fn visible_width(s: &str) -> usize {
    s.chars().count()
}

/// Clip a string to at most `max_width` visible characters.
pub fn clip_to_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Clip `s` to `width`, ending in `tail` when the tail fits.
///
/// A tail at least as wide as `width` is dropped and the text is hard-clipped.
pub fn truncate_with_tail(s: &str, width: usize, tail: &str) -> String {
    if visible_width(s) <= width {
        return s.to_string();
    }
    let tail_width = visible_width(tail);
    if tail_width >= width {
        return clip_to_width(s, width);
    }
    let mut out = clip_to_width(s, width - tail_width);
    out.push_str(tail);
    out
}

/// Center `s` in a field of `width` columns, truncating with `tail` first.
///
/// Odd leftovers go to the right pad.
pub fn align_center(s: &str, width: usize, tail: &str) -> String {
    let text = truncate_with_tail(s, width, tail);
    if text.is_empty() {
        return " ".repeat(width);
    }
    let len = visible_width(&text);
    let right_edge = width - (width - len) / 2;
    let padded_right = format!("{text:<right_edge$}");
    format!("{padded_right:>width$}")
}

/// Split `line` into pieces of at most `max_width` chars.
pub fn chunk_by_width(line: &str, max_width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(max_width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}
