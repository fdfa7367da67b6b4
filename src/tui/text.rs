//! Shared text formatting helpers used by terminal rendering.

/// Count visible character width (single-cell approximation).
pub fn visible_width(s: &str) -> usize {
    s.chars().count()
}

/// Clip a string to at most `max_width` visible characters.
pub fn clip_to_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Left-align `s` in a field of `width` cells. Longer text is left as is.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(s));
    let mut out = String::with_capacity(s.len() + fill);
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(fill));
    out
}

/// Clip to `cols` cells, ending in `...` when something was cut.
pub fn ellipsize(s: &str, cols: usize) -> String {
    if visible_width(s) <= cols {
        return s.to_string();
    }
    if cols <= 3 {
        return clip_to_width(s, cols);
    }
    format!("{}...", clip_to_width(s, cols - 3))
}
