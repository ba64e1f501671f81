//! Shared rendering utilities.
//!
//! Components build a frame by appending whole lines to a `String`. Widths
//! are counted in characters, which is close enough for the Latin and kana
//! titles the catalog serves.

use crate::ui::theme::Theme;

/// Clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Number of characters in `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending with `…` when cut.
///
/// ```rust
/// use yamiyume::ui::helpers::truncate;
///
/// assert_eq!(truncate("Neon Genesis Evangelion", 10), "Neon Gene…");
/// assert_eq!(truncate("Lain", 10), "Lain");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    let mut kept: String = text.chars().take(max.saturating_sub(1)).collect();
    if max > 0 {
        kept.push('…');
    }
    kept
}

/// Appends one line: `text` wrapped in `style` and reset.
pub fn push_line(out: &mut String, style: &str, text: &str) {
    out.push_str(style);
    out.push_str(text);
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends a full-width horizontal rule.
pub fn push_border(out: &mut String, color: &str, cols: usize) {
    push_line(out, &Theme::fg(color), &"─".repeat(cols));
}

/// Appends `text` centered within `cols`, padded on both sides.
pub fn push_centered(out: &mut String, style: &str, text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = display_width(&text);
    let padding = cols.saturating_sub(len) / 2;
    let line = format!(
        "{}{text}{}",
        " ".repeat(padding),
        " ".repeat(cols.saturating_sub(padding + len))
    );
    push_line(out, style, &line);
}

/// Greedy word wrap to `width` characters per line.
///
/// Words longer than `width` get a line of their own rather than being split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() && display_width(&current) + 1 + display_width(word) > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("進撃の巨人 The Final Season", 6), "進撃の巨人…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn centered_line_fills_width() {
        let mut out = String::new();
        push_centered(&mut out, "", "hi", 6);
        assert_eq!(out, format!("  hi  {}\n", Theme::reset()));
    }

    #[test]
    fn wrap_breaks_on_words_and_keeps_paragraphs() {
        let lines = wrap("one two three four\n\nfive", 9);
        assert_eq!(lines, vec!["one two", "three", "four", "", "five"]);
    }

    #[test]
    fn wrap_keeps_long_words_whole() {
        assert_eq!(wrap("a supercalifragilistic b", 5), vec!["a", "supercalifragilistic", "b"]);
    }
}
