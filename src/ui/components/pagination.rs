//! Pagination bar renderer.

use crate::app::pagination::PageMarker;
use crate::ui::helpers::push_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders the page bar with the current page bracketed.
///
/// ```text
///   ‹ prev   1  …  4  5 [6] 7  8  …  20   next ›
/// ```
///
/// `prev` and `next` are dimmed when there is no page in that direction.
pub fn render_pagination(out: &mut String, info: &PaginationInfo, theme: &Theme) {
    let dim = Theme::fg(&theme.colors.text_dim);
    let normal = Theme::fg(&theme.colors.text_normal);
    let accent = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));

    let arrow = |enabled: bool, label: &str| {
        let style = if enabled { &normal } else { &dim };
        format!("{style}{label}{}", Theme::reset())
    };

    let mut line = format!("  {}  ", arrow(info.can_prev, "‹ prev"));
    for marker in &info.markers {
        match marker {
            PageMarker::Page(n) if *n == info.current => {
                line.push_str(&format!("{accent}[{n}]{}", Theme::reset()));
            }
            PageMarker::Page(n) => line.push_str(&format!("{normal} {n} {}", Theme::reset())),
            PageMarker::Ellipsis => line.push_str(&format!("{dim} … {}", Theme::reset())),
        }
    }
    line.push_str(&format!("  {}", arrow(info.can_next, "next ›")));

    push_line(out, "", &line);
}
