//! Header component renderer.

use crate::ui::helpers::{display_width, push_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar: title on the left, summary on the right.
///
/// The line is padded to `cols` so the optional header background spans the
/// whole width. When both do not fit, the summary is dropped first.
///
/// ```text
///  Yamiyume · Catalog                                         18942 titles
/// ```
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let title = truncate(&header.title, cols);
    let title_len = display_width(&title);
    let summary = format!("{} ", header.summary);
    let summary_len = display_width(&summary);

    let line = if title_len + summary_len < cols {
        format!("{title}{}{summary}", " ".repeat(cols - title_len - summary_len))
    } else {
        format!("{title}{}", " ".repeat(cols.saturating_sub(title_len)))
    };

    let mut style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        style.push_str(&Theme::bg(bg));
    }
    push_line(out, &style, &line);
}
