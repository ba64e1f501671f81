//! Search bar component renderer.
//!
//! Renders the query box above the catalog listing, with the active genre
//! filter on the right-hand side of the box.

use crate::ui::helpers::{display_width, push_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the 3-line search box.
///
/// ```text
///   ┌──────────────────────────────────────────────────────────────────┐
///   │ Search: cowboy…                                  Genre: Sci-Fi   │
///   └──────────────────────────────────────────────────────────────────┘
/// ```
///
/// A trailing `…` after the query means the typed text is still waiting for
/// the debounce window and has not been sent yet.
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let frame = Theme::fg(&theme.colors.accent);

    push_line(out, &frame, &format!("{margin}┌{}┐", "─".repeat(inner_width)));

    let pending = if search.is_pending { "…" } else { "" };
    let genre = search
        .genre
        .as_ref()
        .map(|g| format!("Genre: {g} "))
        .unwrap_or_default();
    let query_width = inner_width.saturating_sub(display_width(&genre));
    let query = truncate(&format!(" Search: {}{pending}", search.query), query_width);
    let padding = query_width.saturating_sub(display_width(&query));

    let genre_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    let middle = format!(
        "{margin}│{}{query}{}{genre_style}{genre}{}{frame}│",
        Theme::fg(&theme.colors.text_normal),
        " ".repeat(padding),
        Theme::reset(),
    );
    push_line(out, &frame, &middle);

    push_line(out, &frame, &format!("{margin}└{}┘", "─".repeat(inner_width)));
}
