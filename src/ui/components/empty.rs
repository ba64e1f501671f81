//! Empty state component renderer.

use crate::ui::helpers::push_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message with a blank line above and below.
///
/// ```text
///
///                               No favorites yet
///                 Use `fav <id>` on any title to add it here
///
/// ```
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');
    push_centered(
        out,
        &format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.empty_state_fg)),
        &empty.message,
        cols,
    );
    push_centered(
        out,
        &format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
        &empty.subtitle,
        cols,
    );
    out.push('\n');
}
