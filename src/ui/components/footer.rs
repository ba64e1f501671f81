//! Footer component renderer.

use crate::ui::helpers::push_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the command hints centered and dimmed, truncated to `cols`.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    push_centered(out, &Theme::fg(&theme.colors.text_dim), &footer.keybindings, cols);
}
