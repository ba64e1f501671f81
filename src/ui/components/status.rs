//! Status line renderer for loading, notice and error messages.

use crate::ui::helpers::{push_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

pub fn render_status(out: &mut String, status: &StatusLine, theme: &Theme, cols: usize) {
    let (icon, color) = match status.kind {
        StatusKind::Loading => ("⟳", &theme.colors.loading_fg),
        StatusKind::Notice => ("ℹ", &theme.colors.notice_fg),
        StatusKind::Error => ("✗", &theme.colors.error_fg),
    };
    let text = truncate(&format!(" {icon} {}", status.message), cols);
    push_line(out, &Theme::fg(color), &text);
}
