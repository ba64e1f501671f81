//! Composable UI component renderers.
//!
//! Each component appends its lines to the frame being built. The layout
//! functions below stack them per view.
//!
//! # Components
//!
//! - [`header`]: Title bar with a right-aligned summary
//! - [`search`]: Query box with the active genre filter
//! - [`spotlight`]: Featured title banner
//! - [`cards`]: Three-line cards for catalog and favorites listings
//! - [`pagination`]: Page bar with a window around the current page
//! - [`detail`]: Full detail page with episodes
//! - [`status`]: Loading, notice and error line
//! - [`empty`]: Message for listings with nothing to show
//! - [`footer`]: Command hints
//!
//! # Layout Modes
//!
//! - [`render_catalog_mode`]: Header + Search + Spotlight + Status + Cards + Pagination + Footer
//! - [`render_favorites_mode`]: Header + Status + Cards or Empty + Footer
//! - [`render_detail_mode`]: Header + Status + Detail + Footer

mod cards;
mod detail;
mod empty;
mod footer;
mod header;
mod pagination;
mod search;
mod spotlight;
mod status;

pub use empty::render_empty_state;

use crate::ui::helpers::push_border;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, UIViewModel};

use cards::render_cards;
use detail::render_detail;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use spotlight::render_spotlight;
use status::render_status;

fn render_top(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    push_border(out, &theme.colors.border, cols);
}

fn render_bottom(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    push_border(out, &theme.colors.border, cols);
    render_footer(out, &vm.footer, theme, cols);
}

/// Renders the catalog layout.
///
/// ```text
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Spotlight]
/// [Status]
/// [Cards]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
pub fn render_catalog_mode(
    out: &mut String,
    vm: &UIViewModel,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
) {
    render_top(out, vm, theme, cols);
    render_search_bar(out, search, theme, cols);
    if let Some(spotlight) = &vm.spotlight {
        render_spotlight(out, spotlight, theme, cols);
    }
    if let Some(status) = &vm.status {
        render_status(out, status, theme, cols);
    }
    render_cards(out, &vm.cards, theme, cols);
    if let Some(pagination) = &vm.pagination {
        out.push('\n');
        render_pagination(out, pagination, theme);
    }
    render_bottom(out, vm, theme, cols);
}

/// Renders the favorites layout, or the empty state when nothing is saved.
pub fn render_favorites_mode(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    render_top(out, vm, theme, cols);
    if let Some(status) = &vm.status {
        render_status(out, status, theme, cols);
    }
    match &vm.empty_state {
        Some(empty) => render_empty_state(out, empty, theme, cols),
        None => render_cards(out, &vm.cards, theme, cols),
    }
    render_bottom(out, vm, theme, cols);
}

/// Renders the detail layout. Before the detail arrives only the status
/// line sits between header and footer.
pub fn render_detail_mode(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    render_top(out, vm, theme, cols);
    if let Some(status) = &vm.status {
        render_status(out, status, theme, cols);
    }
    if let Some(detail) = &vm.detail {
        render_detail(out, detail, theme, cols);
    }
    render_bottom(out, vm, theme, cols);
}
