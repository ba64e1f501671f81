//! Top-level rendering coordinator.
//!
//! Rendering happens in two steps:
//!
//! 1. **View Model Computation**: `AppState` becomes a [`UIViewModel`]
//! 2. **Component Rendering**: the view model is laid out into a frame
//!
//! The frame is returned as a `String` of ANSI-styled lines. Writing it to
//! the terminal, and clearing the screen first, is up to the caller.

use crate::app::{AppState, View};
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the current view of `state` at `cols` columns.
///
/// ```rust
/// use yamiyume::app::{AppState, FavoritesStore};
/// use yamiyume::ui::{render, Theme};
///
/// let state = AppState::new(Theme::default(), FavoritesStore::new());
/// let frame = render(&state, 80);
/// assert!(frame.contains("Yamiyume"));
/// ```
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(cols);
    render_viewmodel(&viewmodel, state.view, &state.theme, cols)
}

/// Lays out a pre-computed view model for `view`.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, view: View, theme: &Theme, cols: usize) -> String {
    let _span = tracing::trace_span!("render", ?view, cols, cards = vm.cards.len()).entered();
    let mut out = String::new();

    match view {
        View::Catalog => match &vm.search_bar {
            Some(search) => components::render_catalog_mode(&mut out, vm, search, theme, cols),
            None => components::render_favorites_mode(&mut out, vm, theme, cols),
        },
        View::Favorites => components::render_favorites_mode(&mut out, vm, theme, cols),
        View::Detail(_) => components::render_detail_mode(&mut out, vm, theme, cols),
    }

    out
}
