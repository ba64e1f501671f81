//! Event handling and state transitions.
//!
//! [`handle_event`] is the reducer of the browser: it takes one [`Event`],
//! mutates [`AppState`] and returns whether the screen needs a re-render plus
//! the side effects to run. Events come from two places:
//!
//! - user commands parsed by [`parse_command`](crate::app::input::parse_command)
//! - completions reported by the runtime after executing an [`Action`]
//!
//! Fetch failures never surface as `Err` here; they are turned into status
//! messages on the state.

use crate::app::modes::View;
use crate::app::{Action, AppState};
use crate::domain::{CatalogItem, MediaDetail, MediaId, Result, Spotlight};
use crate::source::PageResult;
use crate::ui::viewmodel::{StatusKind, StatusLine};
use crate::ui::Theme;

/// Events triggered by user commands or by completed side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Loads the first page and the spotlight.
    Start,

    /// Search box edited; committed after the debounce window.
    SearchInput(String),
    /// Debounced commit of the typed search text.
    CommitSearch(String),
    /// Commits the typed text immediately, skipping the debounce.
    SubmitSearch,

    /// Sets (`Some`) or clears (`None`) the genre filter.
    SetGenre(Option<String>),
    SetPage(u32),
    NextPage,
    PrevPage,
    /// Refetches the current page with unchanged parameters.
    Refresh,

    FetchSucceeded {
        generation: u64,
        result: PageResult,
    },
    FetchFailed {
        generation: u64,
        message: String,
    },

    ToggleFavorite(MediaId),
    RemoveFavorite(MediaId),

    ShowCatalog,
    ShowFavorites,
    ShowDetail(MediaId),
    /// Picks a new spotlight from the trending list.
    ShowSpotlight,

    DetailLoaded {
        id: MediaId,
        detail: Option<MediaDetail>,
    },
    DetailFailed {
        id: MediaId,
        message: String,
    },
    FavoritesLoaded {
        load: u64,
        items: Vec<CatalogItem>,
    },
    TrendingLoaded {
        items: Vec<CatalogItem>,
        seed: u64,
    },
    TrendingFailed(String),

    ToggleTheme,
    Quit,
}

fn fetch(state: &mut AppState) -> Action {
    let request = state.catalog.begin_fetch();
    Action::FetchPage { generation: state.catalog.generation, request }
}

fn loading(message: &str) -> Option<StatusLine> {
    Some(StatusLine { kind: StatusKind::Loading, message: message.to_string() })
}

/// Processes an event, mutates state and returns `(render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that validate
/// input against state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::Start => {
            let actions = vec![fetch(state), Action::LoadTrending];
            Ok((true, actions))
        }
        Event::SearchInput(text) => {
            state.catalog.search_input.clone_from(text);
            tracing::trace!(input = %text, "search input updated");
            Ok((true, vec![Action::Debounce(Event::CommitSearch(text.clone()))]))
        }
        Event::CommitSearch(text) => {
            if !state.catalog.commit_search(text) {
                tracing::debug!(search = %text, "search unchanged, skipping fetch");
                return Ok((false, vec![]));
            }
            Ok((true, vec![fetch(state)]))
        }
        Event::SubmitSearch => {
            let text = state.catalog.search_input.clone();
            let mut actions = vec![Action::CancelDebounce];
            if state.catalog.commit_search(&text) {
                actions.push(fetch(state));
            }
            Ok((true, actions))
        }
        Event::SetGenre(genre) => {
            tracing::debug!(genre = ?genre, "genre selected");
            state.catalog.set_genre(genre.clone());
            Ok((true, vec![fetch(state)]))
        }
        Event::SetPage(page) => {
            if !state.catalog.set_page(*page) {
                return Ok((false, vec![]));
            }
            Ok((true, vec![fetch(state)]))
        }
        Event::NextPage => {
            if !state.catalog.has_next_page() {
                tracing::debug!(page = state.catalog.page, "already on last page");
                return Ok((false, vec![]));
            }
            let next = state.catalog.page + 1;
            handle_event(state, &Event::SetPage(next))
        }
        Event::PrevPage => {
            if !state.catalog.has_prev_page() {
                return Ok((false, vec![]));
            }
            let prev = state.catalog.page - 1;
            handle_event(state, &Event::SetPage(prev))
        }
        Event::Refresh => Ok((true, vec![fetch(state)])),
        Event::FetchSucceeded { generation, result } => {
            let applied = state.catalog.apply_page(*generation, result.clone());
            Ok((applied && state.view == View::Catalog, vec![]))
        }
        Event::FetchFailed { generation, message } => {
            let applied = state.catalog.apply_failure(*generation, message);
            Ok((applied && state.view == View::Catalog, vec![]))
        }
        Event::ToggleFavorite(id) => {
            let now_favorite = state.favorites.toggle(*id);
            if !now_favorite {
                state.favorite_items.retain(|item| item.id != *id);
            }
            Ok((true, vec![]))
        }
        Event::RemoveFavorite(id) => {
            if !state.favorites.remove(*id) {
                tracing::debug!(id, "not a favorite");
                return Ok((false, vec![]));
            }
            state.favorite_items.retain(|item| item.id != *id);
            Ok((true, vec![]))
        }
        Event::ShowCatalog => {
            state.view = View::Catalog;
            state.notice = None;
            Ok((true, vec![]))
        }
        Event::ShowFavorites => {
            state.view = View::Favorites;
            state.notice = None;
            if state.favorites.is_empty() {
                state.favorite_items.clear();
                return Ok((true, vec![]));
            }
            state.favorites_load += 1;
            state.notice = loading("Loading favorites...");
            let action = Action::LoadFavorites { load: state.favorites_load, ids: state.favorites.ids().to_vec() };
            Ok((true, vec![action]))
        }
        Event::ShowDetail(id) => {
            state.view = View::Detail(*id);
            state.detail = None;
            state.notice = loading("Loading details...");
            Ok((true, vec![Action::LoadDetail(*id)]))
        }
        Event::ShowSpotlight => {
            state.view = View::Catalog;
            Ok((false, vec![Action::LoadTrending]))
        }
        Event::DetailLoaded { id, detail } => {
            if state.view != View::Detail(*id) {
                tracing::debug!(id, "detail arrived after leaving the page");
                return Ok((false, vec![]));
            }
            state.detail.clone_from(detail);
            state.notice = detail.is_none().then(|| StatusLine {
                kind: StatusKind::Notice,
                message: format!("No anime found with id {id}."),
            });
            Ok((true, vec![]))
        }
        Event::DetailFailed { id, message } => {
            if state.view != View::Detail(*id) {
                return Ok((false, vec![]));
            }
            tracing::warn!(id, reason = %message, "detail fetch failed");
            state.notice = Some(StatusLine {
                kind: StatusKind::Error,
                message: "Failed to load details. Please try again later.".to_string(),
            });
            Ok((true, vec![]))
        }
        Event::FavoritesLoaded { load, items } => {
            if *load != state.favorites_load {
                tracing::debug!(load, latest = state.favorites_load, "dropping stale favorites load");
                return Ok((false, vec![]));
            }
            // favorites may have changed while the lookups were in flight
            let mut items: Vec<CatalogItem> =
                items.iter().filter(|item| state.favorites.contains(item.id)).cloned().collect();
            let ids = state.favorites.ids();
            items.sort_by_key(|item| ids.iter().position(|&id| id == item.id));

            let missing = state.favorites.len().saturating_sub(items.len());
            state.favorite_items = items;
            if state.view != View::Favorites {
                return Ok((false, vec![]));
            }
            state.notice = (missing > 0).then(|| StatusLine {
                kind: StatusKind::Notice,
                message: format!("{missing} favorite(s) could not be loaded."),
            });
            Ok((true, vec![]))
        }
        Event::TrendingLoaded { items, seed } => {
            state.spotlight = Spotlight::pick(items.clone(), *seed);
            tracing::debug!(
                candidates = items.len(),
                picked = ?state.spotlight.as_ref().map(|s| s.item.id),
                "spotlight picked"
            );
            Ok((state.view == View::Catalog, vec![]))
        }
        Event::TrendingFailed(message) => {
            tracing::warn!(reason = %message, "trending fetch failed");
            Ok((false, vec![]))
        }
        Event::ToggleTheme => {
            state.theme = Theme::builtin(state.theme.appearance.opposite());
            tracing::debug!(theme = %state.theme.name, "theme toggled");
            Ok((true, vec![]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

/// Variant name without payload, for span fields.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Start => "Start",
        Event::SearchInput(_) => "SearchInput",
        Event::CommitSearch(_) => "CommitSearch",
        Event::SubmitSearch => "SubmitSearch",
        Event::SetGenre(_) => "SetGenre",
        Event::SetPage(_) => "SetPage",
        Event::NextPage => "NextPage",
        Event::PrevPage => "PrevPage",
        Event::Refresh => "Refresh",
        Event::FetchSucceeded { .. } => "FetchSucceeded",
        Event::FetchFailed { .. } => "FetchFailed",
        Event::ToggleFavorite(_) => "ToggleFavorite",
        Event::RemoveFavorite(_) => "RemoveFavorite",
        Event::ShowCatalog => "ShowCatalog",
        Event::ShowFavorites => "ShowFavorites",
        Event::ShowDetail(_) => "ShowDetail",
        Event::ShowSpotlight => "ShowSpotlight",
        Event::DetailLoaded { .. } => "DetailLoaded",
        Event::DetailFailed { .. } => "DetailFailed",
        Event::FavoritesLoaded { .. } => "FavoritesLoaded",
        Event::TrendingLoaded { .. } => "TrendingLoaded",
        Event::TrendingFailed(_) => "TrendingFailed",
        Event::ToggleTheme => "ToggleTheme",
        Event::Quit => "Quit",
    }
}
