//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O. It mutates
//! state and returns a list of [`Action`]s; the
//! [`CatalogController`](crate::runtime::CatalogController) executes them by
//! spawning fetches and timers whose outcomes come back as new events.
//!
//! ```text
//! Event ──► handle_event ──► Vec<Action> ──► CatalogController
//!   ▲                                             │
//!   └──────────── FetchSucceeded / Loaded ◄───────┘
//! ```

use crate::app::handler::Event;
use crate::domain::MediaId;
use crate::source::PageRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetches one catalog page with retry.
    ///
    /// The result is reported as `FetchSucceeded` or `FetchFailed` carrying
    /// the same `generation`, which lets the handler drop stale completions.
    FetchPage {
        generation: u64,
        request: PageRequest,
    },

    /// Feeds `Event` back after the debounce window, replacing any pending one.
    Debounce(Event),

    /// Drops the pending debounced event, if any.
    CancelDebounce,

    /// Loads the detail page for one title.
    LoadDetail(MediaId),

    /// Loads catalog cards for the given favorite ids, in that order.
    ///
    /// `load` is echoed back in [`Event::FavoritesLoaded`](crate::app::Event::FavoritesLoaded)
    /// so results of an older load can be told apart.
    LoadFavorites { load: u64, ids: Vec<MediaId> },

    /// Loads trending titles and picks a spotlight.
    LoadTrending,

    /// Ends the session.
    Quit,
}
