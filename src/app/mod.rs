//! Application layer: state, events and the actions they produce.
//!
//! ```text
//! Command → Event → handle_event → State Mutations → Actions → Runtime
//!                        ↑                                        ↓
//!                        └────── Fetch / Load completions ────────┘
//! ```
//!
//! - [`state`]: catalog query state, the app state container and view models
//! - [`favorites`]: the injectable favorites set
//! - [`handler`]: the reducer turning events into state changes and actions
//! - [`actions`]: side effects executed by [`crate::runtime`]
//! - [`pagination`]: the page-number window of the pagination bar
//! - [`input`]: command-line parsing for the terminal front-end
//! - [`modes`]: which view is in front

pub mod actions;
pub mod favorites;
pub mod handler;
pub mod input;
pub mod modes;
pub mod pagination;
pub mod state;

pub use actions::Action;
pub use favorites::FavoritesStore;
pub use handler::{handle_event, Event};
pub use modes::View;
pub use state::{AppState, CatalogState, FETCH_FAILED_MESSAGE, NO_RESULTS_MESSAGE};
