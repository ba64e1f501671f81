//! Async side effects of the browser.
//!
//! The application layer is synchronous and pure; this module runs what it
//! asks for on tokio:
//!
//! - [`controller`]: owns the state, executes actions, collects completions
//! - [`retry`]: bounded retry with exponential backoff and supersede checks
//! - [`debounce`]: cancel-and-reschedule timer for search input

pub mod controller;
pub mod debounce;
pub mod retry;

pub use controller::{CatalogController, ControllerSettings, TRENDING_LIMIT};
pub use debounce::Debouncer;
pub use retry::{retry_with_backoff, RetryPolicy};
