//! Domain layer for the catalog browser.
//!
//! Core types independent of the HTTP client and the terminal renderer: the
//! catalog item projection shown on cards and detail pages, the genre list
//! used for filtering, and the crate's error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Catalog item, detail and episode models plus display rules
//! - [`genre`]: Known genre labels and fuzzy resolution of user input
//!
//! # Examples
//!
//! ```
//! use yamiyume::domain::{clean_synopsis, score_display};
//!
//! assert_eq!(clean_synopsis(Some("<i>Hello</i> &amp; bye")), "Hello & bye");
//! assert_eq!(score_display(Some(86)), "8.6");
//! assert_eq!(score_display(None), "N/A");
//! ```

pub mod error;
pub mod genre;
pub mod item;

pub use error::{Result, YamiyumeError};
pub use genre::{resolve_genre, GENRES};
pub use item::{
    clean_synopsis, score_display, CatalogItem, EpisodeEntry, MediaDetail, MediaId, Spotlight,
    NO_DESCRIPTION,
};
