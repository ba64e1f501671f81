//! Which screen the browser is showing.
//!
//! The catalog listing is the home screen. Favorites and detail are overlays
//! that return to the catalog without disturbing its query, so the catalog
//! state keeps running (and can receive fetch results) while another view is
//! in front.

use crate::domain::MediaId;

/// Screen currently in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Paginated, filterable listing with the spotlight banner on top.
    #[default]
    Catalog,

    /// Every favorited title, fetched by id.
    Favorites,

    /// Detail page and episode browser for one title.
    Detail(MediaId),
}

impl View {
    /// Title shown in the header bar.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Catalog => "Catalog",
            Self::Favorites => "Favorites",
            Self::Detail(_) => "Details",
        }
    }
}
