//! Media source abstraction.
//!
//! The catalog never talks to HTTP directly: it asks a [`MediaSource`] for one
//! page at a time. [`anilist::AniListClient`] is the production implementation;
//! tests substitute scripted sources.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              MediaSource trait               │
//! │  fetch_page(&PageRequest) -> PageResult      │
//! │  fetch_trending(limit) -> Vec<CatalogItem>   │
//! │  fetch_detail(id) -> Option<MediaDetail>     │
//! └──────────────────────────────────────────────┘
//!                       △
//!              ┌────────┴────────┐
//!              │  AniListClient  │
//!              └─────────────────┘
//! ```

pub mod anilist;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CatalogItem, MediaDetail, MediaId, Result};

/// Fixed page size used by every catalog listing.
pub const DEFAULT_PER_PAGE: u32 = 24;

/// Parameters for one catalog page request.
///
/// `search` and `genre` are `None` rather than empty strings when no filter is
/// active: the source treats an empty search differently from no search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub genre: Option<String>,
}

impl PageRequest {
    /// Builds a request, normalizing blank filters to `None`.
    #[must_use]
    pub fn new(page: u32, per_page: u32, search: &str, genre: Option<&str>) -> Self {
        let search = search.trim();
        Self {
            page: page.max(1),
            per_page,
            search: (!search.is_empty()).then(|| search.to_string()),
            genre: genre.filter(|g| !g.trim().is_empty()).map(str::to_string),
        }
    }
}

/// Pagination metadata reported alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u32,
}

/// One page of catalog results, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub items: Vec<CatalogItem>,
    pub page_info: PageInfo,
}

/// Read-only access to an external media catalog.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Fetches one page of titles matching the request's filters.
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult>;

    /// Fetches the currently trending titles for the hero banner.
    ///
    /// Default implementation returns an empty list (not every source ranks
    /// by trend).
    async fn fetch_trending(&self, _limit: u32) -> Result<Vec<CatalogItem>> {
        Ok(vec![])
    }

    /// Fetches the detail page data for one title.
    ///
    /// Returns `Ok(None)` when the source does not know the identifier.
    async fn fetch_detail(&self, _id: MediaId) -> Result<Option<MediaDetail>> {
        Ok(None)
    }

    /// Source name for logging.
    fn name(&self) -> &'static str;
}
