//! View models representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! strings only; no formatting decisions are left to the components.

use crate::app::pagination::PageMarker;
use crate::domain::MediaId;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present on the catalog view only.
    pub search_bar: Option<SearchBarInfo>,

    /// Hero banner, catalog view only.
    pub spotlight: Option<SpotlightInfo>,

    /// Cards of the catalog or favorites listing.
    pub cards: Vec<CardItem>,

    pub pagination: Option<PaginationInfo>,

    /// Present on the detail view once loaded.
    pub detail: Option<DetailInfo>,

    /// Loading, soft-empty or error line.
    pub status: Option<StatusLine>,

    /// Shown instead of the listing when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Right-aligned summary, e.g. `"5000 titles"` or `"3 favorites"`.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text as typed, committed or not.
    pub query: String,
    pub genre: Option<String>,
    /// Typed text has not been committed yet.
    pub is_pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotlightInfo {
    pub id: MediaId,
    pub title: String,
    pub synopsis: String,
    pub score: String,
    pub image_url: Option<String>,
    pub trailer_url: Option<String>,
}

/// One card of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub id: MediaId,
    pub title: String,
    pub is_favorite: bool,
    pub score: String,
    pub season: String,
    pub episodes: String,
    pub genres: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub markers: Vec<PageMarker>,
    pub current: u32,
    pub can_prev: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub id: MediaId,
    pub title: String,
    /// English and native names, when they differ from the title.
    pub alt_titles: Vec<String>,
    pub is_favorite: bool,
    /// `"TV · FINISHED · 26 eps · Spring 1998"` style facts line.
    pub facts: String,
    pub score: String,
    pub start_date: Option<String>,
    pub genres: String,
    pub synopsis: String,
    pub cover_url: Option<String>,
    pub trailer_url: Option<String>,
    pub episodes: Vec<EpisodeLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeLine {
    pub number: u32,
    pub title: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Notice,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

/// Message shown when a listing has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
