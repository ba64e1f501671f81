//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the browser. It owns the two
//! independent containers the views are composed from:
//!
//! - [`CatalogState`]: query parameters, the current page of results and the
//!   loading/error flags of the catalog query controller
//! - [`FavoritesStore`]: the user's favorites set
//!
//! plus the per-view data (detail page, favorites listing, spotlight) and the
//! theme. Nothing in here performs I/O; the event handler mutates state and
//! the runtime executes the resulting actions.
//!
//! # Generations
//!
//! Every fetch started by [`CatalogState::begin_fetch`] gets a fresh
//! generation number. A completion is applied only while its generation is
//! still the latest one, so a slow response for an old query can never
//! overwrite the results of a newer query.

use crate::app::favorites::FavoritesStore;
use crate::app::modes::View;
use crate::app::pagination::pagination_window;
use crate::domain::{CatalogItem, MediaDetail, Spotlight};
use crate::source::{PageRequest, PageResult, DEFAULT_PER_PAGE};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, DetailInfo, EmptyState, EpisodeLine, FooterInfo, HeaderInfo, PaginationInfo,
    SearchBarInfo, SpotlightInfo, StatusKind, StatusLine, UIViewModel,
};

/// Soft condition: the query succeeded but matched nothing.
pub const NO_RESULTS_MESSAGE: &str = "No anime found. Please try a different search.";

/// The query failed after every retry.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch anime data. Please try again later.";

/// State of the catalog query controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    /// 1-based page being shown or requested.
    pub page: u32,
    pub per_page: u32,

    /// Search text as typed, not yet committed by the debounce.
    pub search_input: String,

    /// Committed search text the current results were requested with.
    pub search_text: String,

    pub selected_genre: Option<String>,

    /// Results of the latest successful fetch, replaced wholesale.
    pub items: Vec<CatalogItem>,
    pub last_page: u32,
    pub total: u32,

    pub is_loading: bool,
    pub error_message: Option<String>,

    /// Generation of the latest fetch; completions for older ones are dropped.
    pub generation: u64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl CatalogState {
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            search_input: String::new(),
            search_text: String::new(),
            selected_genre: None,
            items: Vec::new(),
            last_page: 1,
            total: 0,
            is_loading: false,
            error_message: None,
            generation: 0,
        }
    }

    /// Starts a new fetch for the current parameters.
    ///
    /// Bumps the generation, marks the catalog as loading and clears any
    /// previous error. Existing items stay visible until the result arrives.
    pub fn begin_fetch(&mut self) -> PageRequest {
        self.generation += 1;
        self.is_loading = true;
        self.error_message = None;

        let request = PageRequest::new(
            self.page,
            self.per_page,
            &self.search_text,
            self.selected_genre.as_deref(),
        );
        tracing::debug!(
            generation = self.generation,
            page = request.page,
            search = ?request.search,
            genre = ?request.genre,
            "fetch started"
        );
        request
    }

    /// Applies a successful result. Returns `false` if `generation` is stale.
    pub fn apply_page(&mut self, generation: u64, result: PageResult) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "discarding stale page");
            return false;
        }

        let info = result.page_info;
        if info.current_page > 0 {
            self.page = info.current_page;
        }
        self.last_page = info.last_page.max(self.page).max(1);
        self.total = info.total;
        self.items = result.items;
        self.is_loading = false;
        self.error_message = self.items.is_empty().then(|| NO_RESULTS_MESSAGE.to_string());

        tracing::debug!(
            generation,
            items = self.items.len(),
            page = self.page,
            last_page = self.last_page,
            "page applied"
        );
        true
    }

    /// Records a failed fetch. Items from the previous success are kept.
    ///
    /// Returns `false` if `generation` is stale.
    pub fn apply_failure(&mut self, generation: u64, reason: &str) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "discarding stale failure");
            return false;
        }

        tracing::warn!(generation, reason, "catalog fetch failed");
        self.is_loading = false;
        self.error_message = Some(FETCH_FAILED_MESSAGE.to_string());
        true
    }

    /// Commits search text. Returns `false` when it equals the committed text.
    pub fn commit_search(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text == self.search_text {
            return false;
        }
        self.search_text = text.to_string();
        self.page = 1;
        true
    }

    /// Sets or clears the genre filter and resets to the first page.
    pub fn set_genre(&mut self, genre: Option<String>) {
        self.selected_genre = genre;
        self.page = 1;
    }

    /// Moves to `page`, clamped into `[1, last_page]`.
    ///
    /// Returns `false` if the clamped page is the current one.
    pub fn set_page(&mut self, page: u32) -> bool {
        let clamped = page.clamp(1, self.last_page.max(1));
        if clamped != page {
            tracing::debug!(requested = page, clamped, last_page = self.last_page, "page clamped");
        }
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        true
    }

    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.last_page
    }

    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Typed text is waiting for the debounce to commit it.
    #[must_use]
    pub fn search_pending(&self) -> bool {
        self.search_input.trim() != self.search_text
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogState,
    pub favorites: FavoritesStore,
    pub view: View,

    /// Detail page data; `None` while loading or when not found.
    pub detail: Option<MediaDetail>,

    /// Cards for the favorites view, in favorites order.
    pub favorite_items: Vec<CatalogItem>,

    /// Bumped on every favorites load; older results are dropped.
    pub favorites_load: u64,

    pub spotlight: Option<Spotlight>,

    /// Loading or error line for the favorites and detail views.
    pub notice: Option<StatusLine>,

    pub theme: Theme,
}

impl AppState {
    /// Creates state with the given theme and an injected favorites store.
    ///
    /// ```
    /// use yamiyume::app::{AppState, FavoritesStore};
    /// use yamiyume::ui::Theme;
    ///
    /// let state = AppState::new(Theme::default(), FavoritesStore::new());
    /// assert_eq!(state.catalog.page, 1);
    /// assert!(!state.catalog.is_loading);
    /// ```
    #[must_use]
    pub fn new(theme: Theme, favorites: FavoritesStore) -> Self {
        Self {
            catalog: CatalogState::default(),
            favorites,
            view: View::Catalog,
            detail: None,
            favorite_items: Vec::new(),
            favorites_load: 0,
            spotlight: None,
            notice: None,
            theme,
        }
    }

    /// Replaces the page size used by catalog fetches.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.catalog.per_page = per_page.max(1);
        self
    }

    /// Computes the view model for the screen in front.
    ///
    /// `cols` bounds the width of single-line fields such as titles and
    /// synopsis excerpts.
    #[must_use]
    pub fn compute_viewmodel(&self, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", view = ?self.view, cols).entered();

        let mut vm = UIViewModel {
            header: self.compute_header(),
            search_bar: None,
            spotlight: None,
            cards: Vec::new(),
            pagination: None,
            detail: None,
            status: None,
            empty_state: None,
            footer: self.compute_footer(),
        };

        match self.view {
            View::Catalog => {
                vm.search_bar = Some(SearchBarInfo {
                    query: self.catalog.search_input.clone(),
                    genre: self.catalog.selected_genre.clone(),
                    is_pending: self.catalog.search_pending(),
                });
                vm.spotlight = self.spotlight.as_ref().map(|s| self.compute_spotlight(s, cols));
                vm.cards = self.compute_cards(&self.catalog.items, cols);
                vm.status = self.compute_catalog_status();
                if !self.catalog.items.is_empty() {
                    vm.pagination = Some(PaginationInfo {
                        markers: pagination_window(self.catalog.page, self.catalog.last_page),
                        current: self.catalog.page,
                        can_prev: self.catalog.has_prev_page(),
                        can_next: self.catalog.has_next_page(),
                    });
                }
            }
            View::Favorites => {
                vm.cards = self.compute_cards(&self.favorite_items, cols);
                vm.status = self.notice.clone();
                if self.favorites.is_empty() {
                    vm.empty_state = Some(EmptyState {
                        message: "No favorites yet".to_string(),
                        subtitle: "Use `fav <id>` on any title to add it here".to_string(),
                    });
                }
            }
            View::Detail(_) => {
                vm.detail = self.detail.as_ref().map(|d| self.compute_detail(d));
                vm.status = self.notice.clone();
            }
        }

        vm
    }

    fn compute_header(&self) -> HeaderInfo {
        let summary = match self.view {
            View::Catalog => format!("{} titles", self.catalog.total),
            View::Favorites => match self.favorites.len() {
                1 => "1 favorite".to_string(),
                n => format!("{n} favorites"),
            },
            View::Detail(id) => format!("#{id}"),
        };
        HeaderInfo {
            title: format!(" Yamiyume · {} ", self.view.title()),
            summary,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.view {
            View::Catalog => {
                "/text: search  genre <name>: filter  n/p: page  show <id>  fav <id>  favs  hero  theme  q: quit"
            }
            View::Favorites => "show <id>  unfav <id>  list: catalog  theme  q: quit",
            View::Detail(_) => "fav <id>  list: catalog  favs  theme  q: quit",
        };
        FooterInfo { keybindings: keybindings.to_string() }
    }

    fn compute_catalog_status(&self) -> Option<StatusLine> {
        if self.catalog.is_loading {
            return Some(StatusLine { kind: StatusKind::Loading, message: "Loading...".to_string() });
        }
        self.catalog.error_message.as_ref().map(|message| StatusLine {
            kind: if message == NO_RESULTS_MESSAGE { StatusKind::Notice } else { StatusKind::Error },
            message: message.clone(),
        })
    }

    fn compute_cards(&self, items: &[CatalogItem], cols: usize) -> Vec<CardItem> {
        const EXCERPT_INDENT: usize = 8;

        items
            .iter()
            .map(|item| CardItem {
                id: item.id,
                title: truncate(&item.title, cols.saturating_sub(24).max(16)),
                is_favorite: self.favorites.contains(item.id),
                score: item.score_display(),
                season: item.season.clone().unwrap_or_else(|| "-".to_string()),
                episodes: item.episodes_display(),
                genres: item.genres.join(", "),
                excerpt: item.synopsis_excerpt(cols.saturating_sub(EXCERPT_INDENT).max(20)),
            })
            .collect()
    }

    fn compute_spotlight(&self, spotlight: &Spotlight, cols: usize) -> SpotlightInfo {
        let item = &spotlight.item;
        SpotlightInfo {
            id: item.id,
            title: item.preferred_title().to_string(),
            synopsis: item.synopsis_excerpt(cols.saturating_sub(4).max(20)),
            score: item.score_display(),
            image_url: spotlight.image_url().map(str::to_string),
            trailer_url: item.trailer_url.clone(),
        }
    }

    fn compute_detail(&self, detail: &MediaDetail) -> DetailInfo {
        let item = &detail.item;

        let alt_titles = [item.english_title.as_ref(), detail.native_title.as_ref()]
            .into_iter()
            .flatten()
            .filter(|t| **t != item.title)
            .cloned()
            .collect();

        let mut facts: Vec<String> = Vec::new();
        facts.extend(detail.format.clone());
        facts.extend(detail.status.clone());
        facts.push(format!("{} eps", item.episodes_display()));
        facts.extend(item.season.clone());

        DetailInfo {
            id: item.id,
            title: item.title.clone(),
            alt_titles,
            is_favorite: self.favorites.contains(item.id),
            facts: facts.join(" · "),
            score: item.score_display(),
            start_date: detail.start_date.map(|d| d.format("%B %-d, %Y").to_string()),
            genres: item.genres.join(", "),
            synopsis: item.synopsis.clone(),
            cover_url: item.cover_url.clone(),
            trailer_url: item.trailer_url.clone(),
            episodes: detail
                .episode_list
                .iter()
                .map(|ep| EpisodeLine { number: ep.number, title: ep.title.clone(), url: ep.url.clone() })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PageInfo;
    use chrono::NaiveDate;

    fn page(items: Vec<CatalogItem>, current_page: u32, last_page: u32) -> PageResult {
        let total = u32::try_from(items.len()).unwrap_or(0);
        PageResult { items, page_info: PageInfo { current_page, last_page, total } }
    }

    #[test]
    fn begin_fetch_bumps_generation_and_normalizes_filters() {
        let mut catalog = CatalogState::new(24);
        catalog.error_message = Some("old".into());

        let request = catalog.begin_fetch();

        assert_eq!(catalog.generation, 1);
        assert!(catalog.is_loading);
        assert_eq!(catalog.error_message, None);
        assert_eq!(request, PageRequest { page: 1, per_page: 24, search: None, genre: None });
    }

    #[test]
    fn stale_page_is_discarded() {
        let mut catalog = CatalogState::new(24);
        catalog.begin_fetch();
        catalog.begin_fetch();

        assert!(!catalog.apply_page(1, page(vec![CatalogItem::new(1, "old")], 1, 1)));
        assert!(catalog.items.is_empty());
        assert!(catalog.is_loading);

        assert!(catalog.apply_page(2, page(vec![CatalogItem::new(2, "new")], 1, 3)));
        assert_eq!(catalog.items[0].id, 2);
        assert_eq!(catalog.last_page, 3);
        assert!(!catalog.is_loading);
    }

    #[test]
    fn empty_success_sets_soft_message() {
        let mut catalog = CatalogState::new(24);
        let generation = {
            catalog.begin_fetch();
            catalog.generation
        };
        assert!(catalog.apply_page(generation, page(vec![], 1, 1)));
        assert_eq!(catalog.error_message.as_deref(), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn failure_keeps_previous_items() {
        let mut catalog = CatalogState::new(24);
        catalog.begin_fetch();
        catalog.apply_page(1, page(vec![CatalogItem::new(1, "kept")], 1, 1));

        catalog.begin_fetch();
        assert!(catalog.apply_failure(2, "timeout"));

        assert_eq!(catalog.items.len(), 1);
        assert_eq!(catalog.error_message.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!catalog.is_loading);
    }

    #[test]
    fn committing_same_text_is_a_no_op() {
        let mut catalog = CatalogState::new(24);
        catalog.page = 4;
        assert!(catalog.commit_search(" naruto "));
        assert_eq!(catalog.page, 1);

        catalog.page = 3;
        assert!(!catalog.commit_search("naruto"));
        assert_eq!(catalog.page, 3);
    }

    #[test]
    fn set_page_clamps_to_known_range() {
        let mut catalog = CatalogState::new(24);
        catalog.last_page = 10;
        assert!(catalog.set_page(42));
        assert_eq!(catalog.page, 10);
        assert!(catalog.set_page(0));
        assert_eq!(catalog.page, 1);
        assert!(!catalog.set_page(1));
    }

    #[test]
    fn genre_change_resets_page() {
        let mut catalog = CatalogState::new(24);
        catalog.page = 7;
        catalog.set_genre(Some("Action".into()));
        assert_eq!(catalog.page, 1);
        assert_eq!(catalog.selected_genre.as_deref(), Some("Action"));
    }

    #[test]
    fn catalog_viewmodel_marks_favorites_and_builds_pagination() {
        let mut state = AppState::new(Theme::default(), FavoritesStore::from_ids([2]));
        state.catalog.begin_fetch();
        let mut rated = CatalogItem::new(2, "Mushishi");
        rated.score = Some(87);
        state.catalog.apply_page(1, page(vec![CatalogItem::new(1, "Kino"), rated], 3, 20));

        let vm = state.compute_viewmodel(100);

        assert_eq!(vm.cards.len(), 2);
        assert!(!vm.cards[0].is_favorite);
        assert!(vm.cards[1].is_favorite);
        assert_eq!(vm.cards[1].score, "8.7");
        let pagination = vm.pagination.expect("pagination shown");
        assert_eq!(pagination.current, 3);
        assert!(pagination.can_prev && pagination.can_next);
        assert!(vm.status.is_none());
        assert!(vm.search_bar.is_some());
    }

    #[test]
    fn loading_status_wins_over_stale_error() {
        let mut state = AppState::new(Theme::default(), FavoritesStore::new());
        state.catalog.error_message = Some(FETCH_FAILED_MESSAGE.into());
        state.catalog.is_loading = true;

        let status = state.compute_viewmodel(80).status.expect("status line");
        assert_eq!(status.kind, StatusKind::Loading);
    }

    #[test]
    fn empty_favorites_view_shows_empty_state() {
        let mut state = AppState::new(Theme::default(), FavoritesStore::new());
        state.view = View::Favorites;
        let vm = state.compute_viewmodel(80);
        assert!(vm.empty_state.is_some());
        assert_eq!(vm.header.summary, "0 favorites");
    }

    #[test]
    fn detail_viewmodel_lists_alt_titles_and_facts() {
        let mut state = AppState::new(Theme::default(), FavoritesStore::new());
        let mut item = CatalogItem::new(1, "Shingeki no Kyojin");
        item.english_title = Some("Attack on Titan".into());
        item.episodes = Some(25);
        item.season = Some("Spring 2013".into());
        state.view = View::Detail(1);
        state.detail = Some(MediaDetail {
            item,
            native_title: Some("進撃の巨人".into()),
            format: Some("TV".into()),
            status: Some("FINISHED".into()),
            start_date: NaiveDate::from_ymd_opt(2013, 4, 7),
            episode_list: vec![],
        });

        let detail = state.compute_viewmodel(80).detail.expect("detail shown");
        assert_eq!(detail.alt_titles, vec!["Attack on Titan".to_string(), "進撃の巨人".to_string()]);
        assert_eq!(detail.facts, "TV · FINISHED · 25 eps · Spring 2013");
        assert_eq!(detail.start_date.as_deref(), Some("April 7, 2013"));
    }

    #[test]
    fn card_titles_are_cut_to_width() {
        let mut state = AppState::new(Theme::default(), FavoritesStore::new());
        state.catalog.items = vec![CatalogItem::new(1, "x".repeat(40))];

        let cards = state.compute_viewmodel(40).cards;
        assert_eq!(cards[0].title.chars().count(), 16);
        assert!(cards[0].title.ends_with('…'));
    }
}
