//! Executes handler actions against a media source.
//!
//! [`CatalogController`] owns the [`AppState`] and is the only place it is
//! mutated. Every action returned by the handler is turned into a spawned
//! task (fetch with retry, detail lookups, trending) or a debounce timer.
//! Their outcomes come back as [`Event`]s through [`next_event`], and the
//! caller feeds them to [`dispatch`] on the same thread.
//!
//! ```text
//!            dispatch(Event)                      next_event()
//! caller ───────────────────► handle_event ──┐   ▲
//!                                            │   │ completions
//!                                  Vec<Action>   │
//!                                            ▼   │
//!                           ┌──────────────────────────────────┐
//!                           │ JoinSet<Option<Event>>  tasks    │
//!                           │ Debouncer<Event> ─► mpsc channel │
//!                           └──────────────────────────────────┘
//! ```
//!
//! [`next_event`]: CatalogController::next_event
//! [`dispatch`]: CatalogController::dispatch

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use rand::Rng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tracing::Instrument;

use super::debounce::Debouncer;
use super::retry::{retry_with_backoff, RetryPolicy};
use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::{MediaId, Result, YamiyumeError};
use crate::source::{MediaSource, PageRequest};

/// Trending titles the spotlight is picked from.
pub const TRENDING_LIMIT: u32 = 10;

/// Timing knobs of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub retry: RetryPolicy,
    pub debounce_window: Duration,
    pub trending_limit: u32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            debounce_window: Duration::from_millis(500),
            trending_limit: TRENDING_LIMIT,
        }
    }
}

/// Owner of the application state and its side effects.
pub struct CatalogController {
    state: AppState,
    source: Arc<dyn MediaSource>,
    settings: ControllerSettings,
    debouncer: Debouncer<Event>,
    tasks: JoinSet<Option<Event>>,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    /// Mirror of `state.catalog.generation` readable from retry loops.
    latest_generation: Arc<AtomicU64>,
    quit: bool,
}

impl CatalogController {
    #[must_use]
    pub fn new(state: AppState, source: Arc<dyn MediaSource>, settings: ControllerSettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            latest_generation: Arc::new(AtomicU64::new(state.catalog.generation)),
            state,
            source,
            settings,
            debouncer: Debouncer::new(settings.debounce_window),
            tasks: JoinSet::new(),
            tx,
            rx,
            quit: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// A `Quit` action has been executed.
    #[must_use]
    pub const fn is_quit(&self) -> bool {
        self.quit
    }

    /// Work is still outstanding: spawned tasks, a debounce timer, or
    /// completions not yet dispatched.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.tasks.is_empty() || self.debouncer.is_pending() || !self.rx.is_empty()
    }

    /// Runs `event` through the handler and starts the resulting actions.
    ///
    /// Returns whether the screen needs a re-render. Must be called from
    /// within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: &Event) -> Result<bool> {
        let (render, actions) = handle_event(&mut self.state, event)?;
        self.latest_generation.store(self.state.catalog.generation, Ordering::SeqCst);

        for action in actions {
            self.execute(action);
        }
        Ok(render)
    }

    /// Waits for the next completion or debounced event.
    ///
    /// Tasks that finish without an event (superseded fetches) are skipped.
    /// Returns `None` once no work is outstanding.
    pub async fn next_event(&mut self) -> Option<Event> {
        loop {
            if !self.has_pending_work() {
                return None;
            }
            tokio::select! {
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => match joined {
                    Ok(Some(event)) => return Some(event),
                    Ok(None) => {}
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => tracing::error!(error = %e, "background task failed"),
                },
                received = self.rx.recv() => return received,
            }
        }
    }

    /// Dispatches completions until no work is outstanding.
    ///
    /// Returns whether any of them asked for a re-render.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn settle(&mut self) -> Result<bool> {
        let mut render = false;
        while self.has_pending_work() {
            if let Some(event) = self.next_event().await {
                render |= self.dispatch(&event)?;
            }
        }
        Ok(render)
    }

    fn execute(&mut self, action: Action) {
        tracing::debug!(action = ?action, "executing action");

        match action {
            Action::FetchPage { generation, request } => self.spawn_fetch(generation, request),
            Action::Debounce(event) => self.debouncer.schedule(event, &self.tx),
            Action::CancelDebounce => {
                self.debouncer.cancel();
            }
            Action::LoadDetail(id) => self.spawn_detail(id),
            Action::LoadFavorites { load, ids } => self.spawn_favorites(load, ids),
            Action::LoadTrending => self.spawn_trending(),
            Action::Quit => {
                self.quit = true;
                self.debouncer.cancel();
                self.tasks.abort_all();
            }
        }
    }

    fn spawn_fetch(&mut self, generation: u64, request: PageRequest) {
        let source = Arc::clone(&self.source);
        let latest = Arc::clone(&self.latest_generation);
        let policy = self.settings.retry;
        let span = tracing::info_span!("fetch_page", generation, page = request.page, source = source.name());

        self.tasks.spawn(
            async move {
                let outcome = retry_with_backoff(
                    policy,
                    || latest.load(Ordering::SeqCst) != generation,
                    |attempt| {
                        let source = Arc::clone(&source);
                        let request = request.clone();
                        async move {
                            tracing::debug!(attempt, "requesting page");
                            source.fetch_page(&request).await
                        }
                    },
                )
                .await;

                match outcome {
                    Ok(result) => Some(Event::FetchSucceeded { generation, result }),
                    Err(YamiyumeError::Superseded) => None,
                    Err(e) => Some(Event::FetchFailed { generation, message: e.to_string() }),
                }
            }
            .instrument(span),
        );
    }

    fn spawn_detail(&mut self, id: MediaId) {
        let source = Arc::clone(&self.source);
        let policy = self.settings.retry;
        let span = tracing::info_span!("fetch_detail", id);

        self.tasks.spawn(
            async move {
                let outcome = retry_with_backoff(policy, || false, |_| {
                    let source = Arc::clone(&source);
                    async move { source.fetch_detail(id).await }
                })
                .await;

                Some(match outcome {
                    Ok(detail) => Event::DetailLoaded { id, detail },
                    Err(e) => Event::DetailFailed { id, message: e.to_string() },
                })
            }
            .instrument(span),
        );
    }

    fn spawn_favorites(&mut self, load: u64, ids: Vec<MediaId>) {
        let source = Arc::clone(&self.source);
        let span = tracing::info_span!("fetch_favorites", load, count = ids.len());

        self.tasks.spawn(
            async move {
                let lookups = ids.iter().map(|&id| {
                    let source = Arc::clone(&source);
                    async move { (id, source.fetch_detail(id).await) }
                });

                let items = join_all(lookups)
                    .await
                    .into_iter()
                    .filter_map(|(id, outcome)| match outcome {
                        Ok(Some(detail)) => Some(detail.item),
                        Ok(None) => {
                            tracing::warn!(id, "favorite not found at source");
                            None
                        }
                        Err(e) => {
                            tracing::warn!(id, error = %e, "favorite lookup failed");
                            None
                        }
                    })
                    .collect();

                Some(Event::FavoritesLoaded { load, items })
            }
            .instrument(span),
        );
    }

    fn spawn_trending(&mut self) {
        let source = Arc::clone(&self.source);
        let limit = self.settings.trending_limit;
        let span = tracing::info_span!("fetch_trending", limit);

        self.tasks.spawn(
            async move {
                Some(match source.fetch_trending(limit).await {
                    Ok(items) => Event::TrendingLoaded { items, seed: rand::rng().random() },
                    Err(e) => Event::TrendingFailed(e.to_string()),
                })
            }
            .instrument(span),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{FavoritesStore, View, FETCH_FAILED_MESSAGE};
    use crate::domain::{CatalogItem, MediaDetail};
    use crate::source::{PageInfo, PageResult};
    use crate::ui::Theme;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;

    fn item(id: MediaId) -> CatalogItem {
        CatalogItem::new(id, format!("title {id}"))
    }

    fn page_of(ids: &[MediaId], page: u32) -> PageResult {
        PageResult {
            items: ids.iter().copied().map(item).collect(),
            page_info: PageInfo { current_page: page, last_page: 20, total: 480 },
        }
    }

    fn server_error() -> YamiyumeError {
        YamiyumeError::Api { status_code: 500, message: "boom".into() }
    }

    /// Answers page N with item N after `delays[N]` milliseconds.
    struct SlowSource {
        delays: Vec<u64>,
        requests: Mutex<Vec<PageRequest>>,
    }

    #[async_trait]
    impl MediaSource for SlowSource {
        async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult> {
            self.requests.lock().unwrap().push(request.clone());
            let delay = self.delays.get(request.page as usize).copied().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(page_of(&[MediaId::from(request.page)], request.page))
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    /// Fails the first `failures` calls, then succeeds with `[7, 8]`.
    struct FlakySource {
        failures: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl MediaSource for FlakySource {
        async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                return Err(server_error());
            }
            Ok(page_of(&[7, 8], request.page))
        }

        async fn fetch_detail(&self, id: MediaId) -> Result<Option<MediaDetail>> {
            Ok((id != 404).then(|| MediaDetail {
                item: item(id),
                native_title: None,
                format: None,
                status: None,
                start_date: None,
                episode_list: vec![],
            }))
        }

        async fn fetch_trending(&self, _limit: u32) -> Result<Vec<CatalogItem>> {
            Ok(vec![item(1)])
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    fn controller(source: Arc<dyn MediaSource>) -> CatalogController {
        let state = AppState::new(Theme::default(), FavoritesStore::new());
        CatalogController::new(state, source, ControllerSettings::default())
    }

    fn slow(delays: Vec<u64>) -> Arc<SlowSource> {
        Arc::new(SlowSource { delays, requests: Mutex::new(vec![]) })
    }

    #[tokio::test(start_paused = true)]
    async fn latest_generation_wins_out_of_order() {
        // page 2 is slow, page 3 is fast
        let mut ctl = controller(slow(vec![0, 0, 300, 50]));
        ctl.dispatch(&Event::Refresh).unwrap();
        ctl.settle().await.unwrap();

        ctl.dispatch(&Event::SetPage(2)).unwrap();
        ctl.dispatch(&Event::SetPage(3)).unwrap();
        ctl.settle().await.unwrap();

        let catalog = &ctl.state().catalog;
        assert_eq!(catalog.page, 3);
        assert_eq!(catalog.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3]);
        assert!(!catalog.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn fail_fail_succeed_shows_third_attempt() {
        let mut ctl = controller(Arc::new(FlakySource { failures: 2, calls: AtomicU32::new(0) }));
        ctl.dispatch(&Event::Refresh).unwrap();
        assert!(ctl.state().catalog.is_loading);

        ctl.settle().await.unwrap();

        let catalog = &ctl.state().catalog;
        assert!(!catalog.is_loading);
        assert_eq!(catalog.error_message, None);
        assert_eq!(catalog.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![7, 8]);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_keep_previous_items() {
        let mut ctl = controller(Arc::new(FlakySource { failures: 0, calls: AtomicU32::new(0) }));
        ctl.dispatch(&Event::Refresh).unwrap();
        ctl.settle().await.unwrap();
        assert_eq!(ctl.state().catalog.items.len(), 2);

        let failing = Arc::new(FlakySource { failures: u32::MAX, calls: AtomicU32::new(0) });
        ctl.source = Arc::clone(&failing) as Arc<dyn MediaSource>;
        ctl.dispatch(&Event::Refresh).unwrap();
        ctl.settle().await.unwrap();

        let catalog = &ctl.state().catalog;
        assert_eq!(failing.calls.load(Ordering::SeqCst), 3);
        assert_eq!(catalog.error_message.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(catalog.items.len(), 2);
        assert!(!catalog.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_retry_stops_requesting() {
        let failing = Arc::new(FlakySource { failures: u32::MAX, calls: AtomicU32::new(0) });
        let mut ctl = controller(failing.clone());

        ctl.dispatch(&Event::Refresh).unwrap();
        // let the first attempt fail and enter its backoff
        tokio::time::sleep(Duration::from_millis(10)).await;
        ctl.dispatch(&Event::SetGenre(Some("Drama".into()))).unwrap();
        ctl.settle().await.unwrap();

        // one call from the superseded fetch, three from the current one
        assert_eq!(failing.calls.load(Ordering::SeqCst), 4);
        assert_eq!(ctl.state().catalog.generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_burst_fetches_once_after_quiet_period() {
        let source = slow(vec![0, 0]);
        let mut ctl = controller(source.clone());

        for text in ["f", "fr", "fri", "frieren"] {
            ctl.dispatch(&Event::SearchInput(text.into())).unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        ctl.settle().await.unwrap();

        let requests = source.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].search.as_deref(), Some("frieren"));
        assert_eq!(ctl.state().catalog.search_text, "frieren");
    }

    #[tokio::test(start_paused = true)]
    async fn genre_change_requests_first_page() {
        let source = slow(vec![0; 8]);
        let mut ctl = controller(source.clone());
        ctl.dispatch(&Event::Refresh).unwrap();
        ctl.settle().await.unwrap();
        ctl.dispatch(&Event::SetPage(5)).unwrap();
        ctl.settle().await.unwrap();

        ctl.dispatch(&Event::SetGenre(Some("Comedy".into()))).unwrap();
        ctl.settle().await.unwrap();

        let requests = source.requests.lock().unwrap();
        let last = requests.last().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(last.genre.as_deref(), Some("Comedy"));
    }

    #[tokio::test(start_paused = true)]
    async fn favorites_view_skips_missing_titles() {
        let mut ctl = controller(Arc::new(FlakySource { failures: 0, calls: AtomicU32::new(0) }));
        ctl.dispatch(&Event::ToggleFavorite(404)).unwrap();
        ctl.dispatch(&Event::ToggleFavorite(12)).unwrap();
        ctl.dispatch(&Event::ShowFavorites).unwrap();
        ctl.settle().await.unwrap();

        let state = ctl.state();
        assert_eq!(state.view, View::Favorites);
        assert_eq!(state.favorite_items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![12]);
    }

    #[tokio::test(start_paused = true)]
    async fn start_loads_page_and_spotlight() {
        let mut ctl = controller(Arc::new(FlakySource { failures: 0, calls: AtomicU32::new(0) }));
        ctl.dispatch(&Event::Start).unwrap();
        ctl.settle().await.unwrap();

        assert_eq!(ctl.state().spotlight.as_ref().map(|s| s.item.id), Some(1));
        assert_eq!(ctl.state().catalog.items.len(), 2);
    }

    #[tokio::test]
    async fn quit_stops_everything() {
        let mut ctl = controller(slow(vec![0, 10_000]));
        ctl.dispatch(&Event::Refresh).unwrap();
        ctl.dispatch(&Event::Quit).unwrap();
        assert!(ctl.is_quit());
        ctl.settle().await.unwrap();
        assert!(!ctl.has_pending_work());
    }
}
