//! End-to-end session against an in-memory catalog: commands in, frames out.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use yamiyume::app::input::parse_command;
use yamiyume::app::pagination::PageMarker;
use yamiyume::domain::{CatalogItem, MediaDetail, MediaId};
use yamiyume::runtime::CatalogController;
use yamiyume::source::{MediaSource, PageInfo, PageRequest, PageResult};
use yamiyume::ui::Appearance;
use yamiyume::{initialize, ui, Config, Result, View};

/// Sixty titles; every third one is a Comedy, the rest are Drama.
struct MemorySource {
    items: Vec<CatalogItem>,
    page_calls: AtomicU32,
}

impl MemorySource {
    fn new() -> Self {
        let items = (1..=60)
            .map(|id: MediaId| CatalogItem {
                genres: vec![if id % 3 == 0 { "Comedy" } else { "Drama" }.to_string()],
                score: Some(60 + u8::try_from(id % 30).unwrap()),
                ..CatalogItem::new(id, format!("Show {id:02}"))
            })
            .collect();
        Self { items, page_calls: AtomicU32::new(0) }
    }
}

#[async_trait]
impl MediaSource for MemorySource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;

        let matching: Vec<&CatalogItem> = self
            .items
            .iter()
            .filter(|i| request.search.as_ref().map_or(true, |s| i.title.contains(s.as_str())))
            .filter(|i| request.genre.as_ref().map_or(true, |g| i.genres.contains(g)))
            .collect();

        let per_page = request.per_page as usize;
        let total = u32::try_from(matching.len()).unwrap();
        let last_page = total.div_ceil(request.per_page).max(1);
        let items = matching
            .into_iter()
            .skip((request.page as usize - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();

        Ok(PageResult { items, page_info: PageInfo { current_page: request.page, last_page, total } })
    }

    async fn fetch_trending(&self, limit: u32) -> Result<Vec<CatalogItem>> {
        Ok(self.items.iter().take(limit as usize).cloned().collect())
    }

    async fn fetch_detail(&self, id: MediaId) -> Result<Option<MediaDetail>> {
        Ok(self.items.iter().find(|i| i.id == id).map(|item| MediaDetail {
            item: item.clone(),
            native_title: None,
            format: Some("TV".into()),
            status: Some("FINISHED".into()),
            start_date: None,
            episode_list: vec![],
        }))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

fn session(source: Arc<MemorySource>) -> CatalogController {
    let config = Config { per_page: 10, ..Config::default() };
    CatalogController::new(initialize(&config), source, config.controller_settings())
}

async fn run(ctl: &mut CatalogController, line: &str) {
    let events = parse_command(line);
    assert!(!events.is_empty(), "command not understood: {line}");
    for event in &events {
        ctl.dispatch(event).unwrap();
    }
    ctl.settle().await.unwrap();
}

fn ids(items: &[CatalogItem]) -> Vec<MediaId> {
    items.iter().map(|i| i.id).collect()
}

#[tokio::test(start_paused = true)]
async fn browse_filter_and_paginate() {
    let source = Arc::new(MemorySource::new());
    let mut ctl = session(source.clone());

    ctl.dispatch(&yamiyume::Event::Start).unwrap();
    ctl.settle().await.unwrap();
    assert_eq!(ctl.state().catalog.last_page, 6);
    assert!(ctl.state().spotlight.is_some());

    let vm = ctl.state().compute_viewmodel(100);
    let markers = vm.pagination.unwrap().markers;
    assert_eq!(markers.last(), Some(&PageMarker::Page(6)));

    run(&mut ctl, "page 6").await;
    assert_eq!(ids(&ctl.state().catalog.items), (51..=60).collect::<Vec<_>>());
    assert!(!ctl.state().catalog.has_next_page());

    run(&mut ctl, "genre comedy").await;
    let catalog = &ctl.state().catalog;
    assert_eq!(catalog.page, 1);
    assert_eq!(catalog.total, 20);
    assert_eq!(catalog.last_page, 2);
    assert!(catalog.items.iter().all(|i| i.genres == ["Comedy"]));

    run(&mut ctl, "n").await;
    assert_eq!(ctl.state().catalog.page, 2);
    run(&mut ctl, "n").await;
    assert_eq!(ctl.state().catalog.page, 2, "next on the last page is a no-op");
}

#[tokio::test(start_paused = true)]
async fn typed_search_waits_for_the_debounce() {
    let source = Arc::new(MemorySource::new());
    let mut ctl = session(source.clone());
    ctl.dispatch(&yamiyume::Event::Start).unwrap();
    ctl.settle().await.unwrap();
    let after_start = source.page_calls.load(Ordering::SeqCst);

    for partial in ["/S", "/Sh", "/Show 4"] {
        for event in parse_command(partial) {
            ctl.dispatch(&event).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let frame = ui::render(ctl.state(), 100);
    assert!(frame.contains("Show 4…"), "pending search is marked");

    ctl.settle().await.unwrap();
    assert_eq!(source.page_calls.load(Ordering::SeqCst), after_start + 1);
    assert_eq!(ids(&ctl.state().catalog.items), (40..=49).collect::<Vec<_>>());

    run(&mut ctl, "find nothing matches this").await;
    assert_eq!(
        ctl.state().catalog.error_message.as_deref(),
        Some(yamiyume::app::NO_RESULTS_MESSAGE)
    );
}

#[tokio::test(start_paused = true)]
async fn favorites_detail_and_theme() {
    let source = Arc::new(MemorySource::new());
    let mut ctl = session(source);
    ctl.dispatch(&yamiyume::Event::Start).unwrap();
    ctl.settle().await.unwrap();

    run(&mut ctl, "fav 7").await;
    run(&mut ctl, "fav 3").await;
    run(&mut ctl, "fav 7").await;
    run(&mut ctl, "fav 12").await;
    assert!(ctl.state().favorites.contains(3));
    assert!(!ctl.state().favorites.contains(7));

    run(&mut ctl, "favs").await;
    assert_eq!(ctl.state().view, View::Favorites);
    assert_eq!(ids(&ctl.state().favorite_items), vec![3, 12]);
    let frame = ui::render(ctl.state(), 100);
    assert!(frame.contains("Show 03") && frame.contains("Show 12"));

    run(&mut ctl, "unfav 3").await;
    assert_eq!(ids(&ctl.state().favorite_items), vec![12]);

    run(&mut ctl, "show 12").await;
    assert_eq!(ctl.state().view, View::Detail(12));
    let detail = ctl.state().compute_viewmodel(100).detail.unwrap();
    assert!(detail.is_favorite);
    assert!(detail.facts.starts_with("TV · FINISHED"));

    run(&mut ctl, "theme").await;
    assert_eq!(ctl.state().theme.appearance, Appearance::Light);

    run(&mut ctl, "list").await;
    assert_eq!(ctl.state().view, View::Catalog);

    run(&mut ctl, "q").await;
    assert!(ctl.is_quit());
}
