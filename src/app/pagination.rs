//! Page-number window for the pagination bar.

use std::fmt;

/// Pages shown in the consecutive run around the current page.
pub const WINDOW_SIZE: u32 = 5;

/// One slot of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    /// Two or more hidden pages.
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

/// Computes the pagination bar for `page` out of `last_page`.
///
/// The bar holds a run of up to [`WINDOW_SIZE`] consecutive pages starting at
/// `max(1, page - 2)`, plus the first and the last page. The run is never
/// shifted left, so at most two pages before `page` appear in it.
/// A gap of one page between the run and an end is filled with that page; a
/// wider gap collapses into [`PageMarker::Ellipsis`]. A `last_page` of 0 is
/// treated as 1 and `page` is clamped into range.
///
/// ```
/// use yamiyume::app::pagination::{pagination_window, PageMarker::*};
///
/// assert_eq!(
///     pagination_window(1, 20),
///     vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(20)]
/// );
/// ```
#[must_use]
pub fn pagination_window(page: u32, last_page: u32) -> Vec<PageMarker> {
    let last = last_page.max(1);
    let page = page.clamp(1, last);

    let start = page.saturating_sub(2).max(1);
    let end = last.min(start + WINDOW_SIZE - 1);

    let mut markers = Vec::with_capacity(WINDOW_SIZE as usize + 4);

    match start {
        1 => {}
        2 => markers.push(PageMarker::Page(1)),
        3 => markers.extend([PageMarker::Page(1), PageMarker::Page(2)]),
        _ => markers.extend([PageMarker::Page(1), PageMarker::Ellipsis]),
    }

    markers.extend((start..=end).map(PageMarker::Page));

    match last - end {
        0 => {}
        1 => markers.push(PageMarker::Page(last)),
        2 => markers.extend([PageMarker::Page(last - 1), PageMarker::Page(last)]),
        _ => markers.extend([PageMarker::Ellipsis, PageMarker::Page(last)]),
    }

    markers
}
