//! Raw AniList response shapes.
//!
//! Every field the catalog does not strictly need is optional with a serde
//! default, so a record missing a score, a description or an image still
//! decodes; the conversion into [`CatalogItem`] applies the display
//! fallbacks.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::item::{season_label, UNTITLED};
use crate::domain::{clean_synopsis, CatalogItem, EpisodeEntry, MediaDetail};
use crate::source::{PageInfo, PageResult};

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub status: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PageData {
    #[serde(rename = "Page")]
    pub page: Page,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub page_info: Option<RawPageInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageInfo {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct MediaData {
    #[serde(rename = "Media")]
    pub media: Option<Media>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Trailer {
    pub id: Option<String>,
    pub site: Option<String>,
}

impl Trailer {
    /// Watch URL for the trailer, when the hosting site is known.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        let id = self.id.as_deref()?;
        match self.site.as_deref()?.to_ascii_lowercase().as_str() {
            "youtube" => Some(format!("https://www.youtube.com/watch?v={id}")),
            "dailymotion" => Some(format!("https://www.dailymotion.com/video/{id}")),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl FuzzyDate {
    /// Calendar date, only when year, month and day are all known.
    #[must_use]
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

#[derive(Debug, Deserialize)]
pub struct StreamingEpisode {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
}

/// One AniList media record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    #[serde(default)]
    pub title: Option<MediaTitle>,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub average_score: Option<u8>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub season_year: Option<i32>,
    #[serde(default)]
    pub trailer: Option<Trailer>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<FuzzyDate>,
    #[serde(default)]
    pub streaming_episodes: Option<Vec<StreamingEpisode>>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty()).cloned()
}

impl Media {
    /// Projects the record into a catalog card.
    #[must_use]
    pub fn to_item(&self) -> CatalogItem {
        let title = self.title.as_ref();
        let primary = title
            .and_then(|t| {
                non_blank(t.romaji.as_ref())
                    .or_else(|| non_blank(t.english.as_ref()))
                    .or_else(|| non_blank(t.native.as_ref()))
            })
            .unwrap_or_else(|| UNTITLED.to_string());

        let cover_url = self.cover_image.as_ref().and_then(|c| {
            non_blank(c.extra_large.as_ref())
                .or_else(|| non_blank(c.large.as_ref()))
                .or_else(|| non_blank(c.medium.as_ref()))
        });

        CatalogItem {
            id: self.id,
            title: primary,
            english_title: title.and_then(|t| non_blank(t.english.as_ref())),
            cover_url,
            banner_url: non_blank(self.banner_image.as_ref()),
            synopsis: clean_synopsis(self.description.as_deref()),
            genres: self.genres.clone().unwrap_or_default(),
            score: self.average_score,
            episodes: self.episodes,
            season: season_label(self.season.as_deref(), self.season_year),
            trailer_url: self.trailer.as_ref().and_then(Trailer::url),
        }
    }

    /// Projects the record into the detail page model.
    #[must_use]
    pub fn into_detail(self) -> MediaDetail {
        let item = self.to_item();
        let episode_list = self
            .streaming_episodes
            .unwrap_or_default()
            .into_iter()
            .zip(1u32..)
            .map(|(ep, number)| EpisodeEntry {
                number,
                title: ep
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| format!("Episode {number}")),
                thumbnail_url: ep.thumbnail,
                url: ep.url,
            })
            .collect();

        MediaDetail {
            item,
            native_title: self.title.and_then(|t| t.native),
            format: self.format,
            status: self.status,
            start_date: self.start_date.as_ref().and_then(FuzzyDate::to_date),
            episode_list,
        }
    }
}

impl Page {
    /// Converts a listing page into a [`PageResult`].
    ///
    /// Missing pagination metadata falls back to "this is the only page".
    /// `last_page` is never reported below `current_page`.
    #[must_use]
    pub fn into_result(self, requested_page: u32) -> PageResult {
        let info = self.page_info.unwrap_or_default();
        let current_page = info.current_page.unwrap_or(requested_page).max(1);
        let last_page = info.last_page.unwrap_or(current_page).max(current_page);
        let items: Vec<CatalogItem> = self.media.iter().map(Media::to_item).collect();
        #[allow(clippy::cast_possible_truncation)]
        let total = info.total.unwrap_or(items.len() as u32);

        PageResult {
            items,
            page_info: PageInfo { current_page, last_page, total },
        }
    }
}
