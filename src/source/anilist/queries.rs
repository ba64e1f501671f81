//! GraphQL documents and their variable sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fields shared by every media selection.
const MEDIA_FIELDS: &str = r"
      id
      title { romaji english native }
      coverImage { extraLarge large medium }
      bannerImage
      description
      genres
      averageScore
      episodes
      season
      seasonYear
      trailer { id site }
";

/// Catalog listing: one page filtered by search text and genre.
pub(crate) fn page_query() -> String {
    format!(
        r"query ($page: Int, $perPage: Int, $search: String, $genre: String, $sort: [MediaSort]) {{
  Page(page: $page, perPage: $perPage) {{
    media(type: ANIME, search: $search, genre: $genre, sort: $sort) {{{MEDIA_FIELDS}    }}
    pageInfo {{ total currentPage lastPage }}
  }}
}}"
    )
}

/// Hero banner candidates.
pub(crate) fn trending_query() -> String {
    format!(
        r"query ($perPage: Int) {{
  Page(page: 1, perPage: $perPage) {{
    media(type: ANIME, sort: [TRENDING_DESC]) {{{MEDIA_FIELDS}    }}
  }}
}}"
    )
}

/// Detail page with the episode browser.
pub(crate) fn detail_query() -> String {
    format!(
        r"query ($id: Int) {{
  Media(id: $id, type: ANIME) {{{MEDIA_FIELDS}    format
    status
    startDate {{ year month day }}
    streamingEpisodes {{ title thumbnail url site }}
  }}
}}"
    )
}

/// Sort orders the catalog listing accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaSort {
    #[default]
    PopularityDesc,
    ScoreDesc,
    TrendingDesc,
}

impl fmt::Display for MediaSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PopularityDesc => "POPULARITY_DESC",
            Self::ScoreDesc => "SCORE_DESC",
            Self::TrendingDesc => "TRENDING_DESC",
        };
        f.write_str(name)
    }
}

impl FromStr for MediaSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "POPULARITY_DESC" | "POPULARITY" => Ok(Self::PopularityDesc),
            "SCORE_DESC" | "SCORE" => Ok(Self::ScoreDesc),
            "TRENDING_DESC" | "TRENDING" => Ok(Self::TrendingDesc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Variables for [`page_query`]. Absent filters are omitted from the JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageVariables<'a> {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<&'a str>,
    pub sort: [MediaSort; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrendingVariables {
    pub per_page: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct DetailVariables {
    pub id: i64,
}

/// Request envelope POSTed to the endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_filters_are_not_serialized() {
        let vars = PageVariables { page: 2, per_page: 24, search: None, genre: None, sort: [MediaSort::PopularityDesc] };
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(json, serde_json::json!({ "page": 2, "perPage": 24, "sort": ["POPULARITY_DESC"] }));
    }

    #[test]
    fn present_filters_are_serialized() {
        let vars = PageVariables { page: 1, per_page: 24, search: Some("bebop"), genre: Some("Sci-Fi"), sort: [MediaSort::ScoreDesc] };
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(json["search"], "bebop");
        assert_eq!(json["genre"], "Sci-Fi");
        assert_eq!(json["sort"][0], "SCORE_DESC");
    }

    #[test]
    fn sort_parses_loose_spellings() {
        assert_eq!("score".parse::<MediaSort>(), Ok(MediaSort::ScoreDesc));
        assert_eq!("popularity-desc".parse::<MediaSort>(), Ok(MediaSort::PopularityDesc));
        assert!("newest".parse::<MediaSort>().is_err());
    }

    #[test]
    fn queries_embed_the_shared_selection() {
        assert!(page_query().contains("averageScore"));
        assert!(page_query().contains("pageInfo { total currentPage lastPage }"));
        assert!(trending_query().contains("TRENDING_DESC"));
        assert!(detail_query().contains("streamingEpisodes"));
    }
}
