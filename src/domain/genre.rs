//! Genre labels accepted by the media source.
//!
//! The source filters on exact genre names, so free-form user input is
//! resolved against [`GENRES`] before it reaches a query.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Genre collection exposed by AniList.
pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Ecchi",
    "Fantasy",
    "Horror",
    "Mahou Shoujo",
    "Mecha",
    "Music",
    "Mystery",
    "Psychological",
    "Romance",
    "Sci-Fi",
    "Slice of Life",
    "Sports",
    "Supernatural",
    "Thriller",
];

/// Resolves user input to a known genre label.
///
/// An exact case-insensitive match wins. Otherwise the best fuzzy match is
/// returned, so `"slice"` resolves to `"Slice of Life"` and `"scifi"` to
/// `"Sci-Fi"`. Blank input or input that matches nothing yields `None`.
///
/// # Example
///
/// ```
/// use yamiyume::domain::resolve_genre;
///
/// assert_eq!(resolve_genre("romance"), Some("Romance"));
/// assert_eq!(resolve_genre("slice"), Some("Slice of Life"));
/// assert_eq!(resolve_genre("qqqq"), None);
/// ```
#[must_use]
pub fn resolve_genre(input: &str) -> Option<&'static str> {
    let needle = input.trim();
    if needle.is_empty() {
        return None;
    }

    if let Some(exact) = GENRES.iter().find(|g| g.eq_ignore_ascii_case(needle)) {
        return Some(exact);
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let best = GENRES
        .iter()
        .filter_map(|g| matcher.fuzzy_match(g, needle).map(|score| (score, *g)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, g)| g);

    tracing::debug!(input = %needle, resolved = ?best, "genre resolved");
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(resolve_genre("ACTION"), Some("Action"));
        assert_eq!(resolve_genre("  mecha "), Some("Mecha"));
    }

    #[test]
    fn fuzzy_match_finds_multi_word_genres() {
        assert_eq!(resolve_genre("slice"), Some("Slice of Life"));
        assert_eq!(resolve_genre("mahou"), Some("Mahou Shoujo"));
        assert_eq!(resolve_genre("psycho"), Some("Psychological"));
    }

    #[test]
    fn blank_or_unknown_input_is_none() {
        assert_eq!(resolve_genre(""), None);
        assert_eq!(resolve_genre("   "), None);
        assert_eq!(resolve_genre("zzzz"), None);
    }
}
