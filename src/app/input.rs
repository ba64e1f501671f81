//! Command-line input parsing.
//!
//! The terminal front-end reads one command per line. [`parse_command`] turns
//! a line into [`Event`]s; unknown or malformed commands yield nothing and the
//! caller prints [`HELP`].

use crate::app::Event;
use crate::domain::{resolve_genre, MediaId};

/// Command reference printed by `help` and after unknown input.
pub const HELP: &str = "\
Commands:
  /<text>, search <text>   type into the search box (applied after a short pause)
  find <text>              search immediately
  genre <name>             filter by genre (fuzzy: `genre slice`)
  genre                    clear the genre filter
  page <n>, n, p           go to page n, next page, previous page
  show <id>                open the detail page
  fav <id>, unfav <id>     toggle or remove a favorite
  favs, list               favorites view, back to the catalog
  hero                     pick another spotlight title
  refresh                  reload the current page
  theme                    switch between dark and light
  q                        quit";

/// Parses one input line into the events it stands for, in dispatch order.
///
/// Most commands map to a single event. `find <text>` types the text and
/// submits it, so it expands to `SearchInput` followed by `SubmitSearch`.
/// An empty vector means the line was not understood.
///
/// ```
/// use yamiyume::app::{input::parse_command, Event};
///
/// assert_eq!(parse_command("page 3"), vec![Event::SetPage(3)]);
/// assert_eq!(parse_command("/frieren"), vec![Event::SearchInput("frieren".into())]);
/// assert_eq!(parse_command("genre scifi"), vec![Event::SetGenre(Some("Sci-Fi".into()))]);
/// assert!(parse_command("page x").is_empty());
/// ```
#[must_use]
pub fn parse_command(line: &str) -> Vec<Event> {
    let line = line.trim();

    if let Some(text) = line.strip_prefix('/') {
        return vec![Event::SearchInput(text.trim().to_string())];
    }

    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match command.to_ascii_lowercase().as_str() {
        "find" | "f" => vec![Event::SearchInput(rest.to_string()), Event::SubmitSearch],
        other => parse_single(other, rest).into_iter().collect(),
    }
}

fn parse_single(command: &str, rest: &str) -> Option<Event> {
    let event = match command {
        "search" | "s" => Event::SearchInput(rest.to_string()),
        "genre" | "g" if rest.is_empty() => Event::SetGenre(None),
        "genre" | "g" => Event::SetGenre(Some(resolve_genre(rest)?.to_string())),
        "page" => Event::SetPage(rest.parse().ok()?),
        "next" | "n" => Event::NextPage,
        "prev" | "p" => Event::PrevPage,
        "show" | "open" => Event::ShowDetail(parse_id(rest)?),
        "fav" => Event::ToggleFavorite(parse_id(rest)?),
        "unfav" => Event::RemoveFavorite(parse_id(rest)?),
        "favs" | "favorites" => Event::ShowFavorites,
        "list" | "catalog" | "home" => Event::ShowCatalog,
        "hero" | "trending" => Event::ShowSpotlight,
        "refresh" | "r" => Event::Refresh,
        "theme" => Event::ToggleTheme,
        "quit" | "q" | "exit" => Event::Quit,
        _ => {
            tracing::debug!(command, "unrecognized command");
            return None;
        }
    };
    Some(event)
}

fn parse_id(text: &str) -> Option<MediaId> {
    text.trim_start_matches('#').parse().ok().filter(|id: &MediaId| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(line: &str) -> Option<Event> {
        let mut events = parse_command(line);
        assert!(events.len() <= 1, "{line} expanded to {events:?}");
        events.pop()
    }

    #[test]
    fn slash_and_search_both_type_into_the_box() {
        assert_eq!(one("/ cowboy bebop "), Some(Event::SearchInput("cowboy bebop".into())));
        assert_eq!(one("search cowboy bebop"), Some(Event::SearchInput("cowboy bebop".into())));
        assert_eq!(one("search"), Some(Event::SearchInput(String::new())));
    }

    #[test]
    fn find_types_then_submits() {
        assert_eq!(
            parse_command("find  lain "),
            vec![Event::SearchInput("lain".into()), Event::SubmitSearch]
        );
    }

    #[test]
    fn genre_resolves_or_clears() {
        assert_eq!(one("genre ROMANCE"), Some(Event::SetGenre(Some("Romance".into()))));
        assert_eq!(one("genre"), Some(Event::SetGenre(None)));
        assert_eq!(one("genre zzzz"), None);
    }

    #[test]
    fn ids_must_be_positive_numbers() {
        assert_eq!(one("show 21"), Some(Event::ShowDetail(21)));
        assert_eq!(one("fav #154587"), Some(Event::ToggleFavorite(154_587)));
        assert_eq!(one("unfav 0"), None);
        assert_eq!(one("show abc"), None);
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(one("PAGE 12"), Some(Event::SetPage(12)));
        assert_eq!(one("p"), Some(Event::PrevPage));
        assert_eq!(one("favs"), Some(Event::ShowFavorites));
        assert_eq!(one("list"), Some(Event::ShowCatalog));
        assert_eq!(one("hero"), Some(Event::ShowSpotlight));
        assert_eq!(one("q"), Some(Event::Quit));
    }

    #[test]
    fn unknown_or_blank_lines_are_empty() {
        assert!(parse_command("").is_empty());
        assert!(parse_command("dance").is_empty());
    }
}
