//! Card list renderer for the catalog and favorites listings.
//!
//! Each card takes three lines: id, favorite marker and title; a facts line
//! with score, season, episodes and genres; and a dimmed synopsis excerpt.

use crate::ui::helpers::{push_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

/// Width of the id column, `#` included.
const ID_WIDTH: usize = 8;

pub fn render_cards(out: &mut String, cards: &[CardItem], theme: &Theme, cols: usize) {
    for card in cards {
        render_card(out, card, theme, cols);
    }
}

/// Renders one card.
///
/// ```text
/// #1       ♥ Cowboy Bebop
///          ★ 8.6 · Spring 1998 · 26 eps · Action, Drama, Sci-Fi
///          In the year 2071, humanity has colonized several of the…
/// ```
fn render_card(out: &mut String, card: &CardItem, theme: &Theme, cols: usize) {
    let indent = " ".repeat(ID_WIDTH + 1);

    let marker = if card.is_favorite {
        format!("{}♥{}", Theme::fg(&theme.colors.favorite_fg), Theme::reset())
    } else {
        " ".to_string()
    };
    let id = format!("#{}", card.id);
    let first = format!(
        "{}{id:<width$}{} {marker} {}{}{}",
        Theme::fg(&theme.colors.accent),
        Theme::reset(),
        Theme::bold(),
        Theme::fg(&theme.colors.text_normal),
        card.title,
        width = ID_WIDTH,
    );
    push_line(out, "", &first);

    let episodes = format!("{} eps", card.episodes);
    let facts = [card.season.as_str(), episodes.as_str(), card.genres.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    let second = format!(
        "{indent}{}★ {}{} {}· {}",
        Theme::fg(&theme.colors.score_fg),
        card.score,
        Theme::reset(),
        Theme::fg(&theme.colors.text_dim),
        truncate(&facts, cols.saturating_sub(ID_WIDTH + 9)),
    );
    push_line(out, "", &second);

    let excerpt = truncate(&card.excerpt, cols.saturating_sub(ID_WIDTH + 1));
    push_line(out, &Theme::fg(&theme.colors.text_dim), &format!("{indent}{excerpt}"));
}
