//! Detail page renderer.

use crate::ui::helpers::{push_line, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

/// Episode rows printed before the list is cut short.
const MAX_EPISODES: usize = 24;

/// Renders a full detail page: titles, facts, links, synopsis and episodes.
pub fn render_detail(out: &mut String, detail: &DetailInfo, theme: &Theme, cols: usize) {
    let dim = Theme::fg(&theme.colors.text_dim);
    let normal = Theme::fg(&theme.colors.text_normal);

    let favorite = if detail.is_favorite {
        format!(" {}♥ favorite", Theme::fg(&theme.colors.favorite_fg))
    } else {
        String::new()
    };
    push_line(
        out,
        &format!("{}{normal}", Theme::bold()),
        &format!(" {}{favorite}", detail.title),
    );
    for alt in &detail.alt_titles {
        push_line(out, &dim, &format!(" {alt}"));
    }
    out.push('\n');

    push_line(out, &normal, &format!(" {}", detail.facts));
    let mut score = format!(
        " {}★ {}{}",
        Theme::fg(&theme.colors.score_fg),
        detail.score,
        Theme::reset()
    );
    if let Some(date) = &detail.start_date {
        score.push_str(&format!("{dim} · Aired {date}"));
    }
    push_line(out, "", &score);
    if !detail.genres.is_empty() {
        push_line(out, &dim, &format!(" {}", detail.genres));
    }
    if let Some(url) = &detail.cover_url {
        push_line(out, &dim, &format!(" Cover:   {url}"));
    }
    if let Some(url) = &detail.trailer_url {
        push_line(out, &dim, &format!(" Trailer: {url}"));
    }
    out.push('\n');

    for line in wrap(&detail.synopsis, cols.saturating_sub(2)) {
        push_line(out, &normal, &format!(" {line}"));
    }

    if detail.episodes.is_empty() {
        return;
    }
    out.push('\n');
    push_line(out, &format!("{}{normal}", Theme::bold()), " Episodes");
    for episode in detail.episodes.iter().take(MAX_EPISODES) {
        let url = episode.url.as_deref().map(|u| format!("  {dim}{u}")).unwrap_or_default();
        push_line(out, &normal, &format!(" {:>3}. {}{url}", episode.number, episode.title));
    }
    if detail.episodes.len() > MAX_EPISODES {
        push_line(out, &dim, &format!("      … and {} more", detail.episodes.len() - MAX_EPISODES));
    }
}
