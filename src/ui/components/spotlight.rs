//! Spotlight (hero banner) renderer.

use crate::ui::helpers::{push_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SpotlightInfo;

/// Renders the featured title above the catalog listing.
///
/// ```text
///  ★ SPOTLIGHT  Frieren: Beyond Journey's End  #154587  9.1
///    The adventure is over but life goes on for an elf mage…
///    Banner:  https://s4.anilist.co/file/anilistcdn/media/anime/banner/154587.jpg
///    Trailer: https://www.youtube.com/watch?v=qgQxzbnT2Zw
/// ```
pub fn render_spotlight(out: &mut String, spotlight: &SpotlightInfo, theme: &Theme, cols: usize) {
    let heading = format!(
        "{}{} ★ SPOTLIGHT {}{} {} {}#{} {}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.accent),
        Theme::reset(),
        Theme::bold(),
        spotlight.title,
        Theme::fg(&theme.colors.text_dim),
        spotlight.id,
        Theme::fg(&theme.colors.score_fg),
        spotlight.score,
    );
    push_line(out, "", &heading);

    let dim = Theme::fg(&theme.colors.text_dim);
    push_line(out, &dim, &format!("   {}", truncate(&spotlight.synopsis, cols.saturating_sub(3))));
    if let Some(url) = &spotlight.image_url {
        push_line(out, &dim, &format!("   Banner:  {url}"));
    }
    if let Some(url) = &spotlight.trailer_url {
        push_line(out, &dim, &format!("   Trailer: {url}"));
    }
    out.push('\n');
}
