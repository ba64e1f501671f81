//! Theme management and ANSI escape sequence generation.
//!
//! A theme is a named palette of hex colors plus the [`Appearance`] it belongs
//! to. Two palettes ship with the binary, one per appearance, and custom ones
//! can be loaded from TOML files.
//!
//! # Built-in Themes
//!
//! - `yamiyume-dark`: Night palette with violet accents (default)
//! - `yamiyume-light`: Paper palette with the same accents, darkened
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//! appearance = "light"
//!
//! [colors]
//! header_fg = "#1e1b2e"
//! text_normal = "#2a2438"
//! text_dim = "#7c7391"
//! border = "#d6d0e4"
//! accent = "#7c3aed"
//! score_fg = "#b45309"
//! favorite_fg = "#db2777"
//! loading_fg = "#2563eb"
//! notice_fg = "#7c7391"
//! error_fg = "#dc2626"
//! empty_state_fg = "#7c3aed"
//! ```
//!
//! # Example
//!
//! ```rust
//! use yamiyume::ui::theme::{Appearance, Theme};
//!
//! let theme = Theme::builtin(Appearance::Light);
//! assert_eq!(theme.name, "yamiyume-light");
//! print!("{}{}Bold accent{}", Theme::bold(), Theme::fg(&theme.colors.accent), Theme::reset());
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{Result, YamiyumeError};

/// Light or dark.
///
/// Toggling the theme flips the appearance and swaps in the matching
/// built-in palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Dark,
    Light,
}

impl Appearance {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Custom files without this key are treated as dark.
    #[serde(default)]
    pub appearance: Appearance,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are hex strings (e.g. `"#e6e1f5"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer, excerpts and other secondary text.
    pub text_dim: String,
    /// Separator lines.
    pub border: String,

    /// Search box frame, current page marker and card ids.
    pub accent: String,
    pub score_fg: String,
    /// Heart marker on favorited cards.
    pub favorite_fg: String,

    pub loading_fg: String,
    pub notice_fg: String,
    pub error_fg: String,

    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for names other than `yamiyume-dark` and `yamiyume-light`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "yamiyume-dark" | "dark" => include_str!("../../themes/yamiyume-dark.toml"),
            "yamiyume-light" | "light" => include_str!("../../themes/yamiyume-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// The built-in palette for `appearance`.
    ///
    /// # Panics
    ///
    /// Panics if a bundled theme file fails to parse, which the unit tests
    /// rule out.
    #[must_use]
    pub fn builtin(appearance: Appearance) -> Self {
        let name = match appearance {
            Appearance::Dark => "yamiyume-dark",
            Appearance::Light => "yamiyume-light",
        };
        Self::from_name(name).expect("Built-in themes should always parse")
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Parameters
    ///
    /// * `path` - TOML file in the format shown in the module docs; `~` is
    ///   expanded by the caller
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use yamiyume::ui::Theme;
    ///
    /// let theme = Theme::from_file("/home/mei/.config/yamiyume/dusk.toml")?;
    /// println!("loaded {} ({})", theme.name, theme.appearance.as_str());
    /// # Ok::<(), yamiyume::YamiyumeError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`YamiyumeError::Theme`] if the file cannot be read or its
    /// content does not describe a complete palette.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| YamiyumeError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| YamiyumeError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Converts a hex color to an RGB tuple.
    ///
    /// # Parameters
    ///
    /// * `hex` - `#rrggbb` or `rrggbb`, surrounding whitespace ignored
    ///
    /// # Returns
    ///
    /// The parsed channels, or `(255, 255, 255)` for anything malformed.
    /// A bad color in a custom theme renders white instead of failing.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for a hex color.
    ///
    /// ```rust
    /// use yamiyume::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Faint text, combined with `text_dim` for the empty state.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The dark built-in palette.
    fn default() -> Self {
        Self::builtin(Appearance::Dark)
    }
}
