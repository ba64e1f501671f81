//! Yamiyume: a terminal browser for the AniList anime catalog.
//!
//! Yamiyume provides:
//! - A paginated, filterable catalog listing (search text and genre)
//! - Debounced search, bounded retries with backoff, and a generation guard
//!   so that a slow response can never overwrite a newer query's results
//! - An in-memory favorites set with its own listing
//! - Detail pages with episodes, and a spotlight picked from trending titles
//! - Light and dark themes

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front-end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │ commands → Events
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Async side effects
//! │  - CatalogController: dispatch + completions        │
//! │  - Retry with backoff, debounce timer               │
//! └─────────────────────────────────────────────────────┘
//!         │                                      │
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │ Application (app/)       │   │ Media source (source/)   │
//! │ - Event handling         │   │ - MediaSource trait      │
//! │ - Catalog state, favs    │   │ - AniList GraphQL client │
//! │ - View model computation │   └──────────────────────────┘
//! └──────────────────────────┘
//!         │
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │ UI (ui/)                 │   │ Domain (domain/)         │
//! │ - Rendering, components  │   │ - Catalog items, genres  │
//! │ - Theming                │   │ - Error types            │
//! └──────────────────────────┘   └──────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/), paths (infrastructure/) │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Catalog items, genres and errors
//! - [`source`]: The media source abstraction and the AniList client
//! - [`runtime`]: Controller executing actions on tokio
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Data and config directory resolution
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML file
//! (`~/.config/yamiyume/config.toml` or the `config=<path>` argument), and
//! `key=value` command-line arguments:
//!
//! ```toml
//! per_page = 24
//! sort = "score"
//! debounce_ms = 400
//! theme = "light"
//! trace_level = "yamiyume=debug"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use yamiyume::runtime::CatalogController;
//! use yamiyume::source::anilist::AniListClient;
//! use yamiyume::{initialize, Config, Event};
//!
//! # async fn run() -> yamiyume::Result<()> {
//! let config = Config::default();
//! let client = AniListClient::new(&config.endpoint, config.timeout())?.with_sort(config.sort);
//! let mut ctl = CatalogController::new(initialize(&config), Arc::new(client), config.controller_settings());
//!
//! ctl.dispatch(&Event::Start)?;
//! ctl.dispatch(&Event::SearchInput("frieren".into()))?;
//! ctl.settle().await?;
//! println!("{} titles", ctl.state().catalog.total);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod source;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, View};
pub use domain::{Result, YamiyumeError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use app::FavoritesStore;
use runtime::{ControllerSettings, RetryPolicy, TRENDING_LIMIT};
use source::anilist::{MediaSort, DEFAULT_ENDPOINT};
use source::DEFAULT_PER_PAGE;

/// Largest page size AniList serves.
pub const MAX_PER_PAGE: u32 = 50;

/// Runtime configuration.
///
/// Every field has a default, so partial TOML files and partial argument
/// lists are fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GraphQL endpoint. Default: `https://graphql.anilist.co`
    pub endpoint: String,

    /// Cards per catalog page, `1..=50`. Default: 24
    pub per_page: u32,

    /// Catalog listing order: `popularity`, `score` or `trending`.
    #[serde(deserialize_with = "sort_from_str")]
    pub sort: MediaSort,

    /// Quiet period before typed search text is applied. Default: 500
    pub debounce_ms: u64,

    /// Fetch attempts per request, including the first. Default: 3
    pub max_attempts: u32,

    /// Delay after the first failed attempt, doubled each time. Default: 500
    pub backoff_ms: u64,

    /// HTTP request timeout. Default: 10
    pub timeout_secs: u64,

    /// Built-in theme: `dark` or `light`. Ignored if `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for trace export. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            sort: MediaSort::default(),
            debounce_ms: 500,
            max_attempts: 3,
            backoff_ms: 500,
            timeout_secs: 10,
            theme: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

fn sort_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<MediaSort, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn parse_or<T: std::str::FromStr>(
    map: &BTreeMap<String, String>,
    key: &str,
    current: T,
    warnings: &mut Vec<String>,
) -> T {
    match map.get(key).map(|raw| (raw, raw.trim().parse::<T>())) {
        Some((_, Ok(value))) => value,
        Some((raw, Err(_))) => {
            warnings.push(format!("ignoring unparsable value {raw:?} for {key}"));
            current
        }
        None => current,
    }
}

impl Config {
    /// Parses `key=value` pairs on top of the defaults.
    ///
    /// Values that fail to parse keep their default, one key at a time.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use yamiyume::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("per_page".to_string(), "12".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.per_page, 12);
    /// assert_eq!(config.debounce_ms, 500);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Applies `key=value` pairs over the current values.
    ///
    /// Unknown keys are logged and skipped. `per_page` outside `1..=50` is
    /// treated as unparsable.
    #[must_use]
    pub fn with_overrides(self, map: &BTreeMap<String, String>) -> Self {
        let mut warnings = Vec::new();
        let config = self.apply_overrides(map, &mut warnings);
        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        config
    }

    /// Like [`with_overrides`](Self::with_overrides), but hands the warnings
    /// back instead of logging them.
    fn apply_overrides(mut self, map: &BTreeMap<String, String>, warnings: &mut Vec<String>) -> Self {
        if let Some(endpoint) = map.get("endpoint") {
            self.endpoint.clone_from(endpoint);
        }

        let per_page = parse_or(map, "per_page", self.per_page, warnings);
        if (1..=MAX_PER_PAGE).contains(&per_page) {
            self.per_page = per_page;
        } else {
            warnings.push(format!("per_page {per_page} out of range, keeping {}", self.per_page));
        }

        self.sort = parse_or(map, "sort", self.sort, warnings);
        self.debounce_ms = parse_or(map, "debounce_ms", self.debounce_ms, warnings);
        self.max_attempts = parse_or(map, "max_attempts", self.max_attempts, warnings);
        self.backoff_ms = parse_or(map, "backoff_ms", self.backoff_ms, warnings);
        self.timeout_secs = parse_or(map, "timeout_secs", self.timeout_secs, warnings);

        if let Some(theme) = map.get("theme") {
            self.theme = Some(theme.clone());
        }
        if let Some(theme_file) = map.get("theme_file") {
            self.theme_file = Some(theme_file.clone());
        }
        if let Some(level) = map.get("trace_level") {
            self.trace_level.clone_from(level);
        }

        for key in map.keys() {
            if !Self::KEYS.contains(&key.as_str()) {
                warnings.push(format!("unknown config key {key}"));
            }
        }

        self
    }

    /// Keys accepted by [`with_overrides`](Self::with_overrides), plus
    /// `config` which names the file to load.
    pub const KEYS: &'static [&'static str] = &[
        "config",
        "endpoint",
        "per_page",
        "sort",
        "debounce_ms",
        "max_attempts",
        "backoff_ms",
        "timeout_secs",
        "theme",
        "theme_file",
        "trace_level",
    ];

    /// Reads a TOML config file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`YamiyumeError::Config`] if the file cannot be read, is not
    /// valid TOML, has unknown keys, or fails [`validate`](Self::validate).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| YamiyumeError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| YamiyumeError::Config(format!("failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the full configuration for command-line `args`.
    ///
    /// Loads the file named by `config=<path>` if given, otherwise
    /// `default_file` when it exists, then applies the remaining arguments.
    ///
    /// Argument values that were skipped are returned as warnings rather
    /// than logged, since tracing is configured from the result.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named file cannot be loaded, or when the
    /// default file exists but is invalid.
    pub fn load(args: &BTreeMap<String, String>, default_file: &Path) -> Result<(Self, Vec<String>)> {
        let base = match args.get("config") {
            Some(path) => Self::from_file(infrastructure::expand_tilde(path))?,
            None if default_file.is_file() => Self::from_file(default_file)?,
            None => Self::default(),
        };
        let mut warnings = Vec::new();
        let config = base.apply_overrides(args, &mut warnings);
        Ok((config, warnings))
    }

    /// Checks ranges the deserializer cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`YamiyumeError::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(YamiyumeError::Config(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(YamiyumeError::Config(format!("endpoint must be an http(s) URL, got {:?}", self.endpoint)));
        }
        Ok(())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry and debounce timing for [`runtime::CatalogController`].
    #[must_use]
    pub const fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                base_delay: Duration::from_millis(self.backoff_ms),
            },
            debounce_window: Duration::from_millis(self.debounce_ms),
            trending_limit: TRENDING_LIMIT,
        }
    }
}

/// Parses `key=value` command-line arguments into a map.
///
/// # Errors
///
/// Returns [`YamiyumeError::Config`] for an argument without `=`.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<BTreeMap<String, String>> {
    args.into_iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) => Ok((key.trim().to_string(), value.to_string())),
            None => Err(YamiyumeError::Config(format!("expected key=value, got {arg:?}"))),
        })
        .collect()
}

/// Builds the initial state for `config`.
///
/// The theme comes from `theme_file`, then `theme`, then the dark default;
/// a theme that fails to load falls back to the default with a warning.
/// Favorites start empty.
///
/// ```rust
/// use yamiyume::{initialize, Config};
/// use yamiyume::ui::Appearance;
///
/// let config = Config { theme: Some("light".into()), per_page: 12, ..Default::default() };
/// let state = initialize(&config);
/// assert_eq!(state.theme.appearance, Appearance::Light);
/// assert_eq!(state.catalog.per_page, 12);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(per_page = config.per_page, sort = %config.sort, "initializing yamiyume");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, FavoritesStore::new()).with_per_page(config.per_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    fn toml_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn map_values_fall_back_per_key() {
        let config = Config::from_map(&map(&[
            ("sort", "score"),
            ("max_attempts", "5"),
            ("per_page", "500"),
            ("backoff_ms", "-1"),
        ]));

        assert_eq!(config.sort, MediaSort::ScoreDesc);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(config.backoff_ms, 500);
    }

    #[test]
    fn file_values_are_overridden_by_arguments() {
        let file = toml_file("per_page = 10\nsort = \"trending\"\ntheme = \"light\"\n");
        let args = map(&[("config", file.path().to_str().unwrap()), ("per_page", "20")]);

        let (config, warnings) = Config::load(&args, Path::new("/nonexistent/config.toml")).unwrap();

        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.per_page, 20);
        assert_eq!(config.sort, MediaSort::TrendingDesc);
        assert_eq!(config.theme.as_deref(), Some("light"));
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn default_file_is_used_when_present() {
        let file = toml_file("debounce_ms = 250\n");
        let (config, _) = Config::load(&BTreeMap::new(), file.path()).unwrap();
        assert_eq!(config.debounce_ms, 250);

        let (missing, _) = Config::load(&BTreeMap::new(), Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(missing, Config::default());
    }

    #[test]
    fn skipped_arguments_come_back_as_warnings() {
        let args = map(&[("per_page", "500"), ("debounce_ms", "soon"), ("colour", "red"), ("max_attempts", "2")]);
        let (config, warnings) = Config::load(&args, Path::new("/nonexistent/config.toml")).unwrap();

        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(warnings.len(), 3, "{warnings:?}");
        assert!(warnings.iter().any(|w| w.contains("per_page 500 out of range")));
        assert!(warnings.iter().any(|w| w.contains("\"soon\" for debounce_ms")));
        assert!(warnings.iter().any(|w| w == "unknown config key colour"));
    }

    #[test]
    fn invalid_files_are_config_errors() {
        for body in ["per_page = 0\n", "colour = \"red\"\n", "per_page = \"many\"\n", "endpoint = \"ftp://x\"\n"] {
            let file = toml_file(body);
            let err = Config::from_file(file.path()).unwrap_err();
            assert!(matches!(err, YamiyumeError::Config(_)), "{body}: {err}");
        }
        assert!(Config::from_file("/nonexistent/config.toml").is_err());
    }

    #[test]
    fn settings_follow_config() {
        let config = Config { max_attempts: 4, backoff_ms: 100, debounce_ms: 300, ..Default::default() };
        let settings = config.controller_settings();

        assert_eq!(settings.retry.max_attempts, 4);
        assert_eq!(settings.retry.base_delay, Duration::from_millis(100));
        assert_eq!(settings.debounce_window, Duration::from_millis(300));
        assert_eq!(Config::default().controller_settings(), ControllerSettings::default());
    }

    #[test]
    fn args_need_an_equals_sign() {
        let parsed = parse_args(["theme=light".to_string(), "endpoint=http://x/?a=b".to_string()]).unwrap();
        assert_eq!(parsed.get("endpoint").map(String::as_str), Some("http://x/?a=b"));
        assert!(parse_args(["verbose".to_string()]).is_err());
    }

    #[test]
    fn broken_theme_file_falls_back_to_default() {
        let config = Config { theme_file: Some("/nonexistent/theme.toml".into()), ..Default::default() };
        assert_eq!(initialize(&config).theme, Theme::default());

        let unknown = Config { theme: Some("solarized".into()), ..Default::default() };
        assert_eq!(initialize(&unknown).theme, Theme::default());
    }
}
