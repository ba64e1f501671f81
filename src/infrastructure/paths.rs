//! Platform path resolution and tilde expansion.
//!
//! Base directories come from the `dirs` crate. The `*_in` variants take the
//! base directory explicitly, which is what the tests exercise.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "yamiyume";

/// Directory for trace files, e.g. `~/.local/share/yamiyume` on Linux.
///
/// Falls back to `./yamiyume` when the platform reports no data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    data_dir_in(dirs::data_dir())
}

#[must_use]
pub fn data_dir_in(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Default configuration file, e.g. `~/.config/yamiyume/config.toml` on Linux.
#[must_use]
pub fn config_file() -> PathBuf {
    config_file_in(dirs::config_dir())
}

#[must_use]
pub fn config_file_in(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR).join("config.toml")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths when no home directory is
/// known, are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, dirs::home_dir().as_deref())
}

/// [`expand_tilde`] with an explicit home directory.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use yamiyume::infrastructure::paths::expand_tilde_with;
///
/// let home = Some(Path::new("/home/mei"));
/// assert_eq!(expand_tilde_with("~/themes/dusk.toml", home), PathBuf::from("/home/mei/themes/dusk.toml"));
/// assert_eq!(expand_tilde_with("~", home), PathBuf::from("/home/mei"));
/// assert_eq!(expand_tilde_with("/etc/yamiyume.toml", home), PathBuf::from("/etc/yamiyume.toml"));
/// ```
#[must_use]
pub fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    match (home, path.strip_prefix('~')) {
        (Some(home), Some("")) => home.to_path_buf(),
        (Some(home), Some(rest)) if rest.starts_with('/') => home.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}
