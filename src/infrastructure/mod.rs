//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the browser keeps its trace files and looks for its
//! configuration, using the platform directories reported by `dirs`.

pub mod paths;

pub use paths::{config_file, data_dir, expand_tilde};
