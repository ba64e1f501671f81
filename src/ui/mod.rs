//! Terminal rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled frames through composable
//! rendering components, with light and dark theme support.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (truncation, wrapping, centering)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::{Appearance, Theme};
pub use viewmodel::{
    CardItem, DetailInfo, EmptyState, FooterInfo, HeaderInfo, PaginationInfo, SearchBarInfo,
    SpotlightInfo, StatusKind, StatusLine, UIViewModel,
};
