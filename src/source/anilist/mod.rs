//! AniList GraphQL media source.
//!
//! Talks to `https://graphql.anilist.co` with POSTed GraphQL documents. The
//! raw response shapes live in [`models`]; they are converted into domain
//! types at this boundary so nothing else in the crate sees GraphQL.

mod client;
pub mod models;
mod queries;

pub use client::{AniListClient, DEFAULT_ENDPOINT};
pub use queries::MediaSort;
