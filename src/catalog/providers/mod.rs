//! Concrete catalog provider implementations.
//!
//! Each submodule wraps a single external API and implements one of the
//! traits in [`provider`](super::provider).

pub mod rawg;
pub mod steam;
pub mod tmdb;

pub use rawg::RawgProvider;
pub use steam::SteamStorefront;
pub use tmdb::TmdbProvider;
