//! Media catalog: provider clients, normalization and storefront enrichment.
//!
//! # Module layout
//!
//! - [`provider`] -- Provider traits, listing requests and shared types.
//! - [`providers`] -- TMDB, RAWG and Steam HTTP clients.
//! - [`normalize`] -- Provider records to [`MediaItem`](mediadex_common::MediaItem).
//! - [`enrichment`] -- Steam cover, price and requirements overlay for games.
//! - [`facade`] -- The [`Catalog`] operations used by the CLI and the server.

pub mod enrichment;
pub mod facade;
pub mod normalize;
pub mod provider;
pub mod providers;
mod text;

pub use enrichment::{EnrichmentPolicy, Enricher, SteamLookupCache, StoreListing};
pub use facade::{normalize_genre_ids, nostalgia_window, Catalog};
pub use provider::{
    DateWindow, GameListing, GameProvider, ProviderError, ProviderResult, ScreenKind,
    ScreenListing, ScreenProvider, Storefront, StorefrontDetails,
};
