//! Mediadex-Common: Shared catalog types and errors.
//!
//! This crate provides the canonical shapes every layer of mediadex agrees on:
//!
//! - **Kinds and tags**: [`MediaKind`], [`ImageOrigin`] and [`Price`]
//! - **Canonical items**: [`MediaItem`], the provider-independent catalog entry
//! - **Daily trivia**: [`DailyTrivia`], the memoized fact of the day
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use mediadex_common::{MediaItem, MediaKind, Error, Result};
//!
//! let item = MediaItem::new("603", MediaKind::Movie, "tmdb", "The Matrix", "Neo wakes up.");
//! assert!(item.poster_url.is_none());
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("movie 603"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod item;
pub mod types;

pub use error::{Error, Result};
pub use item::{DailyTrivia, MediaItem};
pub use types::*;
