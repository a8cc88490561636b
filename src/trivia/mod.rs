//! Daily trivia: one catalog item per calendar day, paired with a short
//! generated fact.
//!
//! - [`cache`] -- The single-slot [`DailyTriviaCache`].
//! - [`gemini`] -- [`GeminiClient`], the generative-text collaborator.

pub mod cache;
pub mod gemini;

use async_trait::async_trait;
use chrono::NaiveDate;
use mediadex_common::{MediaItem, MediaKind};

use crate::catalog::{Catalog, ProviderError};

pub use cache::DailyTriviaCache;
pub use gemini::GeminiClient;

/// Why a trivia slot could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum TriviaError {
    /// The subject catalog returned nothing to pick from.
    #[error("no trivia candidates available")]
    EmptyCatalog,

    /// No API key for the generative collaborator.
    #[error("trivia generator is not configured")]
    NotConfigured,

    /// The generator call itself failed.
    #[error("trivia generator failed: {0}")]
    Generator(#[from] ProviderError),

    /// The generator answered without any text.
    #[error("trivia generator returned no text")]
    EmptyResponse,
}

/// Source of "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Produces trivia text for a subject.
///
/// The output is opaque free text; callers only trim and display it.
#[async_trait]
pub trait TriviaGenerator: Send + Sync {
    /// Whether [`generate`](Self::generate) can succeed at all, checked
    /// without any network call.
    fn is_available(&self) -> bool {
        true
    }

    async fn generate(&self, title: &str, kind: MediaKind) -> Result<String, TriviaError>;
}

/// Candidates the daily subject is drawn from.
#[async_trait]
pub trait SubjectSource: Send + Sync {
    async fn candidates(&self) -> Vec<MediaItem>;
}

#[async_trait]
impl SubjectSource for Catalog {
    async fn candidates(&self) -> Vec<MediaItem> {
        self.popular_movies(1).await
    }
}
