//! Conversion of provider-native records into canonical [`MediaItem`]s.
//!
//! Raw records are first classified into a [`RawRecord`] variant, then each
//! variant is mapped by its own extraction arm, so adding a new kind forces
//! every match below to handle it.
//!
//! Rules shared by every variant:
//!
//! - A record without a non-blank title is dropped.
//! - Image URLs are always fully qualified; relative paths are prefixed with
//!   the provider's image base, and bare fragments with no base are dropped.
//! - Missing text fields get a placeholder, missing optional fields stay
//!   absent. Nothing is ever guessed.

use mediadex_common::{MediaItem, MediaKind};

use super::provider::{GameProvider, ScreenProvider};
use super::providers::rawg::{RawgGame, RawgGameDetail};
use super::providers::tmdb::{TmdbMovieDetail, TmdbRecord};
use super::text::{non_empty, strip_html};

/// Synopsis for movies and series whose provider has no overview.
pub const MISSING_SYNOPSIS: &str = "Synopsis unavailable.";

/// Synopsis for game list entries (list endpoints carry no description).
pub const GAME_LIST_SYNOPSIS: &str = "Synopsis available in the details page.";

/// Synopsis for game details whose description is empty.
pub const MISSING_DESCRIPTION: &str = "Description unavailable.";

/// A provider-native record tagged with the kind it will become.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Movie(TmdbRecord),
    Series(TmdbRecord),
    Game(RawgGame),
}

impl RawRecord {
    /// Classify a TMDB record.
    ///
    /// An explicit `media_type` wins; otherwise `default_kind` applies.
    /// Returns `None` for records that are neither movies nor series (e.g.
    /// people in a multi-search) or when no kind can be determined.
    pub fn from_tmdb(record: TmdbRecord, default_kind: Option<MediaKind>) -> Option<Self> {
        let kind = match record.media_type.as_deref().filter(|t| !t.is_empty()) {
            Some(media_type) => media_type.parse::<MediaKind>().ok()?,
            None => default_kind?,
        };

        match kind {
            MediaKind::Movie => Some(Self::Movie(record)),
            MediaKind::Series => Some(Self::Series(record)),
            MediaKind::Game => None,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Movie(_) => MediaKind::Movie,
            Self::Series(_) => MediaKind::Series,
            Self::Game(_) => MediaKind::Game,
        }
    }
}

/// Maps raw records to [`MediaItem`]s using the providers' naming and image
/// conventions.
pub struct Normalizer<'a> {
    screens: &'a dyn ScreenProvider,
    games: &'a dyn GameProvider,
}

impl<'a> Normalizer<'a> {
    pub fn new(screens: &'a dyn ScreenProvider, games: &'a dyn GameProvider) -> Self {
        Self { screens, games }
    }

    /// Normalize one record. `None` when the record has no usable title.
    pub fn normalize(&self, record: RawRecord) -> Option<MediaItem> {
        match record {
            RawRecord::Movie(r) => self.screen_item(r, MediaKind::Movie),
            RawRecord::Series(r) => self.screen_item(r, MediaKind::Series),
            RawRecord::Game(g) => self.game_item(g),
        }
    }

    /// Normalize a sequence, dropping untitled records and keeping order.
    pub fn normalize_all<I>(&self, records: I) -> Vec<MediaItem>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        records
            .into_iter()
            .filter_map(|record| self.normalize(record))
            .collect()
    }

    /// Normalize a full movie detail record.
    pub fn movie_detail(&self, detail: TmdbMovieDetail) -> Option<MediaItem> {
        let mut item = self.normalize(RawRecord::Movie(detail.record))?;
        item.genres = detail.genres.into_iter().map(|g| g.name).collect();
        item.runtime_minutes = detail.runtime.filter(|&minutes| minutes > 0);
        Some(item)
    }

    /// Normalize a full game detail record.
    pub fn game_detail(&self, detail: RawgGameDetail) -> Option<MediaItem> {
        let mut item = self.normalize(RawRecord::Game(detail.game))?;
        item.synopsis = detail
            .description
            .as_deref()
            .map(strip_html)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string());
        item.website = non_empty(detail.website.as_deref());
        Some(item)
    }

    fn screen_item(&self, record: TmdbRecord, kind: MediaKind) -> Option<MediaItem> {
        let title = non_empty(record.title.as_deref()).or_else(|| non_empty(record.name.as_deref()))?;
        let synopsis =
            non_empty(record.overview.as_deref()).unwrap_or_else(|| MISSING_SYNOPSIS.to_string());

        let mut item = MediaItem::new(
            record.id.to_string(),
            kind,
            self.screens.name(),
            title,
            synopsis,
        );
        item.release_date = non_empty(record.release_date.as_deref())
            .or_else(|| non_empty(record.first_air_date.as_deref()));
        item.poster_url = non_empty(record.poster_path.as_deref()).map(|p| self.screens.image_url(&p));
        item.backdrop_url =
            non_empty(record.backdrop_path.as_deref()).map(|p| self.screens.image_url(&p));
        item.rating = record.vote_average;
        Some(item)
    }

    fn game_item(&self, game: RawgGame) -> Option<MediaItem> {
        let title = non_empty(game.name.as_deref())?;

        let mut item = MediaItem::new(
            game.id.to_string(),
            MediaKind::Game,
            self.games.name(),
            title,
            GAME_LIST_SYNOPSIS,
        );
        item.release_date = non_empty(game.released.as_deref());
        item.poster_url = non_empty(game.background_image.as_deref()).filter(|u| is_absolute_url(u));
        item.rating = game.rating.or(game.metacritic.map(f64::from));
        item.platforms = game.platform_names();
        item.genres = game.genre_names();
        item.developers = game.developer_names();
        Some(item)
    }
}

fn is_absolute_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
