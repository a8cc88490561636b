//! Core type definitions for catalog entries.
//!
//! All enums are serialized in lowercase so the presentation layer can switch
//! on them directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media category discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A feature film.
    Movie,
    /// A TV series.
    Series,
    /// A video game.
    Game,
}

impl MediaKind {
    /// Human-readable noun used when talking about an item of this kind.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "TV series",
            Self::Game => "video game",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
            Self::Game => write!(f, "game"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "series" | "tv" => Ok(Self::Series),
            "game" => Ok(Self::Game),
            _ => Err(crate::Error::parse(format!("Invalid media kind: {}", s))),
        }
    }
}

/// Which source produced an item's poster URL.
///
/// Presentation uses this to pick a rendering style: storefront covers are
/// portrait art, primary game images are landscape screenshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageOrigin {
    /// The catalog provider that produced the item.
    #[default]
    Primary,
    /// The secondary storefront used for enrichment.
    Storefront,
}

impl fmt::Display for ImageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Storefront => write!(f, "storefront"),
        }
    }
}

/// Storefront price of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "formatted", rename_all = "lowercase")]
pub enum Price {
    /// The storefront marks the title free to play.
    Free,
    /// Final formatted price as reported by the storefront (e.g. "R$ 59,90").
    Paid(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Paid(formatted) => write!(f, "{}", formatted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_serialization() {
        let json = serde_json::to_string(&MediaKind::Series).unwrap();
        assert_eq!(json, r#""series""#);

        let kind: MediaKind = serde_json::from_str(r#""game""#).unwrap();
        assert_eq!(kind, MediaKind::Game);
    }

    #[test]
    fn test_media_kind_from_str() {
        assert_eq!("movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("tv".parse::<MediaKind>().unwrap(), MediaKind::Series);
        assert_eq!("series".parse::<MediaKind>().unwrap(), MediaKind::Series);
        assert!("person".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_image_origin_default() {
        assert_eq!(ImageOrigin::default(), ImageOrigin::Primary);
        assert_eq!(ImageOrigin::Storefront.to_string(), "storefront");
    }

    #[test]
    fn test_price_serialization() {
        let json = serde_json::to_value(Price::Paid("R$ 59,90".into())).unwrap();
        assert_eq!(json["kind"], "paid");
        assert_eq!(json["formatted"], "R$ 59,90");

        let json = serde_json::to_value(Price::Free).unwrap();
        assert_eq!(json["kind"], "free");
        assert_eq!(Price::Free.to_string(), "Free");
    }
}
