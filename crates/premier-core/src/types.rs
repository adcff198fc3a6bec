//! # Domain Types
//!
//! Static records the page is built from, plus the small enums shared by
//! several components.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Service      │   │    Package      │   │  Testimonial    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  category       │   │  price          │   │  name, role     │       │
//! │  │  price_from     │   │  highlights     │   │  rating, text   │       │
//! │  │  stats.bookings │   │  included       │   │  package        │       │
//! │  └────────┬────────┘   └────────┬────────┘   └─────────────────┘       │
//! │           └──────────┬──────────┘                                       │
//! │                      ▼                                                  │
//! │               ┌─────────────┐      ┌─────────────────┐                 │
//! │               │    Offer    │      │    Location     │                 │
//! │               │ (bookable)  │      │  map pin x / y  │                 │
//! │               └─────────────┘      └─────────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every user-facing string is a [`Localized`] pair so that the current
//! [`Language`] is applied at view time, never baked into state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Language
// =============================================================================

/// Supported page languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    #[default]
    En,
    Ar,
}

/// Reading direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Language {
    /// All languages, in switcher order.
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    /// Short code shown on the language switcher.
    pub const fn code(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Ar => "AR",
        }
    }

    pub const fn direction(&self) -> TextDirection {
        match self {
            Language::En => TextDirection::Ltr,
            Language::Ar => TextDirection::Rtl,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ar" | "arabic" => Ok(Language::Ar),
            _ => Err(ValidationError::NotAllowed {
                field: "language".to_string(),
                allowed: Language::ALL.iter().map(|l| l.code().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Localized Text
// =============================================================================

/// A string in every supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub ar: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Localized {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Same text in both languages (proper nouns, codes).
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Localized {
            en: text.clone(),
            ar: text,
        }
    }

    pub fn resolve(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }
}

// =============================================================================
// Search Tabs
// =============================================================================

/// Tabs of the search widget.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    Flights,
    Cars,
    Villas,
    Nightlife,
    Esim,
}

impl TabId {
    pub const ALL: [TabId; 5] = [
        TabId::Flights,
        TabId::Cars,
        TabId::Villas,
        TabId::Nightlife,
        TabId::Esim,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            TabId::Flights => "flights",
            TabId::Cars => "cars",
            TabId::Villas => "villas",
            TabId::Nightlife => "nightlife",
            TabId::Esim => "esim",
        }
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabId::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "tab".to_string(),
                allowed: TabId::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Service Catalog
// =============================================================================

/// Service categories used by the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Travel,
    Transport,
    Accommodation,
    Entertainment,
    Technology,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Travel,
        Category::Transport,
        Category::Accommodation,
        Category::Entertainment,
        Category::Technology,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Travel => "travel",
            Category::Transport => "transport",
            Category::Accommodation => "accommodation",
            Category::Entertainment => "entertainment",
            Category::Technology => "technology",
        }
    }
}

/// The catalog filter: a category, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// `All` is the identity filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(CategoryFilter::All);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .map(CategoryFilter::Only)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: std::iter::once("all")
                    .chain(Category::ALL.iter().map(|c| c.as_str()))
                    .map(str::to_string)
                    .collect(),
            })
    }
}

/// How a "From $X" price is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    Flat,
    PerDay,
    PerNight,
}

impl PriceUnit {
    pub const fn suffix(&self) -> &'static str {
        match self {
            PriceUnit::Flat => "",
            PriceUnit::PerDay => "/day",
            PriceUnit::PerNight => "/night",
        }
    }
}

/// Social proof shown on a service card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Target of the animated booking counter.
    pub bookings: u64,
    /// Rating in tenths of a star (49 = 4.9).
    pub rating_tenths: u8,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: u32,
    pub category: Category,
    pub title: Localized,
    pub description: Localized,
    pub price_from: Money,
    pub price_unit: PriceUnit,
    pub stats: ServiceStats,
    pub image: String,
}

// =============================================================================
// Featured Packages
// =============================================================================

/// A curated multi-day package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: u32,
    pub title: Localized,
    pub description: Localized,
    /// Price per guest.
    pub price: Money,
    pub duration: Localized,
    pub rating_tenths: u8,
    pub reviews: u32,
    pub image: String,
    pub highlights: Vec<Localized>,
    pub included: Vec<Localized>,
}

// =============================================================================
// Offers (what the booking modal shows)
// =============================================================================

/// Anything the booking modal can present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Offer {
    Service(Service),
    Package(Package),
}

/// Lightweight reference to an offer, used in outgoing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum OfferRef {
    Service(u32),
    Package(u32),
}

impl Offer {
    pub fn reference(&self) -> OfferRef {
        match self {
            Offer::Service(s) => OfferRef::Service(s.id),
            Offer::Package(p) => OfferRef::Package(p.id),
        }
    }

    pub fn title(&self) -> &Localized {
        match self {
            Offer::Service(s) => &s.title,
            Offer::Package(p) => &p.title,
        }
    }

    pub fn description(&self) -> &Localized {
        match self {
            Offer::Service(s) => &s.description,
            Offer::Package(p) => &p.description,
        }
    }

    /// Price per guest.
    pub fn unit_price(&self) -> Money {
        match self {
            Offer::Service(s) => s.price_from,
            Offer::Package(p) => p.price,
        }
    }

    pub fn rating_tenths(&self) -> u8 {
        match self {
            Offer::Service(s) => s.stats.rating_tenths,
            Offer::Package(p) => p.rating_tenths,
        }
    }
}

// =============================================================================
// Testimonials
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: String,
    pub role: Localized,
    /// Whole stars, 1-5.
    pub rating: u8,
    pub text: Localized,
    pub image: String,
    pub location: String,
    pub package: String,
    /// Recorded voice clip of the review.
    pub audio_url: String,
}

// =============================================================================
// Map Locations
// =============================================================================

/// Legend group of a map pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Hotel,
    Airport,
    CarRental,
    Nightlife,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub description: Localized,
    pub kind: LocationKind,
    /// Horizontal pin position, percent of map width.
    pub x: u8,
    /// Vertical pin position, percent of map height.
    pub y: u8,
    pub services: Vec<String>,
    pub image: String,
}

// =============================================================================
// Page Sections
// =============================================================================

/// Regions of the page that report viewport visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Services,
    Testimonials,
    Map,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing_and_direction() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("arabic".parse::<Language>().unwrap(), Language::Ar);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::Ar.direction(), TextDirection::Rtl);
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_localized_resolve() {
        let text = Localized::new("Search", "بحث");
        assert_eq!(text.resolve(Language::En), "Search");
        assert_eq!(text.resolve(Language::Ar), "بحث");
        assert_eq!(Localized::same("DXB").resolve(Language::Ar), "DXB");
    }

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Travel".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Travel)
        );
        let err = "spa".parse::<CategoryFilter>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { ref allowed, .. } if allowed.len() == 6));
    }

    #[test]
    fn test_category_filter_all_is_identity() {
        for category in Category::ALL {
            assert!(CategoryFilter::All.matches(category));
        }
        assert!(!CategoryFilter::Only(Category::Travel).matches(Category::Technology));
    }

    #[test]
    fn test_tab_id_round_trip_through_str() {
        for tab in TabId::ALL {
            assert_eq!(tab.to_string().parse::<TabId>().unwrap(), tab);
        }
    }
}
