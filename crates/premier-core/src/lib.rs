//! # premier-core: Presentation State Engine for Dubai Premier
//!
//! Every interactive state machine of the landing page, as plain Rust with
//! no I/O and no wall clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dubai Premier Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (renders views)                     │   │
//! │  │   Hero ─ Search ─ Services ─ Packages ─ Testimonials ─ Map      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / PageView JSON               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    premier-shell                                │   │
//! │  │   PageState, PageDriver (tokio), config, logging                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ advance(elapsed)                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ premier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  locale  │ │ carousel │ │  reveal  │ │   form   │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │ catalog  │ │ booking  │ │   map    │ │newsletter│          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │            all timers run on a per-component Timeline          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO THREADS • NO WALL CLOCK                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`timeline`] - Virtual-clock timer queue and the [`Scheduled`] trait
//! - [`locale`] - Language and colour scheme
//! - [`carousel`] - Autoplay carousel with manual override
//! - [`reveal`] - Fire-once staggered reveal
//! - [`form`] - Tabbed search form
//! - [`catalog`] - Filterable catalog with animated counters
//! - [`booking`] - Booking modal and price computation
//! - [`map`], [`newsletter`] - Smaller page widgets
//! - [`page`] - [`LandingPage`], the root that owns all of the above
//! - [`content`] - Static page data
//!
//! ## Example Usage
//!
//! ```rust
//! use std::time::Duration;
//! use premier_core::{LandingPage, LocaleTheme, PageTimings, Scheduled};
//!
//! let mut page = LandingPage::new(LocaleTheme::default(), &PageTimings::default()).unwrap();
//! page.select_package(1);
//! page.booking_mut().set_guests(3).unwrap();
//! assert_eq!(page.booking().total().unwrap().cents(), 899_700);
//!
//! page.advance(Duration::from_millis(3000));
//! assert_eq!(page.hero().cursor(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod carousel;
pub mod catalog;
pub mod content;
pub mod error;
pub mod form;
pub mod locale;
pub mod map;
pub mod money;
pub mod newsletter;
pub mod page;
pub mod reveal;
pub mod timeline;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use locale::LocaleTheme;
pub use money::Money;
pub use page::{LandingPage, PageEvent, PageTimings, PageView};
pub use timeline::Scheduled;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest guest count offered by the guest selectors.
pub const MIN_GUESTS: u8 = 1;

/// Largest guest count offered by the guest selectors.
pub const MAX_GUESTS: u8 = 8;

/// Guests preselected when the booking modal opens.
pub const DEFAULT_BOOKING_GUESTS: u8 = 2;

/// Guests preselected on the flights tab.
pub const DEFAULT_FLIGHT_GUESTS: u8 = 1;

/// Longest free-text input accepted (search fields, email).
pub const MAX_TEXT_LEN: usize = 200;

/// A booking counter reaches its target in at most this many ticks.
pub const COUNTER_STEPS: u64 = 50;
