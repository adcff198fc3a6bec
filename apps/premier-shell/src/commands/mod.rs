//! # Commands Module
//!
//! Every call the frontend bridge makes into the page.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── page.rs        ◄─── Full page view, section visibility
//! ├── locale.rs      ◄─── Language and dark mode
//! ├── carousel.rs    ◄─── Testimonial slider controls
//! ├── search.rs      ◄─── Tabbed search form
//! ├── catalog.rs     ◄─── Category filter, service/package selection
//! ├── map.rs         ◄─── Map pins and "Book Experience"
//! ├── booking.rs     ◄─── Booking modal inputs and submit
//! └── newsletter.rs  ◄─── Footer signup
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend                                                               │
//! │  ────────                                                               │
//! │  const view = await invoke('set_booking_guests', { guests: 3 });        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Shell                                                             │
//! │  ──────────                                                             │
//! │  fn set_booking_guests(                                                 │
//! │      state: &PageState,       ◄── Shared page                          │
//! │      guests: u8,              ◄── From invoke params                   │
//! │  ) -> Result<BookingView, ApiError>                                     │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Frontend receives: BookingView                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutating commands go through [`PageState::with_page_mut`], which syncs
//! the page clock first and wakes the driver afterwards.
//!
//! [`PageState::with_page_mut`]: crate::state::PageState::with_page_mut

pub mod booking;
pub mod carousel;
pub mod catalog;
pub mod locale;
pub mod map;
pub mod newsletter;
pub mod page;
pub mod search;

#[cfg(test)]
pub(crate) fn test_state() -> crate::state::PageState {
    use premier_core::{LandingPage, LocaleTheme, PageTimings};

    let page = LandingPage::new(LocaleTheme::default(), &PageTimings::default())
        .expect("built-in content mounts");
    crate::state::PageState::new(page)
}
