//! # Booking Modal
//!
//! ```text
//!            open(offer)                       submit()
//!   Closed ─────────────► Open{offer, inputs} ─────────► Closed
//!     ▲                      │      ▲                      │
//!     │        close()       │      │ set_date /           └─► BookingSubmission
//!     └──────────────────────┘      │ set_guests
//!                                   └──────────┘
//! ```
//!
//! The total is always computed from the selected offer and the current
//! guest count, never stored. Closing clears the selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::format_rating;
use crate::locale::LocaleTheme;
use crate::money::Money;
use crate::types::{Language, Offer, OfferRef};
use crate::validation::{validate_guests, ValidationResult};
use crate::{DEFAULT_BOOKING_GUESTS, MAX_GUESTS, MIN_GUESTS};

/// Price per guest times guests.
pub fn compute_total(unit_price: Money, guests: u8) -> Money {
    unit_price.multiply_quantity(i64::from(guests))
}

/// User input collected while the modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInputs {
    pub date: Option<NaiveDate>,
    pub guests: u8,
}

impl Default for BookingInputs {
    fn default() -> Self {
        BookingInputs {
            date: None,
            guests: DEFAULT_BOOKING_GUESTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        selected: Box<Offer>,
        inputs: BookingInputs,
    },
}

/// Emitted once per confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub reference: Uuid,
    pub offer: OfferRef,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub guests: u8,
    pub total: Money,
}

#[derive(Debug, Default)]
pub struct BookingModal {
    state: ModalState,
}

impl BookingModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn selected(&self) -> Option<&Offer> {
        match &self.state {
            ModalState::Open { selected, .. } => Some(selected),
            ModalState::Closed => None,
        }
    }

    pub fn inputs(&self) -> Option<BookingInputs> {
        match &self.state {
            ModalState::Open { inputs, .. } => Some(*inputs),
            ModalState::Closed => None,
        }
    }

    /// Opens on `offer` with fresh inputs, replacing any open selection.
    pub fn open(&mut self, offer: Offer) {
        debug!(offer = ?offer.reference(), "Booking modal opened");
        self.state = ModalState::Open {
            selected: Box::new(offer),
            inputs: BookingInputs::default(),
        };
    }

    /// Closes the modal. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        if was_open {
            debug!("Booking modal closed");
        }
        self.state = ModalState::Closed;
        was_open
    }

    /// Returns `Ok(false)` while closed.
    pub fn set_guests(&mut self, guests: u8) -> ValidationResult<bool> {
        validate_guests(guests)?;
        match &mut self.state {
            ModalState::Open { inputs, .. } => {
                inputs.guests = guests;
                Ok(true)
            }
            ModalState::Closed => Ok(false),
        }
    }

    /// Returns false while closed.
    pub fn set_date(&mut self, date: Option<NaiveDate>) -> bool {
        match &mut self.state {
            ModalState::Open { inputs, .. } => {
                inputs.date = date;
                true
            }
            ModalState::Closed => false,
        }
    }

    pub fn total(&self) -> Option<Money> {
        match &self.state {
            ModalState::Open { selected, inputs } => {
                Some(compute_total(selected.unit_price(), inputs.guests))
            }
            ModalState::Closed => None,
        }
    }

    /// Confirms the booking and closes the modal.
    ///
    /// A travel date is optional. Returns `None` when the modal is closed.
    pub fn submit(&mut self) -> Option<BookingSubmission> {
        let ModalState::Open { selected, inputs } = std::mem::take(&mut self.state) else {
            return None;
        };

        let submission = BookingSubmission {
            reference: Uuid::new_v4(),
            offer: selected.reference(),
            title: selected.title().en.clone(),
            date: inputs.date,
            guests: inputs.guests,
            total: compute_total(selected.unit_price(), inputs.guests),
        };
        info!(
            reference = %submission.reference,
            offer = ?submission.offer,
            guests = submission.guests,
            total = %submission.total,
            "Booking submitted"
        );
        Some(submission)
    }

    pub fn view(&self, locale: &LocaleTheme) -> Option<BookingView> {
        let ModalState::Open { selected, inputs } = &self.state else {
            return None;
        };
        let selected = selected.as_ref();

        let (duration, reviews, highlights, included) = match selected {
            Offer::Package(p) => (
                Some(locale.text(&p.duration).to_string()),
                Some(p.reviews),
                p.highlights.iter().map(|h| locale.text(h).to_string()).collect(),
                p.included.iter().map(|i| locale.text(i).to_string()).collect(),
            ),
            Offer::Service(_) => (None, None, Vec::new(), Vec::new()),
        };
        let guest_word = match (locale.language, inputs.guests) {
            (Language::En, 1) => "guest",
            (Language::En, _) => "guests",
            (Language::Ar, _) => "ضيف",
        };
        let unit_price = selected.unit_price();

        Some(BookingView {
            offer: selected.reference(),
            title: locale.text(selected.title()).to_string(),
            description: locale.text(selected.description()).to_string(),
            unit_price: unit_price.format_whole(),
            rating: format_rating(selected.rating_tenths()),
            duration,
            reviews,
            highlights,
            included,
            date: inputs.date.map(|d| d.format("%Y-%m-%d").to_string()),
            guests: inputs.guests,
            min_guests: MIN_GUESTS,
            max_guests: MAX_GUESTS,
            price_line: format!(
                "{} × {} {guest_word}",
                unit_price.format_whole(),
                inputs.guests
            ),
            total: compute_total(unit_price, inputs.guests).format_whole(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub offer: OfferRef,
    pub title: String,
    pub description: String,
    pub unit_price: String,
    pub rating: String,
    pub duration: Option<String>,
    pub reviews: Option<u32>,
    pub highlights: Vec<String>,
    pub included: Vec<String>,
    pub date: Option<String>,
    pub guests: u8,
    pub min_guests: u8,
    pub max_guests: u8,
    /// "$2,999 × 2 guests"
    pub price_line: String,
    pub total: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::{Localized, Package};

    fn package(price: i64) -> Offer {
        Offer::Package(Package {
            id: 1,
            title: Localized::new("Luxury Dubai Experience", "تجربة دبي الفاخرة"),
            description: Localized::same("desc"),
            price: Money::from_major_minor(price, 0),
            duration: Localized::new("7 Days / 6 Nights", "7 أيام / 6 ليال"),
            rating_tenths: 49,
            reviews: 156,
            image: String::new(),
            highlights: vec![Localized::same("Burj Khalifa")],
            included: vec![Localized::same("Transfers")],
        })
    }

    #[test]
    fn test_total_is_price_times_guests() {
        for guests in MIN_GUESTS..=MAX_GUESTS {
            assert_eq!(
                compute_total(Money::from_major_minor(2999, 0), guests),
                Money::from_major_minor(2999 * i64::from(guests), 0)
            );
        }
    }

    #[test]
    fn test_guests_do_not_leak_across_sessions() {
        assert_eq!(compute_total(Money::from_cents(299), 3), Money::from_cents(897));

        let mut modal = BookingModal::new();
        modal.open(package(2999));
        modal.set_guests(4).unwrap();
        assert!(modal.close());

        modal.open(package(150));
        assert_eq!(modal.inputs().unwrap().guests, DEFAULT_BOOKING_GUESTS);
        assert_eq!(modal.total(), Some(Money::from_major_minor(300, 0)));
    }

    #[test]
    fn test_open_resets_inputs() {
        let mut modal = BookingModal::new();
        assert!(!modal.is_open());
        assert_eq!(modal.total(), None);

        modal.open(package(2999));
        assert_eq!(modal.inputs(), Some(BookingInputs::default()));
        assert_eq!(modal.total(), Some(Money::from_major_minor(5998, 0)));

        modal.set_guests(5).unwrap();
        modal.open(package(100));
        assert_eq!(modal.inputs().unwrap().guests, DEFAULT_BOOKING_GUESTS);
    }

    #[test]
    fn test_total_tracks_guest_changes() {
        let mut modal = BookingModal::new();
        modal.open(package(2999));
        for guests in 1..=8 {
            assert_eq!(modal.set_guests(guests), Ok(true));
            assert_eq!(
                modal.total().unwrap(),
                Money::from_major_minor(2999, 0) * i64::from(guests)
            );
        }
    }

    #[test]
    fn test_invalid_guests_rejected_and_state_kept() {
        let mut modal = BookingModal::new();
        modal.open(package(2999));
        modal.set_guests(3).unwrap();
        assert!(matches!(
            modal.set_guests(0),
            Err(ValidationError::OutOfRange { min: 1, max: 8, .. })
        ));
        assert!(modal.set_guests(9).is_err());
        assert_eq!(modal.inputs().unwrap().guests, 3);
    }

    #[test]
    fn test_close_is_idempotent_and_clears_selection() {
        let mut modal = BookingModal::new();
        modal.open(package(10));
        assert!(modal.close());
        assert!(!modal.close());
        assert!(modal.selected().is_none());
        assert_eq!(modal.set_guests(4), Ok(false));
        assert!(!modal.set_date(None));
    }

    #[test]
    fn test_submit_closes_and_reports() {
        let mut modal = BookingModal::new();
        assert!(modal.submit().is_none());

        modal.open(package(2999));
        let date = NaiveDate::from_ymd_opt(2026, 12, 24);
        assert!(modal.set_date(date));
        modal.set_guests(3).unwrap();

        let submission = modal.submit().unwrap();
        assert_eq!(submission.offer, OfferRef::Package(1));
        assert_eq!(submission.date, date);
        assert_eq!(submission.guests, 3);
        assert_eq!(submission.total, Money::from_major_minor(8997, 0));
        assert!(!modal.is_open());
        assert!(modal.submit().is_none());
    }

    #[test]
    fn test_submit_without_date() {
        let mut modal = BookingModal::new();
        modal.open(package(80));
        let submission = modal.submit().unwrap();
        assert_eq!(submission.date, None);
        assert_eq!(submission.guests, 2);
    }

    #[test]
    fn test_view() {
        let mut modal = BookingModal::new();
        assert!(modal.view(&LocaleTheme::default()).is_none());

        modal.open(package(2999));
        let view = modal.view(&LocaleTheme::default()).unwrap();
        assert_eq!(view.price_line, "$2,999 × 2 guests");
        assert_eq!(view.total, "$5,998");
        assert_eq!(view.duration.as_deref(), Some("7 Days / 6 Nights"));
        assert_eq!(view.reviews, Some(156));

        modal.set_guests(1).unwrap();
        let view = modal.view(&LocaleTheme::new(Language::Ar, false)).unwrap();
        assert_eq!(view.title, "تجربة دبي الفاخرة");
        assert_eq!(view.total, "$2,999");
    }
}
