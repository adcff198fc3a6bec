//! # Booking Commands
//!
//! Inputs and submit of the booking modal.
//!
//! ## Modal Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐  select_service   ┌──────────┐  submit_booking  ┌───────┐ │
//! │  │  Closed  │──select_package──►│   Open   │─────────────────►│Closed │ │
//! │  │          │◄──close_booking───│ date,    │                  │+event │ │
//! │  └──────────┘                   │ guests   │                  └───────┘ │
//! │                                 └──────────┘                            │
//! │                          set_booking_guests / set_booking_date          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use premier_core::booking::{BookingSubmission, BookingView};
use tracing::debug;

use crate::commands::catalog::booking_view;
use crate::error::ApiError;
use crate::state::PageState;

fn closed() -> ApiError {
    ApiError::invalid_state("Booking modal is closed")
}

/// Gets the open modal, `None` when closed.
pub fn get_booking(state: &PageState) -> Option<BookingView> {
    state.with_page(|p| p.booking().view(&p.locale()))
}

/// Sets the guest count.
///
/// ## Errors
/// - `VALIDATION_ERROR` outside 1..=8
/// - `INVALID_STATE` when the modal is closed
pub fn set_booking_guests(state: &PageState, guests: u8) -> Result<BookingView, ApiError> {
    debug!(guests, "set_booking_guests command");
    state.with_page_mut(|p| {
        if !p.booking_mut().set_guests(guests)? {
            return Err(closed());
        }
        booking_view(p)
    })
}

/// Sets or clears the travel date.
pub fn set_booking_date(
    state: &PageState,
    date: Option<NaiveDate>,
) -> Result<BookingView, ApiError> {
    debug!(?date, "set_booking_date command");
    state.with_page_mut(|p| {
        if !p.booking_mut().set_date(date) {
            return Err(closed());
        }
        booking_view(p)
    })
}

/// Closes the modal (clearing the selection). Returns whether it was open.
pub fn close_booking(state: &PageState) -> bool {
    debug!("close_booking command");
    state.with_page_mut(|p| p.booking_mut().close())
}

/// Confirms the booking. The modal closes and a `BookingSubmitted` event
/// goes out through the driver.
pub fn submit_booking(state: &PageState) -> Result<BookingSubmission, ApiError> {
    debug!("submit_booking command");
    state.with_page_mut(|p| p.submit_booking()).ok_or_else(closed)
}
