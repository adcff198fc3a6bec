//! # Map Commands
//!
//! Pin clicks, closing the detail card and "Book Experience".

use premier_core::booking::BookingView;
use premier_core::map::MapView;
use tracing::debug;

use crate::commands::catalog::booking_view;
use crate::error::ApiError;
use crate::state::PageState;

fn map_view(state: &PageState) -> MapView {
    state.with_page(|p| p.map().view(&p.locale()))
}

/// Opens the detail card of a pin.
pub fn select_location(state: &PageState, location_id: u32) -> Result<MapView, ApiError> {
    debug!(location_id, "select_location command");
    if !state.with_page_mut(|p| p.map_mut().select(location_id)) {
        return Err(ApiError::not_found("Location", location_id));
    }
    Ok(map_view(state))
}

/// Closes the detail card. Closing when none is open is fine.
pub fn clear_location(state: &PageState) -> MapView {
    debug!("clear_location command");
    state.with_page_mut(|p| p.map_mut().clear_selection());
    map_view(state)
}

/// "Book Experience" on the open card.
///
/// ## Errors
/// `INVALID_STATE` when no card is open or nothing bookable matches it.
pub fn book_location(state: &PageState) -> Result<BookingView, ApiError> {
    debug!("book_location command");
    state.with_page_mut(|p| {
        if !p.book_location() {
            return Err(ApiError::invalid_state("No bookable location selected"));
        }
        booking_view(p)
    })
}
