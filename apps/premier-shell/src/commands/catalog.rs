//! # Catalog Commands
//!
//! Category filter chips and "Book Now" on service and package cards.

use premier_core::booking::BookingView;
use premier_core::catalog::CatalogView;
use premier_core::CategoryFilter;
use tracing::debug;

use crate::error::ApiError;
use crate::state::PageState;

/// Changes the category filter. Counters of newly shown cards start if
/// the section is already in view.
pub fn set_filter(state: &PageState, filter: CategoryFilter) -> CatalogView {
    debug!(?filter, "set_filter command");
    state.with_page_mut(|p| {
        p.set_filter(filter);
        p.catalog().view(&p.locale())
    })
}

/// Opens a catalog service in the booking modal.
///
/// ## Errors
/// `NOT_FOUND` for an unknown service id.
pub fn select_service(state: &PageState, service_id: u32) -> Result<BookingView, ApiError> {
    debug!(service_id, "select_service command");
    state.with_page_mut(|p| {
        if !p.select_service(service_id) {
            return Err(ApiError::not_found("Service", service_id));
        }
        booking_view(p)
    })
}

/// Opens a featured package in the booking modal.
pub fn select_package(state: &PageState, package_id: u32) -> Result<BookingView, ApiError> {
    debug!(package_id, "select_package command");
    state.with_page_mut(|p| {
        if !p.select_package(package_id) {
            return Err(ApiError::not_found("Package", package_id));
        }
        booking_view(p)
    })
}

pub(crate) fn booking_view(page: &premier_core::LandingPage) -> Result<BookingView, ApiError> {
    page.booking()
        .view(&page.locale())
        .ok_or_else(|| ApiError::invalid_state("Booking modal is closed"))
}
