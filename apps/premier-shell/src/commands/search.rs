//! # Search Form Commands
//!
//! Tab switching, field edits and the simulated search.
//!
//! ## Search Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_search_tab / set_search_field ──► submit_search ──► searching     │
//! │                                                              │          │
//! │                                          latency elapses (driver)       │
//! │                                                              ▼          │
//! │                                  PageEvent::SearchSubmitted ──► emitter │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use premier_core::form::{FieldValue, SearchFormView};
use premier_core::TabId;
use tracing::debug;

use crate::error::ApiError;
use crate::state::PageState;

fn search_view(state: &PageState) -> SearchFormView {
    state.with_page(|p| p.search().view(&p.locale()))
}

pub fn get_search_form(state: &PageState) -> SearchFormView {
    search_view(state)
}

/// Switches the active tab.
///
/// ## Errors
/// `NOT_FOUND` when the schema has no such tab.
pub fn set_search_tab(state: &PageState, tab: TabId) -> Result<SearchFormView, ApiError> {
    debug!(%tab, "set_search_tab command");
    if !state.with_page_mut(|p| p.search_mut().set_active_tab(tab)) {
        return Err(ApiError::not_found("Search tab", tab));
    }
    Ok(search_view(state))
}

/// Sets a field on the active tab.
///
/// ## Errors
/// - `NOT_FOUND` when the active tab has no such field
/// - `VALIDATION_ERROR` when the value does not fit the field
pub fn set_search_field(
    state: &PageState,
    name: String,
    value: FieldValue,
) -> Result<SearchFormView, ApiError> {
    debug!(field = %name, "set_search_field command");
    let stored = state.with_page_mut(|p| p.search_mut().set_field(&name, value))?;
    if !stored {
        return Err(ApiError::not_found("Search field", &name));
    }
    Ok(search_view(state))
}

/// Starts the simulated search. A submit while one is running changes
/// nothing; the returned view still shows `searching`.
pub fn submit_search(state: &PageState) -> SearchFormView {
    debug!("submit_search command");
    state.with_page_mut(|p| p.submit_search());
    search_view(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;

    use crate::commands::test_state;

    #[test]
    fn test_unknown_field_is_not_found() {
        let state = test_state();
        let err = set_search_field(&state, "pickup".into(), FieldValue::Text("DXB".into()))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_field_edits_on_active_tab() {
        let state = test_state();
        set_search_tab(&state, TabId::Cars).unwrap();
        set_search_field(&state, "pickup".into(), FieldValue::Text("Dubai Marina".into()))
            .unwrap();
        assert_eq!(
            state.with_page(|p| p.search().field("pickup").cloned()),
            Some(FieldValue::Text("Dubai Marina".into()))
        );

        let date = NaiveDate::from_ymd_opt(2025, 3, 1);
        set_search_tab(&state, TabId::Villas).unwrap();
        let view = set_search_field(&state, "date".into(), FieldValue::Date(date)).unwrap();
        assert!(view.tabs.iter().any(|t| t.id == TabId::Villas && t.active));
    }

    #[test]
    fn test_out_of_range_guests_rejected() {
        let state = test_state();
        let err = set_search_field(&state, "guests".into(), FieldValue::Number(9)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            state.with_page(|p| p.search().field("guests").cloned()),
            Some(FieldValue::Number(1))
        );
    }

    #[test]
    fn test_double_submit_keeps_single_search() {
        let state = test_state();
        assert!(submit_search(&state).searching);
        assert!(submit_search(&state).searching);
    }
}
