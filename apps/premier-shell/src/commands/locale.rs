//! # Locale Commands
//!
//! Language switcher and dark mode toggle. Both change every rendered
//! string or colour, so they answer with the full page view.

use premier_core::{Language, PageView};
use tracing::debug;

use crate::state::PageState;

/// Switches the page language. Selecting the current language is a no-op.
pub fn set_language(state: &PageState, language: Language) -> PageView {
    debug!(%language, "set_language command");
    state.with_page_mut(|p| {
        p.set_language(language);
        p.view()
    })
}

pub fn set_dark_mode(state: &PageState, dark_mode: bool) -> PageView {
    debug!(dark_mode, "set_dark_mode command");
    state.with_page_mut(|p| {
        p.set_dark_mode(dark_mode);
        p.view()
    })
}

pub fn toggle_dark_mode(state: &PageState) -> PageView {
    debug!("toggle_dark_mode command");
    state.with_page_mut(|p| {
        p.toggle_dark_mode();
        p.view()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_state;
    use premier_core::TextDirection;

    #[test]
    fn test_arabic_flips_direction() {
        let state = test_state();
        let view = set_language(&state, Language::Ar);
        assert_eq!(view.locale.language, Language::Ar);
        assert_eq!(view.direction, TextDirection::Rtl);

        let view = set_language(&state, Language::En);
        assert_eq!(view.direction, TextDirection::Ltr);
    }

    #[test]
    fn test_dark_mode_toggle() {
        let state = test_state();
        assert!(toggle_dark_mode(&state).locale.dark_mode);
        assert!(!toggle_dark_mode(&state).locale.dark_mode);
        assert!(set_dark_mode(&state, true).locale.dark_mode);
        assert!(set_dark_mode(&state, true).locale.dark_mode);
    }
}
