//! # Page Commands
//!
//! Whole-page view and viewport signals.

use premier_core::{PageView, Section};
use tracing::debug;

use crate::state::PageState;

/// Gets the full page view (initial render and after locale changes).
pub fn get_page(state: &PageState) -> PageView {
    state.with_page(|p| p.view())
}

/// Reports that a section scrolled into (or out of) view.
///
/// ## Returns
/// Whether this was the section's first sighting. Later signals are
/// ignored; the reveal and counter animations run once per mount.
pub fn set_section_visible(state: &PageState, section: Section, visible: bool) -> bool {
    debug!(?section, visible, "set_section_visible command");
    state.with_page_mut(|p| p.set_section_visible(section, visible))
}
