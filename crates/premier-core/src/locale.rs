//! # Locale & Theme
//!
//! The only state shared across the whole page. It is owned once, by
//! [`crate::page::LandingPage`], and handed to components by reference
//! whenever they build a view. Nothing else holds a copy.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::types::{Language, Localized, TextDirection};

/// Current language and colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LocaleTheme {
    pub language: Language,
    pub dark_mode: bool,
}

impl LocaleTheme {
    pub fn new(language: Language, dark_mode: bool) -> Self {
        LocaleTheme {
            language,
            dark_mode,
        }
    }

    /// Replaces the language unconditionally.
    pub fn set_language(&mut self, next: Language) {
        if self.language != next {
            debug!(from = %self.language, to = %next, "Language changed");
        }
        self.language = next;
    }

    /// Replaces the colour scheme unconditionally.
    pub fn set_dark_mode(&mut self, next: bool) {
        if self.dark_mode != next {
            debug!(dark_mode = next, "Theme changed");
        }
        self.dark_mode = next;
    }

    /// Flips the colour scheme (the moon/sun button).
    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.dark_mode);
    }

    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    /// Resolves localized text against the current language.
    pub fn text<'a>(&self, text: &'a Localized) -> &'a str {
        text.resolve(self.language)
    }
}
