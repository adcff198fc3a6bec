//! # Newsletter Commands

use premier_core::newsletter::NewsletterView;
use tracing::debug;

use crate::error::ApiError;
use crate::state::PageState;

pub fn set_newsletter_email(state: &PageState, email: String) -> NewsletterView {
    state.with_page_mut(|p| {
        p.newsletter_mut().set_email(email);
        p.newsletter().view()
    })
}

/// Submits the signup box. An empty box is a no-op; a malformed address
/// is a `VALIDATION_ERROR` and the text stays in the box.
pub fn subscribe(state: &PageState) -> Result<NewsletterView, ApiError> {
    debug!("subscribe command");
    state.with_page_mut(|p| {
        p.submit_newsletter()?;
        Ok(p.newsletter().view())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    use crate::commands::test_state;

    #[test]
    fn test_subscribe_flow() {
        let state = test_state();
        assert!(!subscribe(&state).unwrap().subscribed);

        set_newsletter_email(&state, "nope".into());
        let err = subscribe(&state).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.with_page(|p| p.newsletter().email().to_string()), "nope");

        set_newsletter_email(&state, "guest@example.com".into());
        let view = subscribe(&state).unwrap();
        assert!(view.subscribed);
        assert_eq!(view.email, "");
    }
}
