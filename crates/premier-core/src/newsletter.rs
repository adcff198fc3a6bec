//! Newsletter signup box in the footer.
//!
//! A successful signup shows a confirmation that resets itself after a
//! fixed delay. Signing up again while it shows restarts the delay.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::timeline::{Scheduled, TimerId, Timeline};
use crate::validation::{validate_email, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResetConfirmation;

#[derive(Debug)]
pub struct Newsletter {
    email: String,
    subscribed: bool,
    reset_after: Duration,
    reset: Option<TimerId>,
    timeline: Timeline<ResetConfirmation>,
}

impl Newsletter {
    pub fn new(reset_after: Duration) -> CoreResult<Self> {
        if reset_after.is_zero() {
            return Err(CoreError::ZeroInterval { what: "newsletter confirmation" });
        }
        Ok(Newsletter {
            email: String::new(),
            subscribed: false,
            reset_after,
            reset: None,
            timeline: Timeline::new(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Submits the typed address.
    ///
    /// ## Returns
    /// - `Ok(None)` for an empty box (nothing happens)
    /// - `Ok(Some(email))` once subscribed; the box is cleared
    /// - `Err(_)` for a malformed address; the box keeps its text
    pub fn submit(&mut self) -> ValidationResult<Option<String>> {
        if self.email.trim().is_empty() || self.timeline.is_disposed() {
            return Ok(None);
        }
        if let Err(e) = validate_email(&self.email) {
            warn!(error = %e, "Newsletter signup rejected");
            return Err(e);
        }

        let email = std::mem::take(&mut self.email).trim().to_string();
        self.subscribed = true;
        if let Some(reset) = self.reset.take() {
            self.timeline.cancel(reset);
        }
        self.reset = Some(self.timeline.schedule_in(self.reset_after, ResetConfirmation));
        info!("Newsletter signup accepted");
        Ok(Some(email))
    }

    pub fn view(&self) -> NewsletterView {
        NewsletterView {
            email: self.email.clone(),
            subscribed: self.subscribed,
        }
    }
}

impl Scheduled for Newsletter {
    fn advance(&mut self, by: Duration) {
        if self.timeline.is_disposed() {
            return;
        }
        let until = self.timeline.horizon(by);
        while let Some((id, ResetConfirmation)) = self.timeline.pop_due(until) {
            if self.reset == Some(id) {
                self.reset = None;
                self.subscribed = false;
            }
        }
        self.timeline.settle(until);
    }

    fn time_until_next(&self) -> Option<Duration> {
        self.timeline.time_until_next()
    }

    fn dispose(&mut self) {
        self.timeline.dispose();
        self.reset = None;
    }

    fn is_disposed(&self) -> bool {
        self.timeline.is_disposed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterView {
    pub email: String,
    pub subscribed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_empty_submit_is_a_no_op() {
        let mut box_ = Newsletter::new(ms(3000)).unwrap();
        assert_eq!(box_.submit(), Ok(None));
        box_.set_email("   ");
        assert_eq!(box_.submit(), Ok(None));
        assert!(!box_.is_subscribed());
        assert_eq!(box_.time_until_next(), None);
    }

    #[test]
    fn test_malformed_email_keeps_text() {
        let mut box_ = Newsletter::new(ms(3000)).unwrap();
        box_.set_email("not-an-email");
        assert!(matches!(
            box_.submit(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert_eq!(box_.email(), "not-an-email");
        assert!(!box_.is_subscribed());
    }

    #[test]
    fn test_confirmation_resets_after_delay() {
        let mut box_ = Newsletter::new(ms(3000)).unwrap();
        box_.set_email("guest@example.com");
        assert_eq!(box_.submit(), Ok(Some("guest@example.com".to_string())));
        assert!(box_.is_subscribed());
        assert_eq!(box_.email(), "");

        box_.advance(ms(2999));
        assert!(box_.is_subscribed());
        box_.advance(ms(1));
        assert!(!box_.is_subscribed());
    }

    #[test]
    fn test_resubmit_restarts_reset_timer() {
        let mut box_ = Newsletter::new(ms(3000)).unwrap();
        box_.set_email("a@example.com");
        box_.submit().unwrap();
        box_.advance(ms(2000));

        box_.set_email("b@example.com");
        box_.submit().unwrap();
        box_.advance(ms(2000));
        assert!(box_.is_subscribed());
        box_.advance(ms(1000));
        assert!(!box_.is_subscribed());
    }

    #[test]
    fn test_zero_delay_rejected() {
        assert!(Newsletter::new(Duration::ZERO).is_err());
    }
}
