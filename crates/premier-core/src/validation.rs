//! # Validation Module
//!
//! Input checks shared by the search form, the booking modal and the
//! newsletter box.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Frontend widgets                                             │
//! │  ├── <select> only offers valid options, <input type=date>             │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Range checks (guests 1..=8)                                       │
//! │  ├── Option membership for selects                                     │
//! │  └── Date / email format                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Component state                                              │
//! │  └── Rejected input never reaches it                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use premier_core::validation::{parse_date, validate_guests};
//!
//! assert!(validate_guests(4).is_ok());
//! assert!(validate_guests(9).is_err());
//! assert!(parse_date("travel date", "2026-12-24").is_ok());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{MAX_GUESTS, MAX_TEXT_LEN, MIN_GUESTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a guest count against the 1..=8 selector range.
pub fn validate_guests(guests: u8) -> ValidationResult<()> {
    validate_range("guests", i64::from(guests), i64::from(MIN_GUESTS), i64::from(MAX_GUESTS))
}

/// Validates an integer against an inclusive range.
pub fn validate_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

/// Validates free text typed into a search field.
///
/// Empty text is allowed (search fields are optional), overly long text is
/// not.
pub fn validate_text(field: &str, text: &str) -> ValidationResult<()> {
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }
    Ok(())
}

/// Validates that `value` is one of `options`. The empty string is the
/// unselected placeholder and always passes.
pub fn validate_choice(field: &str, value: &str, options: &[String]) -> ValidationResult<()> {
    if value.is_empty() || options.iter().any(|o| o == value) {
        return Ok(());
    }
    Err(ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: options.to_vec(),
    })
}

/// Parses an ISO `YYYY-MM-DD` date as produced by `<input type="date">`.
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Checks that a date range is not inverted. Open ends are fine.
pub fn validate_date_range(
    field: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> ValidationResult<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: format!("end {end} is before start {start}"),
            });
        }
    }
    Ok(())
}

/// Validates a newsletter email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@`, with a non-empty local part
/// - Domain contains a `.` that is neither first nor last
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@example.com"));
    }

    let dot = domain.rfind('.').ok_or_else(|| invalid("domain has no '.'"))?;
    if dot == 0 || dot == domain.len() - 1 {
        return Err(invalid("must look like name@example.com"));
    }

    Ok(())
}
