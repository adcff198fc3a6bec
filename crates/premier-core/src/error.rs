//! # Error Types
//!
//! Domain-specific error types for premier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  premier-core errors (this file)                                       │
//! │  ├── CoreError        - Invalid construction (programmer errors)       │
//! │  └── ValidationError  - Rejected field input                           │
//! │                                                                         │
//! │  premier-shell errors (app crate)                                      │
//! │  ├── ShellError       - Config / startup failures                      │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Out-of-range navigation, closing a closed modal and double submits are
//! NOT errors. Those are no-ops and never reach this file.

use thiserror::Error;

use crate::types::TabId;

// =============================================================================
// Core Error
// =============================================================================

/// Construction-time failures.
///
/// These are raised once, when a component is built from bad static data,
/// and are never retried at runtime.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A carousel needs at least one item.
    #[error("Carousel '{name}' cannot be built from an empty item list")]
    EmptyCarousel { name: String },

    /// Every tab must declare at least one field.
    #[error("Tab {tab} has an empty field schema")]
    EmptyTabSchema { tab: TabId },

    /// The schema table has no tabs at all.
    #[error("Search form schema declares no tabs")]
    NoTabs,

    /// Field names are unique within a tab.
    #[error("Tab {tab} declares field '{field}' more than once")]
    DuplicateField { tab: TabId, field: String },

    /// A field default does not satisfy its own descriptor.
    #[error("Default for {tab}.{field} is invalid: {source}")]
    InvalidDefault {
        tab: TabId,
        field: String,
        #[source]
        source: ValidationError,
    },

    /// Repeating timers with a zero period would never let time advance.
    #[error("{what} interval must be greater than zero")]
    ZeroInterval { what: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// A rejected value leaves the owning component untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid date, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Value shape does not match the field kind.
    #[error("{field} expects a {expected} value")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
