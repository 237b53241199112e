//! # Error Types
//!
//! Domain-specific error types for vitro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitro-core errors (this file)                                         │
//! │  ├── CoreError        - Pricing/configuration failures                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vitro-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (cutting type, thickness, subtype)
//! 3. Errors are enum variants, never String
//! 4. Pricing errors are line-scoped: one bad line must never corrupt the
//!    totals of its siblings

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing and business rule errors.
///
/// All pricing failures are synchronous configuration/programming errors, not
/// transient faults. There is no retry concept: re-running a pure function on
/// the same inputs reproduces the identical error. The invoice-save flow must
/// surface these to the user and refuse to persist the affected line.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A dimension (width, height, thickness) is zero, negative, or missing.
    ///
    /// ## When This Occurs
    /// - Operator leaves the width/height field empty
    /// - A negative value slips past the form layer
    ///
    /// The calculation functions themselves are total (a zero dimension just
    /// yields a zero area); this error exists so callers can reject a line
    /// before it silently prices to 0.00.
    #[error("Invalid {dimension}: {value} (must be positive)")]
    InvalidDimension { dimension: String, value: f64 },

    /// No thickness band matches for a cutting type.
    ///
    /// ## When This Occurs
    /// - The rate table is empty or misconfigured (gap between bands)
    /// - Thickness is zero or negative
    ///
    /// ## User Workflow
    /// ```text
    /// Add beveling to line (thickness: 55mm)
    ///      │
    ///      ▼
    /// Scan SHATF bands: highest is 12.1-50.0
    ///      │
    ///      ▼
    /// RateNotFound { cutting_type: "SHATF", thickness_mm: 55.0 }
    ///      │
    ///      ▼
    /// UI shows: "No beveling rate configured for 55mm glass"
    /// ```
    #[error("No {cutting_type} rate band covers thickness {thickness_mm}mm")]
    RateNotFound {
        cutting_type: String,
        thickness_mm: f64,
    },

    /// No active catalog price matches an operation.
    ///
    /// ## When This Occurs
    /// - Operation references a (type, subtype) pair with no catalog row
    /// - The matching row exists but was toggled inactive by an admin
    ///
    /// Inactive rows must not price NEW lines; lines already saved keep the
    /// price they resolved at save time.
    #[error("No active catalog price for {operation_type} / {subtype}")]
    PriceCatalogMiss {
        operation_type: String,
        subtype: String,
    },

    /// Glass type cannot be found.
    #[error("Glass type not found: {0}")]
    GlassTypeNotFound(String),

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// Invoice is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Trying to add lines to a cancelled invoice
    /// - Trying to record a payment on a cancelled invoice
    #[error("Invoice {invoice_id} is {current_status}, cannot perform operation")]
    InvalidInvoiceStatus {
        invoice_id: String,
        current_status: String,
    },

    /// Invoice has exceeded maximum allowed lines.
    #[error("Invoice cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Payment amount is invalid.
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before pricing runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., overlapping rate band).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::RateNotFound {
            cutting_type: "SHATF".to_string(),
            thickness_mm: 55.0,
        };
        assert_eq!(
            err.to_string(),
            "No SHATF rate band covers thickness 55mm"
        );

        let err = CoreError::PriceCatalogMiss {
            operation_type: "LASER".to_string(),
            subtype: "engraving".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No active catalog price for LASER / engraving"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "width".to_string(),
        };
        assert_eq!(err.to_string(), "width is required");

        let err = ValidationError::MustBePositive {
            field: "height".to_string(),
        };
        assert_eq!(err.to_string(), "height must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "width".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
