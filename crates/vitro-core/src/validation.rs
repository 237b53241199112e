//! # Validation Module
//!
//! Input validation utilities for Vitro.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: This module (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Business rule validation before pricing                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself is total: a zero width quietly prices to a
//! zero-area, zero-price line. These validators exist so the invoice-save
//! flow rejects such lines before they reach the engine.

use crate::error::ValidationError;
use crate::{MAX_INVOICE_LINES, MAX_LINE_QUANTITY, MAX_THICKNESS_MM};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Dimension Validators
// =============================================================================

/// Validates a width/height dimension entered on a line.
///
/// ## Rules
/// - Must be strictly positive
/// - Must be finite (form layers can produce NaN via bad parsing)
///
/// ## Example
/// ```rust
/// use vitro_core::validation::validate_dimension;
///
/// assert!(validate_dimension("width", 120.0).is_ok());
/// assert!(validate_dimension("width", 0.0).is_err());
/// assert!(validate_dimension("height", -3.0).is_err());
/// ```
pub fn validate_dimension(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a glass thickness in millimeters.
///
/// ## Rules
/// - Must be strictly positive (0mm glass does not exist; the rate lookup
///   also refuses it, this just fails earlier with a clearer message)
/// - Must not exceed the top of the catch-all rate band (50mm)
pub fn validate_thickness(thickness_mm: f64) -> ValidationResult<()> {
    if !thickness_mm.is_finite() || thickness_mm <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "thickness".to_string(),
        });
    }

    if thickness_mm > MAX_THICKNESS_MM {
        return Err(ValidationError::OutOfRange {
            field: "thickness".to_string(),
            min: 0.0,
            max: MAX_THICKNESS_MM,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: MAX_LINE_QUANTITY as f64,
        });
    }

    Ok(())
}

/// Validates a price (per-meter rate, catalog base price, manual override).
///
/// ## Rules
/// - Must be non-negative (zero is allowed: promotional free operations)
pub fn validate_price(field: &str, price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: f64::MAX,
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be positive (> 0); zero or negative payments are rejected
///
/// Note: a payment may exceed the remaining balance. The balance is then
/// rendered negative, by design (see `pricing::compute_remaining_balance`).
pub fn validate_payment_amount(amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a rate band `[min, max]` pair.
///
/// ## Rules
/// - Both bounds non-negative and finite
/// - `min <= max`
pub fn validate_rate_band(min_thickness: f64, max_thickness: f64) -> ValidationResult<()> {
    if !min_thickness.is_finite() || min_thickness < 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "min_thickness".to_string(),
        });
    }

    if !max_thickness.is_finite() || max_thickness < min_thickness {
        return Err(ValidationError::OutOfRange {
            field: "max_thickness".to_string(),
            min: min_thickness,
            max: MAX_THICKNESS_MM,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (glass type, customer).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use vitro_core::validation::validate_name;
///
/// assert!(validate_name("Clear 6mm").is_ok());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an operation subtype key.
///
/// ## Rules
/// - Must not be empty (a blank subtype can never match a catalog entry)
/// - Must be at most 50 characters
pub fn validate_subtype(subtype: &str) -> ValidationResult<()> {
    let subtype = subtype.trim();

    if subtype.is_empty() {
        return Err(ValidationError::Required {
            field: "subtype".to_string(),
        });
    }

    if subtype.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "subtype".to_string(),
            max: 50,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates invoice size (number of lines).
///
/// ## Rules
/// - Must not exceed MAX_INVOICE_LINES (100)
pub fn validate_invoice_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_INVOICE_LINES {
        return Err(ValidationError::OutOfRange {
            field: "invoice lines".to_string(),
            min: 0.0,
            max: MAX_INVOICE_LINES as f64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use vitro_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimension() {
        assert!(validate_dimension("width", 120.0).is_ok());
        assert!(validate_dimension("width", 0.5).is_ok());

        assert!(validate_dimension("width", 0.0).is_err());
        assert!(validate_dimension("width", -10.0).is_err());
        assert!(validate_dimension("width", f64::NAN).is_err());
        assert!(validate_dimension("width", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_thickness() {
        assert!(validate_thickness(4.0).is_ok());
        assert!(validate_thickness(50.0).is_ok());

        assert!(validate_thickness(0.0).is_err());
        assert!(validate_thickness(-4.0).is_err());
        assert!(validate_thickness(50.1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("price_per_meter", 0.0).is_ok());
        assert!(validate_price("price_per_meter", 143.5).is_ok());
        assert!(validate_price("price_per_meter", -1.0).is_err());
        assert!(validate_price("price_per_meter", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(200.0).is_ok());
        assert!(validate_payment_amount(0.0).is_err());
        assert!(validate_payment_amount(-5.0).is_err());
    }

    #[test]
    fn test_validate_rate_band() {
        assert!(validate_rate_band(3.1, 4.0).is_ok());
        assert!(validate_rate_band(0.0, 3.0).is_ok());

        assert!(validate_rate_band(4.0, 3.1).is_err());
        assert!(validate_rate_band(-1.0, 3.0).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Clear 6mm").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_subtype() {
        assert!(validate_subtype("engraving").is_ok());
        assert!(validate_subtype("").is_err());
        assert!(validate_subtype(&"x".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_invoice_size() {
        assert!(validate_invoice_size(0).is_ok());
        assert!(validate_invoice_size(99).is_ok());
        assert!(validate_invoice_size(100).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
