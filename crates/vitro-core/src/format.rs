//! # Presentation Formatting
//!
//! Fixed-point formatting for money and area, matched exactly to the print
//! template's output. These rules are golden: the printable invoice and the
//! sticker generator compare strings, not numbers.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Money   → 2 decimals, currency label suffix:  "377.00 EGP"            │
//! │  Area    → 3 decimals:                         "3.000"                 │
//! │  Tax     → always the literal "0.00"           (never computed)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding happens HERE and only here; the pricing engine carries full
//! precision all the way through.

use crate::pricing::{InvoiceTotals, LineTotals};

/// Currency label suffixed to every displayed amount.
pub const CURRENCY_LABEL: &str = "EGP";

// =============================================================================
// Scalar Formatting
// =============================================================================

/// Formats a monetary amount with 2 decimals, no label.
///
/// ## Example
/// ```rust
/// use vitro_core::format::format_amount;
///
/// assert_eq!(format_amount(377.0), "377.00");
/// assert_eq!(format_amount(36.456), "36.46");
/// assert_eq!(format_amount(-50.0), "-50.00");
/// ```
#[inline]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Formats a monetary amount with the currency label suffix.
///
/// ## Example
/// ```rust
/// use vitro_core::format::format_currency;
///
/// assert_eq!(format_currency(36.0), "36.00 EGP");
/// ```
#[inline]
pub fn format_currency(amount: f64) -> String {
    format!("{amount:.2} {CURRENCY_LABEL}")
}

/// Formats an area in square meters with 3 decimals.
///
/// ## Example
/// ```rust
/// use vitro_core::format::format_area;
///
/// assert_eq!(format_area(3.0), "3.000");
/// assert_eq!(format_area(0.96), "0.960");
/// ```
#[inline]
pub fn format_area(area_m2: f64) -> String {
    format!("{area_m2:.3}")
}

// =============================================================================
// Totals Block
// =============================================================================

/// Renders one priced line's figures as display strings.
pub fn format_line(totals: &LineTotals) -> LineDisplay {
    LineDisplay {
        area: format_area(totals.area_m2),
        glass_price: format_currency(totals.glass_price),
        cutting_price: format_currency(totals.cutting_price),
        line_total: format_currency(totals.line_total),
    }
}

/// Display strings for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDisplay {
    pub area: String,
    pub glass_price: String,
    pub cutting_price: String,
    pub line_total: String,
}

/// Renders the invoice totals block the print template consumes.
///
/// The tax line is always the literal `0.00`; the shop's invoices never
/// carry tax, and the template still prints the row.
///
/// ## Example
/// ```rust
/// use vitro_core::format::format_totals_block;
/// use vitro_core::pricing::InvoiceTotals;
///
/// let block = format_totals_block(
///     &InvoiceTotals { total_price: 377.0, line_count: 1 },
///     200.0,
/// );
/// assert_eq!(block.total, "377.00 EGP");
/// assert_eq!(block.tax, "0.00 EGP");
/// assert_eq!(block.paid, "200.00 EGP");
/// assert_eq!(block.remaining, "177.00 EGP");
/// ```
pub fn format_totals_block(totals: &InvoiceTotals, amount_paid: f64) -> TotalsBlock {
    let remaining = crate::pricing::compute_remaining_balance(totals.total_price, amount_paid);

    TotalsBlock {
        total: format_currency(totals.total_price),
        tax: format_currency(0.0),
        paid: format_currency(amount_paid),
        remaining: format_currency(remaining),
    }
}

/// Display strings for the invoice totals block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsBlock {
    pub total: String,
    /// Always "0.00 <label>". Intentional, not an omission.
    pub tax: String,
    pub paid: String,
    pub remaining: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_two_decimals() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(377.0), "377.00");
        assert_eq!(format_amount(36.456), "36.46");
        assert_eq!(format_amount(-50.0), "-50.00");
    }

    #[test]
    fn test_currency_label_suffix() {
        assert_eq!(format_currency(36.0), "36.00 EGP");
        assert_eq!(format_currency(-50.0), "-50.00 EGP");
    }

    #[test]
    fn test_area_three_decimals() {
        assert_eq!(format_area(3.0), "3.000");
        assert_eq!(format_area(0.9603), "0.960");
        assert_eq!(format_area(1.2345), "1.234");
    }

    #[test]
    fn test_line_display() {
        let display = format_line(&LineTotals {
            area_m2: 3.0,
            glass_price: 300.0,
            cutting_price: 77.0,
            line_total: 377.0,
        });
        assert_eq!(display.area, "3.000");
        assert_eq!(display.glass_price, "300.00 EGP");
        assert_eq!(display.cutting_price, "77.00 EGP");
        assert_eq!(display.line_total, "377.00 EGP");
    }

    #[test]
    fn test_totals_block_tax_always_zero() {
        let block = format_totals_block(
            &InvoiceTotals {
                total_price: 1234.5,
                line_count: 3,
            },
            0.0,
        );
        assert_eq!(block.tax, "0.00 EGP");
        assert_eq!(block.total, "1234.50 EGP");
    }

    #[test]
    fn test_totals_block_negative_remaining_rendered_raw() {
        // Overpaid invoice: remaining must render as a negative amount
        let block = format_totals_block(
            &InvoiceTotals {
                total_price: 100.0,
                line_count: 1,
            },
            150.0,
        );
        assert_eq!(block.remaining, "-50.00 EGP");
    }
}
