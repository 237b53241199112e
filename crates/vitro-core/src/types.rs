//! # Domain Types
//!
//! Core domain types used throughout Vitro.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Invoice      │   │   GlassLine     │   │   Operation     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  id (UUID)      │──►│  id (UUID)      │       │
//! │  │  invoice_number │   │  width/height   │   │  operation_type │       │
//! │  │  total_price    │   │  thickness_mm   │   │  subtype        │       │
//! │  │  amount_paid    │   │  line_total     │   │  manual_price   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CuttingRate    │   │ OperationPrice  │   │   GlassType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  thickness band │   │  (type,subtype) │   │  price_per_m2   │       │
//! │  │  rate_per_meter │   │  base_price     │   │  name           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Reference data (CuttingRate, OperationPrice, GlassType) is tenant-    │
//! │  scoped, admin-mutable, and READ-ONLY during price computation.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A priced line stores its resolved `area_m2` / `glass_price` /
//! `cutting_price` / `line_total`. Editing a rate band or catalog price later
//! never reprices an already-saved line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Dimension Unit
// =============================================================================

/// Unit in which a line's width/height were entered.
///
/// ## Why Tag the Unit?
/// Glass shops quote pieces in centimeters, factory cutting files use
/// millimeters, and area is always billed in square meters. Tagging the input
/// unit keeps the conversion in one place (the pricing engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum DimensionUnit {
    /// Millimeters (divide by 1000 to get meters).
    Mm,
    /// Centimeters (divide by 100 to get meters). The shop default.
    Cm,
    /// Meters (no conversion).
    M,
}

impl Default for DimensionUnit {
    fn default() -> Self {
        DimensionUnit::Cm
    }
}

// =============================================================================
// Operation Type
// =============================================================================

/// The kind of cutting/finishing operation applied to a glass line.
///
/// Polymorphic over calculation method:
/// - `Shataf` (beveling/chamfer): perimeter × thickness-banded rate
/// - `Laser` / `Farma`: flat catalog price by `(type, subtype)`
/// - Any of them: manual price override wins unconditionally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationType {
    /// Beveling/chamfering a glass edge, priced per linear meter of perimeter.
    Shataf,
    /// Laser engraving/cutting, flat catalog rate.
    Laser,
    /// FARMA finishing, flat catalog rate.
    Farma,
}

impl OperationType {
    /// Human/catalog label (matches the stored representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Shataf => "SHATAF",
            OperationType::Laser => "LASER",
            OperationType::Farma => "FARMA",
        }
    }
}

// =============================================================================
// Operation
// =============================================================================

/// One cutting/finishing action applied to a glass line.
///
/// Insertion order is the display/application order; cost is additive so the
/// order never affects the total.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Operation {
    pub id: String,
    pub line_id: String,
    pub operation_type: OperationType,
    /// Sub-style: the shataf type for beveling, or the catalog subtype key
    /// for laser/FARMA (e.g. "engraving", "hole").
    pub subtype: String,
    /// Manual price override entered by the cashier. Wins unconditionally
    /// over any computed or catalog price.
    pub manual_price: Option<f64>,
    /// Resolved per-piece cost at pricing time (the value summed into the
    /// line's cutting price). Snapshot: never re-derived from a live catalog.
    pub operation_price: f64,
    /// Insertion order within the line (display order).
    pub position: i64,
}

impl Operation {
    /// Creates an unpriced draft operation.
    pub fn draft(operation_type: OperationType, subtype: impl Into<String>) -> Self {
        Operation {
            id: String::new(),
            line_id: String::new(),
            operation_type,
            subtype: subtype.into(),
            manual_price: None,
            operation_price: 0.0,
            position: 0,
        }
    }

    /// Draft operation with a manual price override.
    pub fn draft_manual(
        operation_type: OperationType,
        subtype: impl Into<String>,
        manual_price: f64,
    ) -> Self {
        Operation {
            manual_price: Some(manual_price),
            ..Operation::draft(operation_type, subtype)
        }
    }
}

// =============================================================================
// Cutting Rate
// =============================================================================

/// A thickness-banded price table row.
///
/// ## Invariant
/// Bands for a cutting type must be non-overlapping and should collectively
/// cover the valid thickness domain. Lookup is "first band where
/// `min_thickness <= thickness <= max_thickness`" (bounds inclusive).
///
/// ## Lifecycle
/// Created/edited via the admin config UI; read-only during pricing. There is
/// no versioning: changing a rate does not retroactively alter already-priced
/// lines, because lines store their resolved price.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CuttingRate {
    pub id: String,
    pub tenant_id: String,
    /// Cutting type key, e.g. "SHATF".
    pub cutting_type: String,
    /// Inclusive lower bound, millimeters.
    pub min_thickness: f64,
    /// Inclusive upper bound, millimeters.
    pub max_thickness: f64,
    /// Price per linear meter of edge.
    pub rate_per_meter: f64,
}

impl CuttingRate {
    /// Checks whether this band covers the given thickness (bounds inclusive).
    #[inline]
    pub fn covers(&self, thickness_mm: f64) -> bool {
        self.min_thickness <= thickness_mm && thickness_mm <= self.max_thickness
    }
}

// =============================================================================
// Operation Price
// =============================================================================

/// A flat catalog price for a `(operation_type, subtype)` combination.
///
/// Admins toggle `active` instead of deleting rows: inactive rows must not
/// price new lines, while historical lines keep whatever price they already
/// resolved to.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OperationPrice {
    pub id: String,
    pub tenant_id: String,
    pub operation_type: OperationType,
    pub subtype: String,
    /// Flat price for one piece.
    pub base_price: f64,
    /// Billing unit label, e.g. "per piece". The catalog price always
    /// represents one physical piece; multi-piece lines scale by quantity at
    /// line aggregation regardless of this label.
    pub unit: String,
    pub active: bool,
}

// =============================================================================
// Glass Type
// =============================================================================

/// A glass product type with its per-square-meter price.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct GlassType {
    pub id: String,
    pub tenant_id: String,
    /// Display name, e.g. "Clear 6mm", "Bronze reflective".
    pub name: String,
    /// Price per square meter.
    pub price_per_meter: f64,
    /// Default thickness pre-filled on new lines.
    pub default_thickness_mm: Option<f64>,
    /// Whether the type is offered (soft delete).
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer of the glass shop.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Glass Line
// =============================================================================

/// One cut piece of glass on an invoice (possibly `quantity` identical
/// pieces).
///
/// All derived money/area fields are snapshots resolved at pricing time; the
/// invariant `line_total == glass_price + cutting_price` always holds and is
/// reproducible from the inputs plus the rate table and catalog at the time
/// of pricing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct GlassLine {
    pub id: String,
    pub invoice_id: String,
    pub glass_type_id: String,
    /// Glass type name at pricing time (frozen).
    pub glass_type_name: String,
    /// Price per m² at pricing time (frozen).
    pub price_per_meter: f64,
    /// Width in `dimension_unit`.
    pub width: f64,
    /// Height in `dimension_unit`.
    pub height: f64,
    /// Input unit the dimensions were entered in; omitted means centimeters.
    #[serde(default)]
    pub dimension_unit: DimensionUnit,
    /// Glass thickness in millimeters; selects the beveling rate band.
    pub thickness_mm: f64,
    /// Number of identical pieces. Positive, defaults to 1.
    pub quantity: i64,
    /// Operations in insertion order.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub operations: Vec<Operation>,
    /// Derived: width_m × height_m (single piece).
    pub area_m2: f64,
    /// Derived: price_per_meter × area_m2 × quantity.
    pub glass_price: f64,
    /// Derived: sum of operation costs × quantity.
    pub cutting_price: f64,
    /// Derived: glass_price + cutting_price.
    pub line_total: f64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Invoice Status
// =============================================================================

/// The status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Open, with a (possibly partial) balance outstanding.
    Pending,
    /// Fully paid.
    Paid,
    /// Cancelled; excluded from balances.
    Cancelled,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Pending
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Aggregate of glass lines plus payment state.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Invoice {
    pub id: String,
    pub tenant_id: String,
    /// Human-readable number, e.g. `20260823-0042`.
    pub invoice_number: String,
    pub customer_id: String,
    pub status: InvoiceStatus,
    /// Sum of all line totals.
    pub total_price: f64,
    /// Total recorded payments.
    pub amount_paid: f64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Outstanding balance: `total_price - amount_paid`.
    ///
    /// Deliberately NOT clamped at zero; an overpaid invoice shows a
    /// negative balance (the UI renders the raw subtraction).
    #[inline]
    pub fn remaining_balance(&self) -> f64 {
        self.total_price - self.amount_paid
    }
}

// =============================================================================
// Payment
// =============================================================================

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Bank transfer / wallet.
    Transfer,
}

/// A payment towards an invoice.
/// An invoice can have multiple payments (deposit now, balance on pickup).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    pub method: PaymentMethod,
    pub amount: f64,
    /// External reference (transfer ID, etc.).
    pub reference: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_unit_default_is_cm() {
        assert_eq!(DimensionUnit::default(), DimensionUnit::Cm);
    }

    #[test]
    fn test_operation_type_labels() {
        assert_eq!(OperationType::Shataf.as_str(), "SHATAF");
        assert_eq!(OperationType::Laser.as_str(), "LASER");
        assert_eq!(OperationType::Farma.as_str(), "FARMA");
    }

    #[test]
    fn test_cutting_rate_covers_bounds_inclusive() {
        let band = CuttingRate {
            id: "r1".to_string(),
            tenant_id: "t1".to_string(),
            cutting_type: "SHATF".to_string(),
            min_thickness: 3.1,
            max_thickness: 4.0,
            rate_per_meter: 7.0,
        };
        assert!(band.covers(3.1));
        assert!(band.covers(4.0));
        assert!(!band.covers(3.0));
        assert!(!band.covers(4.1));
    }

    #[test]
    fn test_invoice_status_default() {
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Pending);
    }

    #[test]
    fn test_remaining_balance_not_clamped() {
        let now = Utc::now();
        let invoice = Invoice {
            id: "i1".to_string(),
            tenant_id: "t1".to_string(),
            invoice_number: "20260823-0001".to_string(),
            customer_id: "c1".to_string(),
            status: InvoiceStatus::Pending,
            total_price: 100.0,
            amount_paid: 150.0,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(invoice.remaining_balance(), -50.0);
    }
}
