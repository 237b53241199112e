//! # Pricing Engine
//!
//! Deterministic, side-effect-free cost computation for glass lines and
//! invoice aggregation. This module is the heart of Vitro: every display
//! site, the invoice-save flow, and the print generator call these functions
//! instead of re-deriving `line_total = glass_price + cutting_price` inline.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pricing a Glass Line                              │
//! │                                                                         │
//! │  Form input: width, height, unit, thickness, quantity, operations      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_area ──► area_m2                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  glass_price = price_per_meter × area_m2 × quantity                    │
//! │                                                                         │
//! │  per operation:                                                         │
//! │    manual_price set? ──────────────► use it (always wins)              │
//! │    SHATAF? ── perimeter × band rate (lookup_rate by thickness)         │
//! │    LASER/FARMA? ── catalog base_price by (type, subtype)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cutting_price = Σ operation costs × quantity                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  line_total = glass_price + cutting_price                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  invoice total = Σ line totals;  remaining = total - paid (no clamp)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Discipline
//! The rate table and price catalog are passed in as slices: the caller
//! fetches them once per pricing session and threads them through. The
//! engine has zero dependency on any live data source, which is what makes
//! it unit-testable without a database. Computed prices are stored on the
//! line at save time; concurrent catalog edits never reprice saved lines.
//!
//! ## Numeric Model
//! Costs are plain `f64`. The domain is real-valued (area in m², perimeter
//! in linear meters, rates per meter); no rounding happens here. Display
//! rounding (2 decimals for money, 3 for area) lives in [`crate::format`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{CuttingRate, DimensionUnit, Operation, OperationPrice, OperationType};
use crate::DEFAULT_TENANT_ID;

/// Cutting-type key for beveling bands in the rate table.
pub const SHATF_CUTTING_TYPE: &str = "SHATF";

// =============================================================================
// Line Draft
// =============================================================================

/// The raw inputs for pricing one glass line, before any derivation.
///
/// ## Example
/// ```rust
/// use vitro_core::pricing::LineDraft;
/// use vitro_core::types::DimensionUnit;
///
/// let draft = LineDraft::new(120.0, 80.0, DimensionUnit::Cm, 4.0, 1);
/// assert_eq!(draft.quantity, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineDraft {
    /// Width in `dimension_unit`.
    pub width: f64,
    /// Height in `dimension_unit`.
    pub height: f64,
    /// Input unit; a draft that omits it means centimeters.
    #[serde(default)]
    pub dimension_unit: DimensionUnit,
    /// Glass thickness in millimeters; selects the beveling rate band.
    pub thickness_mm: f64,
    /// Number of identical pieces.
    pub quantity: i64,
    /// Operations in insertion order. Order affects display only; cost is
    /// additive.
    pub operations: Vec<Operation>,
}

impl LineDraft {
    /// Creates a draft with no operations.
    pub fn new(
        width: f64,
        height: f64,
        dimension_unit: DimensionUnit,
        thickness_mm: f64,
        quantity: i64,
    ) -> Self {
        LineDraft {
            width,
            height,
            dimension_unit,
            thickness_mm,
            quantity,
            operations: Vec::new(),
        }
    }

    /// Appends an operation (builder style).
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }
}

// =============================================================================
// Computed Totals
// =============================================================================

/// Resolved money/area figures for one line.
///
/// Invariant: `line_total == glass_price + cutting_price` exactly, and the
/// whole struct is reproducible from the draft plus the rate table and
/// catalog snapshots used to price it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineTotals {
    /// Single-piece area in square meters.
    pub area_m2: f64,
    /// price_per_meter × area_m2 × quantity.
    pub glass_price: f64,
    /// Σ per-piece operation costs × quantity.
    pub cutting_price: f64,
    /// glass_price + cutting_price.
    pub line_total: f64,
}

/// Invoice-level aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    /// Σ line totals. No tax is ever added (tax displays as a fixed 0.00).
    pub total_price: f64,
    pub line_count: usize,
}

// =============================================================================
// Geometry
// =============================================================================

/// Converts a dimension to meters.
#[inline]
fn to_meters(value: f64, unit: DimensionUnit) -> f64 {
    match unit {
        DimensionUnit::Mm => value / 1000.0,
        DimensionUnit::Cm => value / 100.0,
        DimensionUnit::M => value,
    }
}

/// Computes the area of one piece in square meters.
///
/// No rounding is applied here; display formatting (3 decimals) happens at
/// presentation time. Zero width or height yields a zero area; rejecting
/// such input is the validation layer's job, not this function's.
///
/// ## Example
/// ```rust
/// use vitro_core::pricing::compute_area;
/// use vitro_core::types::DimensionUnit;
///
/// assert_eq!(compute_area(200.0, 150.0, DimensionUnit::Cm), 3.0);
/// assert_eq!(compute_area(1000.0, 1000.0, DimensionUnit::Mm), 1.0);
/// ```
#[inline]
pub fn compute_area(width: f64, height: f64, unit: DimensionUnit) -> f64 {
    to_meters(width, unit) * to_meters(height, unit)
}

/// Computes the perimeter of one piece in linear meters.
///
/// `2 × (width_m + height_m)`. Used only for beveling (SHATAF); laser and
/// FARMA charges are independent of the piece's edge length.
///
/// ## Example
/// ```rust
/// use vitro_core::pricing::compute_perimeter;
/// use vitro_core::types::DimensionUnit;
///
/// assert_eq!(compute_perimeter(100.0, 50.0, DimensionUnit::Cm), 3.0);
/// ```
#[inline]
pub fn compute_perimeter(width: f64, height: f64, unit: DimensionUnit) -> f64 {
    2.0 * (to_meters(width, unit) + to_meters(height, unit))
}

// =============================================================================
// Rate Lookup
// =============================================================================

/// Resolves the per-meter rate for a cutting type and thickness.
///
/// ## Band Semantics
/// First entry where `cutting_type` matches and
/// `min_thickness <= thickness <= max_thickness` (bounds inclusive). The
/// default table's top band extends to 50.0mm so very thick glass still
/// resolves to a rate instead of failing.
///
/// ## Errors
/// - Non-positive thickness is `RateNotFound`, never an implicit match of
///   the lowest band.
/// - An empty or gapped table is `RateNotFound`; the caller decides policy
///   (reject the line, or fall back to a manual price). There is no silent
///   default.
pub fn lookup_rate(
    rate_table: &[CuttingRate],
    cutting_type: &str,
    thickness_mm: f64,
) -> CoreResult<f64> {
    if thickness_mm <= 0.0 {
        return Err(CoreError::RateNotFound {
            cutting_type: cutting_type.to_string(),
            thickness_mm,
        });
    }

    rate_table
        .iter()
        .find(|band| band.cutting_type == cutting_type && band.covers(thickness_mm))
        .map(|band| band.rate_per_meter)
        .ok_or_else(|| CoreError::RateNotFound {
            cutting_type: cutting_type.to_string(),
            thickness_mm,
        })
}

// =============================================================================
// Operation Costs
// =============================================================================

/// Computes the beveling (SHATAF) cost for ONE physical piece.
///
/// `perimeter × band rate`. Quantity scaling happens at line aggregation:
/// each of a line's `quantity` identical pieces has the same edges, so the
/// per-piece cost is simply multiplied there.
///
/// ## Example
/// ```rust
/// use vitro_core::pricing::{compute_beveling_cost, default_shataf_rates};
/// use vitro_core::types::DimensionUnit;
///
/// let rates = default_shataf_rates();
/// // 120cm × 80cm, 4mm glass: perimeter 4.0m, band 3.1-4 at 7.0/m = 28.0
/// let cost = compute_beveling_cost(120.0, 80.0, DimensionUnit::Cm, 4.0, &rates).unwrap();
/// assert_eq!(cost, 28.0);
/// ```
pub fn compute_beveling_cost(
    width: f64,
    height: f64,
    unit: DimensionUnit,
    thickness_mm: f64,
    rate_table: &[CuttingRate],
) -> CoreResult<f64> {
    let rate = lookup_rate(rate_table, SHATF_CUTTING_TYPE, thickness_mm)?;
    Ok(compute_perimeter(width, height, unit) * rate)
}

/// Computes the per-piece cost of one operation.
///
/// ## Resolution Order
/// 1. `manual_price` set → it wins unconditionally, whatever the catalog says
/// 2. SHATAF → perimeter × thickness-banded rate
/// 3. LASER/FARMA → active catalog entry matched by `(type, subtype)`
///
/// An inactive or missing catalog entry is a [`CoreError::PriceCatalogMiss`]:
/// new lines are never priced from stale rows, and the engine never defaults
/// to a silent zero (which would produce an invoice with a wrong total).
pub fn compute_operation_cost(
    operation: &Operation,
    draft: &LineDraft,
    rate_table: &[CuttingRate],
    price_catalog: &[OperationPrice],
) -> CoreResult<f64> {
    if let Some(manual) = operation.manual_price {
        return Ok(manual);
    }

    match operation.operation_type {
        OperationType::Shataf => compute_beveling_cost(
            draft.width,
            draft.height,
            draft.dimension_unit,
            draft.thickness_mm,
            rate_table,
        ),
        OperationType::Laser | OperationType::Farma => price_catalog
            .iter()
            .find(|entry| {
                entry.active
                    && entry.operation_type == operation.operation_type
                    && entry.subtype == operation.subtype
            })
            .map(|entry| entry.base_price)
            .ok_or_else(|| CoreError::PriceCatalogMiss {
                operation_type: operation.operation_type.as_str().to_string(),
                subtype: operation.subtype.clone(),
            }),
    }
}

// =============================================================================
// Line and Invoice Aggregation
// =============================================================================

/// Prices one line from its draft and the catalog snapshots.
///
/// ## Guarantee
/// Pure function of `(draft, rate_table, price_catalog, price_per_meter)`:
/// no wall-clock time, no hidden state. Calling it twice with identical
/// inputs yields bit-identical output.
///
/// ## Quantity Rule
/// Every per-piece cost (glass area price, beveling, flat catalog charges)
/// scales by `quantity`: the catalog and the band rates always describe one
/// physical piece.
///
/// ## Example
/// ```rust
/// use vitro_core::pricing::{compute_line_totals, default_shataf_rates, LineDraft};
/// use vitro_core::types::{DimensionUnit, Operation, OperationType};
///
/// let rates = default_shataf_rates();
/// let draft = LineDraft::new(200.0, 150.0, DimensionUnit::Cm, 6.0, 1)
///     .with_operation(Operation::draft(OperationType::Shataf, "flat"));
///
/// let totals = compute_line_totals(&draft, &rates, &[], 100.0).unwrap();
/// assert_eq!(totals.area_m2, 3.0);
/// assert_eq!(totals.glass_price, 300.0);
/// assert_eq!(totals.cutting_price, 77.0); // 7.0m perimeter × 11.0/m
/// assert_eq!(totals.line_total, 377.0);
/// ```
pub fn compute_line_totals(
    draft: &LineDraft,
    rate_table: &[CuttingRate],
    price_catalog: &[OperationPrice],
    price_per_meter: f64,
) -> CoreResult<LineTotals> {
    let quantity = draft.quantity as f64;

    let area_m2 = compute_area(draft.width, draft.height, draft.dimension_unit);
    let glass_price = price_per_meter * area_m2 * quantity;

    let mut per_piece_cutting = 0.0;
    for operation in &draft.operations {
        per_piece_cutting += compute_operation_cost(operation, draft, rate_table, price_catalog)?;
    }
    let cutting_price = per_piece_cutting * quantity;

    Ok(LineTotals {
        area_m2,
        glass_price,
        cutting_price,
        line_total: glass_price + cutting_price,
    })
}

/// Sums priced lines into invoice totals.
///
/// No tax line is computed: the shop's invoices always display tax as a
/// fixed `0.00`, which is intentional behavior, not an omission.
pub fn compute_invoice_totals(lines: &[LineTotals]) -> InvoiceTotals {
    InvoiceTotals {
        total_price: lines.iter().map(|line| line.line_total).sum(),
        line_count: lines.len(),
    }
}

/// Outstanding balance after a payment.
///
/// Raw subtraction, never clamped: `amount_paid > total_price` yields a
/// negative balance which the UI renders as-is.
///
/// ## Example
/// ```rust
/// use vitro_core::pricing::compute_remaining_balance;
///
/// assert_eq!(compute_remaining_balance(377.0, 200.0), 177.0);
/// assert_eq!(compute_remaining_balance(100.0, 150.0), -50.0);
/// ```
#[inline]
pub fn compute_remaining_balance(total_price: f64, amount_paid: f64) -> f64 {
    total_price - amount_paid
}

// =============================================================================
// Default Rate Table
// =============================================================================

/// The default 8-band SHATF rate table.
///
/// Bounds are inclusive. The top band's upper bound is 50.0mm on purpose: it
/// acts as a catch-all so very thick glass still resolves to a rate.
///
/// | Band (mm)  | Rate (currency/meter) |
/// |------------|-----------------------|
/// | 0–3        | 5.0                   |
/// | 3.1–4      | 7.0                   |
/// | 4.1–5      | 9.0                   |
/// | 5.1–6      | 11.0                  |
/// | 6.1–8      | 13.0                  |
/// | 8.1–10     | 15.0                  |
/// | 10.1–12    | 18.0                  |
/// | 12.1–50    | 18.0                  |
pub fn default_shataf_rates() -> Vec<CuttingRate> {
    const BANDS: &[(f64, f64, f64)] = &[
        (0.0, 3.0, 5.0),
        (3.1, 4.0, 7.0),
        (4.1, 5.0, 9.0),
        (5.1, 6.0, 11.0),
        (6.1, 8.0, 13.0),
        (8.1, 10.0, 15.0),
        (10.1, 12.0, 18.0),
        (12.1, 50.0, 18.0),
    ];

    BANDS
        .iter()
        .enumerate()
        .map(|(index, &(min, max, rate))| CuttingRate {
            id: format!("shatf-band-{}", index + 1),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            cutting_type: SHATF_CUTTING_TYPE.to_string(),
            min_thickness: min,
            max_thickness: max,
            rate_per_meter: rate,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn catalog() -> Vec<OperationPrice> {
        vec![
            OperationPrice {
                id: "op-1".to_string(),
                tenant_id: DEFAULT_TENANT_ID.to_string(),
                operation_type: OperationType::Laser,
                subtype: "engraving".to_string(),
                base_price: 50.0,
                unit: "per piece".to_string(),
                active: true,
            },
            OperationPrice {
                id: "op-2".to_string(),
                tenant_id: DEFAULT_TENANT_ID.to_string(),
                operation_type: OperationType::Farma,
                subtype: "standard".to_string(),
                base_price: 25.0,
                unit: "per piece".to_string(),
                active: true,
            },
            OperationPrice {
                id: "op-3".to_string(),
                tenant_id: DEFAULT_TENANT_ID.to_string(),
                operation_type: OperationType::Laser,
                subtype: "retired".to_string(),
                base_price: 99.0,
                unit: "per piece".to_string(),
                active: false,
            },
        ]
    }

    #[test]
    fn test_area_unit_normalization() {
        // 1m × 1m expressed in each unit is the same square meter
        let from_mm = compute_area(1000.0, 1000.0, DimensionUnit::Mm);
        let from_cm = compute_area(100.0, 100.0, DimensionUnit::Cm);
        let from_m = compute_area(1.0, 1.0, DimensionUnit::M);

        assert_eq!(from_mm, 1.0);
        assert_eq!(from_cm, 1.0);
        assert_eq!(from_m, 1.0);
    }

    #[test]
    fn test_area_zero_dimension_yields_zero() {
        assert_eq!(compute_area(0.0, 150.0, DimensionUnit::Cm), 0.0);
        assert_eq!(compute_area(120.0, 0.0, DimensionUnit::Cm), 0.0);
    }

    #[test]
    fn test_perimeter_formula() {
        assert_eq!(compute_perimeter(100.0, 50.0, DimensionUnit::Cm), 3.0);
        assert_eq!(compute_perimeter(1.2, 0.8, DimensionUnit::M), 4.0);
    }

    #[test]
    fn test_rate_band_boundary_inclusivity() {
        let rates = default_shataf_rates();

        // 4.0 belongs to 3.1-4, 4.1 belongs to 4.1-5: no gap, no overlap
        assert_eq!(lookup_rate(&rates, SHATF_CUTTING_TYPE, 4.0).unwrap(), 7.0);
        assert_eq!(lookup_rate(&rates, SHATF_CUTTING_TYPE, 4.1).unwrap(), 9.0);
    }

    #[test]
    fn test_rate_thick_glass_resolves_to_catchall_band() {
        let rates = default_shataf_rates();
        assert_eq!(lookup_rate(&rates, SHATF_CUTTING_TYPE, 19.0).unwrap(), 18.0);
        assert_eq!(lookup_rate(&rates, SHATF_CUTTING_TYPE, 50.0).unwrap(), 18.0);
    }

    #[test]
    fn test_rate_not_found_above_catchall() {
        let rates = default_shataf_rates();
        assert!(matches!(
            lookup_rate(&rates, SHATF_CUTTING_TYPE, 55.0),
            Err(CoreError::RateNotFound { .. })
        ));
    }

    #[test]
    fn test_rate_not_found_for_non_positive_thickness() {
        // 0mm would fall inside the 0-3 band, but non-positive thickness is
        // an error, never an implicit lowest-band match
        let rates = default_shataf_rates();
        assert!(matches!(
            lookup_rate(&rates, SHATF_CUTTING_TYPE, 0.0),
            Err(CoreError::RateNotFound { .. })
        ));
        assert!(matches!(
            lookup_rate(&rates, SHATF_CUTTING_TYPE, -4.0),
            Err(CoreError::RateNotFound { .. })
        ));
    }

    #[test]
    fn test_rate_not_found_on_empty_table() {
        assert!(matches!(
            lookup_rate(&[], SHATF_CUTTING_TYPE, 4.0),
            Err(CoreError::RateNotFound { .. })
        ));
    }

    #[test]
    fn test_beveling_cost_four_mm_piece() {
        // 4mm, 120cm × 80cm: perimeter 2×(1.2+0.8)=4.0m, band 3.1-4 at
        // 7.0/m → 28.00 (4.0 is the inclusive top of its band, not the
        // bottom of 4.1-5)
        let rates = default_shataf_rates();
        let cost =
            compute_beveling_cost(120.0, 80.0, DimensionUnit::Cm, 4.0, &rates).unwrap();
        assert!((cost - 28.0).abs() < EPS);
    }

    #[test]
    fn test_manual_price_always_wins() {
        // Catalog says 50.0 for laser engraving; manual override says 75.0
        let draft = LineDraft::new(100.0, 100.0, DimensionUnit::Cm, 4.0, 1);
        let operation = Operation::draft_manual(OperationType::Laser, "engraving", 75.0);

        let cost =
            compute_operation_cost(&operation, &draft, &default_shataf_rates(), &catalog())
                .unwrap();
        assert_eq!(cost, 75.0);
    }

    #[test]
    fn test_catalog_price_resolution() {
        let draft = LineDraft::new(100.0, 100.0, DimensionUnit::Cm, 4.0, 1);
        let laser = Operation::draft(OperationType::Laser, "engraving");
        let farma = Operation::draft(OperationType::Farma, "standard");

        let rates = default_shataf_rates();
        assert_eq!(
            compute_operation_cost(&laser, &draft, &rates, &catalog()).unwrap(),
            50.0
        );
        assert_eq!(
            compute_operation_cost(&farma, &draft, &rates, &catalog()).unwrap(),
            25.0
        );
    }

    #[test]
    fn test_inactive_catalog_entry_is_a_miss() {
        let draft = LineDraft::new(100.0, 100.0, DimensionUnit::Cm, 4.0, 1);
        let operation = Operation::draft(OperationType::Laser, "retired");

        let result =
            compute_operation_cost(&operation, &draft, &default_shataf_rates(), &catalog());
        assert!(matches!(result, Err(CoreError::PriceCatalogMiss { .. })));
    }

    #[test]
    fn test_unknown_subtype_is_a_miss() {
        let draft = LineDraft::new(100.0, 100.0, DimensionUnit::Cm, 4.0, 1);
        let operation = Operation::draft(OperationType::Farma, "no-such-style");

        let result =
            compute_operation_cost(&operation, &draft, &default_shataf_rates(), &catalog());
        assert!(matches!(result, Err(CoreError::PriceCatalogMiss { .. })));
    }

    #[test]
    fn test_line_total_decomposition_invariant() {
        let rates = default_shataf_rates();
        let draft = LineDraft::new(137.0, 92.5, DimensionUnit::Cm, 8.0, 3)
            .with_operation(Operation::draft(OperationType::Shataf, "flat"))
            .with_operation(Operation::draft(OperationType::Laser, "engraving"));

        let totals = compute_line_totals(&draft, &rates, &catalog(), 143.75).unwrap();
        assert!((totals.line_total - (totals.glass_price + totals.cutting_price)).abs() < EPS);
    }

    #[test]
    fn test_quantity_scales_all_operation_costs() {
        // 100cm × 50cm, 4mm, qty 2, beveling + laser
        // per piece: beveling 3.0m × 7.0 = 21.0, laser 50.0 → 71.0
        // cutting = 71.0 × 2 = 142.0; glass = 20.0 × 0.5m² × 2 = 20.0
        let rates = default_shataf_rates();
        let draft = LineDraft::new(100.0, 50.0, DimensionUnit::Cm, 4.0, 2)
            .with_operation(Operation::draft(OperationType::Shataf, "flat"))
            .with_operation(Operation::draft(OperationType::Laser, "engraving"));

        let totals = compute_line_totals(&draft, &rates, &catalog(), 20.0).unwrap();
        assert!((totals.glass_price - 20.0).abs() < EPS);
        assert!((totals.cutting_price - 142.0).abs() < EPS);
        assert!((totals.line_total - 162.0).abs() < EPS);
    }

    #[test]
    fn test_draft_without_unit_deserializes_to_cm() {
        // The invoice form may omit the unit field entirely; that means
        // centimeters, the shop default
        let json = r#"{
            "width": 120.0,
            "height": 80.0,
            "thickness_mm": 4.0,
            "quantity": 1,
            "operations": []
        }"#;

        let draft: LineDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.dimension_unit, DimensionUnit::Cm);
        assert_eq!(compute_area(draft.width, draft.height, draft.dimension_unit), 0.96);
    }

    #[test]
    fn test_pricing_is_idempotent() {
        let rates = default_shataf_rates();
        let draft = LineDraft::new(133.7, 77.1, DimensionUnit::Cm, 6.0, 2)
            .with_operation(Operation::draft(OperationType::Shataf, "flat"));

        let first = compute_line_totals(&draft, &rates, &catalog(), 87.3).unwrap();
        let second = compute_line_totals(&draft, &rates, &catalog(), 87.3).unwrap();

        // Bit-identical, not merely within epsilon
        assert_eq!(first.area_m2.to_bits(), second.area_m2.to_bits());
        assert_eq!(first.glass_price.to_bits(), second.glass_price.to_bits());
        assert_eq!(first.cutting_price.to_bits(), second.cutting_price.to_bits());
        assert_eq!(first.line_total.to_bits(), second.line_total.to_bits());
    }

    #[test]
    fn test_failed_line_does_not_poison_siblings() {
        let rates = default_shataf_rates();
        let good = LineDraft::new(100.0, 100.0, DimensionUnit::Cm, 4.0, 1)
            .with_operation(Operation::draft(OperationType::Shataf, "flat"));
        let bad = LineDraft::new(100.0, 100.0, DimensionUnit::Cm, 4.0, 1)
            .with_operation(Operation::draft(OperationType::Laser, "no-such-style"));

        assert!(compute_line_totals(&bad, &rates, &catalog(), 10.0).is_err());
        // The sibling still prices correctly afterwards
        let totals = compute_line_totals(&good, &rates, &catalog(), 10.0).unwrap();
        assert!((totals.line_total - 38.0).abs() < EPS); // 10.0×1m² + 4m×7.0
    }

    #[test]
    fn test_remaining_balance_not_clamped() {
        // Overpayment must yield the raw negative value, never a silent 0
        assert_eq!(compute_remaining_balance(100.0, 150.0), -50.0);
        assert_eq!(compute_remaining_balance(100.0, 100.0), 0.0);
        assert_eq!(compute_remaining_balance(100.0, 40.0), 60.0);
    }

    #[test]
    fn test_invoice_totals_sum() {
        let lines = vec![
            LineTotals {
                area_m2: 1.0,
                glass_price: 100.0,
                cutting_price: 36.0,
                line_total: 136.0,
            },
            LineTotals {
                area_m2: 0.5,
                glass_price: 50.0,
                cutting_price: 0.0,
                line_total: 50.0,
            },
        ];

        let totals = compute_invoice_totals(&lines);
        assert!((totals.total_price - 186.0).abs() < EPS);
        assert_eq!(totals.line_count, 2);
    }

    #[test]
    fn test_end_to_end_scenario() {
        // Glass 100/m², 200cm × 150cm, 6mm, qty 1, one SHATAF, no override:
        // area 3.0m², glass 300.00, perimeter 7.0m, band 5.1-6 rate 11.0,
        // cutting 77.00, line 377.00; paid 200 → remaining 177.00
        let rates = default_shataf_rates();
        let draft = LineDraft::new(200.0, 150.0, DimensionUnit::Cm, 6.0, 1)
            .with_operation(Operation::draft(OperationType::Shataf, "flat"));

        let line = compute_line_totals(&draft, &rates, &catalog(), 100.0).unwrap();
        assert!((line.area_m2 - 3.0).abs() < EPS);
        assert!((line.glass_price - 300.0).abs() < EPS);
        assert!((line.cutting_price - 77.0).abs() < EPS);
        assert!((line.line_total - 377.0).abs() < EPS);

        let invoice = compute_invoice_totals(&[line]);
        assert!((invoice.total_price - 377.0).abs() < EPS);

        let remaining = compute_remaining_balance(invoice.total_price, 200.0);
        assert!((remaining - 177.0).abs() < EPS);
    }

    #[test]
    fn test_default_table_covers_thickness_domain_without_gaps() {
        let rates = default_shataf_rates();
        assert_eq!(rates.len(), 8);

        // Every tenth of a millimeter from 0.1 to 50.0 resolves to a band
        for tenth in 1..=500 {
            let thickness = tenth as f64 / 10.0;
            assert!(
                lookup_rate(&rates, SHATF_CUTTING_TYPE, thickness).is_ok(),
                "no band covers {thickness}mm"
            );
        }
    }
}
