//! # vitro-core: Pure Business Logic for Vitro
//!
//! This crate is the **heart** of Vitro, a glass-fabrication invoicing
//! system. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitro Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │   Invoice Form ──► Line Editor ──► Payments ──► Print Preview  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitro-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │  format   │  │ validation│  │   │
//! │  │   │ GlassLine │  │ area/rate │  │ 2dp money │  │   rules   │  │   │
//! │  │   │  Invoice  │  │ bev. cost │  │ 3dp area  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vitro-db (Database Layer)                    │   │
//! │  │         SQLite catalogs, invoices, migrations, repos            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (GlassLine, Invoice, CuttingRate, etc.)
//! - [`pricing`] - The pricing engine (area, perimeter, banded rates, totals)
//! - [`format`] - Presentation-exact money/area formatting
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every pricing call is deterministic - same input =
//!    same output; catalogs are passed in as snapshots, never fetched
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Snapshot Prices**: Saved lines keep their resolved prices; editing a
//!    rate band never reprices history
//! 4. **Explicit Errors**: A missing rate band or catalog entry is a typed
//!    error, never a silent zero-cost line
//!
//! ## Example Usage
//!
//! ```rust
//! use vitro_core::pricing::{compute_line_totals, default_shataf_rates, LineDraft};
//! use vitro_core::types::{DimensionUnit, Operation, OperationType};
//!
//! let rates = default_shataf_rates();
//!
//! // A 200cm × 150cm piece of 6mm glass at 100/m², with beveled edges
//! let draft = LineDraft::new(200.0, 150.0, DimensionUnit::Cm, 6.0, 1)
//!     .with_operation(Operation::draft(OperationType::Shataf, "flat"));
//!
//! let totals = compute_line_totals(&draft, &rates, &[], 100.0).unwrap();
//! assert_eq!(totals.line_total, 377.0); // 300.00 glass + 77.00 beveling
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vitro_core::GlassLine` instead of
// `use vitro_core::types::GlassLine`

pub use error::{CoreError, CoreResult, ValidationError};
pub use pricing::{InvoiceTotals, LineDraft, LineTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tenant ID for v0.1 (single-tenant runtime with multi-tenant schema)
///
/// ## Why a constant?
/// v0.1 runs one workshop, but the database schema includes tenant_id on
/// every table for the hosted multi-tenant deployment. This constant is used
/// throughout the codebase and will be replaced with dynamic tenant
/// resolution when the super-admin console lands.
pub const DEFAULT_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Maximum lines allowed on a single invoice
///
/// ## Business Reason
/// Prevents runaway invoices and keeps the printable template on a sane
/// number of pages. Can be made configurable per-tenant in future versions.
pub const MAX_INVOICE_LINES: usize = 100;

/// Maximum quantity of identical pieces on a single line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-tenant in future versions.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Upper bound of the thickness domain in millimeters.
///
/// Matches the top of the catch-all rate band: glass thicker than this has
/// no rate and cannot be priced.
pub const MAX_THICKNESS_MM: f64 = 50.0;
