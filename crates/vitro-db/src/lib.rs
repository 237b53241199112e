//! # vitro-db: Database Layer for Vitro
//!
//! SQLite persistence for the Vitro glass-fabrication invoicing system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitro Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 vitro-core (Business Logic)                     │   │
//! │  │        pricing engine • domain types • validation               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ uses                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitro-db (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────────────────┐    │   │
//! │  │   │   pool    │  │ migrations │  │      repository        │    │   │
//! │  │   │ SqlitePool│  │  embedded  │  │ glass_type • customer  │    │   │
//! │  │   │ WAL mode  │  │  schema    │  │ rates • invoice        │    │   │
//! │  │   └───────────┘  └────────────┘  └────────────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │                         SQLite Database                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Responsibilities
//!
//! - Connection pool management (WAL mode, foreign keys on)
//! - Embedded schema migrations
//! - Repositories for catalogs, customers, invoices, and payments
//! - Calling vitro-core to price lines before they are persisted
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vitro_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("vitro.db")).await?;
//!
//! let rates = db.rates().list_rates(tenant, "SHATF").await?;
//! let catalog = db.rates().list_active_prices(tenant).await?;
//! let line = db.invoices()
//!     .add_line(&invoice_id, &glass_type, &draft, &rates, &catalog)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::customer::{new_customer, CustomerRepository};
pub use repository::glass_type::{new_glass_type, GlassTypeRepository};
pub use repository::invoice::InvoiceRepository;
pub use repository::rates::{new_operation_price, RatesRepository};
