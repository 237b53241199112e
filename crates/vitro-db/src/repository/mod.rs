//! # Repository Module
//!
//! Database repository implementations for Vitro.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Request handler                                                       │
//! │       │                                                                 │
//! │       │  db.invoices().add_line(invoice_id, &glass_type, &draft,       │
//! │       │                         &rates, &catalog)                      │
//! │       ▼                                                                 │
//! │  InvoiceRepository                                                     │
//! │  ├── prices the draft via vitro-core (pure function, snapshots in)     │
//! │  ├── inserts line + operations in one transaction                      │
//! │  └── refuses the line entirely if pricing fails                        │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Pricing snapshots are explicit parameters, never hidden reads       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`GlassTypeRepository`] - Glass catalog CRUD
//! - [`CustomerRepository`] - Customer directory
//! - [`RatesRepository`] - Cutting-rate bands + operation price catalog
//! - [`InvoiceRepository`] - Invoices, lines, operations, payments
//!
//! [`GlassTypeRepository`]: glass_type::GlassTypeRepository
//! [`CustomerRepository`]: customer::CustomerRepository
//! [`RatesRepository`]: rates::RatesRepository
//! [`InvoiceRepository`]: invoice::InvoiceRepository

pub mod customer;
pub mod glass_type;
pub mod invoice;
pub mod rates;
