//! # Invoice Repository
//!
//! Database operations for invoices, their glass lines, per-line operations,
//! and payments.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Adding a Line to an Invoice                       │
//! │                                                                         │
//! │  add_line(invoice_id, glass_type, draft, rates, catalog)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Invoice must exist and be PENDING                                  │
//! │  2. Validate draft (dimensions, thickness, quantity, line count)       │
//! │  3. Price via vitro-core (pure; any failure rejects the whole line)    │
//! │       │                                                                 │
//! │       ▼  transaction                                                    │
//! │  4. INSERT glass_line with resolved snapshot prices                    │
//! │  5. INSERT line_operations with per-piece resolved costs              │
//! │  6. UPDATE invoice total_price (+ line_total)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Commit, or nothing at all. A half-priced invoice never exists.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Payment Model
//! An invoice accumulates payments (deposit now, balance on pickup).
//! `amount_paid` on the invoice is the running sum; the remaining balance is
//! the raw `total_price - amount_paid` and goes negative on overpayment.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use vitro_core::pricing::{compute_line_totals, compute_operation_cost, LineDraft};
use vitro_core::validation::{
    validate_dimension, validate_invoice_size, validate_payment_amount, validate_quantity,
    validate_thickness,
};
use vitro_core::{
    CoreError, CuttingRate, GlassLine, GlassType, Invoice, InvoiceStatus, Operation,
    OperationPrice, Payment, PaymentMethod,
};

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

const INVOICE_COLUMNS: &str = "id, tenant_id, invoice_number, customer_id, status, \
     total_price, amount_paid, notes, created_at, updated_at";

const LINE_COLUMNS: &str = "id, invoice_id, glass_type_id, glass_type_name, price_per_meter, \
     width, height, dimension_unit, thickness_mm, quantity, \
     area_m2, glass_price, cutting_price, line_total, created_at";

const OPERATION_COLUMNS: &str =
    "id, line_id, operation_type, subtype, manual_price, operation_price, position";

const PAYMENT_COLUMNS: &str = "id, invoice_id, method, amount, reference, created_at";

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    // =========================================================================
    // Invoice lifecycle
    // =========================================================================

    /// Creates a new empty pending invoice for a customer.
    ///
    /// The invoice number is date-prefixed and sequential within the day,
    /// e.g. `20260823-0042`.
    pub async fn create(
        &self,
        tenant_id: &str,
        customer_id: &str,
        notes: Option<&str>,
    ) -> DbResult<Invoice> {
        let now = Utc::now();
        let invoice_number = self.generate_invoice_number(tenant_id).await?;

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.to_string(),
            invoice_number,
            customer_id: customer_id.to_string(),
            status: InvoiceStatus::Pending,
            total_price: 0.0,
            amount_paid: 0.0,
            notes: notes.map(str::to_string),
            created_at: now,
            updated_at: now,
        };

        info!(
            id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            "Creating invoice"
        );

        sqlx::query(
            "INSERT INTO invoices ( \
                 id, tenant_id, invoice_number, customer_id, status, \
                 total_price, amount_paid, notes, created_at, updated_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&invoice.id)
        .bind(&invoice.tenant_id)
        .bind(&invoice.invoice_number)
        .bind(&invoice.customer_id)
        .bind(invoice.status)
        .bind(invoice.total_price)
        .bind(invoice.amount_paid)
        .bind(&invoice.notes)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Generates the next invoice number for today: `YYYYMMDD-NNNN`.
    ///
    /// Sequential within the day per tenant. The UNIQUE index on
    /// (tenant_id, invoice_number) catches the (rare) race of two cashiers
    /// saving in the same instant; the caller retries on UniqueViolation.
    async fn generate_invoice_number(&self, tenant_id: &str) -> DbResult<String> {
        let date_prefix = Utc::now().format("%Y%m%d").to_string();
        let pattern = format!("{date_prefix}-%");

        let today_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM invoices WHERE tenant_id = ?1 AND invoice_number LIKE ?2",
        )
        .bind(tenant_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(format!("{date_prefix}-{:04}", today_count + 1))
    }

    /// Gets an invoice by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Lists a tenant's most recent invoices.
    pub async fn list_recent(&self, tenant_id: &str, limit: u32) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices \
             WHERE tenant_id = ?1 ORDER BY created_at DESC LIMIT ?2"
        ))
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    /// Marks a pending invoice as paid.
    pub async fn mark_paid(&self, id: &str) -> DbResult<()> {
        self.transition_status(id, InvoiceStatus::Paid).await
    }

    /// Cancels a pending invoice. Its lines are kept for history.
    pub async fn cancel(&self, id: &str) -> DbResult<()> {
        self.transition_status(id, InvoiceStatus::Cancelled).await
    }

    /// Transitions a PENDING invoice to a terminal status.
    async fn transition_status(&self, id: &str, to: InvoiceStatus) -> DbResult<()> {
        let invoice = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Invoice", id))?;

        if invoice.status != InvoiceStatus::Pending {
            return Err(CoreError::InvalidInvoiceStatus {
                invoice_id: id.to_string(),
                current_status: format!("{:?}", invoice.status).to_lowercase(),
            }
            .into());
        }

        sqlx::query("UPDATE invoices SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(to)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // =========================================================================
    // Lines
    // =========================================================================

    /// Prices and persists one glass line on a pending invoice.
    ///
    /// The rate table and price catalog are the caller's snapshots for this
    /// pricing session. Any pricing failure (missing band, catalog miss,
    /// invalid input) rejects the line before anything is written; on success
    /// the line, its operations, and the bumped invoice total commit in one
    /// transaction.
    pub async fn add_line(
        &self,
        invoice_id: &str,
        glass_type: &GlassType,
        draft: &LineDraft,
        rate_table: &[CuttingRate],
        price_catalog: &[OperationPrice],
    ) -> DbResult<GlassLine> {
        let invoice = self
            .get_by_id(invoice_id)
            .await?
            .ok_or_else(|| DbError::not_found("Invoice", invoice_id))?;

        if invoice.status != InvoiceStatus::Pending {
            return Err(CoreError::InvalidInvoiceStatus {
                invoice_id: invoice_id.to_string(),
                current_status: format!("{:?}", invoice.status).to_lowercase(),
            }
            .into());
        }

        validate_dimension("width", draft.width).map_err(CoreError::from)?;
        validate_dimension("height", draft.height).map_err(CoreError::from)?;
        validate_thickness(draft.thickness_mm).map_err(CoreError::from)?;
        validate_quantity(draft.quantity).map_err(CoreError::from)?;

        let line_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM glass_lines WHERE invoice_id = ?1")
                .bind(invoice_id)
                .fetch_one(&self.pool)
                .await?;
        validate_invoice_size(line_count as usize).map_err(CoreError::from)?;

        // Price first. A draft that cannot be priced never touches the
        // database.
        let totals = compute_line_totals(draft, rate_table, price_catalog, glass_type.price_per_meter)?;

        let now = Utc::now();
        let line_id = Uuid::new_v4().to_string();

        // Resolve each operation's per-piece cost for its stored snapshot.
        let mut operations = Vec::with_capacity(draft.operations.len());
        for (position, operation) in draft.operations.iter().enumerate() {
            let cost = compute_operation_cost(operation, draft, rate_table, price_catalog)?;
            operations.push(Operation {
                id: Uuid::new_v4().to_string(),
                line_id: line_id.clone(),
                operation_type: operation.operation_type,
                subtype: operation.subtype.clone(),
                manual_price: operation.manual_price,
                operation_price: cost,
                position: position as i64,
            });
        }

        let line = GlassLine {
            id: line_id,
            invoice_id: invoice_id.to_string(),
            glass_type_id: glass_type.id.clone(),
            glass_type_name: glass_type.name.clone(),
            price_per_meter: glass_type.price_per_meter,
            width: draft.width,
            height: draft.height,
            dimension_unit: draft.dimension_unit,
            thickness_mm: draft.thickness_mm,
            quantity: draft.quantity,
            operations,
            area_m2: totals.area_m2,
            glass_price: totals.glass_price,
            cutting_price: totals.cutting_price,
            line_total: totals.line_total,
            created_at: now,
        };

        debug!(
            invoice_id = %invoice_id,
            line_id = %line.id,
            line_total = line.line_total,
            "Adding priced line"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO glass_lines ( \
                 id, invoice_id, glass_type_id, glass_type_name, price_per_meter, \
                 width, height, dimension_unit, thickness_mm, quantity, \
                 area_m2, glass_price, cutting_price, line_total, created_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        )
        .bind(&line.id)
        .bind(&line.invoice_id)
        .bind(&line.glass_type_id)
        .bind(&line.glass_type_name)
        .bind(line.price_per_meter)
        .bind(line.width)
        .bind(line.height)
        .bind(line.dimension_unit)
        .bind(line.thickness_mm)
        .bind(line.quantity)
        .bind(line.area_m2)
        .bind(line.glass_price)
        .bind(line.cutting_price)
        .bind(line.line_total)
        .bind(line.created_at)
        .execute(&mut *tx)
        .await?;

        for operation in &line.operations {
            sqlx::query(
                "INSERT INTO line_operations ( \
                     id, line_id, operation_type, subtype, manual_price, \
                     operation_price, position \
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(&operation.id)
            .bind(&operation.line_id)
            .bind(operation.operation_type)
            .bind(&operation.subtype)
            .bind(operation.manual_price)
            .bind(operation.operation_price)
            .bind(operation.position)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "UPDATE invoices SET total_price = total_price + ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(invoice_id)
        .bind(line.line_total)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(line)
    }

    /// Removes a line from a pending invoice and rolls its total back out.
    pub async fn remove_line(&self, invoice_id: &str, line_id: &str) -> DbResult<()> {
        let invoice = self
            .get_by_id(invoice_id)
            .await?
            .ok_or_else(|| DbError::not_found("Invoice", invoice_id))?;

        if invoice.status != InvoiceStatus::Pending {
            return Err(CoreError::InvalidInvoiceStatus {
                invoice_id: invoice_id.to_string(),
                current_status: format!("{:?}", invoice.status).to_lowercase(),
            }
            .into());
        }

        let line_total: Option<f64> = sqlx::query_scalar(
            "SELECT line_total FROM glass_lines WHERE id = ?1 AND invoice_id = ?2",
        )
        .bind(line_id)
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await?;

        let line_total = line_total.ok_or_else(|| DbError::not_found("Glass line", line_id))?;

        let mut tx = self.pool.begin().await?;

        // line_operations go with the line via ON DELETE CASCADE
        sqlx::query("DELETE FROM glass_lines WHERE id = ?1")
            .bind(line_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE invoices SET total_price = total_price - ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(invoice_id)
        .bind(line_total)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Gets an invoice's lines with their operations, in insertion order.
    pub async fn get_lines(&self, invoice_id: &str) -> DbResult<Vec<GlassLine>> {
        let mut lines = sqlx::query_as::<_, GlassLine>(&format!(
            "SELECT {LINE_COLUMNS} FROM glass_lines \
             WHERE invoice_id = ?1 ORDER BY created_at, id"
        ))
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        for line in &mut lines {
            line.operations = sqlx::query_as::<_, Operation>(&format!(
                "SELECT {OPERATION_COLUMNS} FROM line_operations \
                 WHERE line_id = ?1 ORDER BY position"
            ))
            .bind(&line.id)
            .fetch_all(&self.pool)
            .await?;
        }

        Ok(lines)
    }

    // =========================================================================
    // Payments
    // =========================================================================

    /// Records a payment and bumps the invoice's running `amount_paid`.
    ///
    /// Overpayment is allowed: the remaining balance simply goes negative.
    /// Payments are only rejected on non-positive amounts or a non-pending
    /// invoice.
    pub async fn record_payment(
        &self,
        invoice_id: &str,
        method: PaymentMethod,
        amount: f64,
        reference: Option<&str>,
    ) -> DbResult<Payment> {
        validate_payment_amount(amount).map_err(CoreError::from)?;

        let invoice = self
            .get_by_id(invoice_id)
            .await?
            .ok_or_else(|| DbError::not_found("Invoice", invoice_id))?;

        if invoice.status != InvoiceStatus::Pending {
            return Err(CoreError::InvalidInvoiceStatus {
                invoice_id: invoice_id.to_string(),
                current_status: format!("{:?}", invoice.status).to_lowercase(),
            }
            .into());
        }

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            invoice_id: invoice_id.to_string(),
            method,
            amount,
            reference: reference.map(str::to_string),
            created_at: Utc::now(),
        };

        info!(
            invoice_id = %invoice_id,
            amount = amount,
            "Recording payment"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO payments (id, invoice_id, method, amount, reference, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&payment.id)
        .bind(&payment.invoice_id)
        .bind(payment.method)
        .bind(payment.amount)
        .bind(&payment.reference)
        .bind(payment.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE invoices SET amount_paid = amount_paid + ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(invoice_id)
        .bind(amount)
        .bind(payment.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(payment)
    }

    /// Gets an invoice's payments, oldest first.
    pub async fn get_payments(&self, invoice_id: &str) -> DbResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments \
             WHERE invoice_id = ?1 ORDER BY created_at, id"
        ))
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
