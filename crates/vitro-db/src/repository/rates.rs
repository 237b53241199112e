//! # Pricing Catalog Repository
//!
//! Database operations for the two admin-editable pricing catalogs:
//! thickness-banded cutting rates and the flat operation price catalog.
//!
//! ## Snapshot Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Pricing session                                                        │
//! │                                                                         │
//! │  1. Caller fetches catalogs ONCE:                                      │
//! │       let rates   = repo.list_rates(tenant, "SHATF").await?;           │
//! │       let catalog = repo.list_active_prices(tenant).await?;            │
//! │                                                                         │
//! │  2. Threads the snapshots through every pricing call.                  │
//! │                                                                         │
//! │  3. Saved lines store resolved prices, so a concurrent admin edit to   │
//! │     either catalog never changes an invoice that was just priced.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use vitro_core::{CuttingRate, OperationPrice, OperationType};

/// Repository for cutting-rate bands and operation prices.
#[derive(Debug, Clone)]
pub struct RatesRepository {
    pool: SqlitePool,
}

const RATE_COLUMNS: &str =
    "id, tenant_id, cutting_type, min_thickness, max_thickness, rate_per_meter";

const PRICE_COLUMNS: &str = "id, tenant_id, operation_type, subtype, base_price, unit, active";

impl RatesRepository {
    /// Creates a new RatesRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RatesRepository { pool }
    }

    // =========================================================================
    // Cutting-rate bands
    // =========================================================================

    /// Lists the rate bands for a cutting type, ordered by `min_thickness`.
    ///
    /// The result is the snapshot the pricing engine scans; ordering makes
    /// "first matching band" deterministic.
    pub async fn list_rates(
        &self,
        tenant_id: &str,
        cutting_type: &str,
    ) -> DbResult<Vec<CuttingRate>> {
        let rates = sqlx::query_as::<_, CuttingRate>(&format!(
            "SELECT {RATE_COLUMNS} FROM cutting_rates \
             WHERE tenant_id = ?1 AND cutting_type = ?2 \
             ORDER BY min_thickness"
        ))
        .bind(tenant_id)
        .bind(cutting_type)
        .fetch_all(&self.pool)
        .await?;

        debug!(cutting_type, count = rates.len(), "Listed rate bands");
        Ok(rates)
    }

    /// Inserts a rate band.
    pub async fn insert_rate(&self, rate: &CuttingRate) -> DbResult<()> {
        debug!(
            id = %rate.id,
            band = format!("{}-{}", rate.min_thickness, rate.max_thickness),
            "Inserting rate band"
        );

        sqlx::query(
            "INSERT INTO cutting_rates ( \
                 id, tenant_id, cutting_type, min_thickness, max_thickness, rate_per_meter \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&rate.id)
        .bind(&rate.tenant_id)
        .bind(&rate.cutting_type)
        .bind(rate.min_thickness)
        .bind(rate.max_thickness)
        .bind(rate.rate_per_meter)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a band's bounds and rate.
    pub async fn update_rate(&self, rate: &CuttingRate) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE cutting_rates SET \
                 min_thickness = ?2, max_thickness = ?3, rate_per_meter = ?4 \
             WHERE id = ?1",
        )
        .bind(&rate.id)
        .bind(rate.min_thickness)
        .bind(rate.max_thickness)
        .bind(rate.rate_per_meter)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Rate band", &rate.id));
        }

        Ok(())
    }

    /// Deletes a rate band.
    ///
    /// Hard delete is fine here: saved lines store resolved prices and never
    /// reference a band row.
    pub async fn delete_rate(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM cutting_rates WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Rate band", id));
        }

        Ok(())
    }

    /// Replaces a tenant's bands for one cutting type with the given set.
    ///
    /// Used by the admin config page's "save table" action and by seeding.
    /// Runs in a transaction: the table is never observed half-replaced.
    pub async fn replace_rates(
        &self,
        tenant_id: &str,
        cutting_type: &str,
        rates: &[CuttingRate],
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM cutting_rates WHERE tenant_id = ?1 AND cutting_type = ?2")
            .bind(tenant_id)
            .bind(cutting_type)
            .execute(&mut *tx)
            .await?;

        for rate in rates {
            sqlx::query(
                "INSERT INTO cutting_rates ( \
                     id, tenant_id, cutting_type, min_thickness, max_thickness, rate_per_meter \
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(&rate.id)
            .bind(tenant_id)
            .bind(cutting_type)
            .bind(rate.min_thickness)
            .bind(rate.max_thickness)
            .bind(rate.rate_per_meter)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(cutting_type, count = rates.len(), "Replaced rate table");
        Ok(())
    }

    // =========================================================================
    // Operation price catalog
    // =========================================================================

    /// Lists ACTIVE catalog prices for a tenant.
    ///
    /// This is the snapshot new lines are priced from: inactive rows are
    /// excluded here, which is exactly what makes them unable to price new
    /// work while historical lines keep their resolved prices.
    pub async fn list_active_prices(&self, tenant_id: &str) -> DbResult<Vec<OperationPrice>> {
        let prices = sqlx::query_as::<_, OperationPrice>(&format!(
            "SELECT {PRICE_COLUMNS} FROM operation_prices \
             WHERE tenant_id = ?1 AND active = 1 \
             ORDER BY operation_type, subtype"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(prices)
    }

    /// Lists ALL catalog prices (active and inactive) for the admin page.
    pub async fn list_all_prices(&self, tenant_id: &str) -> DbResult<Vec<OperationPrice>> {
        let prices = sqlx::query_as::<_, OperationPrice>(&format!(
            "SELECT {PRICE_COLUMNS} FROM operation_prices \
             WHERE tenant_id = ?1 \
             ORDER BY operation_type, subtype"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(prices)
    }

    /// Inserts a catalog price.
    pub async fn insert_price(&self, price: &OperationPrice) -> DbResult<()> {
        debug!(
            operation_type = price.operation_type.as_str(),
            subtype = %price.subtype,
            "Inserting catalog price"
        );

        sqlx::query(
            "INSERT INTO operation_prices ( \
                 id, tenant_id, operation_type, subtype, base_price, unit, active \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&price.id)
        .bind(&price.tenant_id)
        .bind(price.operation_type)
        .bind(&price.subtype)
        .bind(price.base_price)
        .bind(&price.unit)
        .bind(price.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a catalog entry's base price.
    pub async fn update_price(&self, id: &str, base_price: f64) -> DbResult<()> {
        let result = sqlx::query("UPDATE operation_prices SET base_price = ?2 WHERE id = ?1")
            .bind(id)
            .bind(base_price)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog price", id));
        }

        Ok(())
    }

    /// Toggles a catalog entry's active flag.
    ///
    /// Admins deactivate instead of deleting so historical data stays
    /// explainable.
    pub async fn set_price_active(&self, id: &str, active: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE operation_prices SET active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog price", id));
        }

        Ok(())
    }
}

/// Builds a new catalog price with a generated ID.
pub fn new_operation_price(
    tenant_id: &str,
    operation_type: OperationType,
    subtype: &str,
    base_price: f64,
) -> OperationPrice {
    OperationPrice {
        id: Uuid::new_v4().to_string(),
        tenant_id: tenant_id.to_string(),
        operation_type,
        subtype: subtype.to_string(),
        base_price,
        unit: "per piece".to_string(),
        active: true,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use vitro_core::pricing::{default_shataf_rates, lookup_rate, SHATF_CUTTING_TYPE};
    use vitro_core::DEFAULT_TENANT_ID;

    #[tokio::test]
    async fn test_seeded_default_table_round_trips_and_prices() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rates();

        repo.replace_rates(
            DEFAULT_TENANT_ID,
            SHATF_CUTTING_TYPE,
            &default_shataf_rates(),
        )
        .await
        .unwrap();

        let rates = repo
            .list_rates(DEFAULT_TENANT_ID, SHATF_CUTTING_TYPE)
            .await
            .unwrap();
        assert_eq!(rates.len(), 8);

        // The loaded snapshot behaves exactly like the in-memory default
        assert_eq!(lookup_rate(&rates, SHATF_CUTTING_TYPE, 4.0).unwrap(), 7.0);
        assert_eq!(lookup_rate(&rates, SHATF_CUTTING_TYPE, 4.1).unwrap(), 9.0);
        assert_eq!(lookup_rate(&rates, SHATF_CUTTING_TYPE, 49.0).unwrap(), 18.0);
    }

    #[tokio::test]
    async fn test_inactive_price_excluded_from_pricing_snapshot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rates();

        let engraving =
            new_operation_price(DEFAULT_TENANT_ID, OperationType::Laser, "engraving", 50.0);
        repo.insert_price(&engraving).await.unwrap();

        assert_eq!(
            repo.list_active_prices(DEFAULT_TENANT_ID).await.unwrap().len(),
            1
        );

        repo.set_price_active(&engraving.id, false).await.unwrap();

        // Gone from the pricing snapshot, still visible to the admin page
        assert!(repo
            .list_active_prices(DEFAULT_TENANT_ID)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            repo.list_all_prices(DEFAULT_TENANT_ID).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_duplicate_catalog_key_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rates();

        let first = new_operation_price(DEFAULT_TENANT_ID, OperationType::Farma, "standard", 25.0);
        let second = new_operation_price(DEFAULT_TENANT_ID, OperationType::Farma, "standard", 30.0);

        repo.insert_price(&first).await.unwrap();
        let err = repo.insert_price(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_and_delete_rate_band() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rates();

        let mut band = CuttingRate {
            id: Uuid::new_v4().to_string(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            cutting_type: SHATF_CUTTING_TYPE.to_string(),
            min_thickness: 0.0,
            max_thickness: 3.0,
            rate_per_meter: 5.0,
        };
        repo.insert_rate(&band).await.unwrap();

        band.rate_per_meter = 6.0;
        repo.update_rate(&band).await.unwrap();

        let rates = repo
            .list_rates(DEFAULT_TENANT_ID, SHATF_CUTTING_TYPE)
            .await
            .unwrap();
        assert_eq!(rates[0].rate_per_meter, 6.0);

        repo.delete_rate(&band.id).await.unwrap();
        let err = repo.delete_rate(&band.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
