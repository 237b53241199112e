//! # Glass Type Repository
//!
//! Database operations for the glass catalog (name + price per m²).
//!
//! Glass types are tenant-scoped reference data: admins edit them, the
//! invoice form reads them, and each priced line freezes the name and
//! per-meter price it saw (snapshot pattern), so later edits never change
//! saved invoices.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use vitro_core::GlassType;

/// Repository for glass type database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = GlassTypeRepository::new(pool);
///
/// let types = repo.list_active(DEFAULT_TENANT_ID).await?;
/// let clear = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct GlassTypeRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = "id, tenant_id, name, price_per_meter, \
     default_thickness_mm, is_active, created_at, updated_at";

impl GlassTypeRepository {
    /// Creates a new GlassTypeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GlassTypeRepository { pool }
    }

    /// Lists active glass types for a tenant, sorted by name.
    pub async fn list_active(&self, tenant_id: &str) -> DbResult<Vec<GlassType>> {
        let types = sqlx::query_as::<_, GlassType>(&format!(
            "SELECT {SELECT_COLUMNS} FROM glass_types \
             WHERE tenant_id = ?1 AND is_active = 1 ORDER BY name"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = types.len(), "Listed glass types");
        Ok(types)
    }

    /// Gets a glass type by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(GlassType))` - found (active or not)
    /// * `Ok(None)` - not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<GlassType>> {
        let glass_type = sqlx::query_as::<_, GlassType>(&format!(
            "SELECT {SELECT_COLUMNS} FROM glass_types WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(glass_type)
    }

    /// Inserts a new glass type.
    pub async fn insert(&self, glass_type: &GlassType) -> DbResult<()> {
        debug!(id = %glass_type.id, name = %glass_type.name, "Inserting glass type");

        sqlx::query(
            "INSERT INTO glass_types ( \
                 id, tenant_id, name, price_per_meter, \
                 default_thickness_mm, is_active, created_at, updated_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&glass_type.id)
        .bind(&glass_type.tenant_id)
        .bind(&glass_type.name)
        .bind(glass_type.price_per_meter)
        .bind(glass_type.default_thickness_mm)
        .bind(glass_type.is_active)
        .bind(glass_type.created_at)
        .bind(glass_type.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a glass type's name, price, and default thickness.
    pub async fn update(&self, glass_type: &GlassType) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE glass_types SET \
                 name = ?2, price_per_meter = ?3, default_thickness_mm = ?4, \
                 updated_at = ?5 \
             WHERE id = ?1",
        )
        .bind(&glass_type.id)
        .bind(&glass_type.name)
        .bind(glass_type.price_per_meter)
        .bind(glass_type.default_thickness_mm)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Glass type", &glass_type.id));
        }

        Ok(())
    }

    /// Deactivates a glass type (soft delete).
    ///
    /// Saved lines keep their frozen name/price; the type just stops being
    /// offered on new lines.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result =
            sqlx::query("UPDATE glass_types SET is_active = 0, updated_at = ?2 WHERE id = ?1")
                .bind(id)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Glass type", id));
        }

        Ok(())
    }

    /// Counts all glass types (active and inactive).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM glass_types")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Builds a new glass type with generated ID and timestamps.
pub fn new_glass_type(
    tenant_id: &str,
    name: &str,
    price_per_meter: f64,
    default_thickness_mm: Option<f64>,
) -> GlassType {
    let now = Utc::now();
    GlassType {
        id: Uuid::new_v4().to_string(),
        tenant_id: tenant_id.to_string(),
        name: name.to_string(),
        price_per_meter,
        default_thickness_mm,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use vitro_core::DEFAULT_TENANT_ID;

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.glass_types();

        let clear = new_glass_type(DEFAULT_TENANT_ID, "Clear 6mm", 100.0, Some(6.0));
        repo.insert(&clear).await.unwrap();

        let fetched = repo.get_by_id(&clear.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Clear 6mm");
        assert_eq!(fetched.price_per_meter, 100.0);
        assert_eq!(fetched.default_thickness_mm, Some(6.0));
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn test_list_active_excludes_deactivated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.glass_types();

        let clear = new_glass_type(DEFAULT_TENANT_ID, "Clear 4mm", 80.0, Some(4.0));
        let bronze = new_glass_type(DEFAULT_TENANT_ID, "Bronze 6mm", 150.0, Some(6.0));
        repo.insert(&clear).await.unwrap();
        repo.insert(&bronze).await.unwrap();

        repo.deactivate(&bronze.id).await.unwrap();

        let active = repo.list_active(DEFAULT_TENANT_ID).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Clear 4mm");

        // Deactivated rows are still fetchable by ID (history)
        assert!(repo.get_by_id(&bronze.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.glass_types();

        let first = new_glass_type(DEFAULT_TENANT_ID, "Clear 6mm", 100.0, None);
        let second = new_glass_type(DEFAULT_TENANT_ID, "Clear 6mm", 120.0, None);

        repo.insert(&first).await.unwrap();
        let err = repo.insert(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
