//! # Customer Repository
//!
//! Database operations for the customer directory.
//!
//! Search uses a simple LIKE prefix match on name and phone. The directory
//! of a glass workshop is a few thousand rows at most; an index on
//! `(tenant_id, name)` keeps this instant.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use vitro_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str =
    "id, tenant_id, name, phone, address, is_active, created_at, updated_at";

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Searches active customers by name or phone prefix.
    ///
    /// Empty query returns active customers sorted by name.
    pub async fn search(&self, tenant_id: &str, query: &str, limit: u32) -> DbResult<Vec<Customer>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching customers");

        if query.is_empty() {
            let customers = sqlx::query_as::<_, Customer>(&format!(
                "SELECT {SELECT_COLUMNS} FROM customers \
                 WHERE tenant_id = ?1 AND is_active = 1 ORDER BY name LIMIT ?2"
            ))
            .bind(tenant_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
            return Ok(customers);
        }

        let pattern = format!("{query}%");
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {SELECT_COLUMNS} FROM customers \
             WHERE tenant_id = ?1 AND is_active = 1 \
             AND (name LIKE ?2 OR phone LIKE ?2) \
             ORDER BY name LIMIT ?3"
        ))
        .bind(tenant_id)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Search returned customers");
        Ok(customers)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {SELECT_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, name = %customer.name, "Inserting customer");

        sqlx::query(
            "INSERT INTO customers ( \
                 id, tenant_id, name, phone, address, is_active, created_at, updated_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&customer.id)
        .bind(&customer.tenant_id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(customer.is_active)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a customer's contact details.
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE customers SET name = ?2, phone = ?3, address = ?4, updated_at = ?5 \
             WHERE id = ?1",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Deactivates a customer (soft delete). Their invoices remain.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result =
            sqlx::query("UPDATE customers SET is_active = 0, updated_at = ?2 WHERE id = ?1")
                .bind(id)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

/// Builds a new customer with generated ID and timestamps.
pub fn new_customer(
    tenant_id: &str,
    name: &str,
    phone: Option<&str>,
    address: Option<&str>,
) -> Customer {
    let now = Utc::now();
    Customer {
        id: Uuid::new_v4().to_string(),
        tenant_id: tenant_id.to_string(),
        name: name.to_string(),
        phone: phone.map(str::to_string),
        address: address.map(str::to_string),
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
    async fn test_insert_and_search() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let ahmed = new_customer(DEFAULT_TENANT_ID, "Ahmed Hassan", Some("0100111222"), None);
        let mona = new_customer(DEFAULT_TENANT_ID, "Mona Said", Some("0122333444"), None);
        repo.insert(&ahmed).await.unwrap();
        repo.insert(&mona).await.unwrap();

        let by_name = repo.search(DEFAULT_TENANT_ID, "Ahm", 10).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Ahmed Hassan");

        let by_phone = repo.search(DEFAULT_TENANT_ID, "0122", 10).await.unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Mona Said");

        let all = repo.search(DEFAULT_TENANT_ID, "", 10).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_deactivated_customer_hidden_from_search() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let customer = new_customer(DEFAULT_TENANT_ID, "Ahmed Hassan", None, None);
        repo.insert(&customer).await.unwrap();
        repo.deactivate(&customer.id).await.unwrap();

        let results = repo.search(DEFAULT_TENANT_ID, "Ahmed", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_customer_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let ghost = new_customer(DEFAULT_TENANT_ID, "Ghost", None, None);
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
