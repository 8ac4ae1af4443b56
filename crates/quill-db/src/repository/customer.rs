//! # Customer Repository
//!
//! Database operations for customers.
//!
//! Email is UNIQUE in the schema. Both `insert` and `update` surface a
//! clash as [`DbError::UniqueViolation`] carrying the offending address,
//! and an update that clashes leaves the whole row unchanged.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use quill_core::{CoreError, Customer, CustomerUpdate, NewCustomer};

const SELECT_CUSTOMER: &str = r#"
    SELECT
        customer_id AS id,
        name,
        email,
        phone
    FROM customers
"#;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer =
            sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} WHERE customer_id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(customer)
    }

    /// Gets a customer by exact email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        let mut conn = self.pool.acquire().await?;
        find_by_email(&mut *conn, email).await
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - Stored customer with its assigned id
    /// * `Err(DbError::UniqueViolation)` - Email already in use
    pub async fn insert(&self, customer: &NewCustomer) -> DbResult<Customer> {
        let mut conn = self.pool.acquire().await?;
        insert_customer(&mut *conn, customer).await
    }

    /// Applies a partial update to a customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The row as stored after the update
    /// * `Err(DbError::NotFound)` - No customer has this id
    /// * `Err(DbError::UniqueViolation)` - New email already in use; rolled back
    pub async fn update(&self, id: i64, update: CustomerUpdate) -> DbResult<Customer> {
        update.validate()?;

        debug!(customer_id = id, "Updating customer");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut customer =
            sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} WHERE customer_id = ?1"))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(CoreError::CustomerNotFound(id))?;

        if update.is_empty() {
            debug!(customer_id = id, "Empty update, row left untouched");
            return Ok(customer);
        }

        update.apply_to(&mut customer);

        sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                email = ?3,
                phone = ?4
            WHERE customer_id = ?1
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&customer.email))?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(customer)
    }

    /// Counts stored customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

pub(crate) async fn find_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> DbResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} WHERE email = ?1"))
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(customer)
}

pub(crate) async fn insert_customer(
    conn: &mut SqliteConnection,
    customer: &NewCustomer,
) -> DbResult<Customer> {
    customer.validate()?;

    debug!(email = %customer.email, "Inserting customer");

    let result = sqlx::query(
        r#"
        INSERT INTO customers (name, email, phone)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(&customer.name)
    .bind(&customer.email)
    .bind(&customer.phone)
    .execute(&mut *conn)
    .await
    .map_err(|e| DbError::from(e).with_duplicate_value(&customer.email))?;

    Ok(Customer {
        id: result.last_insert_rowid(),
        name: customer.name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
