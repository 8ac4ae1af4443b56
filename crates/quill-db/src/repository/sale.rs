//! # Sale Repository
//!
//! Records sales. Sales are append-only: there is no update or delete.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  record_sale(customer, book, qty)                       │
//! │                                                                         │
//! │  qty <= 0? ──► ValidationError (no transaction opened)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  SELECT price_cents FROM books     ── missing? NotFound("Book")        │
//! │  SELECT 1 FROM customers           ── missing? NotFound("Customer")    │
//! │  total = price × qty (checked)                                          │
//! │  INSERT INTO sales (..., date_of_sale = today, total_price_cents)      │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! The total is frozen at insert time. Changing the book's price later
//! does not touch any recorded sale.
//!
//! Stock is not decremented here; `quantity_in_stock` only changes through
//! an explicit book update.

use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use quill_core::validation::{sale_total, validate_sale_quantity};
use quill_core::{CoreError, Money, Sale};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale dated today (local calendar date).
    ///
    /// ## Returns
    /// * `Ok(Sale)` - The stored sale
    /// * `Err(DbError::NotFound)` - Book or customer id doesn't exist
    /// * `Err(DbError::Validation)` - Quantity is not positive
    pub async fn record_sale(&self, customer_id: i64, book_id: i64, quantity: i64) -> DbResult<Sale> {
        self.record_sale_on(customer_id, book_id, quantity, Local::now().date_naive())
            .await
    }

    /// Records a sale with an explicit date.
    pub async fn record_sale_on(
        &self,
        customer_id: i64,
        book_id: i64,
        quantity: i64,
        date_of_sale: NaiveDate,
    ) -> DbResult<Sale> {
        validate_sale_quantity(quantity)?;

        debug!(customer_id, book_id, quantity, "Recording sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let price_cents: i64 =
            sqlx::query_scalar("SELECT price_cents FROM books WHERE book_id = ?1")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(CoreError::BookNotFound(book_id))?;

        let customer_exists: Option<i64> =
            sqlx::query_scalar("SELECT customer_id FROM customers WHERE customer_id = ?1")
                .bind(customer_id)
                .fetch_optional(&mut *tx)
                .await?;
        if customer_exists.is_none() {
            return Err(CoreError::CustomerNotFound(customer_id).into());
        }

        let total = sale_total(Money::from_cents(price_cents), quantity)?;

        let result = sqlx::query(
            r#"
            INSERT INTO sales (
                book_id, customer_id, date_of_sale, quantity_sold, total_price_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(book_id)
        .bind(customer_id)
        .bind(date_of_sale)
        .bind(quantity)
        .bind(total.cents())
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let sale = Sale {
            id: result.last_insert_rowid(),
            book_id,
            customer_id,
            date_of_sale,
            quantity_sold: quantity,
            total_price_cents: total.cents(),
        };

        info!(sale_id = sale.id, total = %total, "Sale recorded");
        Ok(sale)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT
                sale_id AS id,
                book_id,
                customer_id,
                date_of_sale,
                quantity_sold,
                total_price_cents
            FROM sales
            WHERE sale_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Counts recorded sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};

    use crate::{Database, DbConfig, DbError};
    use quill_core::{Book, BookUpdate, Customer, Money, NewBook, NewCustomer};

    async fn setup() -> (Database, Book, Customer) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = db
            .books()
            .insert(&NewBook::new("Dune", "Herbert", "SciFi", Money::from_cents(999), 5))
            .await
            .unwrap();
        let customer = db
            .customers()
            .insert(&NewCustomer::new("Alice", "a@x.com", "555"))
            .await
            .unwrap();
        (db, book, customer)
    }

    #[tokio::test]
    async fn test_record_sale_computes_exact_total() {
        let (db, book, customer) = setup().await;

        let sale = db.sales().record_sale(customer.id, book.id, 3).await.unwrap();

        assert_eq!(sale.total_price(), Money::from_cents(2997));
        assert_eq!(sale.total_price().to_string(), "29.97");
        assert_eq!(sale.quantity_sold, 3);
        assert_eq!(sale.date_of_sale, Local::now().date_naive());
        assert_eq!(db.sales().get_by_id(sale.id).await.unwrap(), Some(sale));
    }

    #[tokio::test]
    async fn test_total_is_a_snapshot() {
        let (db, book, customer) = setup().await;
        let sale = db.sales().record_sale(customer.id, book.id, 3).await.unwrap();

        db.books()
            .update(
                book.id,
                BookUpdate {
                    price: Some(Money::from_cents(1999)),
                    ..BookUpdate::default()
                },
            )
            .await
            .unwrap();

        let stored = db.sales().get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(stored.total_price_cents, 2997);
    }

    #[tokio::test]
    async fn test_record_sale_leaves_stock_alone() {
        let (db, book, customer) = setup().await;

        db.sales().record_sale(customer.id, book.id, 4).await.unwrap();

        let stored = db.books().get_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity_in_stock, 5);
    }

    #[tokio::test]
    async fn test_unknown_book_or_customer_writes_nothing() {
        let (db, book, customer) = setup().await;

        let err = db.sales().record_sale(customer.id, book.id + 1, 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Book"));

        let err = db.sales().record_sale(customer.id + 1, book.id, 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Customer"));

        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_non_positive_quantity_is_rejected() {
        let (db, book, customer) = setup().await;

        for qty in [0, -2] {
            let err = db.sales().record_sale(customer.id, book.id, qty).await.unwrap_err();
            assert!(matches!(err, DbError::Validation(_)));
        }
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_sale_on_keeps_given_date() {
        let (db, book, customer) = setup().await;
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let sale = db
            .sales()
            .record_sale_on(customer.id, book.id, 1, date)
            .await
            .unwrap();

        let stored = db.sales().get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(stored.date_of_sale, date);
        assert_eq!(stored.total_price_cents, 999);
    }
}
