//! # Report Repository
//!
//! Read-only joins and aggregates over customers, sales and books.
//!
//! ## Reports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchase_history(customer)                                             │
//! │    customers ⋈ sales ⋈ books  WHERE customer_id = ?                     │
//! │    → name, title, author, genre, date        (date, sale_id order)      │
//! │                                                                         │
//! │  revenue_by_genre(genre)                                                │
//! │    sales ⋈ books  WHERE genre = ?  GROUP BY genre                       │
//! │    → Some(genre, SUM(total)) | None when no sales match                 │
//! │                                                                         │
//! │  sold_books()                                                           │
//! │    customers ⋈ sales ⋈ books                                            │
//! │    → name, title, date                      (date, sale_id order)      │
//! │                                                                         │
//! │  revenue_by_every_genre()                                               │
//! │    sales ⋈ books  GROUP BY genre            (genre order)              │
//! │    → one row per genre with at least one sale                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sums run over integer cents, so they are exact.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use quill_core::{GenreRevenue, PurchaseRecord, SoldBookRecord};

/// Repository for reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Everything a customer bought, oldest first.
    ///
    /// An unknown customer id and a customer with no sales both give an
    /// empty list.
    pub async fn purchase_history(&self, customer_id: i64) -> DbResult<Vec<PurchaseRecord>> {
        debug!(customer_id, "Loading purchase history");

        let rows = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            SELECT
                c.name AS customer_name,
                b.title AS book_title,
                b.author AS book_author,
                b.genre AS book_genre,
                s.date_of_sale AS date_of_sale
            FROM sales s
            INNER JOIN customers c ON c.customer_id = s.customer_id
            INNER JOIN books b ON b.book_id = s.book_id
            WHERE c.customer_id = ?1
            ORDER BY s.date_of_sale, s.sale_id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Total revenue for one genre (exact, case-sensitive match).
    ///
    /// ## Returns
    /// * `Ok(Some(GenreRevenue))` - At least one sale of a book in the genre
    /// * `Ok(None)` - No matching sales
    pub async fn revenue_by_genre(&self, genre: &str) -> DbResult<Option<GenreRevenue>> {
        debug!(genre = %genre, "Computing revenue for genre");

        let row = sqlx::query_as::<_, GenreRevenue>(
            r#"
            SELECT
                b.genre AS genre,
                SUM(s.total_price_cents) AS revenue_cents
            FROM sales s
            INNER JOIN books b ON b.book_id = s.book_id
            WHERE b.genre = ?1
            GROUP BY b.genre
            "#,
        )
        .bind(genre)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Every sale with its customer and book, oldest first.
    pub async fn sold_books(&self) -> DbResult<Vec<SoldBookRecord>> {
        let rows = sqlx::query_as::<_, SoldBookRecord>(
            r#"
            SELECT
                c.name AS customer_name,
                b.title AS book_title,
                s.date_of_sale AS date_of_sale
            FROM sales s
            INNER JOIN customers c ON c.customer_id = s.customer_id
            INNER JOIN books b ON b.book_id = s.book_id
            ORDER BY s.date_of_sale, s.sale_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Sales report loaded");
        Ok(rows)
    }

    /// Revenue per genre, one row per genre that has sales.
    pub async fn revenue_by_every_genre(&self) -> DbResult<Vec<GenreRevenue>> {
        let rows = sqlx::query_as::<_, GenreRevenue>(
            r#"
            SELECT
                b.genre AS genre,
                SUM(s.total_price_cents) AS revenue_cents
            FROM sales s
            INNER JOIN books b ON b.book_id = s.book_id
            GROUP BY b.genre
            ORDER BY b.genre
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(genres = rows.len(), "Genre revenue report loaded");
        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
