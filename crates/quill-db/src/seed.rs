//! # Demo Data
//!
//! Populates an empty store with a small catalog and customer list so the
//! console has something to show on first run.
//!
//! ## Usage
//! ```bash
//! quill --seed
//! quill --db ./shop.db --seed
//! ```
//!
//! Seeding only runs when the `books` table is empty. Run it twice and the
//! second call changes nothing. Every row goes in through one transaction,
//! so a failed seed leaves the store as it was.

use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::book::insert_book;
use crate::repository::customer::{find_by_email, insert_customer};
use quill_core::{Money, NewBook, NewCustomer};

/// (title, author, genre, price in cents, stock)
const BOOKS: &[(&str, &str, &str, i64, i64)] = &[
    ("Dune", "Frank Herbert", "Science Fiction", 999, 12),
    ("Children of Dune", "Frank Herbert", "Science Fiction", 1099, 4),
    ("Foundation", "Isaac Asimov", "Science Fiction", 1250, 7),
    ("I, Robot", "Isaac Asimov", "Science Fiction", 899, 3),
    ("Neuromancer", "William Gibson", "Cyberpunk", 1475, 5),
    ("Pride and Prejudice", "Jane Austen", "Classic", 650, 20),
    ("Emma", "Jane Austen", "Classic", 550, 9),
    ("Moby Dick", "Herman Melville", "Classic", 1199, 2),
    ("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1050, 15),
    ("The Name of the Wind", "Patrick Rothfuss", "Fantasy", 1399, 6),
    ("Gone Girl", "Gillian Flynn", "Thriller", 975, 8),
    ("The Shining", "Stephen King", "Horror", 1125, 4),
];

/// (name, email, phone)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Alice Martin", "alice@example.com", "555-0101"),
    ("Bob Chen", "bob@example.com", "555-0102"),
    ("Carla Diaz", "carla@example.com", "555-0103"),
    ("Dev Patel", "dev@example.com", "555-0104"),
];

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub books: usize,
    pub customers: usize,
}

impl SeedSummary {
    pub fn is_empty(&self) -> bool {
        self.books == 0 && self.customers == 0
    }
}

/// Inserts the demo catalog and customers into an empty store.
///
/// Returns an empty summary without writing anything if any book already
/// exists. Customers whose email is already taken are skipped.
pub async fn seed_demo_data(db: &Database) -> DbResult<SeedSummary> {
    seed_rows(db, BOOKS, CUSTOMERS).await
}

async fn seed_rows(
    db: &Database,
    books: &[(&str, &str, &str, i64, i64)],
    customers: &[(&str, &str, &str)],
) -> DbResult<SeedSummary> {
    let mut tx = db
        .pool()
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        info!(existing, "Store already has books, skipping seed");
        return Ok(SeedSummary::default());
    }

    let mut summary = SeedSummary::default();

    for &(title, author, genre, price_cents, stock) in books {
        let book = NewBook::new(title, author, genre, Money::from_cents(price_cents), stock);
        insert_book(&mut *tx, &book).await?;
        summary.books += 1;
    }

    for &(name, email, phone) in customers {
        if find_by_email(&mut *tx, email).await?.is_some() {
            warn!(email, "Customer already present, skipping");
            continue;
        }
        insert_customer(&mut *tx, &NewCustomer::new(name, email, phone)).await?;
        summary.customers += 1;
    }

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    info!(
        books = summary.books,
        customers = summary.customers,
        "Demo data seeded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;

    #[tokio::test]
    async fn test_seed_fills_empty_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let summary = seed_demo_data(&db).await.unwrap();

        assert_eq!(summary.books, BOOKS.len());
        assert_eq!(summary.customers, CUSTOMERS.len());
        assert_eq!(db.books().count().await.unwrap(), BOOKS.len() as i64);
        assert_eq!(db.books().list_by_author("Jane Austen").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seed_is_a_no_op_second_time() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_demo_data(&db).await.unwrap();

        let second = seed_demo_data(&db).await.unwrap();

        assert!(second.is_empty());
        assert_eq!(db.customers().count().await.unwrap(), CUSTOMERS.len() as i64);
    }

    #[tokio::test]
    async fn test_seed_skips_taken_emails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.customers()
            .insert(&NewCustomer::new("Alice", "alice@example.com", "1"))
            .await
            .unwrap();

        let summary = seed_demo_data(&db).await.unwrap();

        assert_eq!(summary.customers, CUSTOMERS.len() - 1);
    }

    #[tokio::test]
    async fn test_failed_seed_writes_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // The last customer has a blank email, so every book is already
        // inserted when the seed fails.
        let customers = [("Alice Martin", "alice@example.com", "555-0101"), ("Nobody", " ", "0")];
        let err = seed_rows(&db, BOOKS, &customers).await.unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(db.books().count().await.unwrap(), 0);
        assert_eq!(db.customers().count().await.unwrap(), 0);

        let summary = seed_demo_data(&db).await.unwrap();
        assert_eq!(summary.books, BOOKS.len());
        assert_eq!(db.customers().count().await.unwrap(), CUSTOMERS.len() as i64);
    }
}
