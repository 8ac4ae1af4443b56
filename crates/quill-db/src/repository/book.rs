//! # Book Repository
//!
//! Database operations for books.
//!
//! ## Key Operations
//! - Lookup by id
//! - Exact-match listing by genre or author
//! - Partial update inside one transaction
//!
//! ## Partial Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    update(id, BookUpdate)                               │
//! │                                                                         │
//! │  validate present fields ──► error? return, nothing written            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  SELECT row ──► missing? drop tx (ROLLBACK), NotFound                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply Some(..) fields to the loaded row                               │
//! │  UPDATE all columns from the merged row                                │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction: no partial writes.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use quill_core::{Book, BookUpdate, CoreError, NewBook};

const SELECT_BOOK: &str = r#"
    SELECT
        book_id AS id,
        title,
        author,
        genre,
        price_cents,
        quantity_in_stock
    FROM books
"#;

/// Repository for book database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.books();
///
/// let scifi = repo.list_by_genre("SciFi").await?;
/// let book = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Gets a book by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!("{SELECT_BOOK} WHERE book_id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    /// Lists books whose genre equals `genre` exactly (case-sensitive).
    pub async fn list_by_genre(&self, genre: &str) -> DbResult<Vec<Book>> {
        debug!(genre = %genre, "Listing books by genre");

        let books = sqlx::query_as::<_, Book>(&format!(
            "{SELECT_BOOK} WHERE genre = ?1 ORDER BY book_id"
        ))
        .bind(genre)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = books.len(), "Genre listing returned books");
        Ok(books)
    }

    /// Lists books whose author equals `author` exactly (case-sensitive).
    pub async fn list_by_author(&self, author: &str) -> DbResult<Vec<Book>> {
        debug!(author = %author, "Listing books by author");

        let books = sqlx::query_as::<_, Book>(&format!(
            "{SELECT_BOOK} WHERE author = ?1 ORDER BY book_id"
        ))
        .bind(author)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = books.len(), "Author listing returned books");
        Ok(books)
    }

    /// Inserts a new book and returns it with its assigned id.
    pub async fn insert(&self, book: &NewBook) -> DbResult<Book> {
        let mut conn = self.pool.acquire().await?;
        insert_book(&mut *conn, book).await
    }

    /// Applies a partial update to a book.
    ///
    /// ## Returns
    /// * `Ok(Book)` - The row as stored after the update
    /// * `Err(DbError::NotFound)` - No book has this id; nothing written
    /// * `Err(DbError::Validation)` - A present field breaks a rule; nothing written
    pub async fn update(&self, id: i64, update: BookUpdate) -> DbResult<Book> {
        update.validate()?;

        debug!(book_id = id, "Updating book");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut book = sqlx::query_as::<_, Book>(&format!("{SELECT_BOOK} WHERE book_id = ?1"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::BookNotFound(id))?;

        if update.is_empty() {
            debug!(book_id = id, "Empty update, row left untouched");
            return Ok(book);
        }

        update.apply_to(&mut book);

        sqlx::query(
            r#"
            UPDATE books SET
                title = ?2,
                author = ?3,
                genre = ?4,
                price_cents = ?5,
                quantity_in_stock = ?6
            WHERE book_id = ?1
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.price_cents)
        .bind(book.quantity_in_stock)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(book)
    }

    /// Counts stored books.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Inserts a book on an open connection, so callers can batch inserts
/// inside their own transaction.
pub(crate) async fn insert_book(conn: &mut SqliteConnection, book: &NewBook) -> DbResult<Book> {
    book.validate()?;

    debug!(title = %book.title, "Inserting book");

    let result = sqlx::query(
        r#"
        INSERT INTO books (title, author, genre, price_cents, quantity_in_stock)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.genre)
    .bind(book.price.cents())
    .bind(book.quantity_in_stock)
    .execute(&mut *conn)
    .await?;

    Ok(Book {
        id: result.last_insert_rowid(),
        title: book.title.clone(),
        author: book.author.clone(),
        genre: book.genre.clone(),
        price_cents: book.price.cents(),
        quantity_in_stock: book.quantity_in_stock,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
