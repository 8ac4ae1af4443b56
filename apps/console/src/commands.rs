//! # Menu Commands
//!
//! One function per menu entry. Each collects its input first, then makes
//! a single store call, then prints the result.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ask ──► parse numbers ──► bad? "Invalid input format..." (no store)   │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  one repository / report call                                          │
//! │               │                                                         │
//! │        ┌──────┴───────┐                                                 │
//! │        ▼              ▼                                                 │
//! │   print rows     ConsoleError ──► menu loop prints message             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::error::{ConsoleError, ConsoleResult};
use crate::prompt::Prompt;
use quill_core::{
    parse_id, Book, BookUpdate, Customer, CustomerUpdate, GenreRevenue, Money, PurchaseRecord,
    Sale, SoldBookRecord,
};
use quill_db::Database;

pub const NO_BOOKS_FOR_GENRE: &str = "No books found for the given genre.";
pub const NO_BOOKS_FOR_AUTHOR: &str = "No books found for the given author.";
pub const NO_RECORDS: &str = "No records found.";

// =============================================================================
// Output Lines
// =============================================================================

pub fn book_line(book: &Book) -> String {
    format!(
        "Title: {}, Author: {}, Genre: {}, Price: {}, QuantityInStock: {}",
        book.title,
        book.author,
        book.genre,
        book.price(),
        book.quantity_in_stock
    )
}

pub fn customer_line(customer: &Customer) -> String {
    format!(
        "Name: {}, Email: {}, Phone: {}",
        customer.name, customer.email, customer.phone
    )
}

pub fn purchase_line(record: &PurchaseRecord) -> String {
    format!(
        "Customer: {}, Title: {}, Author: {}, Genre: {}, Date of Sale: {}",
        record.customer_name,
        record.book_title,
        record.book_author,
        record.book_genre,
        record.date_of_sale
    )
}

pub fn sold_book_line(record: &SoldBookRecord) -> String {
    format!(
        "Customer: {}, Book Title: {}, Date of Sale: {}",
        record.customer_name, record.book_title, record.date_of_sale
    )
}

pub fn revenue_line(row: &GenreRevenue) -> String {
    format!("Genre: {}, Total Revenue: {}", row.genre, row.revenue())
}

pub fn sale_line(sale: &Sale) -> String {
    format!(
        "Sale ID: {}, Book ID: {}, Customer ID: {}, Quantity: {}, Total Price: {}, Date of Sale: {}",
        sale.id,
        sale.book_id,
        sale.customer_id,
        sale.quantity_sold,
        sale.total_price(),
        sale.date_of_sale
    )
}

// =============================================================================
// Input Helpers
// =============================================================================

fn ask_id<P: Prompt>(prompt: &mut P, question: &str, field: &str) -> ConsoleResult<i64> {
    let text = prompt.ask_trimmed(question)?;
    Ok(parse_id(field, &text)?)
}

fn parse_whole(text: &str) -> ConsoleResult<i64> {
    text.parse::<i64>().map_err(|_| ConsoleError::invalid_number())
}

fn say_all<P, I>(prompt: &mut P, lines: I, empty_message: &str) -> ConsoleResult<()>
where
    P: Prompt,
    I: IntoIterator<Item = String>,
{
    let mut printed = 0usize;
    for line in lines {
        prompt.say(&line)?;
        printed += 1;
    }
    if printed == 0 {
        prompt.say(empty_message)?;
    }
    Ok(())
}

// =============================================================================
// Books
// =============================================================================

/// 1. Update Book Details
pub async fn update_book<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    let id = ask_id(prompt, "Enter book ID:", "book id")?;
    let title = prompt.ask_optional("Enter new title (leave empty to keep it):")?;
    let author = prompt.ask_optional("Enter new author name (leave empty to keep it):")?;
    let genre = prompt.ask_optional("Enter new genre name (leave empty to keep it):")?;
    let price = prompt
        .ask_optional("Enter new price (leave empty to keep it):")?
        .map(|text| text.parse::<Money>())
        .transpose()?;
    let quantity_in_stock = prompt
        .ask_optional("Enter new quantity in stock (leave empty to keep it):")?
        .map(|text| parse_whole(&text))
        .transpose()?;

    let update = BookUpdate {
        title,
        author,
        genre,
        price,
        quantity_in_stock,
    };
    let unchanged = update.is_empty();

    debug!(book_id = id, unchanged, "update_book command");
    let book = db.books().update(id, update).await?;

    if unchanged {
        prompt.say("No changes made.")?;
    } else {
        info!(book_id = id, "Book updated");
        prompt.say("Book details updated successfully.")?;
    }
    prompt.say(&book_line(&book))?;
    Ok(())
}

/// 2. List Books by Genre
pub async fn list_books_by_genre<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    let genre = prompt.ask_trimmed("Enter genre:")?;
    let books = db.books().list_by_genre(&genre).await?;
    say_all(prompt, books.iter().map(book_line), NO_BOOKS_FOR_GENRE)
}

/// 3. List Books by Author
pub async fn list_books_by_author<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    let author = prompt.ask_trimmed("Enter author:")?;
    let books = db.books().list_by_author(&author).await?;
    say_all(prompt, books.iter().map(book_line), NO_BOOKS_FOR_AUTHOR)
}

// =============================================================================
// Customers
// =============================================================================

/// 4. Update Customer Information
pub async fn update_customer<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    let id = ask_id(prompt, "Enter customer ID:", "customer id")?;
    let update = CustomerUpdate {
        name: prompt.ask_optional("Enter new name (leave empty to keep it):")?,
        email: prompt.ask_optional("Enter new email (leave empty to keep it):")?,
        phone: prompt.ask_optional("Enter new phone number (leave empty to keep it):")?,
    };
    let unchanged = update.is_empty();

    debug!(customer_id = id, unchanged, "update_customer command");
    let customer = db.customers().update(id, update).await?;

    if unchanged {
        prompt.say("No changes made.")?;
    } else {
        info!(customer_id = id, "Customer updated");
        prompt.say("Customer information updated successfully.")?;
    }
    prompt.say(&customer_line(&customer))?;
    Ok(())
}

/// 5. View Customer's Purchase History
pub async fn purchase_history<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    let id = ask_id(prompt, "Enter customer ID:", "customer id")?;
    let rows = db.reports().purchase_history(id).await?;
    say_all(prompt, rows.iter().map(purchase_line), NO_RECORDS)
}

// =============================================================================
// Sales
// =============================================================================

/// 6. Process New Sale
pub async fn process_sale<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    let customer_id = ask_id(prompt, "Enter customer ID:", "customer id")?;
    let book_id = ask_id(prompt, "Enter book ID:", "book id")?;
    let quantity = parse_whole(&prompt.ask_trimmed("Enter books count:")?)?;

    debug!(customer_id, book_id, quantity, "process_sale command");
    let sale = db.sales().record_sale(customer_id, book_id, quantity).await?;

    prompt.say("Sale recorded successfully.")?;
    prompt.say(&sale_line(&sale))?;
    Ok(())
}

// =============================================================================
// Reports
// =============================================================================

/// 7. Calculate Total Revenue by Genre
pub async fn revenue_by_genre<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    let genre = prompt.ask_trimmed("Enter genre:")?;
    let row = db.reports().revenue_by_genre(&genre).await?;
    say_all(prompt, row.iter().map(revenue_line), NO_RECORDS)
}

/// 8. Generate Sales Report
pub async fn sales_report<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    let rows = db.reports().sold_books().await?;
    say_all(prompt, rows.iter().map(sold_book_line), NO_RECORDS)
}

/// 9. Generate Revenue Report by Genre
pub async fn revenue_report<P: Prompt>(db: &Database, prompt: &mut P) -> ConsoleResult<()> {
    let rows = db.reports().revenue_by_every_genre().await?;
    say_all(prompt, rows.iter().map(revenue_line), NO_RECORDS)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, INVALID_NUMBER_MESSAGE};
    use crate::prompt::LinePrompt;
    use chrono::Local;
    use quill_core::{NewBook, NewCustomer};
    use quill_db::DbConfig;
    use std::io::Cursor;

    type Scripted = LinePrompt<Cursor<Vec<u8>>, Vec<u8>>;

    fn scripted(input: &str) -> Scripted {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompt: Scripted) -> String {
        String::from_utf8(prompt.into_output()).unwrap()
    }

    /// Dune (id 1) and Alice (id 1) in a fresh store.
    async fn store() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.books()
            .insert(&NewBook::new("Dune", "Herbert", "SciFi", Money::from_cents(999), 5))
            .await
            .unwrap();
        db.customers()
            .insert(&NewCustomer::new("Alice", "a@x.com", "555"))
            .await
            .unwrap();
        db
    }

    #[test]
    fn test_book_line_format() {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: "SciFi".to_string(),
            price_cents: 990,
            quantity_in_stock: 5,
        };
        assert_eq!(
            book_line(&book),
            "Title: Dune, Author: Herbert, Genre: SciFi, Price: 9.90, QuantityInStock: 5"
        );
    }

    #[tokio::test]
    async fn test_update_book_partial() {
        let db = store().await;
        let mut prompt = scripted("1\n\n\n\n12.50\n\n");

        update_book(&db, &mut prompt).await.unwrap();

        let out = output(prompt);
        assert!(out.contains("Book details updated successfully."));
        assert!(out.contains(
            "Title: Dune, Author: Herbert, Genre: SciFi, Price: 12.50, QuantityInStock: 5"
        ));
    }

    #[tokio::test]
    async fn test_update_book_dash_is_a_real_value() {
        let db = store().await;
        let mut prompt = scripted("1\n-\n\n\n\n\n");

        update_book(&db, &mut prompt).await.unwrap();

        let book = db.books().get_by_id(1).await.unwrap().unwrap();
        assert_eq!(book.title, "-");
    }

    #[tokio::test]
    async fn test_update_book_with_nothing_typed() {
        let db = store().await;
        let before = db.books().get_by_id(1).await.unwrap();
        let mut prompt = scripted("1\n\n\n\n\n\n");

        update_book(&db, &mut prompt).await.unwrap();

        assert!(output(prompt).contains("No changes made."));
        assert_eq!(db.books().get_by_id(1).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let db = store().await;
        let mut prompt = scripted("7\nGhost\n\n\n\n\n");

        let err = update_book(&db, &mut prompt).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Book with ID 7 not found.");
    }

    #[tokio::test]
    async fn test_non_numeric_price_skips_store() {
        let db = store().await;
        let mut prompt = scripted("1\nNew Title\n\n\nten\n\n");

        let err = update_book(&db, &mut prompt).await.unwrap_err();

        assert_eq!(err.message, INVALID_NUMBER_MESSAGE);
        assert_eq!(db.books().get_by_id(1).await.unwrap().unwrap().title, "Dune");
    }

    #[tokio::test]
    async fn test_negative_stock_is_rejected() {
        let db = store().await;
        let mut prompt = scripted("1\n\n\n\n\n-3\n");

        let err = update_book(&db, &mut prompt).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(db.books().get_by_id(1).await.unwrap().unwrap().quantity_in_stock, 5);
    }

    #[tokio::test]
    async fn test_list_by_genre_and_author() {
        let db = store().await;

        let mut prompt = scripted("SciFi\n");
        list_books_by_genre(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains("Title: Dune"));

        let mut prompt = scripted("Romance\n");
        list_books_by_genre(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains(NO_BOOKS_FOR_GENRE));

        let mut prompt = scripted("Nobody\n");
        list_books_by_author(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains(NO_BOOKS_FOR_AUTHOR));
    }

    #[tokio::test]
    async fn test_update_customer_duplicate_email() {
        let db = store().await;
        db.customers()
            .insert(&NewCustomer::new("Bob", "b@x.com", "666"))
            .await
            .unwrap();
        let mut prompt = scripted("2\nRobert\na@x.com\n\n");

        let err = update_customer(&db, &mut prompt).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ConstraintViolation);
        assert_eq!(db.customers().get_by_id(2).await.unwrap().unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn test_update_customer() {
        let db = store().await;
        let mut prompt = scripted("1\n\nalice@x.com\n\n");

        update_customer(&db, &mut prompt).await.unwrap();

        assert!(output(prompt).contains("Name: Alice, Email: alice@x.com, Phone: 555"));
    }

    #[tokio::test]
    async fn test_process_sale_then_reports() {
        let db = store().await;

        let mut prompt = scripted("1\n1\n3\n");
        process_sale(&db, &mut prompt).await.unwrap();
        let out = output(prompt);
        assert!(out.contains("Sale recorded successfully."));
        assert!(out.contains("Total Price: 29.97"));

        let mut prompt = scripted("SciFi\n");
        revenue_by_genre(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains("Genre: SciFi, Total Revenue: 29.97"));

        let mut prompt = scripted("");
        revenue_report(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains("Genre: SciFi, Total Revenue: 29.97"));

        let today = Local::now().date_naive();
        let mut prompt = scripted("");
        sales_report(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains(&format!(
            "Customer: Alice, Book Title: Dune, Date of Sale: {}",
            today
        )));

        let mut prompt = scripted("1\n");
        purchase_history(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains(&format!(
            "Customer: Alice, Title: Dune, Author: Herbert, Genre: SciFi, Date of Sale: {}",
            today
        )));
    }

    #[tokio::test]
    async fn test_process_sale_unknown_book() {
        let db = store().await;
        let mut prompt = scripted("1\n42\n1\n");

        let err = process_sale(&db, &mut prompt).await.unwrap_err();

        assert_eq!(err.message, "Book with ID 42 not found.");
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_process_sale_bad_count() {
        let db = store().await;
        let mut prompt = scripted("1\n1\nthree\n");

        let err = process_sale(&db, &mut prompt).await.unwrap_err();

        assert_eq!(err.message, INVALID_NUMBER_MESSAGE);
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_reports() {
        let db = store().await;

        let mut prompt = scripted("SciFi\n");
        revenue_by_genre(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains(NO_RECORDS));

        let mut prompt = scripted("1\n");
        purchase_history(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains(NO_RECORDS));

        let mut prompt = scripted("");
        sales_report(&db, &mut prompt).await.unwrap();
        assert!(output(prompt).contains(NO_RECORDS));
    }
}
