//! # Domain Types
//!
//! Entities, partial-update requests and report rows.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │      Sale       │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄──│  book_id (FK)   │   │  id (i64)       │       │
//! │  │  title, author  │   │  customer_id ───┼──►│  name           │       │
//! │  │  genre          │   │  date_of_sale   │   │  email (unique) │       │
//! │  │  price_cents    │   │  quantity_sold  │   │  phone          │       │
//! │  │  qty_in_stock   │   │  total_cents    │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! References between entities are plain foreign-key ids. Joins happen in
//! the report queries, never by walking from one struct to another.
//!
//! ## Snapshot Pattern
//! `Sale::total_price_cents` is computed once from the book price at the
//! moment of sale. Later price changes do not touch recorded sales.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_price, validate_required, validate_stock, ValidationResult};

// =============================================================================
// Book
// =============================================================================

/// A title on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    /// Store-assigned sequential id.
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Unit price in cents.
    pub price_cents: i64,
    pub quantity_in_stock: i64,
}

impl Book {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A book that has not been stored yet. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: Money,
    pub quantity_in_stock: i64,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        price: Money,
        quantity_in_stock: i64,
    ) -> Self {
        NewBook {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            price,
            quantity_in_stock,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("title", &self.title)?;
        validate_required("author", &self.author)?;
        validate_required("genre", &self.genre)?;
        validate_price(self.price)?;
        validate_stock(self.quantity_in_stock)?;
        Ok(())
    }
}

/// Partial update for a book.
///
/// `None` leaves the field unchanged; `Some` replaces it. There is no
/// sentinel value, so any string (including `"-"`) can be stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub price: Option<Money>,
    pub quantity_in_stock: Option<i64>,
}

impl BookUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.price.is_none()
            && self.quantity_in_stock.is_none()
    }

    /// Checks the fields that are present.
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(title) = &self.title {
            validate_required("title", title)?;
        }
        if let Some(author) = &self.author {
            validate_required("author", author)?;
        }
        if let Some(genre) = &self.genre {
            validate_required("genre", genre)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(qty) = self.quantity_in_stock {
            validate_stock(qty)?;
        }
        Ok(())
    }

    /// Writes the present fields into `book`. Identity is never touched.
    pub fn apply_to(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(genre) = self.genre {
            book.genre = genre;
        }
        if let Some(price) = self.price {
            book.price_cents = price.cents();
        }
        if let Some(qty) = self.quantity_in_stock {
            book.quantity_in_stock = qty;
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer. Email is unique across all customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A customer that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewCustomer {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        NewCustomer {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)?;
        validate_required("email", &self.email)?;
        validate_required("phone", &self.phone)?;
        Ok(())
    }
}

/// Partial update for a customer. Same `Option` rule as [`BookUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_required("name", name)?;
        }
        if let Some(email) = &self.email {
            validate_required("email", email)?;
        }
        if let Some(phone) = &self.phone {
            validate_required("phone", phone)?;
        }
        Ok(())
    }

    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub book_id: i64,
    pub customer_id: i64,
    pub date_of_sale: NaiveDate,
    pub quantity_sold: i64,
    /// Unit price × quantity at the time of sale (frozen).
    pub total_price_cents: i64,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// One line of a customer's purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PurchaseRecord {
    pub customer_name: String,
    pub book_title: String,
    pub book_author: String,
    pub book_genre: String,
    pub date_of_sale: NaiveDate,
}

/// One line of the all-sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SoldBookRecord {
    pub customer_name: String,
    pub book_title: String,
    pub date_of_sale: NaiveDate,
}

/// Total revenue for one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GenreRevenue {
    pub genre: String,
    pub revenue_cents: i64,
}

impl GenreRevenue {
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Parses an entity id typed by the operator.
pub fn parse_id(field: &str, input: &str) -> ValidationResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected a whole number".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
