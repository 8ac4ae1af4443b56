//! # quill-db: Database Layer for the Quill Bookstore Console
//!
//! SQLite storage for books, customers and sales, reached through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quill Data Flow                                  │
//! │                                                                         │
//! │  Console command (List Books by Genre)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     quill-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ BookRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CustomerRepo  │    │ 001_initial  │  │   │
//! │  │   │               │    │ SaleRepo      │    │  _schema.sql │  │   │
//! │  │   │               │    │ ReportRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/quill/quill.db                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Book, customer, sale and report repositories
//! - [`seed`] - Demo catalog for an empty store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quill_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("quill.db")).await?;
//!
//! let sale = db.sales().record_sale(customer_id, book_id, 3).await?;
//! let scifi = db.reports().revenue_by_genre("SciFi").await?;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use seed::{seed_demo_data, SeedSummary};

// Repository re-exports for convenience
pub use repository::book::BookRepository;
pub use repository::customer::CustomerRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
