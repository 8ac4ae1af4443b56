//! # Repository Module
//!
//! Database repositories for the bookstore.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Repository Access                                │
//! │                                                                         │
//! │  Console command                                                       │
//! │       │                                                                 │
//! │       │  db.books().list_by_genre("SciFi")                             │
//! │       ▼                                                                 │
//! │  Database ──┬── books()      BookRepository      lookup, list, update  │
//! │             ├── customers()  CustomerRepository  lookup, update        │
//! │             ├── sales()      SaleRepository      record (append only)  │
//! │             └── reports()    ReportRepository    joins and sums        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository holds a clone of the pool. Mutations open their own
//! transaction; reads are single statements.

pub mod book;
pub mod customer;
pub mod report;
pub mod sale;
