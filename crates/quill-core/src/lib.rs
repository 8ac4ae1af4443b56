//! # quill-core: Pure Domain Model for the Quill Bookstore
//!
//! This crate holds the entities, partial-update requests, report rows,
//! money arithmetic and field validation. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quill Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console (apps/console)                       │   │
//! │  │    menu ──► prompts ──► commands ──► printed lines              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quill-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │   Book    │  │   Money   │  │   rules   │                  │   │
//! │  │   │   Sale    │  │  parsing  │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    quill-db (Database Layer)                    │   │
//! │  │         SQLite queries, migrations, repositories, reports       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Book, Customer, Sale), update requests, report rows
//! - [`money`] - Money type with integer-cent arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules
//!
//! ## Example Usage
//!
//! ```rust
//! use quill_core::{BookUpdate, Money};
//!
//! let update = BookUpdate {
//!     price: Some(Money::from_cents(1299)),
//!     ..BookUpdate::default()
//! };
//! assert!(!update.is_empty());
//! update.validate().unwrap();
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
