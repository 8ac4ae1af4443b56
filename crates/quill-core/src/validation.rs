//! # Validation Module
//!
//! Field rules for books, customers and sales.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console                                                       │
//! │  └── Text → number parsing ("Invalid input format")                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  └── Blank strings, negative price/stock, non-positive quantity        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE(email)                                                     │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quill_core::validation::{validate_required, validate_sale_quantity};
//!
//! validate_required("title", "Dune").unwrap();
//! assert!(validate_sale_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is not blank.
///
/// Every text column (title, author, genre, name, email, phone) is
/// NOT NULL, and a whitespace-only value is treated the same as missing.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a book price. Zero is allowed (giveaways).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level. Zero means sold out.
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity_in_stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the number of copies in a sale.
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Computes a sale total, rejecting totals that would overflow.
pub fn sale_total(unit_price: Money, quantity: i64) -> ValidationResult<Money> {
    validate_sale_quantity(quantity)?;

    unit_price
        .checked_mul_quantity(quantity)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX / unit_price.cents().max(1),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
