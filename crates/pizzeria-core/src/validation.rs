//! # Validation Module
//!
//! Input validation for the pizzeria facades.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Validation Layers                           │
//! │                                                                 │
//! │  Layer 1: Operations facade (Rust)                              │
//! │  ├── THIS MODULE: names, costs, amounts                         │
//! │  └── Runs BEFORE any write - failed validation never            │
//! │      leaves partial state                                       │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 2: Database (SQLite)                                     │
//! │  ├── NOT NULL constraints                                       │
//! │  └── Foreign key constraints                                    │
//! │                                                                 │
//! │  Defense in depth: each layer catches different mistakes        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a pizza or ingredient name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// ## Returns
/// The trimmed name, ready for storage.
///
/// ## Example
/// ```rust
/// use pizzeria_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Margherita ", "name").unwrap(), "Margherita");
/// assert!(validate_name("", "name").is_err());
/// ```
pub fn validate_name(name: &str, field: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monetary value (ingredient unit cost, cost factor).
///
/// ## Rules
/// - Must be finite (NaN and infinities rejected)
/// - Must be non-negative; zero is allowed (free ingredients exist:
///   water, salt)
pub fn validate_cost(value: f64, field: &str) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock or recipe amount.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (a refill of 0 is a no-op,
///   a recipe line of 0 imposes no stock requirement)
pub fn validate_amount(value: i64, field: &str) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
