//! # Error Types
//!
//! Domain-specific error types for pizzeria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Error Types                              │
//! │                                                                 │
//! │  pizzeria-core errors (this file)                               │
//! │  ├── CoreError        - Business rule violations                │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  pizzeria-db errors (separate crate)                            │
//! │  └── DbError          - Storage operation failures              │
//! │                                                                 │
//! │  pizzeria-ops errors (separate crate)                           │
//! │  └── OpsError         - Facade boundary (adds operation label)  │
//! │                                                                 │
//! │  Flow: ValidationError → CoreError → OpsError → Presentation    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity ids, quantities)
//! 3. Errors are enum variants, never String
//! 4. Expected recoverable outcomes (delete-in-use refusal) are NOT errors;
//!    they are returned as normal values by the ops layer

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations or domain lookups that came up
/// empty. They should be caught by the presentation layer and rendered,
/// never crash the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pizza id does not exist.
    #[error("pizza not found: {0}")]
    PizzaNotFound(i64),

    /// Ingredient id does not exist.
    #[error("ingredient not found: {0}")]
    IngredientNotFound(i64),

    /// Pizza exists but is hidden from the menu (or was deleted between
    /// listing and lookup). Customers only ever see visible pizzas.
    #[error("pizza {0} is not on the menu")]
    PizzaNotAvailable(i64),

    /// Not enough stock to fulfil a recipe line.
    ///
    /// ## When This Occurs
    /// - `order_pizza` found a line whose required amount exceeds stock.
    ///   The check runs over ALL lines before any decrement, so stock is
    ///   untouched when this is returned.
    #[error("insufficient stock of ingredient {ingredient_id}: available {available}, required {required}")]
    InsufficientStock {
        ingredient_id: i64,
        available: i64,
        required: i64,
    },

    /// The pizza has no cost factor row, so no price can be computed.
    ///
    /// A missing *ingredient* cost contributes 0 to the price sum, but a
    /// missing cost factor means the menu entry was never priced at all;
    /// quoting such a pizza would be guesswork.
    #[error("no price available for pizza {0}")]
    PriceUnavailable(i64),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. Raised before
/// any mutation, so failing validation never leaves partial state.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is not a finite number (NaN or infinity).
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            ingredient_id: 3,
            available: 1,
            required: 4,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock of ingredient 3: available 1, required 4"
        );

        let err = CoreError::PizzaNotFound(42);
        assert_eq!(err.to_string(), "pizza not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "cost".to_string(),
        };
        assert_eq!(err.to_string(), "cost must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
