//! # Facade Error Boundary
//!
//! `OpsError` is what crosses from the facades to the presentation layer.
//!
//! ## Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  (1) Validation / business errors → OpsError::Core              │
//! │      negative input, unknown id, hidden pizza, short stock      │
//! │      Caught before or during the operation; no partial state.   │
//! │                                                                 │
//! │  (2) Business-rule refusals → NOT errors                        │
//! │      delete-in-use without cascade returns                      │
//! │      DeleteOutcome::InUse as a normal value.                    │
//! │                                                                 │
//! │  (3) Storage errors → OpsError::Storage                         │
//! │      wrapped with a human-readable operation label, original    │
//! │      cause preserved as the error source. Never swallowed.      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use pizzeria_core::{CoreError, ValidationError};
use pizzeria_db::DbError;

/// Errors returned by the operation facades.
#[derive(Debug, Error)]
pub enum OpsError {
    /// A business rule or validation failure. The message already carries
    /// the entity and id, so no extra labelling here.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage failure, labelled with the operation that hit it.
    ///
    /// The original [`DbError`] stays attached as the error source, so
    /// callers that care can still inspect the cause chain.
    #[error("{op}: {source}")]
    Storage {
        /// Human-readable operation label, e.g. `"add ingredient"`.
        op: &'static str,
        #[source]
        source: DbError,
    },
}

impl From<ValidationError> for OpsError {
    fn from(err: ValidationError) -> Self {
        OpsError::Core(CoreError::Validation(err))
    }
}

/// Maps a [`DbError`] into [`OpsError::Storage`] with an operation label.
///
/// ## Usage
/// ```rust,ignore
/// let mut tx = self.db.begin().await.map_err(storage("add recipe"))?;
/// ```
pub fn storage(op: &'static str) -> impl FnOnce(DbError) -> OpsError {
    move |source| OpsError::Storage { op, source }
}

/// Result type for facade operations.
pub type OpsResult<T> = Result<T, OpsError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_label_prefixes_cause() {
        let err = storage("order pizza")(DbError::PoolExhausted);
        assert_eq!(err.to_string(), "order pizza: connection pool exhausted");
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: OpsError = CoreError::PizzaNotFound(7).into();
        assert_eq!(err.to_string(), "pizza not found: 7");
    }

    #[test]
    fn test_validation_wraps_into_core() {
        let err: OpsError = ValidationError::Negative {
            field: "cost".to_string(),
        }
        .into();
        assert!(matches!(err, OpsError::Core(CoreError::Validation(_))));
    }
}
