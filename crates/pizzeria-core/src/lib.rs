//! # pizzeria-core: Pure Business Logic
//!
//! This crate is the heart of the pizzeria application. It contains all
//! business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Pizzeria Architecture                        │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │              Presentation (text menus, external)          │  │
//! │  └────────────────────────────┬──────────────────────────────┘  │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐  │
//! │  │                pizzeria-ops (facades)                     │  │
//! │  │    AdminOps: inventory & menu management                  │  │
//! │  │    CustomerOps: browse, price, order                      │  │
//! │  └────────────────────────────┬──────────────────────────────┘  │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐  │
//! │  │            ★ pizzeria-core (THIS CRATE) ★                 │  │
//! │  │                                                           │  │
//! │  │   ┌─────────┐  ┌──────────┐  ┌────────────┐               │  │
//! │  │   │  types  │  │   menu   │  │ validation │               │  │
//! │  │   │ Pizza   │  │ pricing  │  │   rules    │               │  │
//! │  │   │ Recipe  │  │ stock    │  │   checks   │               │  │
//! │  │   └─────────┘  └──────────┘  └────────────┘               │  │
//! │  │                                                           │  │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                   │  │
//! │  └────────────────────────────┬──────────────────────────────┘  │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐  │
//! │  │               pizzeria-db (storage layer)                 │  │
//! │  │           SQLite queries, migrations, repositories        │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Pizza, Ingredient, RecipeLine, ...)
//! - [`menu`] - Pricing formula and stock-availability rule
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: database and file system access is forbidden here
//! 3. **Optional-row-as-zero**: a missing cost/stock record is carried as
//!    `Option` and collapsed to 0 only at the point of use
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod menu;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length for pizza and ingredient names.
///
/// Keeps free-text input bounded before it reaches storage. Matches the
/// longest menu entry anyone has ever needed, with room to spare.
pub const MAX_NAME_LEN: usize = 200;

/// Cost factor applied to a pizza when the caller does not supply one.
pub const DEFAULT_COST_FACTOR: f64 = 1.0;
