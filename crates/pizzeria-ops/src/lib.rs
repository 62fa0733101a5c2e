//! # pizzeria-ops: Operation Facades
//!
//! The two facades the presentation layer calls, built purely on
//! `pizzeria-db` and the rules in `pizzeria-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Operation Facades                           │
//! │                                                                 │
//! │  Presentation (text menus, external caller)                     │
//! │       │                 │                                       │
//! │       ▼                 ▼                                       │
//! │  ┌──────────┐     ┌─────────────┐                               │
//! │  │ AdminOps │     │ CustomerOps │   (THIS CRATE)                │
//! │  └────┬─────┘     └──────┬──────┘                               │
//! │       │  validate input (pizzeria-core::validation)             │
//! │       │  begin transaction                                      │
//! │       │  mutate rows (pizzeria-db::repository)                  │
//! │       │  refresh visibility when designated (this crate)        │
//! │       │  commit                                                 │
//! │       ▼                                                         │
//! │  SQLite                                                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transaction Discipline
//!
//! Every mutating facade method groups its writes under one transaction:
//! either all row mutations of "replace recipe and recompute visibility"
//! commit, or none do. Validation failures happen before the transaction
//! starts and never leave partial state. There is no protection against a
//! *second process* interleaving with a transaction beyond SQLite's own
//! file locking; this is a single-user application by design.
//!
//! ## Modules
//!
//! - [`admin`] - administrator operations ([`AdminOps`])
//! - [`customer`] - customer operations ([`CustomerOps`])
//! - [`visibility`] - the derived visibility recomputation pass
//! - [`pricing`] - price lookup shared by the customer operations
//! - [`error`] - the facade error boundary ([`OpsError`])

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod customer;
pub mod error;
pub mod pricing;
pub mod visibility;

// =============================================================================
// Re-exports
// =============================================================================

pub use admin::{AdminOps, DeleteOutcome, IngredientOverview, PizzaOverview};
pub use customer::{CustomerOps, MenuEntry, PizzaDetails};
pub use error::{OpsError, OpsResult};
