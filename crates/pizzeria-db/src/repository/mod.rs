//! # Repository Module
//!
//! SQL access for the pizzeria tables, one module per entity family.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Repository Pattern, Adapted                     │
//! │                                                                 │
//! │  Ops facade                                                     │
//! │       │   let mut tx = db.begin().await?;                       │
//! │       │   recipe::delete_for_pizza(&mut tx, id).await?;         │
//! │       │   recipe::upsert_line(&mut tx, id, ing, amount).await?; │
//! │       │   tx.commit().await?;                                   │
//! │       ▼                                                         │
//! │  repository functions (this module)                             │
//! │       │   SQL, isolated in one place per table                  │
//! │       ▼                                                         │
//! │  SQLite database                                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Functions take `&mut SqliteConnection` instead of holding a pool:
//! the same function then works on a pooled connection for one-off reads
//! and inside a transaction when an operation groups several statements.
//! The caller owns the unit of work; this layer never commits on its own.
//!
//! ## Available Modules
//!
//! - [`pizza`] - pizza rows, visibility flag, cost factor side table
//! - [`ingredient`] - ingredient rows, unit cost and stock side tables
//! - [`recipe`] - recipe lines and reverse lookups

pub mod ingredient;
pub mod pizza;
pub mod recipe;
