//! # pizzeria-db: Database Layer
//!
//! SQLite storage for the pizzeria, using sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Pizzeria Data Flow                          │
//! │                                                                 │
//! │  Facade call (e.g. AdminOps::add_recipe)                        │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                pizzeria-db (THIS CRATE)                   │  │
//! │  │                                                           │  │
//! │  │  ┌────────────┐   ┌───────────────┐   ┌───────────────┐   │  │
//! │  │  │  Database  │   │  Repositories │   │  Migrations   │   │  │
//! │  │  │ (pool.rs)  │   │ pizza.rs      │   │  (embedded)   │   │  │
//! │  │  │            │   │ ingredient.rs │   │               │   │  │
//! │  │  │ SqlitePool │◄──│ recipe.rs     │   │ 001_init.sql  │   │  │
//! │  │  └────────────┘   └───────────────┘   └───────────────┘   │  │
//! │  └───────────────────────────┬───────────────────────────────┘  │
//! │                              ▼                                  │
//! │                SQLite database file (pizzeria.db)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Repositories Take a Connection
//!
//! Repository functions operate on `&mut SqliteConnection` rather than on
//! the pool. Every logical operation in the ops layer groups several
//! statements (e.g. "replace recipe, then recompute visibility") and must
//! commit or roll back as a unit, so the caller decides whether a function
//! runs on a plain pooled connection ([`Database::acquire`]) or inside a
//! transaction ([`Database::begin`]).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pizzeria_db::{repository, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/pizzeria.db")).await?;
//!
//! let mut conn = db.acquire().await?;
//! let pizzas = repository::pizza::fetch_all(&mut conn).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
