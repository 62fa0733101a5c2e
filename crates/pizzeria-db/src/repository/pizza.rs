//! # Pizza Repository
//!
//! Database operations for pizza rows and the `pizza_cost` side table.
//!
//! The `visible` flag is stored here but *derived* elsewhere: the ops
//! layer recomputes it from stock and recipes after designated mutations.
//! This module only reads and writes what it is told.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use pizzeria_core::Pizza;

/// Fetches all pizzas, visible or not, ordered by id.
pub async fn fetch_all(conn: &mut SqliteConnection) -> DbResult<Vec<Pizza>> {
    let pizzas = sqlx::query_as::<_, Pizza>(
        r#"
        SELECT id, name, visible
        FROM pizza
        ORDER BY id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(pizzas)
}

/// Fetches only pizzas currently visible on the menu, ordered by id.
pub async fn fetch_visible(conn: &mut SqliteConnection) -> DbResult<Vec<Pizza>> {
    let pizzas = sqlx::query_as::<_, Pizza>(
        r#"
        SELECT id, name, visible
        FROM pizza
        WHERE visible = 1
        ORDER BY id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(pizzas)
}

/// Gets a pizza by its ID.
///
/// ## Returns
/// * `Ok(Some(Pizza))` - pizza found
/// * `Ok(None)` - no such id
pub async fn fetch_by_id(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Pizza>> {
    let pizza = sqlx::query_as::<_, Pizza>(
        r#"
        SELECT id, name, visible
        FROM pizza
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(pizza)
}

/// Inserts a new pizza and returns its generated id.
pub async fn insert(conn: &mut SqliteConnection, name: &str, visible: bool) -> DbResult<i64> {
    debug!(name = %name, visible, "Inserting pizza");

    let result = sqlx::query(
        r#"
        INSERT INTO pizza (name, visible)
        VALUES (?1, ?2)
        "#,
    )
    .bind(name)
    .bind(visible)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Sets the visibility flag of a pizza.
///
/// Errors with `NotFound` when the id matches no row, so callers notice
/// a stale id instead of silently updating nothing.
pub async fn set_visibility(conn: &mut SqliteConnection, id: i64, visible: bool) -> DbResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE pizza
        SET visible = ?2
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(visible)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("pizza", id));
    }

    Ok(())
}

/// Deletes a pizza row unconditionally.
///
/// Referential integrity is the ops layer's job: it removes the recipe
/// and cost rows first. Deleting a nonexistent id is a no-op.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> DbResult<()> {
    debug!(id, "Deleting pizza");

    sqlx::query("DELETE FROM pizza WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

// =============================================================================
// Cost factor side table
// =============================================================================

/// Gets the cost factor for a pizza, if one was ever set.
///
/// `None` means the pizza is unpriced; consuming code must NOT collapse
/// this to a default.
pub async fn fetch_cost_factor(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<f64>> {
    let factor = sqlx::query_scalar::<_, f64>(
        r#"
        SELECT cost_factor
        FROM pizza_cost
        WHERE pizza_id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(factor)
}

/// Inserts or replaces the cost factor for a pizza.
pub async fn upsert_cost_factor(
    conn: &mut SqliteConnection,
    id: i64,
    cost_factor: f64,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO pizza_cost (pizza_id, cost_factor)
        VALUES (?1, ?2)
        ON CONFLICT (pizza_id) DO UPDATE SET cost_factor = excluded.cost_factor
        "#,
    )
    .bind(id)
    .bind(cost_factor)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Deletes the cost factor row for a pizza, if present.
pub async fn delete_cost(conn: &mut SqliteConnection, id: i64) -> DbResult<()> {
    sqlx::query("DELETE FROM pizza_cost WHERE pizza_id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
