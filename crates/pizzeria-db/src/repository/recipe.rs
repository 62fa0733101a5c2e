//! # Recipe Repository
//!
//! Database operations for recipe lines: the (pizza, ingredient) →
//! required-amount join table.
//!
//! A pizza's recipe is always handled as a whole set of lines; the ops
//! layer implements "update recipe" as delete-then-insert under one
//! transaction, never as a partial patch.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use pizzeria_core::RecipeLine;

/// Fetches all recipe lines for one pizza.
///
/// Ordered by ingredient id for stable output; the recipe itself is a
/// set and callers must not attach meaning to the order.
pub async fn fetch_for_pizza(conn: &mut SqliteConnection, pizza_id: i64) -> DbResult<Vec<RecipeLine>> {
    let lines = sqlx::query_as::<_, RecipeLine>(
        r#"
        SELECT pizza_id, ingredient_id, amount
        FROM recipe
        WHERE pizza_id = ?1
        ORDER BY ingredient_id
        "#,
    )
    .bind(pizza_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(lines)
}

/// Fetches every recipe line in the database.
///
/// The visibility pass wants recipes for all pizzas at once; one scan
/// beats a query per pizza.
pub async fn fetch_all_lines(conn: &mut SqliteConnection) -> DbResult<Vec<RecipeLine>> {
    let lines = sqlx::query_as::<_, RecipeLine>(
        r#"
        SELECT pizza_id, ingredient_id, amount
        FROM recipe
        ORDER BY pizza_id, ingredient_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(lines)
}

/// Inserts or replaces one recipe line (composite key: pizza, ingredient).
pub async fn upsert_line(
    conn: &mut SqliteConnection,
    pizza_id: i64,
    ingredient_id: i64,
    amount: i64,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO recipe (pizza_id, ingredient_id, amount)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (pizza_id, ingredient_id) DO UPDATE SET amount = excluded.amount
        "#,
    )
    .bind(pizza_id)
    .bind(ingredient_id)
    .bind(amount)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Removes all recipe lines for a pizza. No-op when there are none.
pub async fn delete_for_pizza(conn: &mut SqliteConnection, pizza_id: i64) -> DbResult<()> {
    debug!(pizza_id, "Deleting recipe");

    sqlx::query("DELETE FROM recipe WHERE pizza_id = ?1")
        .bind(pizza_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Ids of all pizzas whose recipe uses the given ingredient.
///
/// Drives the delete-in-use refusal and the cascade path of ingredient
/// deletion.
pub async fn pizzas_using_ingredient(
    conn: &mut SqliteConnection,
    ingredient_id: i64,
) -> DbResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT DISTINCT pizza_id
        FROM recipe
        WHERE ingredient_id = ?1
        ORDER BY pizza_id
        "#,
    )
    .bind(ingredient_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(ids)
}

// =============================================================================
// Unit Tests
// =============================================================================
