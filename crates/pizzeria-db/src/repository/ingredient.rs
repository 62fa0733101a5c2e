//! # Ingredient Repository
//!
//! Database operations for ingredient rows and their two 1:1 side tables,
//! `ingredient_cost` (unit cost) and `ingredient_amount` (stock).
//!
//! ## Optional-Row-As-Zero
//! Side-table lookups return `Option`: `None` means "never set", which
//! consuming code treats as 0. Writes go through upserts so "set cost",
//! "first refill" and "later refill" are all the same statement.

use std::collections::HashMap;

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use pizzeria_core::Ingredient;

/// Fetches all ingredients, ordered by id.
pub async fn fetch_all(conn: &mut SqliteConnection) -> DbResult<Vec<Ingredient>> {
    let ingredients = sqlx::query_as::<_, Ingredient>(
        r#"
        SELECT id, name
        FROM ingredient
        ORDER BY id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(ingredients)
}

/// Gets an ingredient by its ID.
pub async fn fetch_by_id(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Ingredient>> {
    let ingredient = sqlx::query_as::<_, Ingredient>(
        r#"
        SELECT id, name
        FROM ingredient
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(ingredient)
}

/// Inserts a new ingredient and returns its generated id.
pub async fn insert(conn: &mut SqliteConnection, name: &str) -> DbResult<i64> {
    debug!(name = %name, "Inserting ingredient");

    let result = sqlx::query("INSERT INTO ingredient (name) VALUES (?1)")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Deletes an ingredient row unconditionally.
///
/// The ops layer removes recipe lines and side-table rows first; with
/// foreign keys on, a wrong deletion order fails instead of orphaning.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> DbResult<()> {
    debug!(id, "Deleting ingredient");

    sqlx::query("DELETE FROM ingredient WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

// =============================================================================
// Unit cost side table
// =============================================================================

/// Gets the unit cost of an ingredient, if one was ever set.
pub async fn fetch_cost(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<f64>> {
    let cost = sqlx::query_scalar::<_, f64>(
        r#"
        SELECT cost
        FROM ingredient_cost
        WHERE ingredient_id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(cost)
}

/// Inserts or replaces the unit cost of an ingredient.
pub async fn upsert_cost(conn: &mut SqliteConnection, id: i64, cost: f64) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO ingredient_cost (ingredient_id, cost)
        VALUES (?1, ?2)
        ON CONFLICT (ingredient_id) DO UPDATE SET cost = excluded.cost
        "#,
    )
    .bind(id)
    .bind(cost)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Deletes the unit cost row for an ingredient, if present.
pub async fn delete_cost(conn: &mut SqliteConnection, id: i64) -> DbResult<()> {
    sqlx::query("DELETE FROM ingredient_cost WHERE ingredient_id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Unit costs of all priced ingredients, keyed by ingredient id.
///
/// One scan instead of a query per recipe line; ingredients without a
/// cost row are simply absent from the map.
pub async fn fetch_unit_costs(conn: &mut SqliteConnection) -> DbResult<HashMap<i64, f64>> {
    let rows = sqlx::query_as::<_, (i64, f64)>(
        r#"
        SELECT ingredient_id, cost
        FROM ingredient_cost
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().collect())
}

// =============================================================================
// Stock side table
// =============================================================================

/// Gets the stock amount of an ingredient, if a stock row exists.
pub async fn fetch_amount(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<i64>> {
    let amount = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT amount
        FROM ingredient_amount
        WHERE ingredient_id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(amount)
}

/// Inserts or replaces the stock amount of an ingredient.
pub async fn upsert_amount(conn: &mut SqliteConnection, id: i64, amount: i64) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO ingredient_amount (ingredient_id, amount)
        VALUES (?1, ?2)
        ON CONFLICT (ingredient_id) DO UPDATE SET amount = excluded.amount
        "#,
    )
    .bind(id)
    .bind(amount)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Deletes the stock row for an ingredient, if present.
pub async fn delete_amount(conn: &mut SqliteConnection, id: i64) -> DbResult<()> {
    sqlx::query("DELETE FROM ingredient_amount WHERE ingredient_id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Stock levels of all stocked ingredients, keyed by ingredient id.
///
/// The snapshot the visibility pass works from; unstocked ingredients are
/// absent and count as 0 there.
pub async fn fetch_stock_levels(conn: &mut SqliteConnection) -> DbResult<HashMap<i64, i64>> {
    let rows = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT ingredient_id, amount
        FROM ingredient_amount
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().collect())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let id = insert(&mut conn, "mozzarella").await.unwrap();
        let ing = fetch_by_id(&mut conn, id).await.unwrap().unwrap();
        assert_eq!(ing.name, "mozzarella");

        assert_eq!(fetch_all(&mut conn).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cost_and_amount_default_to_unset() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let id = insert(&mut conn, "basil").await.unwrap();

        assert_eq!(fetch_cost(&mut conn, id).await.unwrap(), None);
        assert_eq!(fetch_amount(&mut conn, id).await.unwrap(), None);

        upsert_cost(&mut conn, id, 0.2).await.unwrap();
        upsert_amount(&mut conn, id, 10).await.unwrap();

        assert_eq!(fetch_cost(&mut conn, id).await.unwrap(), Some(0.2));
        assert_eq!(fetch_amount(&mut conn, id).await.unwrap(), Some(10));

        // Upsert replaces
        upsert_amount(&mut conn, id, 7).await.unwrap();
        assert_eq!(fetch_amount(&mut conn, id).await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn test_bulk_snapshots() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let a = insert(&mut conn, "dough").await.unwrap();
        let b = insert(&mut conn, "cheese").await.unwrap();
        let c = insert(&mut conn, "tomato").await.unwrap();

        upsert_amount(&mut conn, a, 5).await.unwrap();
        upsert_amount(&mut conn, b, 0).await.unwrap();
        // c never stocked

        let stock = fetch_stock_levels(&mut conn).await.unwrap();
        assert_eq!(stock.get(&a), Some(&5));
        assert_eq!(stock.get(&b), Some(&0));
        assert_eq!(stock.get(&c), None);

        upsert_cost(&mut conn, a, 0.8).await.unwrap();
        let costs = fetch_unit_costs(&mut conn).await.unwrap();
        assert_eq!(costs.get(&a), Some(&0.8));
        assert_eq!(costs.len(), 1);
    }
}
