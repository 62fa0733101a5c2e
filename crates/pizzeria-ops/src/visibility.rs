//! # Visibility Recomputation Pass
//!
//! The derived-cache half of the visibility rule: recompute every pizza's
//! `visible` flag from current stock and recipes.
//!
//! ## When It Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Invoked after:                NOT invoked after:               │
//! │  • stock refill (single/bulk)  • pizza creation                 │
//! │  • recipe creation             • manual visibility toggle       │
//! │  • recipe replacement          • ingredient cost change         │
//! │  • order stock decrement       • recipe deletion (forces        │
//! │                                  hidden instead)                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pass is called explicitly by the orchestrating facade methods,
//! never as a storage-level hook - control flow stays visible and
//! testable. It runs on the caller's connection, inside the same
//! transaction as the mutation that triggered it.

use std::collections::HashMap;

use sqlx::SqliteConnection;
use tracing::debug;

use pizzeria_core::menu::is_recipe_satisfied;
use pizzeria_core::RecipeLine;
use pizzeria_db::repository::{ingredient, pizza, recipe};
use pizzeria_db::DbResult;

/// Recomputes the visibility flag of every pizza that has a recipe.
///
/// `visible(pizza) = every recipe line is covered by current stock`,
/// with a missing stock row counting as 0.
///
/// Pizzas *without* any recipe line are left untouched: their flag is not
/// derived from anything. This keeps the creation default (visible) and
/// the forced-hidden state after recipe deletion stable across later
/// stock mutations. Manual toggles on pizzas WITH a recipe, by contrast,
/// survive only until the next pass.
///
/// ## Returns
/// How many pizzas changed state.
pub async fn refresh_visibility(conn: &mut SqliteConnection) -> DbResult<usize> {
    let pizzas = pizza::fetch_all(conn).await?;
    let lines = recipe::fetch_all_lines(conn).await?;
    let stock = ingredient::fetch_stock_levels(conn).await?;

    // Group the full line scan by pizza
    let mut recipes: HashMap<i64, Vec<RecipeLine>> = HashMap::new();
    for line in lines {
        recipes.entry(line.pizza_id).or_default().push(line);
    }

    let mut changed = 0;
    for p in pizzas {
        let Some(lines) = recipes.get(&p.id) else {
            continue; // no recipe, nothing to derive
        };

        let should_be_visible = is_recipe_satisfied(lines, &stock);
        if p.visible != should_be_visible {
            pizza::set_visibility(conn, p.id, should_be_visible).await?;
            debug!(
                pizza_id = p.id,
                visible = should_be_visible,
                "Visibility recomputed"
            );
            changed += 1;
        }
    }

    Ok(changed)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_hides_pizza_short_on_stock_and_reveals_after_refill() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let p = pizza::insert(&mut conn, "Margherita", true).await.unwrap();
        let ing1 = ingredient::insert(&mut conn, "dough").await.unwrap();
        let ing2 = ingredient::insert(&mut conn, "cheese").await.unwrap();

        recipe::upsert_line(&mut conn, p, ing1, 2).await.unwrap();
        recipe::upsert_line(&mut conn, p, ing2, 1).await.unwrap();
        ingredient::upsert_amount(&mut conn, ing1, 2).await.unwrap();
        ingredient::upsert_amount(&mut conn, ing2, 0).await.unwrap();

        let changed = refresh_visibility(&mut conn).await.unwrap();
        assert_eq!(changed, 1);
        assert!(!pizza::fetch_by_id(&mut conn, p).await.unwrap().unwrap().visible);

        // Refill the short ingredient: pizza comes back
        ingredient::upsert_amount(&mut conn, ing2, 1).await.unwrap();
        let changed = refresh_visibility(&mut conn).await.unwrap();
        assert_eq!(changed, 1);
        assert!(pizza::fetch_by_id(&mut conn, p).await.unwrap().unwrap().visible);
    }

    #[tokio::test]
    async fn test_missing_stock_row_counts_as_zero() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let p = pizza::insert(&mut conn, "Funghi", true).await.unwrap();
        let ing = ingredient::insert(&mut conn, "mushrooms").await.unwrap();
        recipe::upsert_line(&mut conn, p, ing, 1).await.unwrap();

        refresh_visibility(&mut conn).await.unwrap();
        assert!(!pizza::fetch_by_id(&mut conn, p).await.unwrap().unwrap().visible);
    }

    #[tokio::test]
    async fn test_recipeless_pizzas_are_untouched() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let shown = pizza::insert(&mut conn, "Nuova", true).await.unwrap();
        let hidden = pizza::insert(&mut conn, "Ritirata", false).await.unwrap();

        let changed = refresh_visibility(&mut conn).await.unwrap();
        assert_eq!(changed, 0);
        assert!(pizza::fetch_by_id(&mut conn, shown).await.unwrap().unwrap().visible);
        assert!(!pizza::fetch_by_id(&mut conn, hidden).await.unwrap().unwrap().visible);
    }

    #[tokio::test]
    async fn test_stable_when_nothing_changes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let p = pizza::insert(&mut conn, "Margherita", true).await.unwrap();
        let ing = ingredient::insert(&mut conn, "dough").await.unwrap();
        recipe::upsert_line(&mut conn, p, ing, 1).await.unwrap();
        ingredient::upsert_amount(&mut conn, ing, 5).await.unwrap();

        assert_eq!(refresh_visibility(&mut conn).await.unwrap(), 0);
        assert_eq!(refresh_visibility(&mut conn).await.unwrap(), 0);
    }
}
