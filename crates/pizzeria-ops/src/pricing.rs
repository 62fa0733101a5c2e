//! # Price Lookup
//!
//! Loads the pricing inputs for one pizza and delegates to the pure
//! formula in `pizzeria-core::menu`.
//!
//! Both customer operations (listing and details) price through this one
//! function, so the menu and the detail view can never disagree.

use sqlx::SqliteConnection;

use pizzeria_core::menu::pizza_price;
use pizzeria_db::repository::{ingredient, pizza, recipe};
use pizzeria_db::DbResult;

/// Computes the price of a pizza from its cost factor, recipe, and
/// ingredient unit costs.
///
/// ## Returns
/// * `Ok(Some(price))` - the pizza has a cost factor
/// * `Ok(None)` - no cost factor row; the pizza is unpriced. Listings
///   skip it, the detail view turns this into an error.
///
/// A recipe ingredient without a cost row contributes 0 to the sum.
pub async fn price_for_pizza(conn: &mut SqliteConnection, pizza_id: i64) -> DbResult<Option<f64>> {
    let Some(cost_factor) = pizza::fetch_cost_factor(conn, pizza_id).await? else {
        return Ok(None);
    };

    let lines = recipe::fetch_for_pizza(conn, pizza_id).await?;
    let unit_costs = ingredient::fetch_unit_costs(conn).await?;

    Ok(Some(pizza_price(cost_factor, &lines, &unit_costs)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_price_matches_formula() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let p = pizza::insert(&mut conn, "Margherita", true).await.unwrap();
        pizza::upsert_cost_factor(&mut conn, p, 1.0).await.unwrap();

        let dough = ingredient::insert(&mut conn, "dough").await.unwrap();
        let cheese = ingredient::insert(&mut conn, "cheese").await.unwrap();
        let tomato = ingredient::insert(&mut conn, "tomato").await.unwrap();
        ingredient::upsert_cost(&mut conn, dough, 0.8).await.unwrap();
        ingredient::upsert_cost(&mut conn, cheese, 0.5).await.unwrap();
        ingredient::upsert_cost(&mut conn, tomato, 0.3).await.unwrap();

        recipe::upsert_line(&mut conn, p, dough, 1).await.unwrap();
        recipe::upsert_line(&mut conn, p, cheese, 2).await.unwrap();
        recipe::upsert_line(&mut conn, p, tomato, 1).await.unwrap();

        // 0.8*1 + 0.5*2 + 0.3*1 = 2.1
        let price = price_for_pizza(&mut conn, p).await.unwrap().unwrap();
        assert!((price - 2.1).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unpriced_pizza_returns_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let p = pizza::insert(&mut conn, "Sperimentale", true).await.unwrap();
        assert_eq!(price_for_pizza(&mut conn, p).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_uncosted_ingredient_contributes_zero() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let p = pizza::insert(&mut conn, "Bianca", true).await.unwrap();
        pizza::upsert_cost_factor(&mut conn, p, 2.0).await.unwrap();

        let dough = ingredient::insert(&mut conn, "dough").await.unwrap();
        let secret = ingredient::insert(&mut conn, "secret sauce").await.unwrap();
        ingredient::upsert_cost(&mut conn, dough, 1.0).await.unwrap();
        // secret sauce never priced

        recipe::upsert_line(&mut conn, p, dough, 1).await.unwrap();
        recipe::upsert_line(&mut conn, p, secret, 3).await.unwrap();

        let price = price_for_pizza(&mut conn, p).await.unwrap().unwrap();
        assert!((price - 2.0).abs() < 1e-9);
    }
}
