//! # Customer Operations
//!
//! The ordering-side facade: browse the menu, inspect a pizza, order one.
//!
//! ## Visibility Is the Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Customers only ever see visible pizzas:                        │
//! │                                                                 │
//! │  list_available_pizzas  →  visible AND priced                   │
//! │  get_pizza_details      →  hidden/missing pizza is refused      │
//! │  order_pizza            →  hidden/missing pizza is refused,     │
//! │                            stock is re-checked inside the       │
//! │                            transaction before any decrement     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An order is the one customer-side mutation. It decrements every
//! recipe line's stock and reruns the visibility pass, all under a
//! single transaction, so a failed order leaves the shelf exactly as it
//! found it.

use serde::Serialize;
use tracing::info;

use pizzeria_core::menu::first_shortage;
use pizzeria_core::{CoreError, Ingredient, Pizza};
use pizzeria_db::repository::{ingredient, pizza, recipe};
use pizzeria_db::{Database, DbError};

use crate::error::{storage, OpsResult};
use crate::pricing::price_for_pizza;
use crate::visibility::refresh_visibility;

// =============================================================================
// Result Types
// =============================================================================

/// One menu line: a visible, priced pizza.
#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub pizza: Pizza,
    pub price: f64,
}

/// The detail view of a single pizza: its recipe (ingredient plus the
/// amount the recipe calls for) and its price.
#[derive(Debug, Clone, Serialize)]
pub struct PizzaDetails {
    pub pizza: Pizza,
    pub ingredients: Vec<(Ingredient, i64)>,
    pub price: f64,
}

// =============================================================================
// CustomerOps
// =============================================================================

/// Customer operations facade.
#[derive(Debug, Clone)]
pub struct CustomerOps {
    db: Database,
}

impl CustomerOps {
    /// Creates the facade over an initialized database.
    pub fn new(db: Database) -> Self {
        CustomerOps { db }
    }

    /// Lists the menu: every visible pizza together with its price.
    ///
    /// A visible pizza without a cost factor cannot be priced and is
    /// skipped rather than shown with a bogus price.
    pub async fn list_available_pizzas(&self) -> OpsResult<Vec<MenuEntry>> {
        let op = "list menu";
        let mut conn = self.db.acquire().await.map_err(storage(op))?;

        let pizzas = pizza::fetch_visible(&mut conn).await.map_err(storage(op))?;

        let mut menu = Vec::with_capacity(pizzas.len());
        for p in pizzas {
            let Some(price) = price_for_pizza(&mut conn, p.id).await.map_err(storage(op))? else {
                continue; // unpriced, keep it off the menu
            };
            menu.push(MenuEntry { pizza: p, price });
        }

        Ok(menu)
    }

    /// Returns the detail view of one visible pizza: recipe and price.
    ///
    /// ## Errors
    /// * [`CoreError::PizzaNotAvailable`] - the pizza does not exist or
    ///   is hidden. The two cases are deliberately indistinguishable:
    ///   customers are not told about pizzas that are off the menu.
    /// * [`CoreError::PriceUnavailable`] - no cost factor row.
    pub async fn get_pizza_details(&self, pizza_id: i64) -> OpsResult<PizzaDetails> {
        let op = "pizza details";
        let mut conn = self.db.acquire().await.map_err(storage(op))?;

        let p = pizza::fetch_by_id(&mut conn, pizza_id)
            .await
            .map_err(storage(op))?
            .filter(|p| p.visible)
            .ok_or(CoreError::PizzaNotAvailable(pizza_id))?;

        let lines = recipe::fetch_for_pizza(&mut conn, pizza_id)
            .await
            .map_err(storage(op))?;

        let mut ingredients = Vec::with_capacity(lines.len());
        for line in &lines {
            // Recipe lines are FK-guaranteed to reference a live ingredient
            if let Some(ing) = ingredient::fetch_by_id(&mut conn, line.ingredient_id)
                .await
                .map_err(storage(op))?
            {
                ingredients.push((ing, line.amount));
            }
        }

        let price = price_for_pizza(&mut conn, pizza_id)
            .await
            .map_err(storage(op))?
            .ok_or(CoreError::PriceUnavailable(pizza_id))?;

        Ok(PizzaDetails {
            pizza: p,
            ingredients,
            price,
        })
    }

    /// Orders one pizza: checks every recipe line against stock, then
    /// decrements them all and reruns the visibility pass.
    ///
    /// All of it runs under one transaction. The stock check happens
    /// *inside* the transaction, against current rows, so an order either
    /// consumes every line it needs or consumes nothing.
    ///
    /// ## Errors
    /// * [`CoreError::PizzaNotAvailable`] - missing or hidden pizza
    /// * [`CoreError::InsufficientStock`] - a recipe line exceeds stock;
    ///   reports the first short ingredient
    pub async fn order_pizza(&self, pizza_id: i64) -> OpsResult<()> {
        let op = "order pizza";
        let mut tx = self.db.begin().await.map_err(storage(op))?;

        pizza::fetch_by_id(&mut tx, pizza_id)
            .await
            .map_err(storage(op))?
            .filter(|p| p.visible)
            .ok_or(CoreError::PizzaNotAvailable(pizza_id))?;

        let lines = recipe::fetch_for_pizza(&mut tx, pizza_id)
            .await
            .map_err(storage(op))?;
        let stock = ingredient::fetch_stock_levels(&mut tx)
            .await
            .map_err(storage(op))?;

        // Check every line before touching any row
        if let Some(short) = first_shortage(&lines, &stock) {
            return Err(CoreError::InsufficientStock {
                ingredient_id: short.ingredient_id,
                available: short.available,
                required: short.required,
            }
            .into());
        }

        for line in &lines {
            let current = stock.get(&line.ingredient_id).copied().unwrap_or(0);
            ingredient::upsert_amount(&mut tx, line.ingredient_id, current - line.amount)
                .await
                .map_err(storage(op))?;
        }

        let changed = refresh_visibility(&mut tx).await.map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(pizza_id, lines = lines.len(), changed, "Pizza ordered");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
