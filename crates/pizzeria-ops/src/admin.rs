//! # Administrator Operations
//!
//! The management facade: ingredients, pizzas, recipes, stock.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Every mutating operation:                                      │
//! │                                                                 │
//! │  1. validate input          ← pizzeria-core::validation,        │
//! │                               existence checks; NO writes yet   │
//! │  2. begin transaction                                           │
//! │  3. mutate rows             ← pizzeria-db::repository           │
//! │  4. refresh visibility      ← only where the rule designates    │
//! │  5. commit                                                      │
//! │                                                                 │
//! │  A failure at any step before commit rolls everything back.     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The delete-in-use refusal is the one *expected* negative outcome and
//! is returned as a value ([`DeleteOutcome::InUse`]), not an error - the
//! presentation layer is expected to ask "delete N dependent pizzas too?"
//! and retry with `cascade = true`.

use serde::Serialize;
use tracing::info;

use pizzeria_core::validation::{validate_amount, validate_cost, validate_name};
use pizzeria_core::{CoreError, Ingredient, Pizza, RecipeEntry, DEFAULT_COST_FACTOR};
use pizzeria_db::repository::{ingredient, pizza, recipe};
use pizzeria_db::{Database, DbError};

use crate::error::{storage, OpsResult};
use crate::visibility::refresh_visibility;

// =============================================================================
// Result Types
// =============================================================================

/// Outcome of [`AdminOps::delete_ingredient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DeleteOutcome {
    /// The ingredient (and, under cascade, its dependent pizzas) is gone.
    Deleted,
    /// Refused: these pizzas' recipes use the ingredient and the caller
    /// did not opt into cascading. Nothing was changed.
    InUse(Vec<i64>),
}

/// One row of the admin ingredient listing: the ingredient plus its
/// optional cost and stock. `None` means the side row was never set.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientOverview {
    pub ingredient: Ingredient,
    pub cost: Option<f64>,
    pub amount: Option<i64>,
}

/// One row of the admin pizza listing.
#[derive(Debug, Clone, Serialize)]
pub struct PizzaOverview {
    pub pizza: Pizza,
    pub cost_factor: Option<f64>,
}

// =============================================================================
// AdminOps
// =============================================================================

/// Administrator operations facade.
///
/// Cheap to clone; owns a handle to the shared connection pool.
#[derive(Debug, Clone)]
pub struct AdminOps {
    db: Database,
}

impl AdminOps {
    /// Creates the facade over an initialized database.
    pub fn new(db: Database) -> Self {
        AdminOps { db }
    }

    // -------------------------------------------------------------------------
    // Ingredients
    // -------------------------------------------------------------------------

    /// Lists every ingredient with its cost and stock, for inventory review.
    pub async fn list_ingredients(&self) -> OpsResult<Vec<IngredientOverview>> {
        let op = "list ingredients";
        let mut conn = self.db.acquire().await.map_err(storage(op))?;

        let ingredients = ingredient::fetch_all(&mut conn).await.map_err(storage(op))?;

        let mut overview = Vec::with_capacity(ingredients.len());
        for ing in ingredients {
            let cost = ingredient::fetch_cost(&mut conn, ing.id)
                .await
                .map_err(storage(op))?;
            let amount = ingredient::fetch_amount(&mut conn, ing.id)
                .await
                .map_err(storage(op))?;
            overview.push(IngredientOverview {
                ingredient: ing,
                cost,
                amount,
            });
        }

        Ok(overview)
    }

    /// Adds a new ingredient with its unit cost and initial stock.
    ///
    /// Creates the ingredient row, then the cost row, then the amount row
    /// as one unit of work.
    ///
    /// ## Returns
    /// The id of the created ingredient.
    pub async fn add_ingredient(&self, name: &str, cost: f64, amount: i64) -> OpsResult<i64> {
        let op = "add ingredient";
        let name = validate_name(name, "ingredient name")?;
        validate_cost(cost, "cost")?;
        validate_amount(amount, "amount")?;

        let mut tx = self.db.begin().await.map_err(storage(op))?;
        let id = ingredient::insert(&mut tx, &name).await.map_err(storage(op))?;
        ingredient::upsert_cost(&mut tx, id, cost)
            .await
            .map_err(storage(op))?;
        ingredient::upsert_amount(&mut tx, id, amount)
            .await
            .map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(id, name = %name, cost, amount, "Ingredient added");
        Ok(id)
    }

    /// Deletes an ingredient.
    ///
    /// If any recipe uses it and `cascade` is false, nothing is deleted
    /// and [`DeleteOutcome::InUse`] reports the dependent pizza ids. With
    /// `cascade = true` every dependent pizza (recipe, cost row, pizza
    /// row) is deleted first, then the ingredient and its side rows.
    pub async fn delete_ingredient(&self, id: i64, cascade: bool) -> OpsResult<DeleteOutcome> {
        let op = "delete ingredient";
        let mut conn = self.db.acquire().await.map_err(storage(op))?;

        ingredient::fetch_by_id(&mut conn, id)
            .await
            .map_err(storage(op))?
            .ok_or(CoreError::IngredientNotFound(id))?;

        let dependents = recipe::pizzas_using_ingredient(&mut conn, id)
            .await
            .map_err(storage(op))?;
        drop(conn);

        if !dependents.is_empty() && !cascade {
            info!(id, dependents = dependents.len(), "Ingredient in use, not deleted");
            return Ok(DeleteOutcome::InUse(dependents));
        }

        let mut tx = self.db.begin().await.map_err(storage(op))?;
        for &pizza_id in &dependents {
            recipe::delete_for_pizza(&mut tx, pizza_id)
                .await
                .map_err(storage(op))?;
            pizza::delete_cost(&mut tx, pizza_id)
                .await
                .map_err(storage(op))?;
            pizza::delete(&mut tx, pizza_id).await.map_err(storage(op))?;
        }
        ingredient::delete_cost(&mut tx, id).await.map_err(storage(op))?;
        ingredient::delete_amount(&mut tx, id)
            .await
            .map_err(storage(op))?;
        ingredient::delete(&mut tx, id).await.map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(id, cascaded = dependents.len(), "Ingredient deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Updates the unit cost of an ingredient.
    ///
    /// Cost changes do not affect availability, so no visibility pass.
    pub async fn update_ingredient_cost(&self, id: i64, cost: f64) -> OpsResult<()> {
        let op = "update ingredient cost";
        validate_cost(cost, "cost")?;

        let mut conn = self.db.acquire().await.map_err(storage(op))?;
        ingredient::fetch_by_id(&mut conn, id)
            .await
            .map_err(storage(op))?
            .ok_or(CoreError::IngredientNotFound(id))?;
        ingredient::upsert_cost(&mut conn, id, cost)
            .await
            .map_err(storage(op))?;

        info!(id, cost, "Ingredient cost updated");
        Ok(())
    }

    /// Adds `delta` units to an ingredient's stock (missing stock row
    /// counts as 0), then recomputes visibility for all pizzas.
    pub async fn add_ingredient_stock(&self, id: i64, delta: i64) -> OpsResult<()> {
        let op = "add ingredient stock";
        validate_amount(delta, "amount")?;

        let mut tx = self.db.begin().await.map_err(storage(op))?;
        ingredient::fetch_by_id(&mut tx, id)
            .await
            .map_err(storage(op))?
            .ok_or(CoreError::IngredientNotFound(id))?;

        let current = ingredient::fetch_amount(&mut tx, id)
            .await
            .map_err(storage(op))?
            .unwrap_or(0);
        ingredient::upsert_amount(&mut tx, id, current + delta)
            .await
            .map_err(storage(op))?;

        let changed = refresh_visibility(&mut tx).await.map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(id, delta, new_amount = current + delta, changed, "Stock added");
        Ok(())
    }

    /// Adds `delta` units to *every* ingredient's stock, then runs one
    /// visibility pass.
    pub async fn refill_all_ingredients(&self, delta: i64) -> OpsResult<()> {
        let op = "refill all ingredients";
        validate_amount(delta, "amount")?;

        let mut tx = self.db.begin().await.map_err(storage(op))?;
        let ingredients = ingredient::fetch_all(&mut tx).await.map_err(storage(op))?;

        for ing in &ingredients {
            let current = ingredient::fetch_amount(&mut tx, ing.id)
                .await
                .map_err(storage(op))?
                .unwrap_or(0);
            ingredient::upsert_amount(&mut tx, ing.id, current + delta)
                .await
                .map_err(storage(op))?;
        }

        let changed = refresh_visibility(&mut tx).await.map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(
            delta,
            ingredients = ingredients.len(),
            changed,
            "All ingredients refilled"
        );
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Pizzas
    // -------------------------------------------------------------------------

    /// Lists every pizza (visible or not) with its cost factor.
    pub async fn list_pizzas(&self) -> OpsResult<Vec<PizzaOverview>> {
        let op = "list pizzas";
        let mut conn = self.db.acquire().await.map_err(storage(op))?;

        let pizzas = pizza::fetch_all(&mut conn).await.map_err(storage(op))?;

        let mut overview = Vec::with_capacity(pizzas.len());
        for p in pizzas {
            let cost_factor = pizza::fetch_cost_factor(&mut conn, p.id)
                .await
                .map_err(storage(op))?;
            overview.push(PizzaOverview {
                pizza: p,
                cost_factor,
            });
        }

        Ok(overview)
    }

    /// Adds a new pizza: visible by default, no recipe yet.
    ///
    /// `cost_factor` defaults to [`DEFAULT_COST_FACTOR`] when `None`.
    /// Pizza creation does not trigger the visibility pass; a recipeless
    /// pizza stays visible until it gets a recipe or a manual toggle.
    ///
    /// ## Returns
    /// The id of the created pizza.
    pub async fn add_pizza(&self, name: &str, cost_factor: Option<f64>) -> OpsResult<i64> {
        let op = "add pizza";
        let name = validate_name(name, "pizza name")?;
        let cost_factor = cost_factor.unwrap_or(DEFAULT_COST_FACTOR);
        validate_cost(cost_factor, "cost factor")?;

        let mut tx = self.db.begin().await.map_err(storage(op))?;
        let id = pizza::insert(&mut tx, &name, true).await.map_err(storage(op))?;
        pizza::upsert_cost_factor(&mut tx, id, cost_factor)
            .await
            .map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(id, name = %name, cost_factor, "Pizza added");
        Ok(id)
    }

    /// Flips a pizza's visibility flag unconditionally.
    ///
    /// This is the manual override: no stock check. Note that the next
    /// derived visibility pass (stock or recipe mutation) may override it
    /// again for pizzas that have a recipe.
    ///
    /// ## Returns
    /// The new visibility state.
    pub async fn toggle_pizza_visibility(&self, id: i64) -> OpsResult<bool> {
        let op = "toggle pizza visibility";
        let mut conn = self.db.acquire().await.map_err(storage(op))?;

        let p = pizza::fetch_by_id(&mut conn, id)
            .await
            .map_err(storage(op))?
            .ok_or(CoreError::PizzaNotFound(id))?;

        let new_state = !p.visible;
        pizza::set_visibility(&mut conn, id, new_state)
            .await
            .map_err(storage(op))?;

        info!(id, visible = new_state, "Pizza visibility toggled");
        Ok(new_state)
    }

    /// Deletes a pizza together with its recipe and cost row.
    ///
    /// Recipe lines go first, then the cost row, then the pizza itself;
    /// nothing belonging to the pizza outlives it.
    pub async fn delete_pizza(&self, id: i64) -> OpsResult<()> {
        let op = "delete pizza";
        let mut conn = self.db.acquire().await.map_err(storage(op))?;
        pizza::fetch_by_id(&mut conn, id)
            .await
            .map_err(storage(op))?
            .ok_or(CoreError::PizzaNotFound(id))?;
        drop(conn);

        let mut tx = self.db.begin().await.map_err(storage(op))?;
        recipe::delete_for_pizza(&mut tx, id).await.map_err(storage(op))?;
        pizza::delete_cost(&mut tx, id).await.map_err(storage(op))?;
        pizza::delete(&mut tx, id).await.map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(id, "Pizza deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Recipes
    // -------------------------------------------------------------------------

    /// Adds recipe lines for a pizza, then recomputes visibility.
    ///
    /// Every line is validated (amount ≥ 0, ingredient exists) before any
    /// write. Lines merge into an existing recipe by composite key; use
    /// [`update_recipe`] to replace the whole set.
    ///
    /// [`update_recipe`]: AdminOps::update_recipe
    pub async fn add_recipe(&self, pizza_id: i64, lines: &[RecipeEntry]) -> OpsResult<()> {
        let op = "add recipe";
        self.validate_recipe_input(op, pizza_id, lines).await?;

        let mut tx = self.db.begin().await.map_err(storage(op))?;
        for &(ingredient_id, amount) in lines {
            recipe::upsert_line(&mut tx, pizza_id, ingredient_id, amount)
                .await
                .map_err(storage(op))?;
        }
        let changed = refresh_visibility(&mut tx).await.map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(pizza_id, lines = lines.len(), changed, "Recipe added");
        Ok(())
    }

    /// Replaces a pizza's recipe with a new line set, then recomputes
    /// visibility.
    ///
    /// Full replace, not merge: the old set is deleted before the new
    /// lines are written, all under one transaction.
    pub async fn update_recipe(&self, pizza_id: i64, lines: &[RecipeEntry]) -> OpsResult<()> {
        let op = "update recipe";
        self.validate_recipe_input(op, pizza_id, lines).await?;

        let mut tx = self.db.begin().await.map_err(storage(op))?;
        recipe::delete_for_pizza(&mut tx, pizza_id)
            .await
            .map_err(storage(op))?;
        for &(ingredient_id, amount) in lines {
            recipe::upsert_line(&mut tx, pizza_id, ingredient_id, amount)
                .await
                .map_err(storage(op))?;
        }
        let changed = refresh_visibility(&mut tx).await.map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(pizza_id, lines = lines.len(), changed, "Recipe replaced");
        Ok(())
    }

    /// Deletes a pizza's recipe and forces the pizza hidden.
    ///
    /// The forced hide is an explicit override, not a derivation: without
    /// a recipe the pizza cannot be made, and the derived rule would call
    /// an empty recipe vacuously satisfiable. The pizza stays hidden
    /// until it gets a new recipe or a manual toggle.
    pub async fn delete_recipe(&self, pizza_id: i64) -> OpsResult<()> {
        let op = "delete recipe";
        let mut conn = self.db.acquire().await.map_err(storage(op))?;
        pizza::fetch_by_id(&mut conn, pizza_id)
            .await
            .map_err(storage(op))?
            .ok_or(CoreError::PizzaNotFound(pizza_id))?;
        drop(conn);

        let mut tx = self.db.begin().await.map_err(storage(op))?;
        recipe::delete_for_pizza(&mut tx, pizza_id)
            .await
            .map_err(storage(op))?;
        pizza::set_visibility(&mut tx, pizza_id, false)
            .await
            .map_err(storage(op))?;
        tx.commit().await.map_err(DbError::from).map_err(storage(op))?;

        info!(pizza_id, "Recipe deleted, pizza hidden");
        Ok(())
    }

    /// Validates recipe input before any write: the pizza exists, every
    /// amount is non-negative, every ingredient exists.
    async fn validate_recipe_input(
        &self,
        op: &'static str,
        pizza_id: i64,
        lines: &[RecipeEntry],
    ) -> OpsResult<()> {
        let mut conn = self.db.acquire().await.map_err(storage(op))?;

        pizza::fetch_by_id(&mut conn, pizza_id)
            .await
            .map_err(storage(op))?
            .ok_or(CoreError::PizzaNotFound(pizza_id))?;

        for &(ingredient_id, amount) in lines {
            validate_amount(amount, "recipe amount")?;
            ingredient::fetch_by_id(&mut conn, ingredient_id)
                .await
                .map_err(storage(op))?
                .ok_or(CoreError::IngredientNotFound(ingredient_id))?;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpsError;
    use pizzeria_db::DbConfig;

    async fn admin() -> AdminOps {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AdminOps::new(db)
    }

    #[tokio::test]
    async fn test_add_ingredient_sets_cost_and_stock() {
        let ops = admin().await;

        let id = ops.add_ingredient("dough", 0.8, 5).await.unwrap();

        let listing = ops.list_ingredients().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].ingredient.id, id);
        assert_eq!(listing[0].cost, Some(0.8));
        assert_eq!(listing[0].amount, Some(5));
    }

    #[tokio::test]
    async fn test_negative_input_rejected_without_mutation() {
        let ops = admin().await;

        assert!(ops.add_ingredient("dough", -1.0, 0).await.is_err());
        assert!(ops.add_ingredient("dough", 1.0, -5).await.is_err());
        assert!(ops.add_pizza("Margherita", Some(-0.5)).await.is_err());
        assert!(ops.refill_all_ingredients(-1).await.is_err());

        assert!(ops.list_ingredients().await.unwrap().is_empty());
        assert!(ops.list_pizzas().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_are_validation_errors() {
        let ops = admin().await;

        let err = ops.update_ingredient_cost(99, 1.0).await.unwrap_err();
        assert!(matches!(
            err,
            OpsError::Core(CoreError::IngredientNotFound(99))
        ));

        let err = ops.toggle_pizza_visibility(7).await.unwrap_err();
        assert!(matches!(err, OpsError::Core(CoreError::PizzaNotFound(7))));

        let err = ops.delete_ingredient(3, false).await.unwrap_err();
        assert!(matches!(
            err,
            OpsError::Core(CoreError::IngredientNotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_recipe_roundtrip_is_order_independent() {
        let ops = admin().await;
        let db = ops.db.clone();

        let p = ops.add_pizza("Margherita", None).await.unwrap();
        let dough = ops.add_ingredient("dough", 0.8, 5).await.unwrap();
        let cheese = ops.add_ingredient("cheese", 0.5, 5).await.unwrap();

        ops.add_recipe(p, &[(cheese, 2), (dough, 1)]).await.unwrap();

        let mut conn = db.acquire().await.unwrap();
        let mut stored: Vec<(i64, i64)> = recipe::fetch_for_pizza(&mut conn, p)
            .await
            .unwrap()
            .into_iter()
            .map(|l| (l.ingredient_id, l.amount))
            .collect();
        stored.sort_unstable();

        let mut expected = vec![(cheese, 2), (dough, 1)];
        expected.sort_unstable();
        assert_eq!(stored, expected);
    }

    #[tokio::test]
    async fn test_update_recipe_is_idempotent_and_replaces() {
        let ops = admin().await;
        let db = ops.db.clone();

        let p = ops.add_pizza("Diavola", None).await.unwrap();
        let dough = ops.add_ingredient("dough", 0.8, 5).await.unwrap();
        let salami = ops.add_ingredient("salami", 1.1, 5).await.unwrap();

        ops.add_recipe(p, &[(dough, 1), (salami, 2)]).await.unwrap();

        // Replace with a smaller set: the salami line must be gone
        ops.update_recipe(p, &[(dough, 2)]).await.unwrap();
        // Same call again: same result (idempotence)
        ops.update_recipe(p, &[(dough, 2)]).await.unwrap();

        let mut conn = db.acquire().await.unwrap();
        let lines = recipe::fetch_for_pizza(&mut conn, p).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].ingredient_id, dough);
        assert_eq!(lines[0].amount, 2);

        let visible = pizza::fetch_by_id(&mut conn, p).await.unwrap().unwrap().visible;
        assert!(visible);
    }

    #[tokio::test]
    async fn test_recipe_validation_runs_before_any_write() {
        let ops = admin().await;
        let db = ops.db.clone();

        let p = ops.add_pizza("Margherita", None).await.unwrap();
        let dough = ops.add_ingredient("dough", 0.8, 5).await.unwrap();

        // Second line references a missing ingredient: nothing is written
        let err = ops.add_recipe(p, &[(dough, 1), (999, 1)]).await.unwrap_err();
        assert!(matches!(
            err,
            OpsError::Core(CoreError::IngredientNotFound(999))
        ));

        let mut conn = db.acquire().await.unwrap();
        assert!(recipe::fetch_for_pizza(&mut conn, p).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stock_refill_drives_visibility() {
        let ops = admin().await;

        let p = ops.add_pizza("Margherita", None).await.unwrap();
        let ing1 = ops.add_ingredient("dough", 0.8, 2).await.unwrap();
        let ing2 = ops.add_ingredient("cheese", 0.5, 0).await.unwrap();

        // Needs 2 dough (in stock) and 1 cheese (stock 0) → hidden
        ops.add_recipe(p, &[(ing1, 2), (ing2, 1)]).await.unwrap();
        let pizzas = ops.list_pizzas().await.unwrap();
        assert!(!pizzas[0].pizza.visible);

        // One unit of cheese arrives → visible again
        ops.add_ingredient_stock(ing2, 1).await.unwrap();
        let pizzas = ops.list_pizzas().await.unwrap();
        assert!(pizzas[0].pizza.visible);
    }

    #[tokio::test]
    async fn test_refill_all_adds_to_every_ingredient() {
        let ops = admin().await;

        let a = ops.add_ingredient("dough", 0.8, 1).await.unwrap();
        let b = ops.add_ingredient("cheese", 0.5, 0).await.unwrap();

        ops.refill_all_ingredients(3).await.unwrap();

        let listing = ops.list_ingredients().await.unwrap();
        let amount_of = |id: i64| {
            listing
                .iter()
                .find(|o| o.ingredient.id == id)
                .and_then(|o| o.amount)
        };
        assert_eq!(amount_of(a), Some(4));
        assert_eq!(amount_of(b), Some(3));
    }

    #[tokio::test]
    async fn test_delete_in_use_without_cascade_changes_nothing() {
        let ops = admin().await;
        let db = ops.db.clone();

        let p = ops.add_pizza("Margherita", None).await.unwrap();
        let cheese = ops.add_ingredient("cheese", 0.5, 5).await.unwrap();
        ops.add_recipe(p, &[(cheese, 1)]).await.unwrap();

        let outcome = ops.delete_ingredient(cheese, false).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::InUse(vec![p]));

        // Ingredient, pizza and recipe all still present
        let mut conn = db.acquire().await.unwrap();
        assert!(ingredient::fetch_by_id(&mut conn, cheese).await.unwrap().is_some());
        assert!(pizza::fetch_by_id(&mut conn, p).await.unwrap().is_some());
        assert_eq!(recipe::fetch_for_pizza(&mut conn, p).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_with_cascade_removes_dependent_pizzas() {
        let ops = admin().await;
        let db = ops.db.clone();

        let p1 = ops.add_pizza("Margherita", None).await.unwrap();
        let p2 = ops.add_pizza("Diavola", None).await.unwrap();
        let cheese = ops.add_ingredient("cheese", 0.5, 5).await.unwrap();
        let salami = ops.add_ingredient("salami", 1.1, 5).await.unwrap();

        ops.add_recipe(p1, &[(cheese, 1)]).await.unwrap();
        ops.add_recipe(p2, &[(salami, 1)]).await.unwrap();

        let outcome = ops.delete_ingredient(cheese, true).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);

        let mut conn = db.acquire().await.unwrap();
        assert!(ingredient::fetch_by_id(&mut conn, cheese).await.unwrap().is_none());
        assert!(pizza::fetch_by_id(&mut conn, p1).await.unwrap().is_none());
        // The unrelated pizza is untouched
        assert!(pizza::fetch_by_id(&mut conn, p2).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_pizza_leaves_no_orphans() {
        let ops = admin().await;
        let db = ops.db.clone();

        let p = ops.add_pizza("Capricciosa", Some(1.3)).await.unwrap();
        let ham = ops.add_ingredient("ham", 0.9, 5).await.unwrap();
        ops.add_recipe(p, &[(ham, 1)]).await.unwrap();

        ops.delete_pizza(p).await.unwrap();

        let mut conn = db.acquire().await.unwrap();
        assert!(pizza::fetch_by_id(&mut conn, p).await.unwrap().is_none());
        assert!(pizza::fetch_cost_factor(&mut conn, p).await.unwrap().is_none());
        assert!(recipe::fetch_for_pizza(&mut conn, p).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_recipe_forces_hidden_and_refill_does_not_resurrect() {
        let ops = admin().await;

        let p = ops.add_pizza("Margherita", None).await.unwrap();
        let dough = ops.add_ingredient("dough", 0.8, 5).await.unwrap();
        ops.add_recipe(p, &[(dough, 1)]).await.unwrap();

        ops.delete_recipe(p).await.unwrap();
        assert!(!ops.list_pizzas().await.unwrap()[0].pizza.visible);

        // A later stock mutation reruns the derived pass; the recipeless
        // pizza must stay hidden
        ops.refill_all_ingredients(10).await.unwrap();
        assert!(!ops.list_pizzas().await.unwrap()[0].pizza.visible);
    }

    #[tokio::test]
    async fn test_manual_show_is_overridden_by_next_derived_pass() {
        let ops = admin().await;

        let p = ops.add_pizza("Margherita", None).await.unwrap();
        let cheese = ops.add_ingredient("cheese", 0.5, 0).await.unwrap();
        ops.add_recipe(p, &[(cheese, 1)]).await.unwrap();
        assert!(!ops.list_pizzas().await.unwrap()[0].pizza.visible);

        // Admin forces it visible despite the empty shelf
        assert!(ops.toggle_pizza_visibility(p).await.unwrap());
        assert!(ops.list_pizzas().await.unwrap()[0].pizza.visible);

        // Any stock mutation re-derives: still no cheese, hidden again
        ops.refill_all_ingredients(0).await.unwrap();
        assert!(!ops.list_pizzas().await.unwrap()[0].pizza.visible);
    }
}
