//! # Domain Types
//!
//! Core domain types used throughout the pizzeria application.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌───────────────┐    ┌────────────────────┐                    │
//! │  │    Pizza      │    │    Ingredient      │                    │
//! │  │  ───────────  │    │  ────────────────  │                    │
//! │  │  id (i64)     │    │  id (i64)          │                    │
//! │  │  name         │    │  name              │                    │
//! │  │  visible      │    └─────────┬──────────┘                    │
//! │  └──────┬────────┘              │                               │
//! │         │ 0..1                  │ 0..1            0..1          │
//! │  ┌──────▼────────┐    ┌─────────▼──────────┐  ┌──────────────┐  │
//! │  │  PizzaCost    │    │  IngredientCost    │  │ Ingredient-  │  │
//! │  │  cost_factor  │    │  cost (per unit)   │  │ Amount stock │  │
//! │  └───────────────┘    └────────────────────┘  └──────────────┘  │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────┐                  │
//! │  │  RecipeLine (pizza_id, ingredient_id)     │                  │
//! │  │  → required amount                        │                  │
//! │  └───────────────────────────────────────────┘                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optional-Row-As-Zero
//! `PizzaCost`, `IngredientCost` and `IngredientAmount` are separate 1:1
//! side tables, so their absence is representable. Lookups return
//! `Option<...>` and consuming code collapses `None` to 0 (stock, unit
//! cost) or "unpriced" (cost factor). The distinction between missing and
//! explicit zero stays inspectable for tests.

use serde::{Deserialize, Serialize};

// =============================================================================
// Pizza
// =============================================================================

/// A pizza on the menu.
///
/// ## Visibility Is a Derived Cache
/// `visible` is recomputed from stock and recipe after every stock or
/// recipe mutation (see `pizzeria-ops`). Administrators may toggle it
/// manually, but the next derived pass may override the toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Pizza {
    /// Auto-incrementing primary key.
    pub id: i64,

    /// Display name shown on the menu.
    pub name: String,

    /// Whether customers can see and order this pizza.
    pub visible: bool,
}

/// Cost multiplier for a pizza (1:1 side table, optional).
///
/// The menu price is `cost_factor * Σ (unit_cost * required_amount)` over
/// the recipe. A pizza without this row has no price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PizzaCost {
    pub pizza_id: i64,

    /// Multiplier applied to the summed ingredient cost. Never negative;
    /// defaults to 1.0 when a pizza is created without an explicit factor.
    pub cost_factor: f64,
}

// =============================================================================
// Ingredient
// =============================================================================

/// A raw ingredient tracked in inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ingredient {
    /// Auto-incrementing primary key.
    pub id: i64,

    /// Display name ("dough", "mozzarella", ...).
    pub name: String,
}

/// Per-unit cost of an ingredient (1:1 side table, optional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct IngredientCost {
    pub ingredient_id: i64,

    /// Cost per unit, never negative.
    pub cost: f64,
}

/// Current stock of an ingredient (1:1 side table, optional).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct IngredientAmount {
    pub ingredient_id: i64,

    /// Units in stock, never negative.
    pub amount: i64,
}

// =============================================================================
// Recipe
// =============================================================================

/// One line of a pizza's recipe: how much of one ingredient it needs.
///
/// The composite key is (pizza_id, ingredient_id); a pizza's recipe is the
/// set of its lines, with no meaningful ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RecipeLine {
    pub pizza_id: i64,
    pub ingredient_id: i64,

    /// Required amount of the ingredient, never negative.
    pub amount: i64,
}

/// Recipe input as supplied by callers: (ingredient id, required amount).
///
/// Facade methods accept slices of these; the pizza id comes from the call
/// itself.
pub type RecipeEntry = (i64, i64);
