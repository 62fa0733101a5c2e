//! # Menu Rules
//!
//! The two interesting business rules of the whole application, as pure
//! functions over snapshots:
//!
//! - **Availability**: a pizza can be made iff every recipe line's required
//!   amount is covered by current stock.
//! - **Pricing**: `price = cost_factor * Σ (unit_cost * required_amount)`.
//!
//! Both take plain maps so they can be exercised in unit tests without a
//! database. The ops layer loads the snapshot (inside the transaction that
//! triggered the recompute) and delegates here.
//!
//! ## Availability Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  visible(pizza) = ∀ (ingredient, required) ∈ recipe(pizza):     │
//! │                       stock(ingredient) ≥ required              │
//! │                                                                 │
//! │  • missing stock row counts as 0                                │
//! │  • empty recipe is vacuously satisfied                          │
//! │  • explicit recipe deletion forces visible = false instead      │
//! │    (handled by the ops layer, not here)                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use crate::types::RecipeLine;

// =============================================================================
// Availability
// =============================================================================

/// One stock shortage: which ingredient fell short, and by how much.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortage {
    pub ingredient_id: i64,
    pub available: i64,
    pub required: i64,
}

/// Checks whether current stock covers every line of a recipe.
///
/// A missing stock entry counts as 0. An empty recipe is vacuously
/// satisfied (all-of-empty-set is true); the "no recipe means hidden"
/// rule after explicit recipe deletion is an ops-layer override, not part
/// of the derivation.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use pizzeria_core::menu::is_recipe_satisfied;
/// use pizzeria_core::RecipeLine;
///
/// let recipe = vec![RecipeLine { pizza_id: 1, ingredient_id: 7, amount: 2 }];
/// let stock = HashMap::from([(7, 2)]);
/// assert!(is_recipe_satisfied(&recipe, &stock));
///
/// let stock = HashMap::from([(7, 1)]);
/// assert!(!is_recipe_satisfied(&recipe, &stock));
/// ```
pub fn is_recipe_satisfied(recipe: &[RecipeLine], stock: &HashMap<i64, i64>) -> bool {
    first_shortage(recipe, stock).is_none()
}

/// Returns the first recipe line that stock cannot cover, if any.
///
/// Used by ordering to report *which* ingredient ran out; `None` means the
/// recipe is fully satisfied. "First" follows the order of `recipe`, which
/// callers should not rely on beyond error reporting.
pub fn first_shortage(recipe: &[RecipeLine], stock: &HashMap<i64, i64>) -> Option<Shortage> {
    recipe.iter().find_map(|line| {
        let available = stock.get(&line.ingredient_id).copied().unwrap_or(0);
        (available < line.amount).then(|| Shortage {
            ingredient_id: line.ingredient_id,
            available,
            required: line.amount,
        })
    })
}

// =============================================================================
// Pricing
// =============================================================================

/// Computes a pizza's price from its cost factor, recipe, and ingredient
/// unit costs.
///
/// ## Formula
/// `price = cost_factor * Σ over lines (unit_cost(ingredient) * amount)`
///
/// ## Missing Cost Rows
/// An ingredient with no cost row contributes 0 to the sum. This keeps the
/// formula total (every visible pizza with a cost factor has *a* price),
/// at the cost of quoting low when an ingredient was never priced; the
/// admin listing surfaces unpriced ingredients so this is auditable.
///
/// A missing *cost factor* is different: the caller must not invoke this
/// at all and should treat the pizza as unpriced.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use pizzeria_core::menu::pizza_price;
/// use pizzeria_core::RecipeLine;
///
/// let recipe = vec![
///     RecipeLine { pizza_id: 1, ingredient_id: 1, amount: 1 }, // dough
///     RecipeLine { pizza_id: 1, ingredient_id: 2, amount: 2 }, // cheese
/// ];
/// let costs = HashMap::from([(1, 0.8), (2, 0.5)]);
/// assert!((pizza_price(1.0, &recipe, &costs) - 1.8).abs() < 1e-9);
/// ```
pub fn pizza_price(
    cost_factor: f64,
    recipe: &[RecipeLine],
    unit_costs: &HashMap<i64, f64>,
) -> f64 {
    let ingredient_total: f64 = recipe
        .iter()
        .map(|line| {
            let unit_cost = unit_costs.get(&line.ingredient_id).copied().unwrap_or(0.0);
            unit_cost * line.amount as f64
        })
        .sum();

    cost_factor * ingredient_total
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ingredient_id: i64, amount: i64) -> RecipeLine {
        RecipeLine {
            pizza_id: 1,
            ingredient_id,
            amount,
        }
    }

    #[test]
    fn test_satisfied_when_stock_covers_every_line() {
        let recipe = vec![line(1, 2), line(2, 1)];
        let stock = HashMap::from([(1, 2), (2, 5)]);
        assert!(is_recipe_satisfied(&recipe, &stock));
    }

    #[test]
    fn test_unsatisfied_when_one_line_falls_short() {
        // stock(1)=2 covers line 1, stock(2)=0 does not cover line 2
        let recipe = vec![line(1, 2), line(2, 1)];
        let stock = HashMap::from([(1, 2), (2, 0)]);
        assert!(!is_recipe_satisfied(&recipe, &stock));

        let shortage = first_shortage(&recipe, &stock).unwrap();
        assert_eq!(
            shortage,
            Shortage {
                ingredient_id: 2,
                available: 0,
                required: 1
            }
        );
    }

    #[test]
    fn test_missing_stock_row_counts_as_zero() {
        let recipe = vec![line(9, 1)];
        let stock = HashMap::new();
        assert!(!is_recipe_satisfied(&recipe, &stock));
    }

    #[test]
    fn test_empty_recipe_is_vacuously_satisfied() {
        assert!(is_recipe_satisfied(&[], &HashMap::new()));
    }

    #[test]
    fn test_zero_amount_line_needs_no_stock() {
        let recipe = vec![line(1, 0)];
        assert!(is_recipe_satisfied(&recipe, &HashMap::new()));
    }

    #[test]
    fn test_price_formula() {
        // dough 0.8 x1, cheese 0.5 x2, tomato 0.3 x1, factor 1.0 => 2.1
        let recipe = vec![line(1, 1), line(2, 2), line(3, 1)];
        let costs = HashMap::from([(1, 0.8), (2, 0.5), (3, 0.3)]);

        let price = pizza_price(1.0, &recipe, &costs);
        assert!((price - 2.1).abs() < 1e-9);

        // Factor scales the whole sum
        let price = pizza_price(1.5, &recipe, &costs);
        assert!((price - 3.15).abs() < 1e-9);
    }

    #[test]
    fn test_price_with_missing_ingredient_cost() {
        // ingredient 2 has no cost row -> contributes 0
        let recipe = vec![line(1, 1), line(2, 4)];
        let costs = HashMap::from([(1, 2.0)]);
        let price = pizza_price(1.0, &recipe, &costs);
        assert!((price - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_of_empty_recipe_is_zero() {
        let price = pizza_price(3.0, &[], &HashMap::new());
        assert_eq!(price, 0.0);
    }
}
