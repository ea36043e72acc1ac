use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use super::DomainError;
use crate::database::models::RecipeItem;

/// Portions one ingredient allows on its own
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientPortions {
    pub ingredient_id: Uuid,
    pub required_per_portion: Decimal,
    pub available: Decimal,
    pub portions: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortionBreakdown {
    /// Whole portions the scarcest ingredient allows
    pub portions: i64,
    pub limiting_ingredient: Uuid,
    pub ingredients: Vec<IngredientPortions>,
}

/// Computes how many whole portions of a recipe current stock can produce
pub struct PortionCalculator;

impl PortionCalculator {
    /// `stock` maps ingredient id to quantity on hand. An ingredient with no
    /// entry has nothing on hand and yields zero portions.
    pub fn calculate(
        items: &[RecipeItem],
        stock: &HashMap<Uuid, Decimal>,
    ) -> Result<PortionBreakdown, DomainError> {
        if items.is_empty() {
            return Err(DomainError::Internal("recipe has no ingredients".to_string()));
        }

        let mut ingredients = Vec::with_capacity(items.len());
        let mut limit: Option<(Decimal, Uuid)> = None;

        for item in items {
            if item.quantity <= Decimal::ZERO {
                return Err(DomainError::Internal(format!(
                    "recipe item for ingredient {} has non-positive quantity {}",
                    item.ingredient_id, item.quantity
                )));
            }

            let available = stock.get(&item.ingredient_id).copied().unwrap_or(Decimal::ZERO);
            if available < Decimal::ZERO {
                return Err(DomainError::Internal(format!(
                    "inventory for ingredient {} is negative ({})",
                    item.ingredient_id, available
                )));
            }

            let ratio = available.checked_div(item.quantity).ok_or_else(|| {
                DomainError::Internal(format!(
                    "portion ratio overflow for ingredient {} ({} / {})",
                    item.ingredient_id, available, item.quantity
                ))
            })?;

            ingredients.push(IngredientPortions {
                ingredient_id: item.ingredient_id,
                required_per_portion: item.quantity,
                available,
                portions: whole_portions(ratio)?,
            });

            if limit.map_or(true, |(min, _)| ratio < min) {
                limit = Some((ratio, item.ingredient_id));
            }
        }

        let (min_ratio, limiting_ingredient) =
            limit.ok_or_else(|| DomainError::Internal("recipe has no ingredients".to_string()))?;

        Ok(PortionBreakdown {
            portions: whole_portions(min_ratio)?,
            limiting_ingredient,
            ingredients,
        })
    }
}

fn whole_portions(ratio: Decimal) -> Result<i64, DomainError> {
    ratio
        .floor()
        .to_i64()
        .ok_or_else(|| DomainError::Internal(format!("portion count {} out of range", ratio)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: Uuid, quantity: Decimal, position: i32) -> RecipeItem {
        RecipeItem {
            ingredient_id: id,
            quantity,
            position,
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn scarcest_ingredient_bounds_the_result() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let items = vec![item(a, dec("2"), 0), item(b, dec("3"), 1)];
        let stock = HashMap::from([(a, dec("10")), (b, dec("9"))]);

        let result = PortionCalculator::calculate(&items, &stock).unwrap();
        assert_eq!(result.portions, 3);
        assert_eq!(result.limiting_ingredient, b);
        assert_eq!(result.ingredients[0].portions, 5);
        assert_eq!(result.ingredients[1].portions, 3);
    }

    #[test]
    fn single_ingredient_floors_the_ratio() {
        let a = Uuid::new_v4();
        let cases = [("10", "3", 3), ("9.99", "2.5", 3), ("0.3", "0.1", 3), ("1", "2", 0), ("0", "1", 0)];
        for (stock_qty, per_portion, expected) in cases {
            let items = vec![item(a, dec(per_portion), 0)];
            let stock = HashMap::from([(a, dec(stock_qty))]);
            let result = PortionCalculator::calculate(&items, &stock).unwrap();
            assert_eq!(result.portions, expected, "{} / {}", stock_qty, per_portion);
        }
    }

    #[test]
    fn floor_of_min_over_many_ingredients() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let per_portion = ["0.25", "1.5", "3", "0.1"];
        let on_hand = ["7.9", "12", "30", "4.05"];
        let items: Vec<RecipeItem> = ids
            .iter()
            .zip(per_portion)
            .enumerate()
            .map(|(i, (id, q))| item(*id, dec(q), i as i32))
            .collect();
        let stock: HashMap<Uuid, Decimal> = ids.iter().copied().zip(on_hand.iter().map(|s| dec(s))).collect();

        // ratios: 31.6, 8, 10, 40.5
        let result = PortionCalculator::calculate(&items, &stock).unwrap();
        assert_eq!(result.portions, 8);
        assert_eq!(result.limiting_ingredient, ids[1]);
    }

    #[test]
    fn zero_quantity_per_portion_is_an_internal_error() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let items = vec![item(a, dec("2"), 0), item(b, Decimal::ZERO, 1)];
        let stock = HashMap::from([(a, dec("10")), (b, dec("9"))]);

        let err = PortionCalculator::calculate(&items, &stock).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn negative_quantity_per_portion_is_an_internal_error() {
        let a = Uuid::new_v4();
        let items = vec![item(a, dec("-1"), 0)];
        let stock = HashMap::from([(a, dec("10"))]);
        assert!(matches!(
            PortionCalculator::calculate(&items, &stock),
            Err(DomainError::Internal(_))
        ));
    }

    #[test]
    fn missing_inventory_counts_as_zero_stock() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let items = vec![item(a, dec("2"), 0), item(b, dec("3"), 1)];
        let stock = HashMap::from([(a, dec("10"))]);

        let result = PortionCalculator::calculate(&items, &stock).unwrap();
        assert_eq!(result.portions, 0);
        assert_eq!(result.limiting_ingredient, b);
        assert_eq!(result.ingredients[1].available, Decimal::ZERO);
    }

    #[test]
    fn empty_recipe_is_an_internal_error() {
        let err = PortionCalculator::calculate(&[], &HashMap::new()).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn repeated_calls_give_identical_results() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let items = vec![item(a, dec("2"), 0), item(b, dec("3"), 1)];
        let stock = HashMap::from([(a, dec("10")), (b, dec("9"))]);

        let first = PortionCalculator::calculate(&items, &stock).unwrap();
        let second = PortionCalculator::calculate(&items, &stock).unwrap();
        assert_eq!(first, second);
    }
}
