//! Stock positions derived from inventory movements.

use std::collections::HashMap;

use frostline_shared::types::ProductId;
use rust_decimal::Decimal;

use super::aggregator::{Aggregator, checked};
use super::error::ReportError;
use super::types::StockLevel;
use crate::records::{InventoryMovement, MovementType};

impl Aggregator {
    /// Folds movements into one stock position per product.
    ///
    /// The current quantity is the remaining quantity of the latest movement
    /// by date; on equal dates the later movement in input order wins.
    /// Movements without a product are ignored. Output follows the order in
    /// which products first appear.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Overflow` if a per-product sum overflows.
    pub fn stock_levels(movements: &[InventoryMovement]) -> Result<Vec<StockLevel>, ReportError> {
        let mut levels: Vec<StockLevel> = Vec::new();
        let mut index: HashMap<ProductId, usize> = HashMap::new();

        for movement in movements {
            let Some(product_id) = movement.product_id else {
                continue;
            };

            let slot = *index.entry(product_id).or_insert_with(|| {
                levels.push(StockLevel {
                    product_id,
                    quantity_in: Decimal::ZERO,
                    quantity_out: Decimal::ZERO,
                    adjustments: Decimal::ZERO,
                    current_quantity: movement.remaining_quantity,
                    last_movement: movement.date,
                    inconsistent_movements: 0,
                });
                levels.len() - 1
            });

            let level = &mut levels[slot];
            let sum = match movement.movement_type {
                MovementType::In => &mut level.quantity_in,
                MovementType::Out => &mut level.quantity_out,
                MovementType::Adjustment => &mut level.adjustments,
            };
            *sum = checked(sum.checked_add(movement.quantity_moved), "stock level")?;
            if !movement.is_consistent() {
                level.inconsistent_movements += 1;
            }
            if movement.date >= level.last_movement {
                level.last_movement = movement.date;
                level.current_quantity = movement.remaining_quantity;
            }
        }

        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use frostline_shared::types::MovementId;
    use rust_decimal_macros::dec;

    fn movement(
        product: Option<ProductId>,
        kind: MovementType,
        initial: Decimal,
        moved: Decimal,
        remaining: Decimal,
        day: u32,
    ) -> InventoryMovement {
        InventoryMovement {
            id: MovementId::new(),
            movement_type: kind,
            initial_quantity: initial,
            quantity_moved: moved,
            remaining_quantity: remaining,
            product_id: product,
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
        }
    }

    #[test]
    fn test_stock_levels_fold_movements() {
        let ice = ProductId::new();
        let movements = vec![
            movement(Some(ice), MovementType::In, dec!(0), dec!(500), dec!(500), 1),
            movement(Some(ice), MovementType::Out, dec!(500), dec!(120), dec!(380), 2),
            movement(Some(ice), MovementType::Adjustment, dec!(380), dec!(-10), dec!(370), 3),
        ];

        let levels = Aggregator::stock_levels(&movements).unwrap();

        assert_eq!(levels.len(), 1);
        let level = &levels[0];
        assert_eq!(level.product_id, ice);
        assert_eq!(level.quantity_in, dec!(500));
        assert_eq!(level.quantity_out, dec!(120));
        assert_eq!(level.adjustments, dec!(-10));
        assert_eq!(level.current_quantity, dec!(370));
        assert_eq!(level.last_movement, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
        assert_eq!(level.inconsistent_movements, 0);
    }

    #[test]
    fn test_stock_levels_latest_date_wins_regardless_of_input_order() {
        let water = ProductId::new();
        let movements = vec![
            movement(Some(water), MovementType::Out, dec!(200), dec!(50), dec!(150), 9),
            movement(Some(water), MovementType::In, dec!(100), dec!(100), dec!(200), 4),
        ];

        let levels = Aggregator::stock_levels(&movements).unwrap();
        assert_eq!(levels[0].current_quantity, dec!(150));
        assert_eq!(levels[0].last_movement, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
    }

    #[test]
    fn test_stock_levels_same_day_later_input_wins() {
        let water = ProductId::new();
        let movements = vec![
            movement(Some(water), MovementType::In, dec!(0), dec!(100), dec!(100), 5),
            movement(Some(water), MovementType::Out, dec!(100), dec!(40), dec!(60), 5),
        ];

        let levels = Aggregator::stock_levels(&movements).unwrap();
        assert_eq!(levels[0].current_quantity, dec!(60));
    }

    #[test]
    fn test_stock_levels_order_and_missing_product() {
        let ice = ProductId::new();
        let water = ProductId::new();
        let movements = vec![
            movement(Some(water), MovementType::In, dec!(0), dec!(10), dec!(10), 1),
            movement(None, MovementType::In, dec!(0), dec!(99), dec!(99), 1),
            movement(Some(ice), MovementType::In, dec!(0), dec!(20), dec!(20), 1),
            movement(Some(water), MovementType::In, dec!(10), dec!(5), dec!(15), 2),
        ];

        let levels = Aggregator::stock_levels(&movements).unwrap();
        let products: Vec<_> = levels.iter().map(|l| l.product_id).collect();
        assert_eq!(products, vec![water, ice]);
        assert_eq!(levels[0].quantity_in, dec!(15));
    }

    #[test]
    fn test_stock_levels_count_inconsistent_movements() {
        let ice = ProductId::new();
        let movements = vec![
            movement(Some(ice), MovementType::In, dec!(0), dec!(10), dec!(12), 1),
            movement(Some(ice), MovementType::Out, dec!(12), dec!(2), dec!(10), 2),
        ];

        let levels = Aggregator::stock_levels(&movements).unwrap();
        assert_eq!(levels[0].inconsistent_movements, 1);
    }

    #[test]
    fn test_stock_levels_do_not_mutate_input() {
        let ice = ProductId::new();
        let movements = vec![movement(
            Some(ice),
            MovementType::In,
            dec!(0),
            dec!(10),
            dec!(10),
            1,
        )];
        let before = movements.clone();

        Aggregator::stock_levels(&movements).unwrap();
        assert_eq!(movements, before);
    }

    #[test]
    fn test_stock_levels_overflow_is_an_error() {
        let ice = ProductId::new();
        let movements = vec![
            movement(Some(ice), MovementType::In, dec!(0), Decimal::MAX, Decimal::MAX, 1),
            movement(Some(ice), MovementType::In, Decimal::MAX, dec!(1), dec!(0), 2),
        ];

        assert_eq!(
            Aggregator::stock_levels(&movements),
            Err(ReportError::Overflow("stock level"))
        );
    }
}
