//! Product costing engine
//!
//! Rolls a versioned bill of materials and a production routing up into a
//! unit cost under workshop-specific labor and overhead rates, and derives
//! the margin against a selling price. Pure functions of their inputs; all
//! arithmetic stays in fixed point until the caller converts a summary for
//! the boundary.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::{ProductVersionDetails, WorkshopSettings};
use crate::money;

/// Costing failures. Schema validation normally rejects these upstream, but
/// the engine re-checks so direct callers cannot slip out-of-range values in.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CostingError {
    #[error("BOM quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    #[error("scrap factor must be between 0 and 1, got {0}")]
    ScrapFactorOutOfRange(Decimal),

    #[error("material unit cost cannot be negative, got {0}")]
    NegativeUnitCost(Decimal),

    #[error("routing step time must be positive, got {0} minutes")]
    NonPositiveRoutingTime(i32),

    #[error("labor rate cannot be negative, got {0}")]
    NegativeLaborRate(Decimal),

    #[error("overhead rate cannot be negative, got {0}")]
    NegativeOverheadRate(Decimal),
}

/// Workshop rates the rollup needs
#[derive(Debug, Clone)]
pub struct CostRates {
    /// Money per hour of labor
    pub labor_rate: Decimal,
    /// Percentage markup applied to labor cost
    pub overhead_rate: Decimal,
}

impl From<&WorkshopSettings> for CostRates {
    fn from(settings: &WorkshopSettings) -> Self {
        Self {
            labor_rate: settings.labor_rate,
            overhead_rate: settings.overhead_rate,
        }
    }
}

/// Full-precision cost rollup result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBreakdown {
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub overhead_cost: Decimal,
    pub total_cost: Decimal,
}

impl CostBreakdown {
    /// Boundary representation with plain numbers, rounded for display
    pub fn to_summary(&self) -> CostSummary {
        CostSummary {
            material_cost: money::to_amount(self.material_cost),
            labor_cost: money::to_amount(self.labor_cost),
            overhead_cost: money::to_amount(self.overhead_cost),
            total_cost: money::to_amount(self.total_cost),
        }
    }
}

/// Cost breakdown as sent to clients
#[derive(Debug, Clone, Serialize)]
pub struct CostSummary {
    pub material_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub total_cost: f64,
}

/// Margin of a selling price over a total cost, in full precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Margin {
    /// Negative when the product sells at a loss
    pub amount: Decimal,
    pub percentage: Decimal,
}

impl Margin {
    pub fn to_summary(&self) -> MarginSummary {
        MarginSummary {
            margin_amount: money::to_amount(self.amount),
            margin_percentage: money::to_percentage(self.percentage),
        }
    }
}

/// Margin as sent to clients
#[derive(Debug, Clone, Serialize)]
pub struct MarginSummary {
    pub margin_amount: f64,
    pub margin_percentage: f64,
}

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
const PERCENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Roll up the unit cost of one product version.
///
/// Material cost sums `quantity x (1 + scrap factor) x unit cost` per BOM
/// line, each term in full precision. Labor cost converts the routing minute
/// total to hours and applies the labor rate; the routing list is the sole
/// source of labor minutes. Overhead applies the percentage rate to labor.
pub fn calculate_product_cost(
    version: &ProductVersionDetails,
    rates: &CostRates,
) -> Result<CostBreakdown, CostingError> {
    if rates.labor_rate < Decimal::ZERO {
        return Err(CostingError::NegativeLaborRate(rates.labor_rate));
    }
    if rates.overhead_rate < Decimal::ZERO {
        return Err(CostingError::NegativeOverheadRate(rates.overhead_rate));
    }

    let mut material_cost = Decimal::ZERO;
    for line in &version.bom {
        if line.quantity <= Decimal::ZERO {
            return Err(CostingError::NonPositiveQuantity(line.quantity));
        }
        if line.scrap_factor < Decimal::ZERO || line.scrap_factor > Decimal::ONE {
            return Err(CostingError::ScrapFactorOutOfRange(line.scrap_factor));
        }
        if line.unit_cost < Decimal::ZERO {
            return Err(CostingError::NegativeUnitCost(line.unit_cost));
        }
        let required_qty = line.quantity * (Decimal::ONE + line.scrap_factor);
        material_cost += required_qty * line.unit_cost;
    }

    for step in &version.routing {
        if step.estimated_time_min <= 0 {
            return Err(CostingError::NonPositiveRoutingTime(step.estimated_time_min));
        }
    }
    let total_minutes = Decimal::from(version.total_routing_minutes());
    let labor_cost = total_minutes / MINUTES_PER_HOUR * rates.labor_rate;

    let overhead_cost = labor_cost * rates.overhead_rate / PERCENT;

    let total_cost = material_cost + labor_cost + overhead_cost;

    // A zero total with non-zero components would read as nonsense on the
    // costing screen, so normalize everything to zero together.
    if total_cost.is_zero() {
        return Ok(CostBreakdown {
            material_cost: Decimal::ZERO,
            labor_cost: Decimal::ZERO,
            overhead_cost: Decimal::ZERO,
            total_cost: Decimal::ZERO,
        });
    }

    Ok(CostBreakdown {
        material_cost,
        labor_cost,
        overhead_cost,
        total_cost,
    })
}

/// Margin of a selling price over a total cost.
///
/// A selling price of zero is a valid "not yet priced" state, not an error:
/// the percentage is defined as zero instead of dividing by zero.
pub fn calculate_margin(total_cost: Decimal, selling_price: Decimal) -> Margin {
    let amount = selling_price - total_cost;
    let percentage = if selling_price > Decimal::ZERO {
        amount / selling_price * PERCENT
    } else {
        Decimal::ZERO
    };
    Margin { amount, percentage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BomLine, RoutingLine};
    use proptest::prelude::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bom_line(unit_cost: &str, quantity: &str, scrap: &str) -> BomLine {
        BomLine {
            material_id: Uuid::new_v4(),
            material_name: "Material".to_string(),
            quantity: dec(quantity),
            scrap_factor: dec(scrap),
            unit_cost: dec(unit_cost),
        }
    }

    fn routing_line(step: i32, minutes: i32) -> RoutingLine {
        RoutingLine {
            step_number: step,
            operation_name: "Operation".to_string(),
            tool_name: None,
            estimated_time_min: minutes,
        }
    }

    fn version(bom: Vec<BomLine>, routing: Vec<RoutingLine>) -> ProductVersionDetails {
        ProductVersionDetails {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            version: 1,
            bom,
            routing,
        }
    }

    fn rates(labor: &str, overhead: &str) -> CostRates {
        CostRates {
            labor_rate: dec(labor),
            overhead_rate: dec(overhead),
        }
    }

    #[test]
    fn test_wallet_rollup_scenario() {
        // Leather 2 sqft at 10.00 with 10% scrap, thread 5 m at 0.20,
        // one hour of routing at 40.00/hr with 15% overhead
        let version = version(
            vec![
                bom_line("10.00", "2", "0.1"),
                bom_line("0.20", "5", "0"),
            ],
            vec![routing_line(1, 30), routing_line(2, 30)],
        );
        let breakdown = calculate_product_cost(&version, &rates("40.00", "15")).unwrap();

        assert_eq!(breakdown.material_cost, dec("23.00"));
        assert_eq!(breakdown.labor_cost, dec("40.00"));
        assert_eq!(breakdown.overhead_cost, dec("6.00"));
        assert_eq!(breakdown.total_cost, dec("69.00"));

        let summary = breakdown.to_summary();
        assert_eq!(summary.material_cost, 23.0);
        assert_eq!(summary.total_cost, 69.0);
    }

    #[test]
    fn test_zero_routing_means_zero_labor_and_overhead() {
        let version = version(vec![bom_line("12.50", "0.75", "0.1")], vec![]);
        let breakdown = calculate_product_cost(&version, &rates("500", "99")).unwrap();
        assert_eq!(breakdown.labor_cost, Decimal::ZERO);
        assert_eq!(breakdown.overhead_cost, Decimal::ZERO);
        assert_eq!(breakdown.total_cost, breakdown.material_cost);
    }

    #[test]
    fn test_zero_total_normalizes_all_components() {
        // Free material and no routing: every component must read zero
        let version = version(vec![bom_line("0", "1", "0")], vec![]);
        let breakdown = calculate_product_cost(&version, &rates("40", "15")).unwrap();
        assert_eq!(breakdown.material_cost, Decimal::ZERO);
        assert_eq!(breakdown.labor_cost, Decimal::ZERO);
        assert_eq!(breakdown.overhead_cost, Decimal::ZERO);
        assert_eq!(breakdown.total_cost, Decimal::ZERO);
    }

    #[test]
    fn test_no_per_item_rounding() {
        // 3 x 1/3-ish quantities would drift if rounded per line
        let version = version(
            vec![
                bom_line("0.333", "1", "0"),
                bom_line("0.333", "1", "0"),
                bom_line("0.334", "1", "0"),
            ],
            vec![],
        );
        let breakdown = calculate_product_cost(&version, &rates("0", "0")).unwrap();
        assert_eq!(breakdown.material_cost, dec("1.000"));
    }

    #[test]
    fn test_rejects_out_of_range_inputs() {
        let bad_qty = version(vec![bom_line("10", "0", "0")], vec![]);
        assert_eq!(
            calculate_product_cost(&bad_qty, &rates("40", "15")),
            Err(CostingError::NonPositiveQuantity(Decimal::ZERO))
        );

        let bad_scrap = version(vec![bom_line("10", "1", "1.5")], vec![]);
        assert_eq!(
            calculate_product_cost(&bad_scrap, &rates("40", "15")),
            Err(CostingError::ScrapFactorOutOfRange(dec("1.5")))
        );

        let bad_time = version(vec![], vec![routing_line(1, 0)]);
        assert_eq!(
            calculate_product_cost(&bad_time, &rates("40", "15")),
            Err(CostingError::NonPositiveRoutingTime(0))
        );

        let bad_cost = version(vec![bom_line("-1", "1", "0")], vec![]);
        assert_eq!(
            calculate_product_cost(&bad_cost, &rates("40", "15")),
            Err(CostingError::NegativeUnitCost(dec("-1")))
        );

        let ok = version(vec![], vec![]);
        assert_eq!(
            calculate_product_cost(&ok, &rates("-1", "15")),
            Err(CostingError::NegativeLaborRate(dec("-1")))
        );
    }

    #[test]
    fn test_margin_basic() {
        let margin = calculate_margin(dec("69.00"), dec("85.00"));
        assert_eq!(margin.amount, dec("16.00"));
        // 16 / 85 * 100
        assert_eq!(margin.percentage.round_dp(2), dec("18.82"));
    }

    #[test]
    fn test_margin_loss_is_negative() {
        let margin = calculate_margin(dec("100.00"), dec("85.00"));
        assert_eq!(margin.amount, dec("-15.00"));
        assert!(margin.percentage < Decimal::ZERO);
    }

    #[test]
    fn test_margin_zero_price_guards_division() {
        let margin = calculate_margin(dec("69.00"), Decimal::ZERO);
        assert_eq!(margin.amount, dec("-69.00"));
        assert_eq!(margin.percentage, Decimal::ZERO);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Doubling a BOM quantity adds exactly one more
        /// quantity x (1 + scrap) x unit cost to the material cost.
        #[test]
        fn prop_material_cost_linear_in_quantity(
            qty in 1i64..=10_000i64,
            cost in 0i64..=100_000i64,
            scrap in 0i64..=100i64,
        ) {
            let quantity = Decimal::new(qty, 2);
            let unit_cost = Decimal::new(cost, 2);
            let scrap_factor = Decimal::new(scrap, 2);

            let single = version(
                vec![BomLine {
                    material_id: Uuid::new_v4(),
                    material_name: "m".to_string(),
                    quantity,
                    scrap_factor,
                    unit_cost,
                }],
                vec![],
            );
            let doubled = version(
                vec![BomLine {
                    material_id: Uuid::new_v4(),
                    material_name: "m".to_string(),
                    quantity: quantity * Decimal::from(2),
                    scrap_factor,
                    unit_cost,
                }],
                vec![],
            );

            let rates = rates("40", "15");
            let base = calculate_product_cost(&single, &rates).unwrap();
            let double = calculate_product_cost(&doubled, &rates).unwrap();
            let term = quantity * (Decimal::ONE + scrap_factor) * unit_cost;

            prop_assert_eq!(double.material_cost - base.material_cost, term);
        }

        /// Labor and overhead are zero for empty routing whatever the rates.
        #[test]
        fn prop_empty_routing_no_labor(
            labor in 0i64..=1_000_000i64,
            overhead in 0i64..=10_000i64,
        ) {
            let version = version(vec![bom_line("1.00", "1", "0")], vec![]);
            let rates = CostRates {
                labor_rate: Decimal::new(labor, 2),
                overhead_rate: Decimal::new(overhead, 2),
            };
            let breakdown = calculate_product_cost(&version, &rates).unwrap();
            prop_assert_eq!(breakdown.labor_cost, Decimal::ZERO);
            prop_assert_eq!(breakdown.overhead_cost, Decimal::ZERO);
        }
    }
}
