//! Layered cost roll-up over an expanded bill of materials.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::bom::BomLineItem;
use crate::domain::costing::CostBreakdown;

const POWDER_COATING_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 2); // 0.03
const LABOUR_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2); // 0.20
const WIRING_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2); // 0.15
const TESTING_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2); // 0.05

/// Computes the material → production → margin → tax ladder. The
/// computation order is part of the financial contract: each step reads
/// only the steps before it, and rounding happens once, on the way out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostCalculator {
    pub profit_margin: Decimal,
    pub tax_percentage: Decimal,
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self { profit_margin: Decimal::from(20), tax_percentage: Decimal::from(18) }
    }
}

impl CostCalculator {
    pub fn new(profit_margin: Decimal, tax_percentage: Decimal) -> Self {
        Self { profit_margin, tax_percentage }
    }

    pub fn rollup(&self, items: &[BomLineItem]) -> CostBreakdown {
        let material_cost: Decimal = items.iter().map(BomLineItem::total_price).sum();

        let powder_coating = material_cost * POWDER_COATING_RATE;
        let labour = material_cost * LABOUR_RATE;
        let wiring = material_cost * WIRING_RATE;
        let testing = material_cost * TESTING_RATE;
        let production_cost = powder_coating + labour + wiring + testing;

        let total_cost = material_cost + production_cost;
        let price_before_tax =
            total_cost * (Decimal::ONE + self.profit_margin / Decimal::ONE_HUNDRED);
        let tax_amount = price_before_tax * (self.tax_percentage / Decimal::ONE_HUNDRED);
        let final_amount = price_before_tax + tax_amount;

        CostBreakdown {
            material_cost: round_money(material_cost),
            powder_coating: round_money(powder_coating),
            labour: round_money(labour),
            wiring: round_money(wiring),
            testing: round_money(testing),
            production_cost: round_money(production_cost),
            total_cost: round_money(total_cost),
            profit_margin: self.profit_margin,
            price_before_tax: round_money(price_before_tax),
            tax_percentage: self.tax_percentage,
            tax_amount: round_money(tax_amount),
            final_amount: round_money(final_amount),
        }
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
