use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Layered cost roll-up of one estimation. Every monetary field is
/// rounded to two decimals when the breakdown is built; the percentages
/// are pass-through configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub material_cost: Decimal,
    pub powder_coating: Decimal,
    pub labour: Decimal,
    pub wiring: Decimal,
    pub testing: Decimal,
    pub production_cost: Decimal,
    pub total_cost: Decimal,
    pub profit_margin: Decimal,
    pub price_before_tax: Decimal,
    pub tax_percentage: Decimal,
    pub tax_amount: Decimal,
    pub final_amount: Decimal,
}
