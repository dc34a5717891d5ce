use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::component::{ComponentCategory, StockUnit};
use crate::errors::CatalogError;

/// How a rule's base quantity scales with the panel configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityRule {
    Fixed,
    PerFeeder,
    PerMotor,
    PerCapacitorBank,
}

impl QuantityRule {
    pub fn label(self) -> &'static str {
        match self {
            QuantityRule::Fixed => "fixed",
            QuantityRule::PerFeeder => "per_feeder",
            QuantityRule::PerMotor => "per_motor",
            QuantityRule::PerCapacitorBank => "per_capacitor_bank",
        }
    }
}

impl std::fmt::Display for QuantityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for QuantityRule {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "fixed" => Ok(Self::Fixed),
            "per_feeder" => Ok(Self::PerFeeder),
            "per_motor" => Ok(Self::PerMotor),
            // Older rule stores abbreviated the capacitor-bank rule.
            "per_capacitor_bank" | "per_capacitor" => Ok(Self::PerCapacitorBank),
            other => Err(CatalogError::Decode(format!("unknown quantity rule `{other}`"))),
        }
    }
}

/// Associates a component with a panel type in the rule store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomRule {
    pub component_code: String,
    pub quantity_rule: QuantityRule,
    pub base_quantity: u32,
    pub mandatory: bool,
}

/// One priced line of an expanded bill of materials.
///
/// `total_price` is intentionally absent from the stored shape; it is
/// always derived from quantity and unit price so the two can never be
/// persisted out of sync.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomLineItem {
    pub component_code: Option<String>,
    pub name: String,
    pub category: ComponentCategory,
    pub brand: String,
    pub specifications: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub unit: StockUnit,
}

impl BomLineItem {
    pub fn total_price(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::component::{ComponentCategory, StockUnit};

    use super::{BomLineItem, QuantityRule};

    #[test]
    fn total_price_is_quantity_times_unit_price() {
        let line = BomLineItem {
            component_code: Some("TB-10".to_string()),
            name: "Terminal Block".to_string(),
            category: ComponentCategory::Accessory,
            brand: "Phoenix".to_string(),
            specifications: "10A, 600V, Screw Type".to_string(),
            quantity: 52,
            unit_price: Decimal::from(45),
            unit: StockUnit::Pcs,
        };
        assert_eq!(line.total_price(), Decimal::from(2340));
    }

    #[test]
    fn line_item_serializes_with_boundary_field_names() {
        let line = BomLineItem {
            component_code: None,
            name: "Spare".to_string(),
            category: ComponentCategory::Accessory,
            brand: "Standard".to_string(),
            specifications: String::new(),
            quantity: 1,
            unit_price: Decimal::from(10),
            unit: StockUnit::Pcs,
        };
        let json = serde_json::to_value(&line).expect("serialize line");
        assert!(json.get("componentCode").is_some());
        assert!(json.get("unitPrice").is_some());
        assert!(json.get("totalPrice").is_none(), "derived total must not be serialized");
    }

    #[test]
    fn legacy_capacitor_rule_spelling_still_parses() {
        let rule: QuantityRule = "per_capacitor".parse().expect("parse legacy spelling");
        assert_eq!(rule, QuantityRule::PerCapacitorBank);
    }
}
