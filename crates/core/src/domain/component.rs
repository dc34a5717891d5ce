use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentCategory {
    #[serde(rename = "Circuit Breaker")]
    CircuitBreaker,
    Contactor,
    Protection,
    Busbar,
    Capacitor,
    Controller,
    #[serde(rename = "Power Supply")]
    PowerSupply,
    Wiring,
    Enclosure,
    Accessory,
    Meter,
    Instrument,
    #[serde(rename = "PLC")]
    Plc,
}

impl ComponentCategory {
    pub fn label(self) -> &'static str {
        match self {
            ComponentCategory::CircuitBreaker => "Circuit Breaker",
            ComponentCategory::Contactor => "Contactor",
            ComponentCategory::Protection => "Protection",
            ComponentCategory::Busbar => "Busbar",
            ComponentCategory::Capacitor => "Capacitor",
            ComponentCategory::Controller => "Controller",
            ComponentCategory::PowerSupply => "Power Supply",
            ComponentCategory::Wiring => "Wiring",
            ComponentCategory::Enclosure => "Enclosure",
            ComponentCategory::Accessory => "Accessory",
            ComponentCategory::Meter => "Meter",
            ComponentCategory::Instrument => "Instrument",
            ComponentCategory::Plc => "PLC",
        }
    }
}

impl std::fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ComponentCategory {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Circuit Breaker" => Ok(Self::CircuitBreaker),
            "Contactor" => Ok(Self::Contactor),
            // Legacy catalogs filed overload relays under "Relay".
            "Protection" | "Relay" => Ok(Self::Protection),
            "Busbar" => Ok(Self::Busbar),
            "Capacitor" => Ok(Self::Capacitor),
            "Controller" => Ok(Self::Controller),
            "Power Supply" => Ok(Self::PowerSupply),
            "Wiring" => Ok(Self::Wiring),
            "Enclosure" => Ok(Self::Enclosure),
            "Accessory" => Ok(Self::Accessory),
            "Meter" => Ok(Self::Meter),
            "Instrument" => Ok(Self::Instrument),
            "PLC" => Ok(Self::Plc),
            other => Err(CatalogError::Decode(format!("unknown component category `{other}`"))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockUnit {
    #[default]
    Pcs,
    Meter,
    Set,
}

impl StockUnit {
    pub fn label(self) -> &'static str {
        match self {
            StockUnit::Pcs => "Pcs",
            StockUnit::Meter => "Meter",
            StockUnit::Set => "Set",
        }
    }
}

impl std::fmt::Display for StockUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for StockUnit {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Pcs" => Ok(Self::Pcs),
            "Meter" => Ok(Self::Meter),
            "Set" => Ok(Self::Set),
            other => Err(CatalogError::Decode(format!("unknown stock unit `{other}`"))),
        }
    }
}

/// Reference data describing one purchasable component. Owned by the
/// catalog store; the engine only ever reads these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCatalogEntry {
    pub code: String,
    pub name: String,
    pub category: ComponentCategory,
    pub brand: String,
    pub specifications: String,
    pub unit_price: Decimal,
    pub stock_unit: StockUnit,
}

#[cfg(test)]
mod tests {
    use super::{ComponentCategory, StockUnit};

    #[test]
    fn category_round_trips_through_display_labels() {
        for category in [
            ComponentCategory::CircuitBreaker,
            ComponentCategory::PowerSupply,
            ComponentCategory::Plc,
            ComponentCategory::Accessory,
        ] {
            let parsed: ComponentCategory = category.label().parse().expect("parse label");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn legacy_relay_category_maps_to_protection() {
        let parsed: ComponentCategory = "Relay".parse().expect("parse relay");
        assert_eq!(parsed, ComponentCategory::Protection);
    }

    #[test]
    fn unknown_stock_unit_is_a_decode_error() {
        assert!("Box".parse::<StockUnit>().is_err());
    }
}
