//! Built-in reference catalog.
//!
//! One table backs both estimation paths: environments without a catalog
//! store estimate directly against `StaticCatalog`, and the database seed
//! inserts exactly `StaticCatalog::entries()`. Keeping a single table is
//! what stops the fallback prices drifting from the seeded ones.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::bom::{BomRule, QuantityRule};
use crate::domain::component::{ComponentCatalogEntry, ComponentCategory, StockUnit};
use crate::domain::panel::PanelType;
use crate::errors::CatalogError;

use super::CatalogProvider;

type Row = (&'static str, &'static str, ComponentCategory, &'static str, &'static str, i64, StockUnit);

#[rustfmt::skip]
const REFERENCE_TABLE: &[Row] = &[
    // Enclosures
    ("ENC-600",     "Enclosure 600x600x200",        ComponentCategory::Enclosure,      "Standard",  "1.6mm CRCA, Indoor Type",       15_000, StockUnit::Pcs),
    ("ENC-800",     "Enclosure 800x800x300",        ComponentCategory::Enclosure,      "Standard",  "1.6mm CRCA, Indoor Type",       18_000, StockUnit::Pcs),
    ("ENC-1000",    "Enclosure 1000x1000x400",      ComponentCategory::Enclosure,      "Standard",  "1.6mm CRCA, Indoor Type",       22_000, StockUnit::Pcs),
    ("ENC-1500",    "Enclosure 1500x1000x400",      ComponentCategory::Enclosure,      "Standard",  "1.6mm CRCA, Indoor Type",       35_000, StockUnit::Pcs),
    ("ENC-1600",    "Enclosure 1600x1700x600",      ComponentCategory::Enclosure,      "Standard",  "2.0mm CRCA, Indoor Type",       45_000, StockUnit::Pcs),
    ("ENC-2100",    "Enclosure 2100x2900x1000",     ComponentCategory::Enclosure,      "Standard",  "2.0mm CRCA, Indoor Type",       75_000, StockUnit::Pcs),
    // Circuit breakers
    ("MCCB-630",    "MCCB 630A",                    ComponentCategory::CircuitBreaker, "Schneider", "630A, 415V, 4P, 65kA",           8_500, StockUnit::Pcs),
    ("MCCB-250",    "MCCB 250A",                    ComponentCategory::CircuitBreaker, "Schneider", "250A, 415V, 3P, 50kA",           6_500, StockUnit::Pcs),
    ("MCCB-100",    "MCCB 100A",                    ComponentCategory::CircuitBreaker, "Schneider", "100A, 415V, 3P, 35kA",           4_500, StockUnit::Pcs),
    ("MCB-63",      "MCB 63A",                      ComponentCategory::CircuitBreaker, "Schneider", "63A, 415V, 3P, 10kA",            3_200, StockUnit::Pcs),
    ("MCB-32",      "MCB 32A",                      ComponentCategory::CircuitBreaker, "Legrand",   "32A, 240V, SPN, 10kA",             850, StockUnit::Pcs),
    // Contactors
    ("CON-25",      "Contactor 25A",                ComponentCategory::Contactor,      "ABB",       "25A, 415V, 3P, AC3",             1_800, StockUnit::Pcs),
    ("CON-40",      "Contactor 40A",                ComponentCategory::Contactor,      "ABB",       "40A, 415V, 3P, AC3",             2_500, StockUnit::Pcs),
    ("CON-100",     "Contactor 100A",               ComponentCategory::Contactor,      "ABB",       "100A, 415V, 3P, AC3",            5_800, StockUnit::Pcs),
    // Protection
    ("OL-25",       "Overload Relay 18-25A",        ComponentCategory::Protection,     "Siemens",   "18-25A, Adjustable, Thermal",    2_200, StockUnit::Pcs),
    ("OL-40",       "Overload Relay 30-40A",        ComponentCategory::Protection,     "Siemens",   "30-40A, Adjustable, Thermal",    2_800, StockUnit::Pcs),
    ("MP-25",       "Motor Protection Relay 25A",   ComponentCategory::Protection,     "Siemens",   "25A, Electronic",                4_500, StockUnit::Pcs),
    // Busbars
    ("BUS-CU-630",  "Copper Busbar Set 630A",       ComponentCategory::Busbar,         "Standard",  "630A, 4P",                      12_000, StockUnit::Set),
    ("BUS-CU-800",  "Copper Busbar Set 800A",       ComponentCategory::Busbar,         "Standard",  "800A, 4P",                      15_000, StockUnit::Set),
    ("BUS-CU-1000", "Copper Busbar Set 1000A",      ComponentCategory::Busbar,         "Standard",  "1000A, 4P",                     20_000, StockUnit::Set),
    ("BUS-AL-630",  "Aluminum Busbar Set 630A",     ComponentCategory::Busbar,         "Standard",  "630A, 4P",                       8_000, StockUnit::Set),
    // Controllers
    ("APFC-CTRL",   "APFC Controller",              ComponentCategory::Controller,     "Schneider", "Digital, 12 Step, RS485",       12_000, StockUnit::Pcs),
    ("PLC-BASIC",   "PLC Basic Unit",               ComponentCategory::Controller,     "Delta",     "24VDC, 14DI/10DO",              18_000, StockUnit::Pcs),
    ("VFD-22KW",    "VFD 22kW",                     ComponentCategory::Controller,     "ABB",       "22kW, 415V, 3P, IP55",          25_000, StockUnit::Pcs),
    // Capacitors
    ("CAP-15",      "Capacitor 15kVAR",             ComponentCategory::Capacitor,      "Standard",  "15kVAR, 440V, Dry Type",         6_500, StockUnit::Pcs),
    ("CAP-25",      "Capacitor 25kVAR",             ComponentCategory::Capacitor,      "Standard",  "25kVAR, 440V, Dry Type",         8_500, StockUnit::Pcs),
    ("CAP-50",      "Capacitor 50kVAR",             ComponentCategory::Capacitor,      "Standard",  "50kVAR, 440V, Dry Type",        12_000, StockUnit::Pcs),
    // Metering and instrumentation
    ("MTR-MULTI",   "Multi-function Meter",         ComponentCategory::Meter,          "ABB",       "3 Phase, 4 Wire, RS485",         8_500, StockUnit::Pcs),
    ("MTR-ENERGY",  "Energy Meter",                 ComponentCategory::Meter,          "ABB",       "3 Phase, Class 1",               6_500, StockUnit::Pcs),
    ("MTR-POWER",   "Power Meter",                  ComponentCategory::Meter,          "ABB",       "Single Function, Class 1",       4_500, StockUnit::Pcs),
    ("CT-600",      "Current Transformer 600/5A",   ComponentCategory::Instrument,     "Standard",  "600/5A, Class 1",                1_800, StockUnit::Pcs),
    ("CT-800",      "Current Transformer 800/5A",   ComponentCategory::Instrument,     "Standard",  "800/5A, Class 1",                2_500, StockUnit::Pcs),
    ("CT-SET",      "CT Set (3P+1N)",               ComponentCategory::Instrument,     "Standard",  "3 Phase + Neutral, 600/5A",      7_500, StockUnit::Set),
    // Power supply
    ("SMPS-24V",    "SMPS 24V 10A",                 ComponentCategory::PowerSupply,    "Meanwell",  "24V DC, 10A",                    3_500, StockUnit::Pcs),
    // Wiring and accessories
    ("TB-10",       "Terminal Block",               ComponentCategory::Accessory,      "Phoenix",   "10A, 600V, Screw Type",             45, StockUnit::Pcs),
    ("WIRE-1.5",    "FRLS Wire 1.5sqmm",            ComponentCategory::Wiring,         "Finolex",   "1.5sqmm, FRLS, Copper",             85, StockUnit::Meter),
    ("WIRE-2.5",    "FRLS Wire 2.5sqmm",            ComponentCategory::Wiring,         "Finolex",   "2.5sqmm, FRLS, Copper",            120, StockUnit::Meter),
    ("WIRE-4.0",    "FRLS Wire 4.0sqmm",            ComponentCategory::Wiring,         "Finolex",   "4.0sqmm, FRLS, Copper",            180, StockUnit::Meter),
    ("LAMP-LED",    "Indication Lamp LED",          ComponentCategory::Accessory,      "Legrand",   "LED, 220V, 22mm",                  280, StockUnit::Pcs),
    ("PB-22",       "Push Button 22mm",             ComponentCategory::Accessory,      "Legrand",   "22mm, IP55, Red/Green",            320, StockUnit::Pcs),
    ("SELECTOR",    "Selector Switch",              ComponentCategory::Accessory,      "Schneider", "22mm, 3 Position, IP55",           450, StockUnit::Pcs),
];

fn entry_from_row(row: &Row) -> ComponentCatalogEntry {
    let (code, name, category, brand, specifications, unit_price, stock_unit) = *row;
    ComponentCatalogEntry {
        code: code.to_string(),
        name: name.to_string(),
        category,
        brand: brand.to_string(),
        specifications: specifications.to_string(),
        unit_price: Decimal::from(unit_price),
        stock_unit,
    }
}

/// In-memory catalog provider over the reference table.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    /// Every reference entry, in table order. The database seed inserts
    /// exactly this list.
    pub fn entries() -> Vec<ComponentCatalogEntry> {
        REFERENCE_TABLE.iter().map(entry_from_row).collect()
    }

    pub fn entry(code: &str) -> Option<ComponentCatalogEntry> {
        REFERENCE_TABLE.iter().find(|row| row.0 == code).map(entry_from_row)
    }

    /// Default rule set shipped with the reference catalog. Only the MCC
    /// family carries seeded rules; the other panel types are expanded
    /// purely by the standard line tables.
    pub fn default_rules(panel_type: PanelType) -> Vec<BomRule> {
        match panel_type {
            PanelType::Mcc => vec![
                rule("MCCB-100", QuantityRule::PerFeeder, 1, true),
                rule("CON-25", QuantityRule::PerFeeder, 1, true),
                rule("OL-25", QuantityRule::PerFeeder, 1, true),
                rule("BUS-CU-630", QuantityRule::Fixed, 1, true),
            ],
            _ => Vec::new(),
        }
    }
}

fn rule(code: &str, quantity_rule: QuantityRule, base_quantity: u32, mandatory: bool) -> BomRule {
    BomRule {
        component_code: code.to_string(),
        quantity_rule,
        base_quantity,
        mandatory,
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn component(&self, code: &str) -> Result<Option<ComponentCatalogEntry>, CatalogError> {
        Ok(Self::entry(code))
    }

    async fn rules_for(&self, panel_type: PanelType) -> Result<Vec<BomRule>, CatalogError> {
        Ok(Self::default_rules(panel_type))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::catalog::CatalogProvider;
    use crate::domain::component::StockUnit;
    use crate::domain::panel::PanelType;

    use super::StaticCatalog;

    #[test]
    fn codes_are_unique() {
        let entries = StaticCatalog::entries();
        let mut codes: Vec<_> = entries.iter().map(|entry| entry.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), entries.len());
    }

    #[test]
    fn known_entry_carries_reference_price_and_unit() {
        let busbar = StaticCatalog::entry("BUS-CU-1000").expect("busbar entry");
        assert_eq!(busbar.unit_price, Decimal::from(20_000));
        assert_eq!(busbar.stock_unit, StockUnit::Set);
    }

    #[tokio::test]
    async fn provider_returns_none_for_unknown_code() {
        let found = StaticCatalog.component("ENC-9999").await.expect("lookup");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn mcc_rules_reference_catalogued_components() {
        let rules = StaticCatalog.rules_for(PanelType::Mcc).await.expect("rules");
        assert_eq!(rules.len(), 4);
        for rule in &rules {
            assert!(
                StaticCatalog::entry(&rule.component_code).is_some(),
                "rule component `{}` missing from reference table",
                rule.component_code
            );
        }
    }
}
