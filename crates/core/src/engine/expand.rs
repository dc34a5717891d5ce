//! BOM expansion: panel configuration in, ordered priced line items out.
//!
//! Line selection is split into pure spec builders (no I/O) and a single
//! sequential pricing pass over the catalog provider, so the emitted
//! order is fixed by construction regardless of lookup behavior.

use tracing::warn;

use crate::catalog::CatalogProvider;
use crate::domain::bom::BomLineItem;
use crate::domain::component::{ComponentCategory, StockUnit};
use crate::domain::panel::{
    BusbarMaterial, CustomComponent, IpRating, PanelConfiguration, PanelLevel, PanelSize,
    PanelType,
};
use crate::errors::EstimationError;

/// Unpriced line selection. `mandatory` marks the lines whose catalog
/// absence invalidates the whole estimation (enclosure, main incomer);
/// everything else is omitted with a warning when its entry is missing.
#[derive(Clone, Debug)]
pub(crate) struct LineSpec {
    code: &'static str,
    fallback_code: Option<&'static str>,
    name: String,
    category: ComponentCategory,
    brand: String,
    specifications: String,
    quantity: u32,
    unit: StockUnit,
    mandatory: bool,
}

impl LineSpec {
    #[allow(clippy::too_many_arguments)]
    fn new(
        code: &'static str,
        name: impl Into<String>,
        category: ComponentCategory,
        brand: impl Into<String>,
        specifications: impl Into<String>,
        quantity: u32,
        unit: StockUnit,
    ) -> Self {
        Self {
            code,
            fallback_code: None,
            name: name.into(),
            category,
            brand: brand.into(),
            specifications: specifications.into(),
            quantity,
            unit,
            mandatory: false,
        }
    }

    fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    fn with_fallback(mut self, code: &'static str) -> Self {
        self.fallback_code = Some(code);
        self
    }
}

fn enclosure_code(size: PanelSize) -> &'static str {
    match size {
        PanelSize::Size600 => "ENC-600",
        PanelSize::Size800 => "ENC-800",
        PanelSize::Size1000 => "ENC-1000",
        PanelSize::Size1500 => "ENC-1500",
        PanelSize::Size1600 => "ENC-1600",
        PanelSize::Size2100 => "ENC-2100",
    }
}

fn busbar_selection(size: PanelSize, material: BusbarMaterial) -> LineSpec {
    let (copper_code, aluminum_code, rating) = match size {
        PanelSize::Size1600 => ("BUS-CU-800", "BUS-AL-800", "800"),
        PanelSize::Size2100 => ("BUS-CU-1000", "BUS-AL-1000", "1000"),
        _ => ("BUS-CU-630", "BUS-AL-630", "630"),
    };

    match material {
        BusbarMaterial::Copper => LineSpec::new(
            copper_code,
            "Copper Busbar Set",
            ComponentCategory::Busbar,
            "Standard",
            format!("{rating}A, 4P"),
            1,
            StockUnit::Set,
        ),
        // The aluminum range is only stocked at 630A; larger ratings fall
        // back to that price while keeping the requested rating label.
        BusbarMaterial::Aluminum => LineSpec::new(
            aluminum_code,
            "Aluminum Busbar Set",
            ComponentCategory::Busbar,
            "Standard",
            format!("{rating}A, 4P"),
            1,
            StockUnit::Set,
        )
        .with_fallback("BUS-AL-630"),
    }
}

fn power_wire_selection(size: PanelSize) -> (&'static str, &'static str) {
    match size {
        PanelSize::Size1600 => ("WIRE-2.5", "2.5"),
        PanelSize::Size2100 => ("WIRE-4.0", "4.0"),
        _ => ("WIRE-1.5", "1.5"),
    }
}

/// Type-specific and size-conditional lines of a standard panel, in the
/// fixed document order: enclosure, controller block, main incomer,
/// busbar, metering, outgoing feeders, motor control.
#[allow(clippy::too_many_arguments)]
pub(crate) fn standard_line_specs(
    panel_type: PanelType,
    size: PanelSize,
    busbar: BusbarMaterial,
    brand: &str,
    ip_rating: IpRating,
    feeder_count: u32,
    motor_count: u32,
) -> Vec<LineSpec> {
    let mut specs = Vec::new();

    specs.push(
        LineSpec::new(
            enclosure_code(size),
            format!("Enclosure {ip_rating} {size}"),
            ComponentCategory::Enclosure,
            "Standard",
            format!("1.6mm CRCA, Indoor Type, {ip_rating}"),
            1,
            StockUnit::Pcs,
        )
        .mandatory(),
    );

    match panel_type {
        PanelType::Apfc => {
            specs.push(LineSpec::new(
                "APFC-CTRL",
                "APFC Controller",
                ComponentCategory::Controller,
                brand,
                "Digital, 12 Step, RS485",
                1,
                StockUnit::Pcs,
            ));
            if size == PanelSize::Size2100 {
                specs.push(LineSpec::new(
                    "CAP-50",
                    "Capacitor 50kVAR",
                    ComponentCategory::Capacitor,
                    "Standard",
                    "50kVAR, 440V, Dry Type",
                    8,
                    StockUnit::Pcs,
                ));
            } else {
                specs.push(LineSpec::new(
                    "CAP-25",
                    "Capacitor 25kVAR",
                    ComponentCategory::Capacitor,
                    "Standard",
                    "25kVAR, 440V, Dry Type",
                    feeder_count.div_ceil(3).max(2),
                    StockUnit::Pcs,
                ));
            }
        }
        PanelType::Vfd => {
            specs.push(LineSpec::new(
                "VFD-22KW",
                "VFD 22kW",
                ComponentCategory::Controller,
                brand,
                "22kW, 415V, 3P, IP55",
                motor_count.max(1),
                StockUnit::Pcs,
            ));
        }
        PanelType::Plc => {
            specs.push(LineSpec::new(
                "PLC-BASIC",
                "PLC Basic Unit",
                ComponentCategory::Controller,
                brand,
                "24VDC, 14DI/10DO",
                1,
                StockUnit::Pcs,
            ));
        }
        PanelType::Mcc | PanelType::Pcc | PanelType::Lt => {}
    }

    let downgrade_incomer = panel_type == PanelType::Pcc || size == PanelSize::Size2100;
    let incomer = if downgrade_incomer {
        LineSpec::new(
            "MCCB-250",
            "MCCB 250A",
            ComponentCategory::CircuitBreaker,
            brand,
            "250A, 415V, 3P, 50kA",
            1,
            StockUnit::Pcs,
        )
    } else {
        LineSpec::new(
            "MCCB-630",
            "MCCB 630A",
            ComponentCategory::CircuitBreaker,
            brand,
            "630A, 415V, 4P, 65kA",
            1,
            StockUnit::Pcs,
        )
    };
    specs.push(incomer.mandatory());

    specs.push(busbar_selection(size, busbar));

    if matches!(size, PanelSize::Size1600 | PanelSize::Size2100) {
        specs.push(LineSpec::new(
            "MTR-MULTI",
            "Multi-function Meter",
            ComponentCategory::Meter,
            brand,
            "3 Phase, 4 Wire, RS485",
            1,
            StockUnit::Pcs,
        ));
        specs.push(LineSpec::new(
            "CT-SET",
            "CT Set (3P+1N)",
            ComponentCategory::Instrument,
            "Standard",
            "3 Phase + Neutral, 600/5A",
            1,
            StockUnit::Set,
        ));
    }

    // 40% of outgoing feeders go on the heavier breaker, rounded up.
    let mccb_count = (feeder_count * 2).div_ceil(5);
    let mcb_count = feeder_count - mccb_count;
    if mccb_count > 0 {
        specs.push(LineSpec::new(
            "MCB-63",
            "MCB 63A",
            ComponentCategory::CircuitBreaker,
            brand,
            "63A, 415V, 3P, 10kA",
            mccb_count,
            StockUnit::Pcs,
        ));
    }
    if mcb_count > 0 {
        specs.push(LineSpec::new(
            "MCB-32",
            "MCB 32A",
            ComponentCategory::CircuitBreaker,
            brand,
            "32A, 240V, SPN, 10kA",
            mcb_count,
            StockUnit::Pcs,
        ));
    }

    if motor_count > 0 {
        let small_tier = motor_count <= 5;
        let (contactor_code, contactor_rating) =
            if small_tier { ("CON-25", "25A") } else { ("CON-40", "40A") };
        let (overload_code, overload_rating) =
            if small_tier { ("OL-25", "18-25A") } else { ("OL-40", "30-40A") };

        specs.push(LineSpec::new(
            contactor_code,
            format!("Contactor {contactor_rating}"),
            ComponentCategory::Contactor,
            brand,
            format!("{contactor_rating}, 415V, 3P, AC3"),
            motor_count,
            StockUnit::Pcs,
        ));
        specs.push(LineSpec::new(
            overload_code,
            format!("Overload Relay {overload_rating}"),
            ComponentCategory::Protection,
            brand,
            format!("{overload_rating}, Adjustable, Thermal"),
            motor_count,
            StockUnit::Pcs,
        ));
    }

    specs
}

/// Wiring, terminals and operator accessories appended to every
/// expansion path. Quantities scale with feeder and motor counts.
pub(crate) fn common_line_specs(
    size: PanelSize,
    feeder_count: u32,
    motor_count: u32,
) -> Vec<LineSpec> {
    let mut specs = Vec::new();

    specs.push(LineSpec::new(
        "TB-10",
        "Terminal Block",
        ComponentCategory::Accessory,
        "Phoenix",
        "10A, 600V, Screw Type",
        feeder_count * 6 + motor_count * 8 + 20,
        StockUnit::Pcs,
    ));

    let (power_wire_code, gauge) = power_wire_selection(size);
    specs.push(LineSpec::new(
        power_wire_code,
        format!("FRLS Wire {gauge}sqmm"),
        ComponentCategory::Accessory,
        "Finolex",
        format!("{gauge}sqmm, FRLS, Copper"),
        150 + feeder_count * 10 + motor_count * 15,
        StockUnit::Meter,
    ));

    specs.push(LineSpec::new(
        "WIRE-1.5",
        "FRLS Wire 1.5sqmm",
        ComponentCategory::Accessory,
        "Finolex",
        "1.5sqmm, FRLS, Copper",
        50 + feeder_count * 5 + motor_count * 10,
        StockUnit::Meter,
    ));

    specs.push(LineSpec::new(
        "LAMP-LED",
        "Indication Lamp LED",
        ComponentCategory::Accessory,
        "Legrand",
        "LED, 220V, 22mm",
        6 + feeder_count.div_ceil(4) + motor_count,
        StockUnit::Pcs,
    ));

    specs.push(LineSpec::new(
        "PB-22",
        "Push Button 22mm",
        ComponentCategory::Accessory,
        "Legrand",
        "22mm, IP55, Red/Green",
        motor_count * 2 + 2,
        StockUnit::Pcs,
    ));

    if motor_count > 0 {
        specs.push(LineSpec::new(
            "SELECTOR",
            "Selector Switch",
            ComponentCategory::Accessory,
            "Schneider",
            "22mm, 3 Position, IP55",
            motor_count,
            StockUnit::Pcs,
        ));
    }

    specs
}

/// Resolve prices for the selected lines, in selection order. Optional
/// lines with no catalog entry are dropped with a warning; a missing
/// mandatory line aborts the estimation.
pub(crate) async fn price_line_specs<P: CatalogProvider>(
    provider: &P,
    specs: Vec<LineSpec>,
) -> Result<Vec<BomLineItem>, EstimationError> {
    let mut items = Vec::with_capacity(specs.len());

    for spec in specs {
        let mut resolved_code = spec.code;
        let mut entry = provider.component(spec.code).await?;

        if entry.is_none() {
            if let Some(fallback) = spec.fallback_code {
                entry = provider.component(fallback).await?;
                resolved_code = fallback;
            }
        }

        let Some(entry) = entry else {
            if spec.mandatory {
                return Err(EstimationError::MandatoryComponentMissing {
                    code: spec.code.to_string(),
                });
            }
            warn!(
                component_code = spec.code,
                line = %spec.name,
                "catalog entry missing; optional line omitted from BOM"
            );
            continue;
        };

        items.push(BomLineItem {
            component_code: Some(resolved_code.to_string()),
            name: spec.name,
            category: spec.category,
            brand: spec.brand,
            specifications: spec.specifications,
            quantity: spec.quantity,
            unit_price: entry.unit_price,
            unit: spec.unit,
        });
    }

    Ok(items)
}

/// Ad-hoc lines of a custom panel, emitted verbatim.
pub(crate) fn custom_lines(components: &[CustomComponent]) -> Vec<BomLineItem> {
    components
        .iter()
        .map(|component| BomLineItem {
            component_code: None,
            name: component.name.clone(),
            category: component.category,
            brand: component.brand.clone(),
            specifications: component.specifications.clone(),
            quantity: component.quantity,
            unit_price: component.unit_price,
            unit: component.unit.unwrap_or(StockUnit::Pcs),
        })
        .collect()
}

/// Composite-panel composer: one full expansion per level in input
/// order, every resulting line name prefixed with its level type. Costs
/// are rolled up once over the concatenation, by the caller.
pub(crate) async fn expand_levels<P: CatalogProvider>(
    provider: &P,
    levels: &[PanelLevel],
    shared: &PanelConfiguration,
) -> Result<Vec<BomLineItem>, EstimationError> {
    let mut items = Vec::new();

    for level in levels {
        let mut specs = standard_line_specs(
            level.level_type,
            shared.panel_size,
            shared.busbar,
            &shared.brand_preference,
            shared.ip_rating,
            level.feeder_count,
            level.motor_count,
        );
        specs.extend(common_line_specs(shared.panel_size, level.feeder_count, level.motor_count));

        let mut batch = price_line_specs(provider, specs).await?;
        for line in &mut batch {
            line.name = format!("{} Level - {}", level.level_type, line.name);
        }
        items.extend(batch);
    }

    Ok(items)
}
