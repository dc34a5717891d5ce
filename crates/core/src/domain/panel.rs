use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::component::{ComponentCategory, StockUnit};
use crate::errors::EstimationError;

/// The standard panel families the estimation rules know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PanelType {
    Mcc,
    Pcc,
    Lt,
    Vfd,
    Apfc,
    Plc,
}

impl PanelType {
    pub const ALL: [PanelType; 6] = [
        PanelType::Mcc,
        PanelType::Pcc,
        PanelType::Lt,
        PanelType::Vfd,
        PanelType::Apfc,
        PanelType::Plc,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PanelType::Mcc => "MCC",
            PanelType::Pcc => "PCC",
            PanelType::Lt => "LT",
            PanelType::Vfd => "VFD",
            PanelType::Apfc => "APFC",
            PanelType::Plc => "PLC",
        }
    }
}

impl std::fmt::Display for PanelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for PanelType {
    type Err = EstimationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MCC" => Ok(Self::Mcc),
            "PCC" => Ok(Self::Pcc),
            "LT" => Ok(Self::Lt),
            "VFD" => Ok(Self::Vfd),
            "APFC" => Ok(Self::Apfc),
            "PLC" => Ok(Self::Plc),
            other => Err(EstimationError::Validation(format!(
                "unknown panel type `{other}` (expected MCC|PCC|LT|VFD|APFC|PLC)"
            ))),
        }
    }
}

/// Nominal enclosure dimensions. Pricing tiers are keyed on these six
/// sizes; anything else resolves to the 800x800x300 default tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelSize {
    #[serde(rename = "600x600x200")]
    Size600,
    #[default]
    #[serde(rename = "800x800x300")]
    Size800,
    #[serde(rename = "1000x1000x400")]
    Size1000,
    #[serde(rename = "1500x1000x400")]
    Size1500,
    #[serde(rename = "1600x1700x600")]
    Size1600,
    #[serde(rename = "2100x2900x1000")]
    Size2100,
}

impl PanelSize {
    pub fn label(self) -> &'static str {
        match self {
            PanelSize::Size600 => "600x600x200",
            PanelSize::Size800 => "800x800x300",
            PanelSize::Size1000 => "1000x1000x400",
            PanelSize::Size1500 => "1500x1000x400",
            PanelSize::Size1600 => "1600x1700x600",
            PanelSize::Size2100 => "2100x2900x1000",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "600x600x200" => Some(Self::Size600),
            "800x800x300" => Some(Self::Size800),
            "1000x1000x400" => Some(Self::Size1000),
            "1500x1000x400" => Some(Self::Size1500),
            "1600x1700x600" => Some(Self::Size1600),
            "2100x2900x1000" => Some(Self::Size2100),
            _ => None,
        }
    }

    /// Lossy parse used at the request boundary: unknown labels fall back
    /// to the default tier instead of failing the estimation.
    pub fn parse_lossy(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }
}

impl std::fmt::Display for PanelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusbarMaterial {
    #[default]
    Copper,
    Aluminum,
}

impl std::str::FromStr for BusbarMaterial {
    type Err = EstimationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "copper" => Ok(Self::Copper),
            "aluminum" | "aluminium" => Ok(Self::Aluminum),
            other => Err(EstimationError::Validation(format!(
                "unknown busbar material `{other}` (expected copper|aluminum)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpRating {
    #[serde(rename = "IP42")]
    Ip42,
    #[serde(rename = "IP54")]
    Ip54,
    #[default]
    #[serde(rename = "IP55")]
    Ip55,
    #[serde(rename = "IP65")]
    Ip65,
}

impl IpRating {
    pub fn label(self) -> &'static str {
        match self {
            IpRating::Ip42 => "IP42",
            IpRating::Ip54 => "IP54",
            IpRating::Ip55 => "IP55",
            IpRating::Ip65 => "IP65",
        }
    }
}

impl std::fmt::Display for IpRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for IpRating {
    type Err = EstimationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "IP42" => Ok(Self::Ip42),
            "IP54" => Ok(Self::Ip54),
            "IP55" => Ok(Self::Ip55),
            "IP65" => Ok(Self::Ip65),
            other => Err(EstimationError::Validation(format!(
                "unknown IP rating `{other}` (expected IP42|IP54|IP55|IP65)"
            ))),
        }
    }
}

/// One electrically distinct section of a composite panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLevel {
    pub level_type: PanelType,
    pub feeder_count: u32,
    pub motor_count: u32,
}

/// Ad-hoc line supplied verbatim for `custom` panels. No catalog lookup
/// happens for these; the caller owns name, price and quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomComponent {
    pub name: String,
    pub category: ComponentCategory,
    pub brand: String,
    #[serde(default)]
    pub specifications: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub unit: Option<StockUnit>,
}

/// Which expansion path an estimation request takes. Keeping this a
/// closed variant (rather than a stringly panel type with optional level
/// and custom lists) makes the dispatch in the expander exhaustive.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelSelection {
    Standard(PanelType),
    MultiLevel(Vec<PanelLevel>),
    Custom(Vec<CustomComponent>),
}

/// Immutable input of one estimation request.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelConfiguration {
    pub selection: PanelSelection,
    pub feeder_count: u32,
    pub motor_count: u32,
    pub panel_size: PanelSize,
    pub busbar: BusbarMaterial,
    pub brand_preference: String,
    pub ip_rating: IpRating,
}

impl PanelConfiguration {
    /// Standard single-type configuration with the default request
    /// parameters (4 feeders, 1 motor, 800 tier, copper, IP55).
    pub fn standard(panel_type: PanelType) -> Self {
        Self {
            selection: PanelSelection::Standard(panel_type),
            feeder_count: 4,
            motor_count: 1,
            panel_size: PanelSize::default(),
            busbar: BusbarMaterial::Copper,
            brand_preference: "schneider".to_string(),
            ip_rating: IpRating::Ip55,
        }
    }

    pub fn validate(&self) -> Result<(), EstimationError> {
        match &self.selection {
            PanelSelection::Custom(components) if components.is_empty() => {
                Err(EstimationError::validation(
                    "custom panel requires at least one custom component",
                ))
            }
            PanelSelection::Custom(components) => {
                if let Some(line) = components.iter().find(|component| component.quantity == 0) {
                    return Err(EstimationError::Validation(format!(
                        "custom component `{}` has zero quantity",
                        line.name
                    )));
                }
                Ok(())
            }
            PanelSelection::MultiLevel(levels) if levels.is_empty() => Err(
                EstimationError::validation("multi-level panel requires at least one level"),
            ),
            _ => Ok(()),
        }
    }
}
