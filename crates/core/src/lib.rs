pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;

pub use catalog::{CatalogProvider, StaticCatalog};
pub use domain::bom::{BomLineItem, BomRule, QuantityRule};
pub use domain::component::{ComponentCatalogEntry, ComponentCategory, StockUnit};
pub use domain::costing::CostBreakdown;
pub use domain::panel::{
    BusbarMaterial, CustomComponent, IpRating, PanelConfiguration, PanelLevel, PanelSelection,
    PanelSize, PanelType,
};
pub use engine::rollup::CostCalculator;
pub use engine::{Estimation, Estimator};
pub use errors::{CatalogError, EstimationError};
