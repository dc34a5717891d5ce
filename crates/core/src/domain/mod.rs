pub mod bom;
pub mod component;
pub mod costing;
pub mod panel;
