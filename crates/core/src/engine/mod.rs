pub mod expand;
pub mod quantity;
pub mod rollup;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogProvider;
use crate::domain::bom::BomLineItem;
use crate::domain::costing::CostBreakdown;
use crate::domain::panel::{PanelConfiguration, PanelSelection, PanelType};
use crate::errors::EstimationError;

use self::rollup::CostCalculator;

/// Complete result of one estimation request: the ordered priced parts
/// list and its cost roll-up. Both are built fresh per request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimation {
    pub bom_items: Vec<BomLineItem>,
    pub cost_breakdown: CostBreakdown,
}

/// The estimation engine. Stateless apart from its catalog handle and
/// costing percentages; concurrent estimations never interfere.
#[derive(Clone, Debug)]
pub struct Estimator<P> {
    provider: P,
    costing: CostCalculator,
}

impl<P: CatalogProvider> Estimator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, costing: CostCalculator::default() }
    }

    pub fn with_costing(provider: P, costing: CostCalculator) -> Self {
        Self { provider, costing }
    }

    /// Sole public entry point for consumers: expand the configuration
    /// into a BOM and roll its costs up. Either a complete, internally
    /// consistent result is returned or the estimation fails outright.
    pub async fn estimate(
        &self,
        config: &PanelConfiguration,
    ) -> Result<Estimation, EstimationError> {
        let bom_items = self.expand(config).await?;
        let cost_breakdown = self.costing.rollup(&bom_items);
        Ok(Estimation { bom_items, cost_breakdown })
    }

    /// Expand a configuration into its ordered line items without the
    /// cost roll-up.
    pub async fn expand(
        &self,
        config: &PanelConfiguration,
    ) -> Result<Vec<BomLineItem>, EstimationError> {
        config.validate()?;

        match &config.selection {
            PanelSelection::Standard(panel_type) => {
                let mut specs = expand::standard_line_specs(
                    *panel_type,
                    config.panel_size,
                    config.busbar,
                    &config.brand_preference,
                    config.ip_rating,
                    config.feeder_count,
                    config.motor_count,
                );
                specs.extend(expand::common_line_specs(
                    config.panel_size,
                    config.feeder_count,
                    config.motor_count,
                ));
                expand::price_line_specs(&self.provider, specs).await
            }
            PanelSelection::Custom(components) => {
                let mut items = expand::custom_lines(components);
                let commons = expand::common_line_specs(
                    config.panel_size,
                    config.feeder_count,
                    config.motor_count,
                );
                items.extend(expand::price_line_specs(&self.provider, commons).await?);
                Ok(items)
            }
            PanelSelection::MultiLevel(levels) => {
                expand::expand_levels(&self.provider, levels, config).await
            }
        }
    }

    /// Expand through the configured rule store instead of the standard
    /// tables (the catalog-backed variant). Rule lines keep their
    /// resolved quantity even when it is zero.
    pub async fn expand_from_rules(
        &self,
        panel_type: PanelType,
        config: &PanelConfiguration,
    ) -> Result<Vec<BomLineItem>, EstimationError> {
        config.validate()?;
        rules::expand_from_rules(&self.provider, panel_type, config).await
    }

    pub fn costing(&self) -> &CostCalculator {
        &self.costing
    }
}
