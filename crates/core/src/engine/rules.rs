//! Rule-driven expansion against a configured rule store.
//!
//! Unlike the standard tables, the rule path keeps zero-quantity lines:
//! a per-feeder rule on a feederless panel still appears in the output so
//! consumers see the full rule set exercised.

use tracing::warn;

use crate::catalog::CatalogProvider;
use crate::domain::bom::BomLineItem;
use crate::domain::panel::{PanelConfiguration, PanelType};
use crate::errors::EstimationError;

use super::expand::{common_line_specs, price_line_specs};

pub(crate) async fn expand_from_rules<P: CatalogProvider>(
    provider: &P,
    panel_type: PanelType,
    config: &PanelConfiguration,
) -> Result<Vec<BomLineItem>, EstimationError> {
    let rules = provider.rules_for(panel_type).await?;
    let mut items = Vec::with_capacity(rules.len());

    for rule in &rules {
        let Some(entry) = provider.component(&rule.component_code).await? else {
            warn!(
                component_code = %rule.component_code,
                panel_type = %panel_type,
                "rule component missing from catalog; line omitted from BOM"
            );
            continue;
        };

        let quantity =
            rule.quantity_rule.resolve(rule.base_quantity, config.feeder_count, config.motor_count);
        let brand = if config.brand_preference.trim().is_empty() {
            entry.brand.clone()
        } else {
            config.brand_preference.clone()
        };

        items.push(BomLineItem {
            component_code: Some(entry.code.clone()),
            name: entry.name.clone(),
            category: entry.category,
            brand,
            specifications: entry.specifications.clone(),
            quantity,
            unit_price: entry.unit_price,
            unit: entry.stock_unit,
        });
    }

    let commons =
        common_line_specs(config.panel_size, config.feeder_count, config.motor_count);
    items.extend(price_line_specs(provider, commons).await?);

    Ok(items)
}

#[cfg(test)]
mod tests {
    use crate::catalog::StaticCatalog;
    use crate::domain::panel::{PanelConfiguration, PanelType};
    use crate::engine::Estimator;

    #[tokio::test]
    async fn zero_count_rule_lines_are_kept_in_the_output() {
        let estimator = Estimator::new(StaticCatalog);
        let config = PanelConfiguration {
            feeder_count: 0,
            motor_count: 0,
            ..PanelConfiguration::standard(PanelType::Mcc)
        };
        let items =
            estimator.expand_from_rules(PanelType::Mcc, &config).await.expect("expand");

        // Four seeded MCC rules plus the five constant common lines.
        assert_eq!(items.len(), 9);

        let breaker = items
            .iter()
            .find(|item| item.component_code.as_deref() == Some("MCCB-100"))
            .expect("per-feeder rule line");
        assert_eq!(breaker.quantity, 0, "per-feeder line stays, at zero quantity");

        let busbar = items
            .iter()
            .find(|item| item.component_code.as_deref() == Some("BUS-CU-630"))
            .expect("fixed rule line");
        assert_eq!(busbar.quantity, 1);
    }

    #[tokio::test]
    async fn rule_quantities_scale_with_the_configured_counts() {
        let estimator = Estimator::new(StaticCatalog);
        let config = PanelConfiguration {
            feeder_count: 6,
            motor_count: 2,
            ..PanelConfiguration::standard(PanelType::Mcc)
        };
        let items =
            estimator.expand_from_rules(PanelType::Mcc, &config).await.expect("expand");

        let contactor = items
            .iter()
            .find(|item| item.component_code.as_deref() == Some("CON-25"))
            .expect("contactor rule line");
        assert_eq!(contactor.quantity, 6);
        assert_eq!(contactor.brand, "schneider", "preference overrides catalog brand");
    }

    #[tokio::test]
    async fn empty_brand_preference_keeps_the_catalog_brand() {
        let estimator = Estimator::new(StaticCatalog);
        let config = PanelConfiguration {
            brand_preference: String::new(),
            ..PanelConfiguration::standard(PanelType::Mcc)
        };
        let items =
            estimator.expand_from_rules(PanelType::Mcc, &config).await.expect("expand");

        let contactor = items
            .iter()
            .find(|item| item.component_code.as_deref() == Some("CON-25"))
            .expect("contactor rule line");
        assert_eq!(contactor.brand, "ABB");
    }

    #[tokio::test]
    async fn panel_type_without_rules_expands_to_commons_only() {
        let estimator = Estimator::new(StaticCatalog);
        let config = PanelConfiguration::standard(PanelType::Pcc);
        let items =
            estimator.expand_from_rules(PanelType::Pcc, &config).await.expect("expand");

        assert!(items.iter().all(|item| item.name != "MCCB 100A"));
        assert_eq!(items.first().map(|item| item.name.as_str()), Some("Terminal Block"));
    }
}
