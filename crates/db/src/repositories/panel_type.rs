use async_trait::async_trait;
use serde::Serialize;
use sqlx::Row;

use panelquote_core::domain::bom::BomRule;
use panelquote_core::domain::panel::PanelType;

use super::{decode_quantity, PanelTypeRepository, RepositoryError};
use crate::DbPool;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelTypeRecord {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
}

pub struct SqlPanelTypeRepository {
    pool: DbPool,
}

impl SqlPanelTypeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> PanelTypeRecord {
    PanelTypeRecord {
        id: row.get("id"),
        code: row.get("panel_code"),
        name: row.get("name"),
        description: row.get("description"),
    }
}

#[async_trait]
impl PanelTypeRepository for SqlPanelTypeRepository {
    async fn list(&self) -> Result<Vec<PanelTypeRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, panel_code, name, description
             FROM panel_types WHERE is_active = 1 ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<PanelTypeRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, panel_code, name, description
             FROM panel_types WHERE panel_code = ?",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    async fn rules_for(&self, panel_type: PanelType) -> Result<Vec<BomRule>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT c.component_code, br.quantity_rule, br.base_quantity, br.is_mandatory
             FROM bom_rules br
             JOIN panel_types pt ON br.panel_type_id = pt.id
             JOIN components c ON br.component_id = c.id
             WHERE pt.panel_code = ?
             ORDER BY br.id",
        )
        .bind(panel_type.code())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let raw_rule = row.get::<String, _>("quantity_rule");
                Ok(BomRule {
                    component_code: row.get("component_code"),
                    quantity_rule: raw_rule
                        .parse()
                        .map_err(|error| RepositoryError::Decode(format!("{error}")))?,
                    base_quantity: decode_quantity(
                        "base_quantity",
                        row.get::<i64, _>("base_quantity"),
                    )?,
                    mandatory: row.get::<i64, _>("is_mandatory") != 0,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use panelquote_core::domain::bom::QuantityRule;
    use panelquote_core::domain::panel::PanelType;

    use super::super::PanelTypeRepository;
    use super::SqlPanelTypeRepository;
    use crate::{connect_with_settings, fixtures::SeedDataset, migrations};

    async fn seeded_repository() -> SqlPanelTypeRepository {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrate");
        SeedDataset::load(&pool).await.expect("seed");
        SqlPanelTypeRepository::new(pool)
    }

    #[tokio::test]
    async fn all_panel_families_are_seeded_and_listable() {
        let repository = seeded_repository().await;
        let records = repository.list().await.expect("list");
        assert_eq!(records.len(), PanelType::ALL.len());
    }

    #[tokio::test]
    async fn mcc_rules_join_back_to_component_codes() {
        let repository = seeded_repository().await;
        let rules = repository.rules_for(PanelType::Mcc).await.expect("rules");

        assert_eq!(rules.len(), 4);
        assert!(rules
            .iter()
            .any(|rule| rule.component_code == "MCCB-100"
                && rule.quantity_rule == QuantityRule::PerFeeder));
        assert!(rules
            .iter()
            .any(|rule| rule.component_code == "BUS-CU-630"
                && rule.quantity_rule == QuantityRule::Fixed));
    }

    #[tokio::test]
    async fn panel_type_without_rules_yields_empty_set() {
        let repository = seeded_repository().await;
        let rules = repository.rules_for(PanelType::Pcc).await.expect("rules");
        assert!(rules.is_empty());
    }
}
