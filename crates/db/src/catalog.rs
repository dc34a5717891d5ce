use async_trait::async_trait;

use panelquote_core::catalog::CatalogProvider;
use panelquote_core::domain::bom::BomRule;
use panelquote_core::domain::component::ComponentCatalogEntry;
use panelquote_core::domain::panel::PanelType;
use panelquote_core::errors::CatalogError;

use crate::repositories::{
    ComponentRepository, PanelTypeRepository, RepositoryError, SqlComponentRepository,
    SqlPanelTypeRepository,
};
use crate::DbPool;

/// Catalog provider over the component and rule tables. Read-only: the
/// estimation path never writes through this handle.
pub struct DbCatalog {
    components: SqlComponentRepository,
    panel_types: SqlPanelTypeRepository,
}

impl DbCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self {
            components: SqlComponentRepository::new(pool.clone()),
            panel_types: SqlPanelTypeRepository::new(pool),
        }
    }
}

fn catalog_error(error: RepositoryError) -> CatalogError {
    match error {
        RepositoryError::Database(source) => CatalogError::Unavailable(source.to_string()),
        RepositoryError::Decode(message) => CatalogError::Decode(message),
    }
}

#[async_trait]
impl CatalogProvider for DbCatalog {
    async fn component(&self, code: &str) -> Result<Option<ComponentCatalogEntry>, CatalogError> {
        self.components.find_by_code(code).await.map_err(catalog_error)
    }

    async fn rules_for(&self, panel_type: PanelType) -> Result<Vec<BomRule>, CatalogError> {
        self.panel_types.rules_for(panel_type).await.map_err(catalog_error)
    }
}

#[cfg(test)]
mod tests {
    use panelquote_core::catalog::{CatalogProvider, StaticCatalog};
    use panelquote_core::domain::panel::{PanelConfiguration, PanelType};
    use panelquote_core::engine::Estimator;

    use super::DbCatalog;
    use crate::{connect_with_settings, fixtures::SeedDataset, migrations};

    async fn seeded_catalog() -> DbCatalog {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrate");
        SeedDataset::load(&pool).await.expect("seed");
        DbCatalog::new(pool)
    }

    #[tokio::test]
    async fn seeded_catalog_matches_the_static_reference_entries() {
        let catalog = seeded_catalog().await;

        for reference in StaticCatalog::entries() {
            let stored = catalog
                .component(&reference.code)
                .await
                .expect("lookup")
                .unwrap_or_else(|| panic!("`{}` missing after seed", reference.code));
            assert_eq!(stored, reference, "seeded `{}` drifted from reference", reference.code);
        }
    }

    #[tokio::test]
    async fn estimation_against_db_catalog_matches_the_static_path() {
        let catalog = seeded_catalog().await;
        let config = PanelConfiguration::standard(PanelType::Mcc);

        let from_db = Estimator::new(catalog).estimate(&config).await.expect("db estimate");
        let from_static =
            Estimator::new(StaticCatalog).estimate(&config).await.expect("static estimate");

        assert_eq!(from_db, from_static, "catalog-backed and fallback paths must not drift");
    }
}
