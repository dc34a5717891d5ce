pub mod static_catalog;

use async_trait::async_trait;

use crate::domain::bom::BomRule;
use crate::domain::component::ComponentCatalogEntry;
use crate::domain::panel::PanelType;
use crate::errors::CatalogError;

pub use static_catalog::StaticCatalog;

/// Read-only boundary to the component/rule store.
///
/// A lookup that finds nothing returns `Ok(None)`; only transport or
/// decode failures surface as errors. Whether a missing entry aborts an
/// estimation is the expander's call, not the provider's.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn component(&self, code: &str) -> Result<Option<ComponentCatalogEntry>, CatalogError>;

    async fn rules_for(&self, panel_type: PanelType) -> Result<Vec<BomRule>, CatalogError>;
}

#[async_trait]
impl<P: CatalogProvider + ?Sized> CatalogProvider for &P {
    async fn component(&self, code: &str) -> Result<Option<ComponentCatalogEntry>, CatalogError> {
        (**self).component(code).await
    }

    async fn rules_for(&self, panel_type: PanelType) -> Result<Vec<BomRule>, CatalogError> {
        (**self).rules_for(panel_type).await
    }
}
