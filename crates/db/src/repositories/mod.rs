use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use panelquote_core::domain::bom::BomRule;
use panelquote_core::domain::component::ComponentCatalogEntry;
use panelquote_core::domain::panel::PanelType;

pub mod component;
pub mod panel_type;
pub mod quotation;

pub use component::{ComponentFilter, SqlComponentRepository};
pub use panel_type::{PanelTypeRecord, SqlPanelTypeRepository};
pub use quotation::{
    NewQuotation, QuotationRecord, QuotationStatus, QuotationWithItems, SqlQuotationRepository,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ComponentRepository: Send + Sync {
    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<ComponentCatalogEntry>, RepositoryError>;

    async fn list(&self, filter: ComponentFilter)
        -> Result<Vec<ComponentCatalogEntry>, RepositoryError>;

    async fn insert(&self, entry: &ComponentCatalogEntry) -> Result<i64, RepositoryError>;

    async fn update_price(&self, code: &str, unit_price: Decimal)
        -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait PanelTypeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<PanelTypeRecord>, RepositoryError>;

    async fn find_by_code(&self, code: &str)
        -> Result<Option<PanelTypeRecord>, RepositoryError>;

    async fn rules_for(&self, panel_type: PanelType) -> Result<Vec<BomRule>, RepositoryError>;
}

#[async_trait]
pub trait QuotationRepository: Send + Sync {
    async fn create(
        &self,
        quotation: NewQuotation,
        year: i32,
    ) -> Result<(i64, String), RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<QuotationWithItems>, RepositoryError>;

    async fn list(&self, limit: i64) -> Result<Vec<QuotationRecord>, RepositoryError>;

    async fn update_status(
        &self,
        id: i64,
        status: QuotationStatus,
    ) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

/// Monetary columns are stored as TEXT; sqlite has no decimal type and a
/// REAL column would reintroduce the float drift the engine avoids.
pub(crate) fn decode_decimal(column: &str, raw: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(raw)
        .map_err(|_| RepositoryError::Decode(format!("column `{column}` holds non-decimal `{raw}`")))
}

pub(crate) fn decode_quantity(column: &str, raw: i64) -> Result<u32, RepositoryError> {
    u32::try_from(raw)
        .map_err(|_| RepositoryError::Decode(format!("column `{column}` holds negative `{raw}`")))
}
