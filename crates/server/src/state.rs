use std::sync::Arc;

use panelquote_core::engine::rollup::CostCalculator;
use panelquote_core::engine::Estimator;
use panelquote_db::{DbCatalog, DbPool};

use crate::bootstrap::Application;
use crate::document::{DocumentError, DocumentRenderer};

/// Shared handles for the request handlers. Everything inside is cheap
/// to clone; the estimator itself is stateless.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub estimator: Arc<Estimator<DbCatalog>>,
    pub documents: Arc<DocumentRenderer>,
}

impl AppState {
    pub fn new(app: &Application) -> Result<Self, DocumentError> {
        let costing = CostCalculator::new(
            app.config.costing.profit_margin,
            app.config.costing.tax_percentage,
        );
        let estimator =
            Estimator::with_costing(DbCatalog::new(app.db_pool.clone()), costing);

        Ok(Self {
            db_pool: app.db_pool.clone(),
            estimator: Arc::new(estimator),
            documents: Arc::new(DocumentRenderer::new()?),
        })
    }
}
