use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use panelquote_core::domain::bom::BomRule;
use panelquote_core::domain::panel::PanelType;
use panelquote_db::repositories::{
    PanelTypeRecord, PanelTypeRepository, SqlPanelTypeRepository,
};

use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelTypeDetail {
    #[serde(flatten)]
    pub panel_type: PanelTypeRecord,
    pub bom_rules: Vec<BomRule>,
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<PanelTypeRecord>>, ApiError> {
    let repository = SqlPanelTypeRepository::new(state.db_pool.clone());
    Ok(Json(repository.list().await?))
}

pub async fn get_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<PanelTypeDetail>, ApiError> {
    let repository = SqlPanelTypeRepository::new(state.db_pool.clone());

    let record = repository
        .find_by_code(&code.trim().to_ascii_uppercase())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("panel type `{code}` not found")))?;

    let bom_rules = match record.code.parse::<PanelType>() {
        Ok(panel_type) => repository.rules_for(panel_type).await?,
        Err(_) => Vec::new(),
    };

    Ok(Json(PanelTypeDetail { panel_type: record, bom_rules }))
}
