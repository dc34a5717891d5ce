use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use panelquote_core::domain::component::ComponentCatalogEntry;
use panelquote_db::repositories::{
    ComponentFilter, ComponentRepository, SqlComponentRepository,
};

use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ComponentQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCreated {
    pub success: bool,
    pub message: &'static str,
    pub component_code: String,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ComponentQuery>,
) -> Result<Json<Vec<ComponentCatalogEntry>>, ApiError> {
    let repository = SqlComponentRepository::new(state.db_pool.clone());
    let entries = repository
        .list(ComponentFilter { category: query.category, brand: query.brand })
        .await?;
    Ok(Json(entries))
}

pub async fn get_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ComponentCatalogEntry>, ApiError> {
    let repository = SqlComponentRepository::new(state.db_pool.clone());
    let entry = repository
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("component `{code}` not found")))?;
    Ok(Json(entry))
}

pub async fn create(
    State(state): State<AppState>,
    Json(entry): Json<ComponentCatalogEntry>,
) -> Result<(StatusCode, Json<ComponentCreated>), ApiError> {
    if entry.code.trim().is_empty() {
        return Err(ApiError::BadRequest("component code must not be empty".to_string()));
    }
    if entry.unit_price.is_sign_negative() {
        return Err(ApiError::BadRequest("unit price must not be negative".to_string()));
    }

    let repository = SqlComponentRepository::new(state.db_pool.clone());
    if repository.find_by_code(&entry.code).await?.is_some() {
        return Err(ApiError::Conflict(format!("component code `{}` already exists", entry.code)));
    }

    repository.insert(&entry).await?;

    Ok((
        StatusCode::CREATED,
        Json(ComponentCreated {
            success: true,
            message: "Component added successfully",
            component_code: entry.code,
        }),
    ))
}
