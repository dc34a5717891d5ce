use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use panelquote_core::domain::bom::BomLineItem;
use panelquote_core::domain::costing::CostBreakdown;
use panelquote_db::repositories::{
    NewQuotation, QuotationRecord, QuotationRepository, QuotationStatus, QuotationWithItems,
    SqlQuotationRepository,
};

use crate::document::RenderedDocument;
use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotationRequest {
    pub customer_name: String,
    #[serde(default)]
    pub customer_address: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub tax_number: String,
    pub panel_type: String,
    #[serde(default)]
    pub panel_size: String,
    #[serde(default)]
    pub busbar_type: String,
    #[serde(default)]
    pub brand_preference: String,
    #[serde(default)]
    pub ip_rating: String,
    #[serde(default)]
    pub feeder_count: u32,
    #[serde(default)]
    pub motor_count: u32,
    #[serde(default)]
    pub special_requirements: String,
    pub bom_items: Vec<BomLineItem>,
    pub cost_breakdown: CostBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationCreated {
    pub success: bool,
    pub quotation_id: i64,
    pub quotation_number: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuotationQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdated {
    pub success: bool,
    pub message: &'static str,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateQuotationRequest>,
) -> Result<(StatusCode, Json<QuotationCreated>), ApiError> {
    if request.customer_name.trim().is_empty() {
        return Err(ApiError::BadRequest("customer name is required".to_string()));
    }
    if request.bom_items.is_empty() {
        return Err(ApiError::BadRequest(
            "a quotation requires at least one BOM line".to_string(),
        ));
    }

    let repository = SqlQuotationRepository::new(state.db_pool.clone());
    let quotation = NewQuotation {
        customer_name: request.customer_name,
        customer_address: request.customer_address,
        customer_email: request.customer_email,
        customer_phone: request.customer_phone,
        tax_number: request.tax_number,
        panel_type: request.panel_type,
        panel_size: request.panel_size,
        busbar_type: request.busbar_type,
        brand_preference: request.brand_preference,
        ip_rating: request.ip_rating,
        feeder_count: request.feeder_count,
        motor_count: request.motor_count,
        special_requirements: request.special_requirements,
        items: request.bom_items,
        breakdown: request.cost_breakdown,
    };

    let (quotation_id, quotation_number) =
        repository.create(quotation, Utc::now().year()).await?;

    Ok((
        StatusCode::CREATED,
        Json(QuotationCreated { success: true, quotation_id, quotation_number }),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<QuotationQuery>,
) -> Result<Json<Vec<QuotationRecord>>, ApiError> {
    let repository = SqlQuotationRepository::new(state.db_pool.clone());
    Ok(Json(repository.list(query.limit.unwrap_or(100)).await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<QuotationWithItems>, ApiError> {
    Ok(Json(fetch(&state, id).await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdated>, ApiError> {
    let status = request.status.parse::<QuotationStatus>().map_err(|_| {
        ApiError::BadRequest(format!(
            "unknown quotation status `{}` (expected draft|sent|accepted|rejected)",
            request.status
        ))
    })?;

    let repository = SqlQuotationRepository::new(state.db_pool.clone());
    let updated = repository.update_status(id, status).await?;
    if !updated {
        return Err(ApiError::NotFound(format!("quotation {id} not found")));
    }

    Ok(Json(StatusUpdated { success: true, message: "Quotation status updated successfully" }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StatusUpdated>, ApiError> {
    let repository = SqlQuotationRepository::new(state.db_pool.clone());
    let deleted = repository.delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("quotation {id} not found")));
    }

    Ok(Json(StatusUpdated { success: true, message: "Quotation deleted successfully" }))
}

pub async fn document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let quotation = fetch(&state, id).await?;
    let file_stem = quotation.quotation.quotation_number.replace('/', "-");

    let rendered = state
        .documents
        .render(&quotation)
        .await
        .map_err(|error| ApiError::Internal(error.to_string()))?;

    let response = match rendered {
        RenderedDocument::Pdf(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("inline; filename=\"{file_stem}.pdf\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        RenderedDocument::Html(html) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8".to_string())],
            html,
        )
            .into_response(),
    };

    Ok(response)
}

async fn fetch(state: &AppState, id: i64) -> Result<QuotationWithItems, ApiError> {
    let repository = SqlQuotationRepository::new(state.db_pool.clone());
    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quotation {id} not found")))
}
