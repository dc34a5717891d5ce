pub mod components;
pub mod estimation;
pub mod panel_types;
pub mod quotations;

#[cfg(test)]
mod tests;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use panelquote_core::errors::{CatalogError, EstimationError};
use panelquote_db::repositories::RepositoryError;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-estimation", post(estimation::generate))
        .route("/api/panel-types", get(panel_types::list))
        .route("/api/panel-types/{code}", get(panel_types::get_by_code))
        .route("/api/components", get(components::list).post(components::create))
        .route("/api/components/{code}", get(components::get_by_code))
        .route("/api/quotations", post(quotations::create).get(quotations::list))
        .route("/api/quotations/{id}", get(quotations::get_by_id).delete(quotations::delete))
        .route("/api/quotations/{id}/status", put(quotations::update_status))
        .route("/api/quotations/{id}/document", get(quotations::document))
        .with_state(state)
}

/// API failure surface. Every response carries a correlation id so a
/// client report can be matched to the server-side log line.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    ServiceUnavailable(String),
    Internal(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    correlation_id: String,
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::UnprocessableEntity(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::ServiceUnavailable(message) => {
                (StatusCode::SERVICE_UNAVAILABLE, message)
            }
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let correlation_id = Uuid::new_v4().to_string();
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(correlation_id = %correlation_id, error = %message, "request failed");
        } else {
            tracing::warn!(correlation_id = %correlation_id, error = %message, "request rejected");
        }

        (status, Json(ErrorBody { error: message, correlation_id })).into_response()
    }
}

impl From<EstimationError> for ApiError {
    fn from(error: EstimationError) -> Self {
        match error {
            EstimationError::Validation(message) => Self::BadRequest(message),
            EstimationError::MandatoryComponentMissing { code } => Self::UnprocessableEntity(
                format!("mandatory component `{code}` is missing from the catalog"),
            ),
            EstimationError::Catalog(CatalogError::Unavailable(message)) => {
                Self::ServiceUnavailable(message)
            }
            EstimationError::Catalog(CatalogError::Decode(message)) => Self::Internal(message),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Database(source) => Self::ServiceUnavailable(source.to_string()),
            RepositoryError::Decode(message) => Self::Internal(message),
        }
    }
}
