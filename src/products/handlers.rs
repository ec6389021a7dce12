use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use base64::Engine;
use tracing::{error, instrument};

use crate::ai::AnalysisError;
use crate::products::dto::{MealRequest, ScanRequest, SearchRequest};
use crate::products::model::{MealItem, ProductRecord};
use crate::products::service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products/search", post(search))
        .route("/products/scan", post(scan))
        .route("/products/meal", post(meal))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // inline images
}

#[instrument(skip(state, body), fields(query = %body.query))]
pub async fn search(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<ProductRecord>, (StatusCode, String)> {
    let query = body.query.trim();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "query must not be empty".into()));
    }

    let product = service::search_by_name(
        state.cache.as_ref(),
        state.lookup.as_ref(),
        state.ai.as_ref(),
        query,
    )
    .await
    .map_err(|e| analysis_error(e, "search"))?;
    Ok(Json(product))
}

#[instrument(skip(state, body))]
pub async fn scan(
    State(state): State<AppState>,
    Json(body): Json<ScanRequest>,
) -> Result<Json<ProductRecord>, (StatusCode, String)> {
    if body.image_b64.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "image_b64 is required".into()));
    }
    // Decoded only to reject garbage early; the model receives the base64.
    if base64::engine::general_purpose::STANDARD
        .decode(&body.image_b64)
        .is_err()
    {
        return Err((StatusCode::BAD_REQUEST, "invalid base64".into()));
    }
    let mime_type = body.content_type.unwrap_or_else(|| "image/jpeg".into());

    let product = service::analyze_image(state.ai.as_ref(), body.image_b64, mime_type)
        .await
        .map_err(|e| analysis_error(e, "scan"))?;
    Ok(Json(product))
}

#[instrument(skip(state, body))]
pub async fn meal(
    State(state): State<AppState>,
    Json(body): Json<MealRequest>,
) -> Result<Json<Vec<MealItem>>, (StatusCode, String)> {
    let description = body.description.trim();
    if description.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "description must not be empty".into()));
    }

    let items = service::analyze_meal(state.ai.as_ref(), description)
        .await
        .map_err(|e| analysis_error(e, "meal"))?;
    Ok(Json(items))
}

fn analysis_error(e: AnalysisError, path: &str) -> (StatusCode, String) {
    error!(error = %e, path, "analysis failed");
    (e.status(), e.user_message())
}
