//! Consultation plan API routes

use crate::error::ApiError;
use crate::repositories::StoredPlan;
use crate::services::NutritionService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use nutriplan_shared::CalculationRequest;
use uuid::Uuid;

/// Create consultation routes
pub fn consultation_routes() -> Router<AppState> {
    Router::new().route("/:id/plan", post(create_plan).get(get_plan))
}

/// POST /api/v1/consultations/:id/plan - Calculate and store a plan
async fn create_plan(
    State(state): State<AppState>,
    Path(consultation_id): Path<Uuid>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredPlan>), ApiError> {
    let Json(request) = payload?;
    let stored = NutritionService::calculate_for_consultation(
        state.engine(),
        state.plans(),
        consultation_id,
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/v1/consultations/:id/plan - Latest stored plan
async fn get_plan(
    State(state): State<AppState>,
    Path(consultation_id): Path<Uuid>,
) -> Result<Json<StoredPlan>, ApiError> {
    let stored = NutritionService::plan_for_consultation(state.plans(), consultation_id).await?;
    Ok(Json(stored))
}
