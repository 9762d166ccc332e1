//! Nutrition calculation API routes

use crate::error::ApiError;
use crate::services::NutritionService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use nutriplan_shared::{
    classify, CalculationRequest, MealTemplate, NutritionPlan, Profile, ProfileDescriptor,
    ValidationResult,
};

/// Create nutrition routes
pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate))
        .route("/validate", post(validate))
        .route("/meal-template", get(meal_template))
        .route("/profiles/:profile", get(profile))
}

/// POST /api/v1/nutrition/calculate - Calculate a complete plan
///
/// Invalid input is answered with 400 and every finding; a plan whose
/// protein and fat leave no room for carbohydrate is answered with 422.
async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<NutritionPlan>, ApiError> {
    let Json(request) = payload?;
    let plan = NutritionService::calculate(state.engine(), request)?;
    Ok(Json(plan))
}

/// POST /api/v1/nutrition/validate - Pre-calculation checks only
///
/// Always 200 for a well-formed body; the verdict is in `is_valid`.
async fn validate(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(NutritionService::validate(&request)))
}

/// GET /api/v1/nutrition/meal-template - The configured default template
async fn meal_template(State(state): State<AppState>) -> Json<MealTemplate> {
    Json(state.engine().config().meal_template.clone())
}

/// GET /api/v1/nutrition/profiles/:profile - Formula and ratios of a profile
///
/// Legacy spellings are accepted; unknown ones are rejected.
async fn profile(Path(raw): Path<String>) -> Result<Json<ProfileDescriptor>, ApiError> {
    let profile: Profile = raw.parse()?;
    Ok(Json(classify(profile)))
}
