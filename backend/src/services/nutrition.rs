//! Nutrition calculation service
//!
//! Translates boundary requests into engine input, runs the engine and
//! records calculation metrics. Stored plans go through the plan repository.

use crate::error::ApiError;
use crate::repositories::{PlanRepository, StoredPlan};
use metrics::counter;
use nutriplan_shared::{
    CalculationInput, CalculationRequest, NutritionEngine, NutritionError, NutritionPlan,
    ValidationResult,
};
use tracing::{info, warn};
use uuid::Uuid;

/// Nutrition service for business logic
pub struct NutritionService;

impl NutritionService {
    /// Normalize a request and calculate its plan
    pub fn calculate(
        engine: &NutritionEngine,
        request: CalculationRequest,
    ) -> Result<NutritionPlan, ApiError> {
        let result = CalculationInput::try_from(request).and_then(|input| engine.calculate(&input));

        match result {
            Ok(plan) => {
                counter!("nutrition_calculations_total", "profile" => plan.input.profile.as_str())
                    .increment(1);
                if plan.vet.floor_applied {
                    counter!("nutrition_floor_applied_total").increment(1);
                }
                if !plan.findings.is_valid {
                    warn!(
                        errors = ?plan.findings.errors,
                        "Plan calculated with inconsistent meal distribution"
                    );
                }
                Ok(plan)
            }
            Err(err) => {
                Self::record_failure(&err);
                Err(err.into())
            }
        }
    }

    /// Run pre-calculation validation only
    pub fn validate(request: &CalculationRequest) -> ValidationResult {
        let result = request.validate();
        if !result.is_valid {
            counter!("nutrition_validation_failures_total").increment(1);
        }
        result
    }

    /// Calculate a plan and store it under a consultation
    pub async fn calculate_for_consultation(
        engine: &NutritionEngine,
        plans: &dyn PlanRepository,
        consultation_id: Uuid,
        request: CalculationRequest,
    ) -> Result<StoredPlan, ApiError> {
        let plan = Self::calculate(engine, request)?;
        let stored = plans.save(consultation_id, plan).await?;

        info!(
            consultation_id = %consultation_id,
            plan_id = %stored.id,
            vet_kcal = stored.plan.vet.kcal,
            "Nutrition plan stored"
        );
        Ok(stored)
    }

    /// Fetch the stored plan of a consultation
    pub async fn plan_for_consultation(
        plans: &dyn PlanRepository,
        consultation_id: Uuid,
    ) -> Result<StoredPlan, ApiError> {
        plans
            .find_by_consultation(consultation_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("No plan for consultation {}", consultation_id))
            })
    }

    fn record_failure(err: &NutritionError) {
        if err.is_input_error() {
            counter!("nutrition_validation_failures_total").increment(1);
        } else {
            counter!("nutrition_derivation_failures_total").increment(1);
            warn!(error = %err, "Calculation failed after validation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryPlanRepository;

    fn request() -> CalculationRequest {
        serde_json::from_value(serde_json::json!({
            "weight_kg": 60.0,
            "height_cm": 165.0,
            "age_years": 25,
            "gender": "female",
            "profile": "normal_weight",
            "activity_level": "light",
            "objective": "maintenance"
        }))
        .unwrap()
    }

    #[test]
    fn test_calculate_reference_female() {
        let plan = NutritionService::calculate(&NutritionEngine::default(), request()).unwrap();
        assert!((plan.bmr.kcal - 1417.0).abs() < 1.0);
        assert!((plan.get_kcal - plan.bmr.kcal * 1.375).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_maps_invalid_input() {
        let mut req = request();
        req.profile = "underweight".to_string();
        let err = NutritionService::calculate(&NutritionEngine::default(), req).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Calculation(NutritionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_only() {
        let mut req = request();
        req.age_years = 0;
        let result = NutritionService::validate(&req);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["age must be greater than zero".to_string()]);
    }

    #[tokio::test]
    async fn test_consultation_round_trip() {
        let engine = NutritionEngine::default();
        let repo = InMemoryPlanRepository::new();
        let consultation = Uuid::new_v4();

        let missing = NutritionService::plan_for_consultation(&repo, consultation).await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));

        let stored =
            NutritionService::calculate_for_consultation(&engine, &repo, consultation, request())
                .await
                .unwrap();
        let fetched = NutritionService::plan_for_consultation(&repo, consultation)
            .await
            .unwrap();
        assert_eq!(fetched.id, stored.id);
    }
}
