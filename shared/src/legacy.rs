//! Adapters for older call shapes
//!
//! Earlier callers pass loose positional arguments with free-form profile,
//! activity and objective spellings. Each adapter builds the canonical input
//! and delegates to the engine or the component calculators; none of them
//! carries its own math.

use crate::energy::{calculate_bmr, BodyMetrics};
use crate::engine::calculate_plan;
use crate::errors::NutritionError;
use crate::macronutrients::{distribute_macros, FatTarget, MacronutrientPlan};
use crate::meals::{distribute_meals, MealAllocation, MealTemplate};
use crate::profile::{classify, select_formula};
use crate::types::{CalculationInput, CalculationRequest, Gender, Profile};
use crate::validation::validate_macro_plan;

fn request(
    weight_kg: f64,
    height_cm: f64,
    age_years: i64,
    gender: &str,
    profile: &str,
    activity_level: &str,
    objective: &str,
) -> CalculationRequest {
    CalculationRequest {
        weight_kg,
        height_cm,
        age_years,
        gender: gender.to_string(),
        profile: profile.to_string(),
        activity_level: activity_level.to_string(),
        objective: objective.to_string(),
        body_fat_percent: None,
        caloric_adjustment_kcal: None,
        protein_g_per_kg: None,
        fat_g_per_kg: None,
        fat_energy_percent: None,
        bmr_formula: None,
        meal_template: None,
    }
}

/// Basal rate for the profile's default formula
pub fn basal_rate(
    weight_kg: f64,
    height_cm: f64,
    age_years: i64,
    gender: &str,
    profile: &str,
) -> Result<f64, NutritionError> {
    let gender: Gender = gender.parse()?;
    let profile: Profile = profile.parse()?;
    let age_years =
        u32::try_from(age_years).map_err(|_| NutritionError::NonPositive { field: "age" })?;

    let metrics = BodyMetrics {
        weight_kg,
        height_cm,
        age_years,
        gender,
        body_fat_percent: None,
    };
    let result = calculate_bmr(&metrics, select_formula(profile, None, None))?;
    Ok(result.kcal)
}

/// Caloric target (VET) through the full pipeline
///
/// The calorie floor applies here exactly as it does for [`calculate_plan`].
pub fn caloric_target(
    weight_kg: f64,
    height_cm: f64,
    age_years: i64,
    gender: &str,
    profile: &str,
    activity_level: &str,
    objective: &str,
) -> Result<f64, NutritionError> {
    let input = CalculationInput::try_from(request(
        weight_kg,
        height_cm,
        age_years,
        gender,
        profile,
        activity_level,
        objective,
    ))?;
    Ok(calculate_plan(&input)?.vet.kcal)
}

/// Split a caloric target with the profile's default ratios
pub fn macro_split(
    energy_kcal: f64,
    weight_kg: f64,
    profile: &str,
) -> Result<MacronutrientPlan, NutritionError> {
    let descriptor = classify(profile.parse()?);
    let plan = distribute_macros(
        energy_kcal,
        weight_kg,
        descriptor.protein_g_per_kg.default,
        FatTarget::GramsPerKg(descriptor.fat_g_per_kg.default),
    )?;

    let check = validate_macro_plan(&plan);
    if !check.is_valid {
        return Err(NutritionError::InconsistentPlan(check));
    }
    Ok(plan)
}

/// Spread a macro plan over the default six meals
pub fn meal_split(plan: &MacronutrientPlan) -> MealAllocation {
    distribute_meals(plan, &MealTemplate::default())
}
