//! Validation for engine inputs and derived distributions
//!
//! Two passes: [`validate_request`] runs before any formula, and
//! [`validate_macro_plan`] / [`validate_allocation`] check what the
//! calculators produced. Every pass accumulates all findings into a
//! [`ValidationResult`] and never fails.

use crate::macronutrients::{Macronutrient, MacronutrientPlan};
use crate::meals::{MealAllocation, MealKind, MealTemplate};
use crate::profile::{classify, select_formula, RatioRange};
use crate::tables::{limits, meals, plausible, tolerance};
use crate::types::{
    ActivityLevel, BmrFormula, CalculationInput, CalculationRequest, Gender, Objective, Profile,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Outcome of a validation pass
///
/// `is_valid` is false as soon as one error is recorded; warnings never
/// affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Record the error of a check, if any
    pub fn check(&mut self, outcome: Result<(), String>) {
        if let Err(message) = outcome {
            self.push_error(message);
        }
    }

    /// Append another result's findings after this one's
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

// ============================================================================
// Field Checks
// ============================================================================

/// Validate that a measurement is a finite number above zero
pub fn validate_positive(value: f64, field: &str) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{field} must be a valid number"));
    }
    if value <= 0.0 {
        return Err(format!("{field} must be greater than zero"));
    }
    Ok(())
}

/// Validate age in whole years
/// Valid range: 1-150
pub fn validate_age(age_years: i64) -> Result<(), String> {
    if age_years <= 0 {
        return Err("age must be greater than zero".to_string());
    }
    if age_years > limits::MAX_AGE_YEARS {
        return Err(format!("age must be at most {} years", limits::MAX_AGE_YEARS));
    }
    Ok(())
}

/// Validate a body-fat percentage (exclusive 0-100)
pub fn validate_body_fat(percent: f64) -> Result<(), String> {
    if percent.is_nan() || percent.is_infinite() {
        return Err("body-fat percentage must be a valid number".to_string());
    }
    if percent <= 0.0 || percent >= 100.0 {
        return Err(format!(
            "body-fat percentage must be between 0 and 100, got {percent}"
        ));
    }
    Ok(())
}

/// Validate an explicit caloric adjustment; the sign comes from the objective
pub fn validate_caloric_adjustment(kcal: f64) -> Result<(), String> {
    if kcal.is_nan() || kcal.is_infinite() {
        return Err("caloric adjustment must be a valid number".to_string());
    }
    if kcal < 0.0 {
        return Err(format!("caloric adjustment must not be negative, got {kcal}"));
    }
    Ok(())
}

/// Validate fat as a share of the caloric target (exclusive 0-100)
pub fn validate_fat_energy_percent(percent: f64) -> Result<(), String> {
    if percent.is_nan() || percent.is_infinite() || percent <= 0.0 || percent >= 100.0 {
        return Err(format!(
            "fat energy share must be between 0 and 100 percent, got {percent}"
        ));
    }
    Ok(())
}

/// Parse a categorical field, turning the rejection into a message
fn parse_field<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.parse::<T>().map_err(|e| e.to_string())
}

fn parsed<T>(result: &mut ValidationResult, outcome: Result<T, String>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(message) => {
            result.push_error(message);
            None
        }
    }
}

fn warn_outside(result: &mut ValidationResult, value: f64, (min, max): (f64, f64), what: &str) {
    if value.is_finite() && value > 0.0 && (value < min || value > max) {
        result.push_warning(format!(
            "{what} of {value} is outside the usual range {min}-{max}"
        ));
    }
}

fn warn_ratio(result: &mut ValidationResult, value: f64, range: RatioRange, what: &str) {
    if value.is_finite() && value > 0.0 && !range.contains(value) {
        result.push_warning(format!(
            "{what} of {value} g/kg is outside the profile range {}-{} g/kg",
            range.min, range.max
        ));
    }
}

// ============================================================================
// Pre-calculation
// ============================================================================

/// Check a boundary record before any calculation runs
///
/// Errors are reported in field order. Categorical fields are normalized
/// with the same `FromStr` impls used by the conversion to
/// [`CalculationInput`].
pub fn validate_request(request: &CalculationRequest) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.check(validate_positive(request.weight_kg, "weight"));
    result.check(validate_positive(request.height_cm, "height"));
    result.check(validate_age(request.age_years));

    let _gender = parsed(&mut result, parse_field::<Gender>(&request.gender));
    let profile = parsed(&mut result, parse_field::<Profile>(&request.profile));
    let _activity = parsed(
        &mut result,
        parse_field::<ActivityLevel>(&request.activity_level),
    );
    let objective = parsed(&mut result, parse_field::<Objective>(&request.objective));

    let requested_formula = match request.bmr_formula.as_deref() {
        Some(raw) => match parse_field::<BmrFormula>(raw) {
            Ok(formula) => Some(Some(formula)),
            Err(message) => {
                result.push_error(message);
                None
            }
        },
        None => Some(None),
    };

    if let Some(body_fat) = request.body_fat_percent {
        result.check(validate_body_fat(body_fat));
    }

    // The formula is only known when both the profile and any explicit
    // request were recognized.
    if let (Some(profile), Some(requested)) = (profile, requested_formula) {
        let formula = select_formula(profile, request.body_fat_percent, requested);
        if formula.requires_body_fat() && request.body_fat_percent.is_none() {
            result.push_error(format!("{formula} requires a body-fat percentage"));
        }
        if !formula.requires_body_fat() && request.body_fat_percent.is_some() {
            result.push_warning(format!(
                "body-fat percentage is not used by {formula}"
            ));
        }
    }

    if let Some(adjustment) = request.caloric_adjustment_kcal {
        result.check(validate_caloric_adjustment(adjustment));
        if objective == Some(Objective::Maintenance) {
            result.push_warning("caloric adjustment is ignored for maintenance");
        }
    }

    if let Some(ratio) = request.protein_g_per_kg {
        result.check(validate_positive(ratio, "protein ratio"));
    }
    if let Some(ratio) = request.fat_g_per_kg {
        result.check(validate_positive(ratio, "fat ratio"));
    }
    if let Some(percent) = request.fat_energy_percent {
        result.check(validate_fat_energy_percent(percent));
    }
    if request.fat_g_per_kg.is_some() && request.fat_energy_percent.is_some() {
        result.push_error("fat ratio and fat energy share cannot both be given");
    }

    warn_outside(&mut result, request.weight_kg, plausible::WEIGHT_KG, "weight");
    warn_outside(&mut result, request.height_cm, plausible::HEIGHT_CM, "height");
    if request.age_years > i64::from(plausible::MAX_AGE_YEARS)
        && request.age_years <= limits::MAX_AGE_YEARS
    {
        result.push_warning(format!(
            "age of {} years is above {}",
            request.age_years,
            plausible::MAX_AGE_YEARS
        ));
    }
    if let Some(body_fat) = request.body_fat_percent {
        if body_fat > 0.0 && body_fat < 100.0 {
            warn_outside(
                &mut result,
                body_fat,
                plausible::BODY_FAT_PERCENT,
                "body-fat percentage",
            );
        }
    }

    if let Some(profile) = profile {
        let descriptor = classify(profile);
        if let Some(ratio) = request.protein_g_per_kg {
            warn_ratio(&mut result, ratio, descriptor.protein_g_per_kg, "protein ratio");
        }
        if let Some(ratio) = request.fat_g_per_kg {
            warn_ratio(&mut result, ratio, descriptor.fat_g_per_kg, "fat ratio");
        }
    }

    result
}

/// Check an already-typed input with the same rules as [`validate_request`]
pub fn validate_input(input: &CalculationInput) -> ValidationResult {
    validate_request(&CalculationRequest::from(input.clone()))
}

// ============================================================================
// Post-distribution
// ============================================================================

/// Check that a macro plan is internally consistent
pub fn validate_macro_plan(plan: &MacronutrientPlan) -> ValidationResult {
    let mut result = ValidationResult::new();

    for nutrient in Macronutrient::ALL {
        let amount = plan.nutrient(nutrient);
        if !amount.grams.is_finite() || !amount.kcal.is_finite() {
            result.push_error(format!("{} amount is not a valid number", nutrient.as_str()));
        } else if amount.grams < 0.0 {
            result.push_error(format!(
                "{} must not be negative, got {:.1} g",
                nutrient.as_str(),
                amount.grams
            ));
        }
    }

    let drift = (plan.total_kcal() - plan.energy_kcal).abs();
    if !(drift <= tolerance::MACRO_KCAL_SUM) {
        result.push_error(format!(
            "macronutrient energy {:.1} kcal does not match the caloric target {:.1} kcal",
            plan.total_kcal(),
            plan.energy_kcal
        ));
    }

    result
}

/// Shared meal checks over (meal, [protein %, fat %, carbohydrate %]) rows
fn validate_meal_rows(rows: &[(MealKind, [f64; 3])]) -> ValidationResult {
    let mut result = ValidationResult::new();

    if rows.len() != meals::MEAL_COUNT {
        result.push_error(format!(
            "expected {} meals, found {}",
            meals::MEAL_COUNT,
            rows.len()
        ));
    }

    for (meal, percents) in rows {
        for (nutrient, percent) in Macronutrient::ALL.iter().zip(percents) {
            if !percent.is_finite() || *percent < 0.0 || *percent > 100.0 {
                result.push_error(format!(
                    "{meal} {} percentage must be between 0 and 100, got {percent}",
                    nutrient.as_str()
                ));
            }
        }
    }

    for (index, nutrient) in Macronutrient::ALL.iter().enumerate() {
        let sum: f64 = rows.iter().map(|(_, percents)| percents[index]).sum();
        if !((sum - 100.0).abs() <= tolerance::MEAL_PERCENT_SUM) {
            result.push_error(format!(
                "{} meal percentages sum to {sum:.1}%, expected 100%",
                nutrient.as_str()
            ));
        }
    }

    let mut seen = HashSet::new();
    for (meal, _) in rows {
        if !seen.insert(*meal) {
            result.push_warning(format!("{meal} appears more than once"));
        }
    }

    result
}

/// Check a meal template before it is used
pub fn validate_template(template: &MealTemplate) -> ValidationResult {
    let rows: Vec<_> = template
        .slots
        .iter()
        .map(|slot| {
            (
                slot.meal,
                Macronutrient::ALL.map(|nutrient| slot.percent(nutrient)),
            )
        })
        .collect();
    validate_meal_rows(&rows)
}

/// Check a finished meal allocation
pub fn validate_allocation(allocation: &MealAllocation) -> ValidationResult {
    let rows: Vec<_> = allocation
        .meals
        .iter()
        .map(|meal| {
            (
                meal.meal,
                Macronutrient::ALL.map(|nutrient| meal.percent(nutrient)),
            )
        })
        .collect();
    validate_meal_rows(&rows)
}
