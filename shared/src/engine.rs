//! Calculation pipeline
//!
//! Runs classifier → BMR → GET → VET → macro split → meal split for one
//! input, with validation before the first step and after the last.
//!
//! # Design Principles
//!
//! 1. **Pure**: the engine holds only immutable configuration, so identical
//!    inputs always produce identical plans
//! 2. **Fail Early**: invalid input stops the pipeline before any formula runs
//! 3. **Report, Don't Hide**: meal consistency findings travel with the plan
//!    so the caller decides whether to accept it

use crate::energy::{
    adjust_for_objective, calculate_bmr, calculate_get, BodyMetrics, EnergyResult, EnergyTarget,
    ObjectivePolicy,
};
use crate::errors::NutritionError;
use crate::macronutrients::{distribute_macros, FatTarget, MacronutrientPlan};
use crate::meals::{distribute_meals, MealAllocation, MealTemplate};
use crate::profile::{classify, select_formula, ProfileDescriptor};
use crate::tables::ratios;
use crate::types::CalculationInput;
use crate::validation::{
    validate_allocation, validate_fat_energy_percent, validate_input, validate_macro_plan,
    validate_template, ValidationResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Configuration
// ============================================================================

/// Fat method used when the input carries no fat override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatMethod {
    /// The profile's default grams per kilogram
    #[default]
    ProfileRatio,
    /// `EngineConfig::fat_energy_percent` of the caloric target
    PercentOfEnergy,
}

/// Tunable defaults of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub objective: ObjectivePolicy,
    pub fat_method: FatMethod,
    pub fat_energy_percent: f64,
    pub meal_template: MealTemplate,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            objective: ObjectivePolicy::default(),
            fat_method: FatMethod::default(),
            fat_energy_percent: ratios::DEFAULT_FAT_ENERGY_PERCENT,
            meal_template: MealTemplate::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        let policy = &self.objective;

        if !policy.calorie_floor_kcal.is_finite() || policy.calorie_floor_kcal <= 0.0 {
            result.push_error("calorie floor must be greater than zero");
        }
        if !policy.weight_loss_deficit_kcal.is_finite() || policy.weight_loss_deficit_kcal < 0.0 {
            result.push_error("default weight-loss deficit must not be negative");
        }
        if !policy.hypertrophy_surplus_kcal.is_finite() || policy.hypertrophy_surplus_kcal < 0.0 {
            result.push_error("default hypertrophy surplus must not be negative");
        }
        result.check(validate_fat_energy_percent(self.fat_energy_percent));
        result.merge(validate_template(&self.meal_template));

        result
    }
}

// ============================================================================
// Output
// ============================================================================

/// Everything derived for one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub input: CalculationInput,
    pub profile: ProfileDescriptor,
    pub bmr: EnergyResult,
    pub activity_factor: f64,
    /// Activity-adjusted expenditure (GET)
    pub get_kcal: f64,
    /// Caloric target (VET)
    pub vet: EnergyTarget,
    pub fat_target: FatTarget,
    pub macros: MacronutrientPlan,
    pub meals: MealAllocation,
    /// Input warnings plus post-distribution findings
    pub findings: ValidationResult,
}

// ============================================================================
// Engine
// ============================================================================

/// The nutrition calculation engine
#[derive(Debug, Clone, Default)]
pub struct NutritionEngine {
    config: EngineConfig,
}

impl NutritionEngine {
    /// Build an engine, rejecting a configuration that could never produce a
    /// consistent plan
    pub fn new(config: EngineConfig) -> Result<Self, NutritionError> {
        let findings = config.validate();
        if !findings.is_valid {
            return Err(NutritionError::InvalidConfig(findings));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the whole pipeline for one input
    ///
    /// # Errors
    ///
    /// - [`NutritionError::InvalidInput`] with every finding when the input
    ///   fails pre-calculation validation
    /// - [`NutritionError::CarbohydrateBudgetExhausted`] when protein and fat
    ///   leave no energy for carbohydrate
    /// - [`NutritionError::InconsistentPlan`] when the macro plan breaks its
    ///   own invariants
    pub fn calculate(&self, input: &CalculationInput) -> Result<NutritionPlan, NutritionError> {
        let mut findings = validate_input(input);
        if !findings.is_valid {
            debug!(errors = findings.errors.len(), "Input rejected");
            return Err(NutritionError::InvalidInput(findings));
        }

        let profile = classify(input.profile);
        let formula = select_formula(input.profile, input.body_fat_percent, input.bmr_formula);
        debug!(profile = %input.profile, formula = %formula, "Formula selected");

        let bmr = calculate_bmr(&BodyMetrics::from(input), formula)?;
        let activity_factor = input.activity_level.factor();
        let get_kcal = calculate_get(bmr.kcal, input.activity_level)?;
        let vet = adjust_for_objective(
            get_kcal,
            input.objective,
            input.caloric_adjustment_kcal,
            &self.config.objective,
        )?;
        if vet.floor_applied {
            findings.push_warning(format!(
                "caloric target raised to the {} kcal floor",
                self.config.objective.calorie_floor_kcal
            ));
        }

        let protein_ratio = input
            .protein_g_per_kg
            .unwrap_or(profile.protein_g_per_kg.default);
        let fat_target = self.fat_target(input, &profile);
        let macros = distribute_macros(vet.kcal, input.weight_kg, protein_ratio, fat_target)?;

        let macro_check = validate_macro_plan(&macros);
        if !macro_check.is_valid {
            return Err(NutritionError::InconsistentPlan(macro_check));
        }

        let template = input
            .meal_template
            .as_ref()
            .unwrap_or(&self.config.meal_template);
        let meals = distribute_meals(&macros, template);
        findings.merge(validate_allocation(&meals));

        debug!(
            bmr = bmr.kcal,
            get = get_kcal,
            vet = vet.kcal,
            valid = findings.is_valid,
            "Nutrition plan calculated"
        );

        Ok(NutritionPlan {
            input: input.clone(),
            profile,
            bmr,
            activity_factor,
            get_kcal,
            vet,
            fat_target,
            macros,
            meals,
            findings,
        })
    }

    /// Input override first, then the configured default method
    fn fat_target(&self, input: &CalculationInput, profile: &ProfileDescriptor) -> FatTarget {
        match (input.fat_g_per_kg, input.fat_energy_percent) {
            (Some(ratio), _) => FatTarget::GramsPerKg(ratio),
            (None, Some(percent)) => FatTarget::PercentOfEnergy(percent),
            (None, None) => match self.config.fat_method {
                FatMethod::ProfileRatio => FatTarget::GramsPerKg(profile.fat_g_per_kg.default),
                FatMethod::PercentOfEnergy => {
                    FatTarget::PercentOfEnergy(self.config.fat_energy_percent)
                }
            },
        }
    }
}

/// Calculate a plan with the default configuration
pub fn calculate_plan(input: &CalculationInput) -> Result<NutritionPlan, NutritionError> {
    NutritionEngine::default().calculate(input)
}
