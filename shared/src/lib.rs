//! Nutriplan Shared Library
//!
//! The clinical nutrition calculation engine: profile classification, BMR,
//! GET and VET, macronutrient split by difference, six-meal distribution and
//! validation. Used by the backend and the WASM module.

pub mod energy;
pub mod engine;
pub mod errors;
pub mod legacy;
pub mod macronutrients;
pub mod meals;
pub mod profile;
pub mod tables;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use energy::{
    adjust_for_objective, calculate_bmr, calculate_get, BodyMetrics, EnergyResult, EnergyTarget,
    ObjectivePolicy,
};
pub use engine::{calculate_plan, EngineConfig, FatMethod, NutritionEngine, NutritionPlan};
pub use errors::*;
pub use macronutrients::{
    distribute_macros, FatTarget, Macronutrient, MacronutrientPlan, NutrientAmount,
};
pub use meals::{
    distribute_meals, MealAllocation, MealKind, MealPortion, MealSlot, MealTemplate,
};
pub use profile::{classify, select_formula, ProfileDescriptor, RatioRange};
pub use types::*;
pub use validation::ValidationResult;
