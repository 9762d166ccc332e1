//! Macronutrient distribution "by difference"
//!
//! Protein and fat are fixed first from per-kilogram ratios (or a fat share of
//! the caloric target); carbohydrate receives whatever energy remains and is
//! never set independently.

use crate::errors::{ensure_positive, NutritionError};
use crate::tables::energy_density;
use serde::{Deserialize, Serialize};

/// The three energy-yielding macronutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Macronutrient {
    Protein,
    Fat,
    Carbohydrate,
}

impl Macronutrient {
    pub const ALL: [Macronutrient; 3] = [
        Macronutrient::Protein,
        Macronutrient::Fat,
        Macronutrient::Carbohydrate,
    ];

    pub fn kcal_per_gram(&self) -> f64 {
        match self {
            Macronutrient::Protein => energy_density::PROTEIN_KCAL_PER_G,
            Macronutrient::Fat => energy_density::FAT_KCAL_PER_G,
            Macronutrient::Carbohydrate => energy_density::CARBOHYDRATE_KCAL_PER_G,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Macronutrient::Protein => "protein",
            Macronutrient::Fat => "fat",
            Macronutrient::Carbohydrate => "carbohydrate",
        }
    }
}

/// How the fat target is fixed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "value", rename_all = "snake_case")]
pub enum FatTarget {
    /// Grams per kilogram of body weight
    GramsPerKg(f64),
    /// Share of the caloric target, in percent
    PercentOfEnergy(f64),
}

/// Amount of one macronutrient in a daily plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientAmount {
    pub grams: f64,
    pub kcal: f64,
    /// Share of the caloric target, in percent
    pub percent: f64,
}

impl NutrientAmount {
    fn from_grams(grams: f64, nutrient: Macronutrient, energy_kcal: f64) -> Self {
        let kcal = grams * nutrient.kcal_per_gram();
        Self {
            grams,
            kcal,
            percent: kcal / energy_kcal * 100.0,
        }
    }
}

/// Daily macronutrient targets for a caloric target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacronutrientPlan {
    /// Caloric target the plan was derived from (VET)
    pub energy_kcal: f64,
    pub protein: NutrientAmount,
    pub fat: NutrientAmount,
    pub carbohydrate: NutrientAmount,
}

impl MacronutrientPlan {
    pub fn nutrient(&self, nutrient: Macronutrient) -> &NutrientAmount {
        match nutrient {
            Macronutrient::Protein => &self.protein,
            Macronutrient::Fat => &self.fat,
            Macronutrient::Carbohydrate => &self.carbohydrate,
        }
    }

    /// Sum of the three nutrients' kcal
    pub fn total_kcal(&self) -> f64 {
        self.protein.kcal + self.fat.kcal + self.carbohydrate.kcal
    }
}

/// Split a caloric target into protein, fat and carbohydrate
///
/// 1. protein_g = ratio × weight
/// 2. fat_g = ratio × weight, or energy × percent / 100 / 9
/// 3. carbohydrate_kcal = energy − protein_kcal − fat_kcal
///
/// # Errors
///
/// Non-positive inputs, a fat share outside (0, 100), and
/// [`NutritionError::CarbohydrateBudgetExhausted`] when protein and fat
/// consume the whole target.
pub fn distribute_macros(
    energy_kcal: f64,
    weight_kg: f64,
    protein_g_per_kg: f64,
    fat: FatTarget,
) -> Result<MacronutrientPlan, NutritionError> {
    ensure_positive(energy_kcal, "caloric target")?;
    ensure_positive(weight_kg, "weight")?;
    ensure_positive(protein_g_per_kg, "protein ratio")?;

    let fat_g = match fat {
        FatTarget::GramsPerKg(ratio) => {
            ensure_positive(ratio, "fat ratio")?;
            ratio * weight_kg
        }
        FatTarget::PercentOfEnergy(percent) => {
            if !percent.is_finite() || percent <= 0.0 || percent >= 100.0 {
                return Err(NutritionError::FatShareOutOfRange(percent));
            }
            energy_kcal * percent / 100.0 / energy_density::FAT_KCAL_PER_G
        }
    };

    let protein = NutrientAmount::from_grams(
        protein_g_per_kg * weight_kg,
        Macronutrient::Protein,
        energy_kcal,
    );
    let fat = NutrientAmount::from_grams(fat_g, Macronutrient::Fat, energy_kcal);

    let remaining_kcal = energy_kcal - protein.kcal - fat.kcal;
    if remaining_kcal <= 0.0 {
        return Err(NutritionError::CarbohydrateBudgetExhausted {
            protein_kcal: protein.kcal,
            fat_kcal: fat.kcal,
            energy_kcal,
        });
    }

    let carbohydrate_g = (remaining_kcal / energy_density::CARBOHYDRATE_KCAL_PER_G).max(0.0);
    let carbohydrate =
        NutrientAmount::from_grams(carbohydrate_g, Macronutrient::Carbohydrate, energy_kcal);

    Ok(MacronutrientPlan {
        energy_kcal,
        protein,
        fat,
        carbohydrate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_reference_split_by_difference() {
        // VET 2400, 70kg, protein 1.8 g/kg, fat 25% of VET
        let plan = distribute_macros(2400.0, 70.0, 1.8, FatTarget::PercentOfEnergy(25.0)).unwrap();

        assert!(approx(plan.protein.grams, 126.0));
        assert!(approx(plan.protein.kcal, 504.0));
        assert!(approx(plan.fat.kcal, 600.0));
        assert!((plan.fat.grams - 66.7).abs() < 0.05);
        assert!(approx(plan.carbohydrate.kcal, 1296.0));
        assert!(approx(plan.carbohydrate.grams, 324.0));

        assert!(approx(plan.protein.percent, 21.0));
        assert!(approx(plan.fat.percent, 25.0));
        assert!(approx(plan.carbohydrate.percent, 54.0));
    }

    #[test]
    fn test_fat_per_kilogram() {
        let plan = distribute_macros(2000.0, 60.0, 1.6, FatTarget::GramsPerKg(0.8)).unwrap();
        assert!(approx(plan.fat.grams, 48.0));
        assert!(approx(plan.fat.kcal, 432.0));
        // 2000 - 384 - 432 = 1184 kcal
        assert!(approx(plan.carbohydrate.grams, 296.0));
    }

    #[test]
    fn test_exhausted_budget_is_rejected() {
        // 100kg at 2.2 g/kg protein (880 kcal) + 1.0 g/kg fat (900 kcal) > 1700
        let err = distribute_macros(1700.0, 100.0, 2.2, FatTarget::GramsPerKg(1.0)).unwrap_err();
        assert!(matches!(err, NutritionError::CarbohydrateBudgetExhausted { .. }));
    }

    #[test]
    fn test_exactly_exhausted_budget_is_rejected() {
        // 50kg: protein 2.0 -> 400 kcal, fat 25% of 800 -> 200 kcal, leaves 200
        assert!(distribute_macros(800.0, 50.0, 2.0, FatTarget::PercentOfEnergy(25.0)).is_ok());
        // protein 600 kcal + fat 200 kcal == 800
        assert!(distribute_macros(800.0, 50.0, 3.0, FatTarget::PercentOfEnergy(25.0)).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            distribute_macros(0.0, 70.0, 1.8, FatTarget::GramsPerKg(0.8)).unwrap_err(),
            NutritionError::NonPositive {
                field: "caloric target"
            }
        );
        assert_eq!(
            distribute_macros(2000.0, 70.0, 1.8, FatTarget::PercentOfEnergy(100.0)).unwrap_err(),
            NutritionError::FatShareOutOfRange(100.0)
        );
        assert_eq!(
            distribute_macros(2000.0, 70.0, 1.8, FatTarget::GramsPerKg(-0.5)).unwrap_err(),
            NutritionError::NonPositive { field: "fat ratio" }
        );
    }

    #[test]
    fn test_fat_target_json_shape() {
        let json = serde_json::to_value(FatTarget::PercentOfEnergy(25.0)).unwrap();
        assert_eq!(json["method"], "percent_of_energy");
        assert_eq!(json["value"], 25.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: kcal of the three nutrients add back up to the target
        #[test]
        fn prop_kcal_sum_matches_target(
            energy in 1200.0f64..5000.0,
            weight in 40.0f64..150.0,
            protein in 0.8f64..2.2,
            fat_percent in 15.0f64..35.0
        ) {
            if let Ok(plan) = distribute_macros(energy, weight, protein, FatTarget::PercentOfEnergy(fat_percent)) {
                prop_assert!((plan.total_kcal() - energy).abs() <= 1.0);
                prop_assert!(plan.carbohydrate.grams > 0.0);
                let percent_sum = plan.protein.percent + plan.fat.percent + plan.carbohydrate.percent;
                prop_assert!((percent_sum - 100.0).abs() < 1e-6);
            }
        }

        /// Property: a plan is produced iff protein and fat leave energy over
        #[test]
        fn prop_rejects_only_exhausted_budgets(
            energy in 800.0f64..4000.0,
            weight in 40.0f64..150.0,
            protein in 0.8f64..2.5,
            fat in 0.5f64..1.2
        ) {
            let fixed_kcal = protein * weight * 4.0 + fat * weight * 9.0;
            let result = distribute_macros(energy, weight, protein, FatTarget::GramsPerKg(fat));
            prop_assert_eq!(result.is_ok(), energy - fixed_kcal > 0.0);
        }
    }
}
