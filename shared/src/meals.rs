//! Meal distribution
//!
//! Spreads the daily macronutrient grams across six named meals using a
//! percentage template. Stateless map over the template; the template itself
//! is checked by [`crate::validation::validate_template`].

use crate::macronutrients::{Macronutrient, MacronutrientPlan};
use crate::tables::meals;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six meals of a day, in serving order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealKind {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Dinner,
    EveningSnack,
}

impl MealKind {
    pub const ALL: [MealKind; meals::MEAL_COUNT] = [
        MealKind::Breakfast,
        MealKind::MorningSnack,
        MealKind::Lunch,
        MealKind::AfternoonSnack,
        MealKind::Dinner,
        MealKind::EveningSnack,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "Breakfast",
            MealKind::MorningSnack => "Morning snack",
            MealKind::Lunch => "Lunch",
            MealKind::AfternoonSnack => "Afternoon snack",
            MealKind::Dinner => "Dinner",
            MealKind::EveningSnack => "Evening snack",
        }
    }
}

impl fmt::Display for MealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Template
// ============================================================================

/// One row of a meal template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealSlot {
    pub meal: MealKind,
    pub suggested_time: NaiveTime,
    pub protein_percent: f64,
    pub fat_percent: f64,
    pub carbohydrate_percent: f64,
}

impl MealSlot {
    /// Share of the day's total for one macronutrient, in percent
    pub fn percent(&self, nutrient: Macronutrient) -> f64 {
        match nutrient {
            Macronutrient::Protein => self.protein_percent,
            Macronutrient::Fat => self.fat_percent,
            Macronutrient::Carbohydrate => self.carbohydrate_percent,
        }
    }
}

/// Ordered percentage table used to split the day across meals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTemplate {
    pub slots: Vec<MealSlot>,
}

impl MealTemplate {
    pub fn new(slots: Vec<MealSlot>) -> Self {
        Self { slots }
    }

    /// Sum of one macronutrient's percentages over every slot
    pub fn percent_sum(&self, nutrient: Macronutrient) -> f64 {
        self.slots.iter().map(|slot| slot.percent(nutrient)).sum()
    }
}

impl Default for MealTemplate {
    fn default() -> Self {
        let slots = MealKind::ALL
            .iter()
            .zip(meals::DEFAULT_TEMPLATE.iter())
            .map(|(&meal, &(protein, fat, carbohydrate, hour, minute))| MealSlot {
                meal,
                suggested_time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default(),
                protein_percent: protein,
                fat_percent: fat,
                carbohydrate_percent: carbohydrate,
            })
            .collect();
        Self { slots }
    }
}

// ============================================================================
// Allocation
// ============================================================================

/// A meal with its template percentages and the grams they yield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealPortion {
    pub meal: MealKind,
    pub suggested_time: NaiveTime,
    pub protein_percent: f64,
    pub fat_percent: f64,
    pub carbohydrate_percent: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbohydrate_g: f64,
    /// protein_g × 4 + fat_g × 9 + carbohydrate_g × 4
    pub kcal: f64,
}

impl MealPortion {
    pub fn percent(&self, nutrient: Macronutrient) -> f64 {
        match nutrient {
            Macronutrient::Protein => self.protein_percent,
            Macronutrient::Fat => self.fat_percent,
            Macronutrient::Carbohydrate => self.carbohydrate_percent,
        }
    }

    pub fn grams(&self, nutrient: Macronutrient) -> f64 {
        match nutrient {
            Macronutrient::Protein => self.protein_g,
            Macronutrient::Fat => self.fat_g,
            Macronutrient::Carbohydrate => self.carbohydrate_g,
        }
    }
}

/// The day's meals in serving order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAllocation {
    pub meals: Vec<MealPortion>,
}

impl MealAllocation {
    pub fn percent_sum(&self, nutrient: Macronutrient) -> f64 {
        self.meals.iter().map(|meal| meal.percent(nutrient)).sum()
    }

    pub fn total_grams(&self, nutrient: Macronutrient) -> f64 {
        self.meals.iter().map(|meal| meal.grams(nutrient)).sum()
    }

    pub fn total_kcal(&self) -> f64 {
        self.meals.iter().map(|meal| meal.kcal).sum()
    }
}

/// Apply a meal template to a day's macronutrient plan
///
/// grams = daily grams × meal percent / 100, per macronutrient.
pub fn distribute_meals(plan: &MacronutrientPlan, template: &MealTemplate) -> MealAllocation {
    let meals = template
        .slots
        .iter()
        .map(|slot| {
            let grams = |nutrient: Macronutrient| {
                plan.nutrient(nutrient).grams * slot.percent(nutrient) / 100.0
            };
            let protein_g = grams(Macronutrient::Protein);
            let fat_g = grams(Macronutrient::Fat);
            let carbohydrate_g = grams(Macronutrient::Carbohydrate);

            MealPortion {
                meal: slot.meal,
                suggested_time: slot.suggested_time,
                protein_percent: slot.protein_percent,
                fat_percent: slot.fat_percent,
                carbohydrate_percent: slot.carbohydrate_percent,
                protein_g,
                fat_g,
                carbohydrate_g,
                kcal: protein_g * Macronutrient::Protein.kcal_per_gram()
                    + fat_g * Macronutrient::Fat.kcal_per_gram()
                    + carbohydrate_g * Macronutrient::Carbohydrate.kcal_per_gram(),
            }
        })
        .collect();

    MealAllocation { meals }
}
