//! Immutable constant tables for the nutrition engine
//!
//! Every coefficient, factor and default used by the calculators lives here,
//! grouped by the component that reads it. Calculators address these values
//! through the typed enums in [`crate::types`], never by string.

/// Energy density of each macronutrient (Atwater factors)
pub mod energy_density {
    /// kcal per gram of protein
    pub const PROTEIN_KCAL_PER_G: f64 = 4.0;
    /// kcal per gram of fat
    pub const FAT_KCAL_PER_G: f64 = 9.0;
    /// kcal per gram of carbohydrate
    pub const CARBOHYDRATE_KCAL_PER_G: f64 = 4.0;
}

/// Basal metabolic rate equation coefficients
pub mod bmr {
    /// Harris-Benedict (1919), male: 66.5 + 13.75·w + 5.003·h − 6.755·a
    pub const HB_MALE_CONSTANT: f64 = 66.5;
    pub const HB_MALE_WEIGHT: f64 = 13.75;
    pub const HB_MALE_HEIGHT: f64 = 5.003;
    pub const HB_MALE_AGE: f64 = 6.755;

    /// Harris-Benedict (1919), female: 655.1 + 9.563·w + 1.850·h − 4.676·a
    pub const HB_FEMALE_CONSTANT: f64 = 655.1;
    pub const HB_FEMALE_WEIGHT: f64 = 9.563;
    pub const HB_FEMALE_HEIGHT: f64 = 1.850;
    pub const HB_FEMALE_AGE: f64 = 4.676;

    /// Mifflin-St Jeor (1990): 10·w + 6.25·h − 5·a + sex constant
    pub const MSJ_WEIGHT: f64 = 10.0;
    pub const MSJ_HEIGHT: f64 = 6.25;
    pub const MSJ_AGE: f64 = 5.0;
    pub const MSJ_MALE_CONSTANT: f64 = 5.0;
    pub const MSJ_FEMALE_CONSTANT: f64 = -161.0;

    /// Katch-McArdle: 370 + 21.6·LBM
    pub const KATCH_MCARDLE_CONSTANT: f64 = 370.0;
    pub const KATCH_MCARDLE_LBM: f64 = 21.6;

    /// Cunningham: 500 + 22·LBM
    pub const CUNNINGHAM_CONSTANT: f64 = 500.0;
    pub const CUNNINGHAM_LBM: f64 = 22.0;

    /// Athlete shortcut: kcal per kg of body weight
    pub const ATHLETE_KCAL_PER_KG: f64 = 22.0;
}

/// Activity factors applied to BMR
pub mod activity {
    pub const SEDENTARY: f64 = 1.2;
    pub const LIGHT: f64 = 1.375;
    pub const MODERATE: f64 = 1.55;
    pub const VERY_ACTIVE: f64 = 1.725;
    pub const EXTREMELY_ACTIVE: f64 = 1.9;
}

/// Objective adjustment defaults
pub mod objective {
    /// Minimum caloric target; a deficit never pushes VET below this
    pub const CALORIE_FLOOR_KCAL: f64 = 1200.0;
    /// Deficit applied for weight loss when no explicit adjustment is given
    pub const WEIGHT_LOSS_DEFICIT_KCAL: f64 = 500.0;
    /// Surplus applied for hypertrophy when no explicit adjustment is given
    pub const HYPERTROPHY_SURPLUS_KCAL: f64 = 350.0;
}

/// Per-kilogram macronutrient ratios by profile, as (min, max, default)
pub mod ratios {
    pub const NORMAL_WEIGHT_PROTEIN: (f64, f64, f64) = (1.6, 1.8, 1.8);
    pub const NORMAL_WEIGHT_FAT: (f64, f64, f64) = (0.8, 0.8, 0.8);

    pub const OVERWEIGHT_PROTEIN: (f64, f64, f64) = (1.2, 2.0, 1.6);
    pub const OVERWEIGHT_FAT: (f64, f64, f64) = (0.6, 0.7, 0.7);

    pub const ATHLETE_PROTEIN: (f64, f64, f64) = (2.0, 2.2, 2.2);
    pub const ATHLETE_FAT: (f64, f64, f64) = (1.0, 1.0, 1.0);

    /// Fat share of VET used by the percent-of-energy method
    pub const DEFAULT_FAT_ENERGY_PERCENT: f64 = 25.0;
}

/// Default six-meal allocation table
pub mod meals {
    /// Number of meals a complete allocation must contain
    pub const MEAL_COUNT: usize = 6;

    /// (protein %, fat %, carbohydrate %, hour, minute) in serving order
    pub const DEFAULT_TEMPLATE: [(f64, f64, f64, u32, u32); MEAL_COUNT] = [
        (20.0, 15.0, 25.0, 7, 0),
        (10.0, 10.0, 15.0, 10, 0),
        (35.0, 40.0, 30.0, 12, 30),
        (10.0, 10.0, 10.0, 15, 30),
        (20.0, 20.0, 18.0, 19, 30),
        (5.0, 5.0, 2.0, 22, 0),
    ];
}

/// Tolerances used by the consistency checks
pub mod tolerance {
    /// Allowed drift of a macro's meal percentages from 100
    pub const MEAL_PERCENT_SUM: f64 = 1.0;
    /// Allowed drift of the macro kcal sum from the caloric target
    pub const MACRO_KCAL_SUM: f64 = 1.0;
}

/// Hard limits; values outside are rejected
pub mod limits {
    pub const MAX_AGE_YEARS: i64 = 150;
}

/// Plausible clinical ranges; values outside produce warnings, not errors
pub mod plausible {
    pub const WEIGHT_KG: (f64, f64) = (20.0, 500.0);
    pub const HEIGHT_CM: (f64, f64) = (50.0, 300.0);
    pub const MAX_AGE_YEARS: u32 = 120;
    pub const BODY_FAT_PERCENT: (f64, f64) = (3.0, 60.0);
}
