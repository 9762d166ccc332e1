//! Energy expenditure calculations
//!
//! BMR (basal metabolic rate), GET (activity-adjusted daily expenditure) and
//! VET (caloric target after the goal adjustment and safety floor).
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no side effects, no rounding; rounding is a
//!    presentation concern of the caller
//! 2. **Explicit Failure**: invalid inputs are rejected, never defaulted
//! 3. **Single Source**: every coefficient comes from [`crate::tables`]

use crate::errors::{ensure_positive, NutritionError};
use crate::tables::{bmr, limits, objective};
use crate::types::{ActivityLevel, BmrFormula, CalculationInput, Gender, Objective};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ============================================================================
// BMR
// ============================================================================

/// Body measurements consumed by the BMR equations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub gender: Gender,
    pub body_fat_percent: Option<f64>,
}

impl From<&CalculationInput> for BodyMetrics {
    fn from(input: &CalculationInput) -> Self {
        Self {
            weight_kg: input.weight_kg,
            height_cm: input.height_cm,
            age_years: input.age_years,
            gender: input.gender,
            body_fat_percent: input.body_fat_percent,
        }
    }
}

/// BMR value tagged with the equation that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    pub kcal: f64,
    pub formula: BmrFormula,
}

/// Harris-Benedict (1919)
///
/// Men: 66.5 + 13.75 × weight(kg) + 5.003 × height(cm) − 6.755 × age(y)
/// Women: 655.1 + 9.563 × weight(kg) + 1.850 × height(cm) − 4.676 × age(y)
pub fn harris_benedict(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let age = f64::from(age_years);
    match gender {
        Gender::Male => {
            bmr::HB_MALE_CONSTANT + bmr::HB_MALE_WEIGHT * weight_kg + bmr::HB_MALE_HEIGHT * height_cm
                - bmr::HB_MALE_AGE * age
        }
        Gender::Female => {
            bmr::HB_FEMALE_CONSTANT
                + bmr::HB_FEMALE_WEIGHT * weight_kg
                + bmr::HB_FEMALE_HEIGHT * height_cm
                - bmr::HB_FEMALE_AGE * age
        }
    }
}

/// Mifflin-St Jeor (1990)
///
/// Men: 10 × weight(kg) + 6.25 × height(cm) − 5 × age(y) + 5
/// Women: 10 × weight(kg) + 6.25 × height(cm) − 5 × age(y) − 161
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let base = bmr::MSJ_WEIGHT * weight_kg + bmr::MSJ_HEIGHT * height_cm
        - bmr::MSJ_AGE * f64::from(age_years);
    match gender {
        Gender::Male => base + bmr::MSJ_MALE_CONSTANT,
        Gender::Female => base + bmr::MSJ_FEMALE_CONSTANT,
    }
}

/// Lean body mass: weight × (1 − body_fat / 100)
pub fn lean_body_mass(weight_kg: f64, body_fat_percent: f64) -> f64 {
    weight_kg * (1.0 - body_fat_percent / 100.0)
}

/// Katch-McArdle: 370 + 21.6 × LBM(kg)
pub fn katch_mcardle(weight_kg: f64, body_fat_percent: f64) -> f64 {
    bmr::KATCH_MCARDLE_CONSTANT + bmr::KATCH_MCARDLE_LBM * lean_body_mass(weight_kg, body_fat_percent)
}

/// Cunningham: 500 + 22 × LBM(kg)
pub fn cunningham(weight_kg: f64, body_fat_percent: f64) -> f64 {
    bmr::CUNNINGHAM_CONSTANT + bmr::CUNNINGHAM_LBM * lean_body_mass(weight_kg, body_fat_percent)
}

/// Athlete shortcut: 22 kcal × weight(kg); ignores height and age
pub fn athlete_multiplier(weight_kg: f64) -> f64 {
    bmr::ATHLETE_KCAL_PER_KG * weight_kg
}

/// Calculate BMR with the given formula
///
/// # Errors
///
/// Non-positive or non-finite measurements, an age above the hard limit,
/// lean-mass formulas without a body-fat percentage in (0, 100), and an
/// equation result that is not a positive number.
pub fn calculate_bmr(
    metrics: &BodyMetrics,
    formula: BmrFormula,
) -> Result<EnergyResult, NutritionError> {
    ensure_positive(metrics.weight_kg, "weight")?;
    ensure_positive(metrics.height_cm, "height")?;
    if metrics.age_years == 0 {
        return Err(NutritionError::NonPositive { field: "age" });
    }
    if i64::from(metrics.age_years) > limits::MAX_AGE_YEARS {
        return Err(NutritionError::AgeOutOfRange(metrics.age_years));
    }

    let body_fat = if formula.requires_body_fat() {
        let percent = metrics
            .body_fat_percent
            .ok_or(NutritionError::MissingBodyFat { formula })?;
        if !percent.is_finite() || percent <= 0.0 || percent >= 100.0 {
            return Err(NutritionError::BodyFatOutOfRange(percent));
        }
        percent
    } else {
        0.0
    };

    let kcal = match formula {
        BmrFormula::HarrisBenedict => harris_benedict(
            metrics.weight_kg,
            metrics.height_cm,
            metrics.age_years,
            metrics.gender,
        ),
        BmrFormula::MifflinStJeor => mifflin_st_jeor(
            metrics.weight_kg,
            metrics.height_cm,
            metrics.age_years,
            metrics.gender,
        ),
        BmrFormula::AthleteMultiplier => athlete_multiplier(metrics.weight_kg),
        BmrFormula::KatchMcArdle => katch_mcardle(metrics.weight_kg, body_fat),
        BmrFormula::Cunningham => cunningham(metrics.weight_kg, body_fat),
    };

    // The linear equations go negative for very old or very small patients
    if !kcal.is_finite() || kcal <= 0.0 {
        return Err(NutritionError::NonPositiveBmr { formula, kcal });
    }

    debug!(formula = %formula, kcal, "BMR calculated");
    Ok(EnergyResult { kcal, formula })
}

// ============================================================================
// GET
// ============================================================================

/// Calculate activity-adjusted daily expenditure
///
/// GET = BMR × activity factor
///
/// # Errors
///
/// Returns an error if BMR is not a positive number
pub fn calculate_get(bmr_kcal: f64, activity_level: ActivityLevel) -> Result<f64, NutritionError> {
    ensure_positive(bmr_kcal, "BMR")?;
    Ok(bmr_kcal * activity_level.factor())
}

// ============================================================================
// VET
// ============================================================================

/// Defaults applied by the objective adjuster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectivePolicy {
    /// Lowest VET a deficit may produce
    pub calorie_floor_kcal: f64,
    pub weight_loss_deficit_kcal: f64,
    pub hypertrophy_surplus_kcal: f64,
}

impl Default for ObjectivePolicy {
    fn default() -> Self {
        Self {
            calorie_floor_kcal: objective::CALORIE_FLOOR_KCAL,
            weight_loss_deficit_kcal: objective::WEIGHT_LOSS_DEFICIT_KCAL,
            hypertrophy_surplus_kcal: objective::HYPERTROPHY_SURPLUS_KCAL,
        }
    }
}

/// Caloric target after the goal adjustment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyTarget {
    /// VET in kcal
    pub kcal: f64,
    pub objective: Objective,
    /// Signed difference actually applied to GET (VET − GET)
    pub adjustment_kcal: f64,
    /// True when the deficit was cut short by the calorie floor
    pub floor_applied: bool,
}

/// Apply the objective's surplus or deficit to GET
///
/// The deficit path is clamped so VET never drops below
/// `policy.calorie_floor_kcal`, however large the requested deficit.
///
/// # Errors
///
/// Returns an error if GET is not positive or the explicit adjustment is
/// negative or not a number.
pub fn adjust_for_objective(
    get_kcal: f64,
    objective: Objective,
    adjustment_kcal: Option<f64>,
    policy: &ObjectivePolicy,
) -> Result<EnergyTarget, NutritionError> {
    ensure_positive(get_kcal, "GET")?;
    if let Some(requested) = adjustment_kcal {
        if !requested.is_finite() {
            return Err(NutritionError::NotFinite {
                field: "caloric adjustment",
            });
        }
        if requested < 0.0 {
            return Err(NutritionError::NegativeAdjustment(requested));
        }
    }

    let (kcal, floor_applied) = match objective {
        Objective::Maintenance => (get_kcal, false),
        Objective::WeightLoss => {
            let deficit = adjustment_kcal.unwrap_or(policy.weight_loss_deficit_kcal);
            let naive = get_kcal - deficit;
            if naive < policy.calorie_floor_kcal {
                warn!(
                    get_kcal,
                    deficit,
                    floor = policy.calorie_floor_kcal,
                    "Deficit would cross the calorie floor; clamping"
                );
                (policy.calorie_floor_kcal, true)
            } else {
                (naive, false)
            }
        }
        Objective::Hypertrophy => {
            (get_kcal + adjustment_kcal.unwrap_or(policy.hypertrophy_surplus_kcal), false)
        }
    };

    Ok(EnergyTarget {
        kcal,
        objective,
        adjustment_kcal: kcal - get_kcal,
        floor_applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn metrics(weight: f64, height: f64, age: u32, gender: Gender) -> BodyMetrics {
        BodyMetrics {
            weight_kg: weight,
            height_cm: height,
            age_years: age,
            gender,
            body_fat_percent: None,
        }
    }

    // =========================================================================
    // BMR Tests
    // =========================================================================

    #[test]
    fn test_harris_benedict_reference_male() {
        // 70kg, 175cm, 30y male -> ~1702
        let result = calculate_bmr(
            &metrics(70.0, 175.0, 30, Gender::Male),
            BmrFormula::HarrisBenedict,
        )
        .unwrap();
        assert!((result.kcal - 1702.0).abs() < 1.0, "got {}", result.kcal);
        assert_eq!(result.formula, BmrFormula::HarrisBenedict);
    }

    #[test]
    fn test_harris_benedict_reference_female() {
        // 60kg, 165cm, 25y female -> ~1417
        let bmr = harris_benedict(60.0, 165.0, 25, Gender::Female);
        assert!((bmr - 1417.0).abs() < 1.0, "got {}", bmr);
    }

    #[test]
    fn test_mifflin_reference_exact() {
        // 90kg, 180cm, 40y male -> 1830
        let bmr = mifflin_st_jeor(90.0, 180.0, 40, Gender::Male);
        assert!((bmr - 1830.0).abs() < 1e-9);
        let female = mifflin_st_jeor(90.0, 180.0, 40, Gender::Female);
        assert!((bmr - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_athlete_multiplier_ignores_height_and_age() {
        let young = calculate_bmr(
            &metrics(80.0, 190.0, 20, Gender::Male),
            BmrFormula::AthleteMultiplier,
        )
        .unwrap();
        let older = calculate_bmr(
            &metrics(80.0, 160.0, 50, Gender::Female),
            BmrFormula::AthleteMultiplier,
        )
        .unwrap();
        assert_eq!(young.kcal, 1760.0);
        assert_eq!(young.kcal, older.kcal);
    }

    #[test]
    fn test_lean_mass_formulas() {
        // 80kg at 15% -> LBM 68kg
        assert!((lean_body_mass(80.0, 15.0) - 68.0).abs() < 1e-9);
        assert!((katch_mcardle(80.0, 15.0) - 1838.8).abs() < 1e-9);
        assert!((cunningham(80.0, 15.0) - 1996.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(BmrFormula::KatchMcArdle)]
    #[case(BmrFormula::Cunningham)]
    fn test_lean_mass_formula_without_body_fat_fails(#[case] formula: BmrFormula) {
        let err = calculate_bmr(&metrics(80.0, 180.0, 30, Gender::Male), formula).unwrap_err();
        assert_eq!(err, NutritionError::MissingBodyFat { formula });
    }

    #[rstest]
    #[case(0.0)]
    #[case(100.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    fn test_body_fat_out_of_range(#[case] body_fat: f64) {
        let mut m = metrics(80.0, 180.0, 30, Gender::Male);
        m.body_fat_percent = Some(body_fat);
        let err = calculate_bmr(&m, BmrFormula::Cunningham).unwrap_err();
        assert!(matches!(err, NutritionError::BodyFatOutOfRange(_)));
    }

    #[test]
    fn test_bmr_rejects_non_positive_measurements() {
        let formula = BmrFormula::MifflinStJeor;
        assert_eq!(
            calculate_bmr(&metrics(0.0, 175.0, 30, Gender::Male), formula)
                .unwrap_err()
                .to_string(),
            "weight must be greater than zero"
        );
        assert_eq!(
            calculate_bmr(&metrics(70.0, -1.0, 30, Gender::Male), formula).unwrap_err(),
            NutritionError::NonPositive { field: "height" }
        );
        assert_eq!(
            calculate_bmr(&metrics(70.0, 175.0, 0, Gender::Male), formula).unwrap_err(),
            NutritionError::NonPositive { field: "age" }
        );
    }

    #[test]
    fn test_bmr_rejects_age_above_limit() {
        assert_eq!(
            calculate_bmr(&metrics(70.0, 175.0, 400, Gender::Male), BmrFormula::HarrisBenedict)
                .unwrap_err(),
            NutritionError::AgeOutOfRange(400)
        );
        // A negative age coming through an unsigned boundary wraps far above the limit
        let wrapped = (-1i32) as u32;
        assert_eq!(
            calculate_bmr(&metrics(70.0, 175.0, wrapped, Gender::Male), BmrFormula::MifflinStJeor)
                .unwrap_err(),
            NutritionError::AgeOutOfRange(wrapped)
        );
        assert!(
            calculate_bmr(&metrics(70.0, 175.0, 150, Gender::Male), BmrFormula::HarrisBenedict)
                .is_ok()
        );
    }

    #[test]
    fn test_bmr_rejects_non_positive_result() {
        // 10 × 20 + 6.25 × 50 − 5 × 150 − 161 = −398.5
        let err = calculate_bmr(&metrics(20.0, 50.0, 150, Gender::Female), BmrFormula::MifflinStJeor)
            .unwrap_err();
        assert_eq!(
            err,
            NutritionError::NonPositiveBmr {
                formula: BmrFormula::MifflinStJeor,
                kcal: -398.5,
            }
        );
        assert!(!err.is_input_error());
    }

    // =========================================================================
    // GET Tests
    // =========================================================================

    #[test]
    fn test_get_reference_values() {
        let sedentary = calculate_get(1700.0, ActivityLevel::Sedentary).unwrap();
        assert!((sedentary - 2040.0).abs() < 1e-9);
        let moderate = calculate_get(1700.0, ActivityLevel::Moderate).unwrap();
        assert!((moderate - 2635.0).abs() < 1e-9);
    }

    #[test]
    fn test_get_rejects_non_positive_bmr() {
        assert_eq!(
            calculate_get(0.0, ActivityLevel::Light),
            Err(NutritionError::NonPositive { field: "BMR" })
        );
        assert!(calculate_get(-100.0, ActivityLevel::Light).is_err());
    }

    // =========================================================================
    // VET Tests
    // =========================================================================

    #[test]
    fn test_weight_loss_clamps_to_floor() {
        // 1500 - 500 = 1000 -> clamped to 1200
        let policy = ObjectivePolicy::default();
        let target = adjust_for_objective(1500.0, Objective::WeightLoss, None, &policy).unwrap();
        assert_eq!(target.kcal, 1200.0);
        assert!(target.floor_applied);
        assert_eq!(target.adjustment_kcal, -300.0);
    }

    #[test]
    fn test_weight_loss_default_deficit() {
        let policy = ObjectivePolicy::default();
        let target = adjust_for_objective(2400.0, Objective::WeightLoss, None, &policy).unwrap();
        assert_eq!(target.kcal, 1900.0);
        assert!(!target.floor_applied);
    }

    #[test]
    fn test_explicit_adjustments() {
        let policy = ObjectivePolicy::default();
        let loss = adjust_for_objective(2400.0, Objective::WeightLoss, Some(700.0), &policy).unwrap();
        assert_eq!(loss.kcal, 1700.0);
        let gain = adjust_for_objective(2400.0, Objective::Hypertrophy, Some(400.0), &policy).unwrap();
        assert_eq!(gain.kcal, 2800.0);
        let default_gain = adjust_for_objective(2400.0, Objective::Hypertrophy, None, &policy).unwrap();
        assert_eq!(default_gain.kcal, 2750.0);
    }

    #[test]
    fn test_maintenance_keeps_get() {
        let policy = ObjectivePolicy::default();
        let target =
            adjust_for_objective(2400.0, Objective::Maintenance, Some(300.0), &policy).unwrap();
        assert_eq!(target.kcal, 2400.0);
        assert_eq!(target.adjustment_kcal, 0.0);
    }

    #[test]
    fn test_adjuster_rejections() {
        let policy = ObjectivePolicy::default();
        assert_eq!(
            adjust_for_objective(0.0, Objective::Maintenance, None, &policy),
            Err(NutritionError::NonPositive { field: "GET" })
        );
        assert_eq!(
            adjust_for_objective(2000.0, Objective::WeightLoss, Some(-200.0), &policy),
            Err(NutritionError::NegativeAdjustment(-200.0))
        );
    }

    #[test]
    fn test_custom_floor() {
        let policy = ObjectivePolicy {
            calorie_floor_kcal: 1500.0,
            ..ObjectivePolicy::default()
        };
        let target = adjust_for_objective(1800.0, Objective::WeightLoss, None, &policy).unwrap();
        assert_eq!(target.kcal, 1500.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: a deficit never pushes VET below the floor
        #[test]
        fn prop_weight_loss_never_below_floor(
            get in 500.0f64..5000.0,
            deficit in 0.0f64..4000.0
        ) {
            let policy = ObjectivePolicy::default();
            let target = adjust_for_objective(get, Objective::WeightLoss, Some(deficit), &policy).unwrap();
            prop_assert!(target.kcal >= policy.calorie_floor_kcal);
            prop_assert_eq!(target.floor_applied, get - deficit < policy.calorie_floor_kcal);
        }

        /// Property: GET > BMR for every activity level
        #[test]
        fn prop_get_greater_than_bmr(bmr in 500.0f64..4000.0, idx in 0usize..5) {
            let level = ActivityLevel::ALL[idx];
            prop_assert!(calculate_get(bmr, level).unwrap() > bmr);
        }

        /// Property: Male BMR > Female BMR (same stats)
        #[test]
        fn prop_male_bmr_higher(
            weight in 50.0f64..100.0,
            height in 160.0f64..190.0,
            age in 20u32..60
        ) {
            prop_assert!(
                mifflin_st_jeor(weight, height, age, Gender::Male)
                    > mifflin_st_jeor(weight, height, age, Gender::Female)
            );
        }

        /// Property: heavier = higher BMR for every formula
        #[test]
        fn prop_bmr_increases_with_weight(
            w1 in 40.0f64..80.0,
            w2 in 80.0f64..150.0,
            body_fat in 5.0f64..40.0
        ) {
            for formula in [
                BmrFormula::HarrisBenedict,
                BmrFormula::MifflinStJeor,
                BmrFormula::AthleteMultiplier,
                BmrFormula::KatchMcArdle,
                BmrFormula::Cunningham,
            ] {
                let mut light = metrics(w1, 170.0, 30, Gender::Female);
                light.body_fat_percent = Some(body_fat);
                let mut heavy = light;
                heavy.weight_kg = w2;
                prop_assert!(
                    calculate_bmr(&heavy, formula).unwrap().kcal
                        > calculate_bmr(&light, formula).unwrap().kcal
                );
            }
        }
    }
}
