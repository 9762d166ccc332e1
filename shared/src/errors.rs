//! Error types for the nutrition engine

use crate::types::BmrFormula;
use crate::validation::ValidationResult;
use thiserror::Error;

/// Engine-wide error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NutritionError {
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("{field} must be a valid number")]
    NotFinite { field: &'static str },

    #[error("age must be at most {max} years, got {0}", max = crate::tables::limits::MAX_AGE_YEARS)]
    AgeOutOfRange(u32),

    #[error("{formula} requires a body-fat percentage")]
    MissingBodyFat { formula: BmrFormula },

    #[error("body-fat percentage must be between 0 and 100, got {0}")]
    BodyFatOutOfRange(f64),

    #[error("unrecognized {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("caloric adjustment must not be negative, got {0}")]
    NegativeAdjustment(f64),

    #[error("fat energy share must be between 0 and 100 percent, got {0}")]
    FatShareOutOfRange(f64),

    /// The equation produced no usable basal rate for these measurements
    #[error("{formula} yields a non-positive BMR ({kcal:.1} kcal) for these measurements")]
    NonPositiveBmr { formula: BmrFormula, kcal: f64 },

    /// Protein and fat together consume the whole caloric budget
    #[error(
        "protein ({protein_kcal:.0} kcal) and fat ({fat_kcal:.0} kcal) leave no energy for carbohydrate out of {energy_kcal:.0} kcal"
    )]
    CarbohydrateBudgetExhausted {
        protein_kcal: f64,
        fat_kcal: f64,
        energy_kcal: f64,
    },

    /// Pre-calculation validation rejected the input; carries every finding
    #[error("invalid input: {}", .0.errors.join("; "))]
    InvalidInput(ValidationResult),

    /// A derived plan broke one of its own invariants
    #[error("inconsistent plan: {}", .0.errors.join("; "))]
    InconsistentPlan(ValidationResult),

    #[error("invalid engine configuration: {}", .0.errors.join("; "))]
    InvalidConfig(ValidationResult),
}

impl NutritionError {
    /// Whether the error comes from the caller's input rather than a derived value
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            NutritionError::NonPositiveBmr { .. }
                | NutritionError::CarbohydrateBudgetExhausted { .. }
                | NutritionError::InconsistentPlan(_)
                | NutritionError::InvalidConfig(_)
        )
    }
}

/// Reject zero, negative and non-finite values for a named field
pub(crate) fn ensure_positive(value: f64, field: &'static str) -> Result<(), NutritionError> {
    if !value.is_finite() {
        return Err(NutritionError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(NutritionError::NonPositive { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_message() {
        let err = NutritionError::NonPositive { field: "weight" };
        assert_eq!(err.to_string(), "weight must be greater than zero");
    }

    #[test]
    fn test_missing_body_fat_names_formula() {
        let err = NutritionError::MissingBodyFat {
            formula: BmrFormula::KatchMcArdle,
        };
        assert_eq!(err.to_string(), "Katch-McArdle requires a body-fat percentage");
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive(70.0, "weight").is_ok());
        assert_eq!(
            ensure_positive(0.0, "height"),
            Err(NutritionError::NonPositive { field: "height" })
        );
        assert_eq!(
            ensure_positive(f64::NAN, "weight"),
            Err(NutritionError::NotFinite { field: "weight" })
        );
    }

    #[test]
    fn test_derivation_errors_are_not_input_errors() {
        let err = NutritionError::CarbohydrateBudgetExhausted {
            protein_kcal: 800.0,
            fat_kcal: 600.0,
            energy_kcal: 1200.0,
        };
        assert!(!err.is_input_error());
        assert!(NutritionError::NegativeAdjustment(-1.0).is_input_error());
    }
}
