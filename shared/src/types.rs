//! Input types for nutrition calculations
//!
//! Canonical enums for every categorical input, plus the two input records:
//! [`CalculationRequest`] is the loosely-typed record received at the boundary
//! and [`CalculationInput`] is the validated, strongly-typed record the engine
//! consumes. String spellings are normalized exactly once, in the `FromStr`
//! impls below; anything not listed there is rejected.

use crate::errors::NutritionError;
use crate::meals::MealTemplate;
use crate::tables;
use crate::validation::{validate_request, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowercase, trim, and fold `-` and spaces into `_`
fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

// ============================================================================
// Gender
// ============================================================================

/// Biological sex used by the sex-specific BMR equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "male" | "m" | "masculino" => Ok(Gender::Male),
            "female" | "f" | "feminino" => Ok(Gender::Female),
            _ => Err(NutritionError::UnknownValue {
                kind: "gender",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Body-composition profile; selects the BMR formula and default macro ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    NormalWeight,
    OverweightOrObese,
    Athlete,
}

impl Profile {
    pub const ALL: [Profile; 3] = [
        Profile::NormalWeight,
        Profile::OverweightOrObese,
        Profile::Athlete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::NormalWeight => "normal_weight",
            Profile::OverweightOrObese => "overweight_or_obese",
            Profile::Athlete => "athlete",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "normal_weight" | "normal" | "eutrophic" | "eutrofico" | "eutrófico" => {
                Ok(Profile::NormalWeight)
            }
            "overweight_or_obese" | "overweight" | "obese" | "obesity" | "sobrepeso"
            | "obesidade" | "sobrepeso_obesidade" => Ok(Profile::OverweightOrObese),
            "athlete" | "atleta" => Ok(Profile::Athlete),
            _ => Err(NutritionError::UnknownValue {
                kind: "profile",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Activity Level
// ============================================================================

/// Daily activity level; selects the factor applied to BMR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise or physical job
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Factor applied to BMR to obtain GET
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => tables::activity::SEDENTARY,
            ActivityLevel::Light => tables::activity::LIGHT,
            ActivityLevel::Moderate => tables::activity::MODERATE,
            ActivityLevel::VeryActive => tables::activity::VERY_ACTIVE,
            ActivityLevel::ExtremelyActive => tables::activity::EXTREMELY_ACTIVE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "sedentary" | "sedentario" | "sedentário" => Ok(ActivityLevel::Sedentary),
            "light" | "lightly_active" | "leve" => Ok(ActivityLevel::Light),
            "moderate" | "moderately_active" | "moderado" => Ok(ActivityLevel::Moderate),
            "very_active" | "intenso" | "muito_ativo" => Ok(ActivityLevel::VeryActive),
            "extremely_active" | "extra_active" | "muito_intenso" | "extremamente_ativo" => {
                Ok(ActivityLevel::ExtremelyActive)
            }
            _ => Err(NutritionError::UnknownValue {
                kind: "activity level",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Objective
// ============================================================================

/// Patient goal; selects the caloric adjustment applied to GET
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Maintenance,
    WeightLoss,
    Hypertrophy,
}

impl Objective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Maintenance => "maintenance",
            Objective::WeightLoss => "weight_loss",
            Objective::Hypertrophy => "hypertrophy",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "maintenance" | "maintain" | "manutencao" | "manutenção" => Ok(Objective::Maintenance),
            "weight_loss" | "lose_weight" | "emagrecimento" | "perda_de_peso" => {
                Ok(Objective::WeightLoss)
            }
            "hypertrophy" | "muscle_gain" | "hipertrofia" | "ganho_de_massa" => {
                Ok(Objective::Hypertrophy)
            }
            _ => Err(NutritionError::UnknownValue {
                kind: "objective",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// BMR Formula
// ============================================================================

/// Equation used to estimate basal metabolic rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    HarrisBenedict,
    MifflinStJeor,
    /// 22 kcal per kg of body weight
    AthleteMultiplier,
    /// Lean-mass based; needs body-fat percentage
    KatchMcArdle,
    /// Lean-mass based; needs body-fat percentage
    Cunningham,
}

impl BmrFormula {
    /// Whether the formula is undefined without a body-fat percentage
    pub fn requires_body_fat(&self) -> bool {
        matches!(self, BmrFormula::KatchMcArdle | BmrFormula::Cunningham)
    }

    /// Canonical wire spelling (matches the serde name)
    pub fn as_str(&self) -> &'static str {
        match self {
            BmrFormula::HarrisBenedict => "harris_benedict",
            BmrFormula::MifflinStJeor => "mifflin_st_jeor",
            BmrFormula::AthleteMultiplier => "athlete_multiplier",
            BmrFormula::KatchMcArdle => "katch_mcardle",
            BmrFormula::Cunningham => "cunningham",
        }
    }

    /// Human-readable equation name
    pub fn label(&self) -> &'static str {
        match self {
            BmrFormula::HarrisBenedict => "Harris-Benedict",
            BmrFormula::MifflinStJeor => "Mifflin-St Jeor",
            BmrFormula::AthleteMultiplier => "Athlete multiplier",
            BmrFormula::KatchMcArdle => "Katch-McArdle",
            BmrFormula::Cunningham => "Cunningham",
        }
    }
}

impl fmt::Display for BmrFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BmrFormula {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "harris_benedict" | "harris" => Ok(BmrFormula::HarrisBenedict),
            "mifflin_st_jeor" | "mifflin" => Ok(BmrFormula::MifflinStJeor),
            "athlete_multiplier" | "athlete" => Ok(BmrFormula::AthleteMultiplier),
            "katch_mcardle" | "katch" => Ok(BmrFormula::KatchMcArdle),
            "cunningham" => Ok(BmrFormula::Cunningham),
            _ => Err(NutritionError::UnknownValue {
                kind: "BMR formula",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Input Records
// ============================================================================

/// Validated, strongly-typed input to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub gender: Gender,
    pub profile: Profile,
    pub activity_level: ActivityLevel,
    pub objective: Objective,
    /// Required only by lean-mass formulas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
    /// Magnitude of the deficit/surplus; the sign comes from the objective
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caloric_adjustment_kcal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g_per_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g_per_kg: Option<f64>,
    /// Fat as a share of VET instead of a per-kg ratio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_energy_percent: Option<f64>,
    /// Overrides the profile's formula
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmr_formula: Option<BmrFormula>,
    /// Overrides the engine's default meal template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_template: Option<MealTemplate>,
}

impl CalculationInput {
    /// Create an input with every optional field unset
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        gender: Gender,
        profile: Profile,
        activity_level: ActivityLevel,
        objective: Objective,
    ) -> Self {
        Self {
            weight_kg,
            height_cm,
            age_years,
            gender,
            profile,
            activity_level,
            objective,
            body_fat_percent: None,
            caloric_adjustment_kcal: None,
            protein_g_per_kg: None,
            fat_g_per_kg: None,
            fat_energy_percent: None,
            bmr_formula: None,
            meal_template: None,
        }
    }

    pub fn with_body_fat(mut self, percent: f64) -> Self {
        self.body_fat_percent = Some(percent);
        self
    }

    pub fn with_caloric_adjustment(mut self, kcal: f64) -> Self {
        self.caloric_adjustment_kcal = Some(kcal);
        self
    }

    pub fn with_protein_ratio(mut self, g_per_kg: f64) -> Self {
        self.protein_g_per_kg = Some(g_per_kg);
        self
    }

    pub fn with_fat_ratio(mut self, g_per_kg: f64) -> Self {
        self.fat_g_per_kg = Some(g_per_kg);
        self
    }

    pub fn with_fat_energy_percent(mut self, percent: f64) -> Self {
        self.fat_energy_percent = Some(percent);
        self
    }

    pub fn with_formula(mut self, formula: BmrFormula) -> Self {
        self.bmr_formula = Some(formula);
        self
    }

    pub fn with_meal_template(mut self, template: MealTemplate) -> Self {
        self.meal_template = Some(template);
        self
    }
}

/// Boundary record as delivered by collaborators (HTTP, wasm, legacy callers)
///
/// Categorical fields are free-form strings and age is signed so that every
/// problem can be reported by [`validate_request`] instead of failing at
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: i64,
    pub gender: String,
    pub profile: String,
    pub activity_level: String,
    pub objective: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caloric_adjustment_kcal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g_per_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g_per_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_energy_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmr_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_template: Option<MealTemplate>,
}

impl CalculationRequest {
    /// Run the pre-calculation checks without converting
    pub fn validate(&self) -> ValidationResult {
        validate_request(self)
    }
}

impl TryFrom<CalculationRequest> for CalculationInput {
    type Error = NutritionError;

    /// Normalize a boundary record; fails with every finding at once
    fn try_from(request: CalculationRequest) -> Result<Self, Self::Error> {
        let findings = validate_request(&request);
        if !findings.is_valid {
            return Err(NutritionError::InvalidInput(findings));
        }

        let age_years = u32::try_from(request.age_years)
            .map_err(|_| NutritionError::NonPositive { field: "age" })?;
        let bmr_formula = request
            .bmr_formula
            .as_deref()
            .map(BmrFormula::from_str)
            .transpose()?;

        Ok(CalculationInput {
            weight_kg: request.weight_kg,
            height_cm: request.height_cm,
            age_years,
            gender: request.gender.parse()?,
            profile: request.profile.parse()?,
            activity_level: request.activity_level.parse()?,
            objective: request.objective.parse()?,
            body_fat_percent: request.body_fat_percent,
            caloric_adjustment_kcal: request.caloric_adjustment_kcal,
            protein_g_per_kg: request.protein_g_per_kg,
            fat_g_per_kg: request.fat_g_per_kg,
            fat_energy_percent: request.fat_energy_percent,
            bmr_formula,
            meal_template: request.meal_template,
        })
    }
}

impl From<CalculationInput> for CalculationRequest {
    fn from(input: CalculationInput) -> Self {
        Self {
            weight_kg: input.weight_kg,
            height_cm: input.height_cm,
            age_years: i64::from(input.age_years),
            gender: input.gender.as_str().to_string(),
            profile: input.profile.as_str().to_string(),
            activity_level: input.activity_level.as_str().to_string(),
            objective: input.objective.as_str().to_string(),
            body_fat_percent: input.body_fat_percent,
            caloric_adjustment_kcal: input.caloric_adjustment_kcal,
            protein_g_per_kg: input.protein_g_per_kg,
            fat_g_per_kg: input.fat_g_per_kg,
            fat_energy_percent: input.fat_energy_percent,
            bmr_formula: input.bmr_formula.map(|f| f.as_str().to_string()),
            meal_template: input.meal_template,
        }
    }
}
