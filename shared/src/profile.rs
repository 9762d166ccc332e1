//! Profile classifier
//!
//! Maps a body-composition profile to the BMR formula family and the default
//! per-kilogram protein and fat ratios that apply to it. Pure lookup.

use crate::tables::ratios;
use crate::types::{BmrFormula, Profile};
use serde::{Deserialize, Serialize};

/// Recommended per-kilogram range with the point used when no override is given
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl RatioRange {
    fn from_table((min, max, default): (f64, f64, f64)) -> Self {
        Self { min, max, default }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Everything the calculators need to know about a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileDescriptor {
    pub profile: Profile,
    /// Formula used when no body-fat percentage is available
    pub formula: BmrFormula,
    /// Formula used when a body-fat percentage is supplied
    pub lean_mass_formula: Option<BmrFormula>,
    pub protein_g_per_kg: RatioRange,
    pub fat_g_per_kg: RatioRange,
}

impl ProfileDescriptor {
    /// Formula for this profile given whether body fat is known
    pub fn formula_for(&self, body_fat_percent: Option<f64>) -> BmrFormula {
        match (self.lean_mass_formula, body_fat_percent) {
            (Some(formula), Some(_)) => formula,
            _ => self.formula,
        }
    }
}

/// Look up the descriptor for a profile
pub fn classify(profile: Profile) -> ProfileDescriptor {
    match profile {
        Profile::NormalWeight => ProfileDescriptor {
            profile,
            formula: BmrFormula::HarrisBenedict,
            lean_mass_formula: None,
            protein_g_per_kg: RatioRange::from_table(ratios::NORMAL_WEIGHT_PROTEIN),
            fat_g_per_kg: RatioRange::from_table(ratios::NORMAL_WEIGHT_FAT),
        },
        Profile::OverweightOrObese => ProfileDescriptor {
            profile,
            formula: BmrFormula::MifflinStJeor,
            lean_mass_formula: None,
            protein_g_per_kg: RatioRange::from_table(ratios::OVERWEIGHT_PROTEIN),
            fat_g_per_kg: RatioRange::from_table(ratios::OVERWEIGHT_FAT),
        },
        Profile::Athlete => ProfileDescriptor {
            profile,
            formula: BmrFormula::AthleteMultiplier,
            lean_mass_formula: Some(BmrFormula::Cunningham),
            protein_g_per_kg: RatioRange::from_table(ratios::ATHLETE_PROTEIN),
            fat_g_per_kg: RatioRange::from_table(ratios::ATHLETE_FAT),
        },
    }
}

/// Resolve the formula to run: an explicit request wins over the profile
///
/// An explicit lean-mass formula is returned even without body fat so that the
/// BMR calculator can reject it; it is never swapped for another formula.
pub fn select_formula(
    profile: Profile,
    body_fat_percent: Option<f64>,
    requested: Option<BmrFormula>,
) -> BmrFormula {
    requested.unwrap_or_else(|| classify(profile).formula_for(body_fat_percent))
}
