//! Nutriplan WASM Module
//!
//! WebAssembly bindings so the browser can run the same calculation engine
//! as the backend. Records cross the boundary as JSON strings; failures come
//! back as `JsValue` strings carrying the error message.

use nutriplan_shared::{
    calculate_bmr as bmr, calculate_plan as plan, select_formula, ActivityLevel, BmrFormula,
    BodyMetrics, CalculationInput, CalculationRequest, Gender, Profile,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn plan_json(request_json: &str) -> Result<String, String> {
    let request: CalculationRequest =
        serde_json::from_str(request_json).map_err(|e| format!("malformed request: {e}"))?;
    let input = CalculationInput::try_from(request).map_err(|e| e.to_string())?;
    let result = plan(&input).map_err(|e| e.to_string())?;
    to_json(&result)
}

fn validation_json(request_json: &str) -> Result<String, String> {
    let request: CalculationRequest =
        serde_json::from_str(request_json).map_err(|e| format!("malformed request: {e}"))?;
    to_json(&request.validate())
}

fn bmr_kcal(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    gender: &str,
    profile: &str,
    body_fat_percent: Option<f64>,
    formula: Option<String>,
) -> Result<f64, String> {
    let gender = gender.parse::<Gender>().map_err(|e| e.to_string())?;
    let profile = profile.parse::<Profile>().map_err(|e| e.to_string())?;
    let requested = formula
        .as_deref()
        .map(str::parse::<BmrFormula>)
        .transpose()
        .map_err(|e| e.to_string())?;

    let metrics = BodyMetrics {
        weight_kg,
        height_cm,
        age_years,
        gender,
        body_fat_percent,
    };
    let formula = select_formula(profile, body_fat_percent, requested);
    bmr(&metrics, formula)
        .map(|result| result.kcal)
        .map_err(|e| e.to_string())
}

/// Calculate a complete nutrition plan from a JSON `CalculationRequest`
#[wasm_bindgen]
pub fn calculate_plan(request_json: &str) -> Result<String, JsValue> {
    plan_json(request_json).map_err(|e| JsValue::from_str(&e))
}

/// Run pre-calculation validation; always returns a `ValidationResult`
#[wasm_bindgen]
pub fn validate_request(request_json: &str) -> Result<String, JsValue> {
    validation_json(request_json).map_err(|e| JsValue::from_str(&e))
}

/// Calculate BMR (kcal/day) with the profile's formula or an explicit one
#[wasm_bindgen]
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    gender: &str,
    profile: &str,
    body_fat_percent: Option<f64>,
    formula: Option<String>,
) -> Result<f64, JsValue> {
    bmr_kcal(
        weight_kg,
        height_cm,
        age_years,
        gender,
        profile,
        body_fat_percent,
        formula,
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Activity factor for a level name; legacy spellings accepted
#[wasm_bindgen]
pub fn activity_factor(level: &str) -> Result<f64, JsValue> {
    level
        .parse::<ActivityLevel>()
        .map(|level| level.factor())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
