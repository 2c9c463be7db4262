//! TDEE Tools
//!
//! Calculator operations returning serializable responses for the MCP layer.

use serde::Serialize;

use crate::config::EstimatorDefaults;
use crate::energy::{
    estimate_tdee, EatLevel, Gender, NeatLevel, SaveTdeePayload, TdeeBreakdown, TdeeError,
    TdeeForm, TdeeInput, TdeeResult,
};

/// Recommended TEF range, percent
pub const TEF_RECOMMENDED: (f64, f64) = (8.0, 12.0);
/// Recommended error margin range, percent
pub const ERROR_MARGIN_RECOMMENDED: (f64, f64) = (8.0, 16.0);

// ============================================================================
// Response Structs
// ============================================================================

/// Response for calculate_tdee
#[derive(Debug, Serialize)]
pub struct CalculateTdeeResponse {
    /// Input after coercion, so the caller can see what was actually used
    pub input: TdeeInput,
    pub result: TdeeResult,
    pub breakdown: TdeeBreakdown,
    pub summary: Vec<String>,
    pub method_note: &'static str,
    pub advisories: Vec<String>,
    /// Present when a client id was supplied
    pub save_payload: Option<SaveTdeePayload>,
}

/// One NEAT level with its multiplier
#[derive(Debug, Serialize)]
pub struct NeatLevelInfo {
    pub key: &'static str,
    pub factor: f64,
    pub steps: &'static str,
}

/// One EAT level with its per-pound hourly rates
#[derive(Debug, Serialize)]
pub struct EatLevelInfo {
    pub key: &'static str,
    pub male_rate_per_pound: f64,
    pub female_rate_per_pound: f64,
}

/// Response for list_activity_levels
#[derive(Debug, Serialize)]
pub struct ActivityLevelsResponse {
    pub neat: Vec<NeatLevelInfo>,
    pub eat: Vec<EatLevelInfo>,
    pub unrecognized_neat_factor: f64,
}

// ============================================================================
// Tool Functions
// ============================================================================

/// Calculate a TDEE range from form values
pub fn calculate_tdee(
    form: &TdeeForm,
    defaults: &EstimatorDefaults,
    client_id: Option<i64>,
) -> Result<CalculateTdeeResponse, TdeeError> {
    let input = form.to_input(defaults);
    calculate_from_input(input, client_id)
}

/// Calculate a TDEE range from already-coerced input
pub fn calculate_from_input(
    input: TdeeInput,
    client_id: Option<i64>,
) -> Result<CalculateTdeeResponse, TdeeError> {
    let breakdown = estimate_tdee(&input).inspect_err(|e| {
        tracing::info!("TDEE calculation rejected: {}", e);
    })?;
    let result = breakdown.result;

    Ok(CalculateTdeeResponse {
        summary: summary_lines(&result),
        method_note: breakdown.bmr_method.accuracy_note(),
        advisories: advisories(&input),
        save_payload: client_id.map(|id| result.to_save_payload(id)),
        result,
        breakdown,
        input,
    })
}

/// NEAT factors and EAT rates
pub fn activity_levels() -> ActivityLevelsResponse {
    ActivityLevelsResponse {
        neat: NeatLevel::ALL
            .iter()
            .map(|level| NeatLevelInfo {
                key: level.as_str(),
                factor: level.factor(),
                steps: level.steps_description(),
            })
            .collect(),
        eat: EatLevel::ALL
            .iter()
            .map(|level| EatLevelInfo {
                key: level.as_str(),
                male_rate_per_pound: level.rate_per_pound(Gender::Male),
                female_rate_per_pound: level.rate_per_pound(Gender::Female),
            })
            .collect(),
        unrecognized_neat_factor: crate::energy::neat_factor(None),
    }
}

fn summary_lines(result: &TdeeResult) -> Vec<String> {
    vec![
        format!(
            "Normal TDEE Range: {:.2} - {:.2} kcal/day - Error Margin: {}%",
            result.lower, result.upper, result.error_margin
        ),
        format!("Average TDEE: {:.2} kcal/day", result.average),
    ]
}

fn advisories(input: &TdeeInput) -> Vec<String> {
    let mut notes = Vec::new();

    let (tef_low, tef_high) = TEF_RECOMMENDED;
    if input.tef_percentage < tef_low || input.tef_percentage > tef_high {
        notes.push(format!(
            "TEF of {}% is outside the usual {}-{}% range (10% is average; higher protein intake sits near 12%)",
            input.tef_percentage, tef_low, tef_high
        ));
    }

    let (margin_low, margin_high) = ERROR_MARGIN_RECOMMENDED;
    if input.error_margin < margin_low || input.error_margin > margin_high {
        notes.push(format!(
            "Error margin of {}% is outside the recommended {}-{}% range (10% is the norm)",
            input.error_margin, margin_low, margin_high
        ));
    }

    if input.activity_level_neat.is_none() {
        notes.push("NEAT activity level not recognized; no NEAT adjustment applied".to_string());
    }

    if input.activity_level_eat != EatLevel::NoExercise
        && input.gender == Gender::Other
    {
        notes.push(
            "Exercise calories need a Male or Female rate table; none were added".to_string(),
        );
    }

    notes
}
