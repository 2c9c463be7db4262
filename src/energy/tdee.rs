//! TDEE estimation
//!
//! Total daily energy expenditure is built up from four terms:
//!
//! - BMR: Katch-McArdle when a body fat estimate is known, otherwise
//!   Mifflin-St Jeor (gender dependent)
//! - TEF: a percentage of BMR
//! - NEAT: the step-count factor applied to BMR, minus BMR itself
//! - EAT: weekly gym calories spread across seven days
//!
//! The total is then widened into a symmetric range by the error margin.
//!
//! Gender is the only input that can fail an estimate. Every other field has
//! already been coerced to a number (0 when unreadable) by the time it gets
//! here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::parse::{parse_height_cm, parse_weight_lbs};
use super::tables::{neat_factor, EatLevel, Gender, NeatLevel, KG_PER_LB};

/// Default thermic effect of food, percent of BMR
pub const DEFAULT_TEF_PERCENTAGE: f64 = 10.0;
/// Default error margin, percent of TDEE
pub const DEFAULT_ERROR_MARGIN: f64 = 10.0;

/// Estimation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TdeeError {
    #[error("Invalid gender specified: '{gender}'. Mifflin-St Jeor requires Male or Female; supply a body fat estimate to use Katch-McArdle instead")]
    InvalidGender { gender: Gender },
}

/// Inputs to a TDEE estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdeeInput {
    /// `5'10"` or `178cm`
    pub height: String,
    /// Pounds, free-form
    pub weight: String,
    pub age: u32,
    pub gender: Gender,
    /// Body fat percentage
    pub bodyfat_est: Option<f64>,
    /// `None` means an unrecognized level (factor 1.0)
    pub activity_level_neat: Option<NeatLevel>,
    pub activity_level_eat: EatLevel,
    pub exercise_days_per_week: u32,
    /// Minutes per session
    pub gym_duration: f64,
    pub tef_percentage: f64,
    pub error_margin: f64,
}

impl Default for TdeeInput {
    fn default() -> Self {
        Self {
            height: String::new(),
            weight: String::new(),
            age: 0,
            gender: Gender::Male,
            bodyfat_est: None,
            activity_level_neat: Some(NeatLevel::Sedentary),
            activity_level_eat: EatLevel::NoExercise,
            exercise_days_per_week: 0,
            gym_duration: 0.0,
            tef_percentage: DEFAULT_TEF_PERCENTAGE,
            error_margin: DEFAULT_ERROR_MARGIN,
        }
    }
}

/// Estimated TDEE range in kcal/day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdeeResult {
    pub lower: f64,
    pub upper: f64,
    pub average: f64,
    pub error_margin: f64,
}

impl TdeeResult {
    /// Widen a point estimate by `error_margin` percent each way.
    ///
    /// `average` is taken from the bounds, not from `tdee`, so stored values
    /// keep the same float rounding they always had.
    pub fn from_tdee(tdee: f64, error_margin: f64) -> Self {
        let lower = tdee * (1.0 - error_margin / 100.0);
        let upper = tdee * (1.0 + error_margin / 100.0);
        let average = (lower + upper) / 2.0;
        Self {
            lower,
            upper,
            average,
            error_margin,
        }
    }

    /// Body for the `save_tdee` endpoint
    pub fn to_save_payload(&self, client_id: i64) -> SaveTdeePayload {
        SaveTdeePayload {
            client_id,
            normal_tdee: NormalTdee {
                lower: self.lower,
                upper: self.upper,
                error_margin: self.error_margin,
            },
            average_tdee: self.average,
        }
    }
}

/// TDEE range as the backend stores it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalTdee {
    pub lower: f64,
    pub upper: f64,
    #[serde(rename = "ErrorMargin")]
    pub error_margin: f64,
}

/// Request body for persisting an estimate against a client
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaveTdeePayload {
    pub client_id: i64,
    pub normal_tdee: NormalTdee,
    pub average_tdee: f64,
}

/// Which BMR equation was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrMethod {
    KatchMcArdle,
    MifflinStJeor,
}

impl BmrMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            BmrMethod::KatchMcArdle => "Katch-McArdle",
            BmrMethod::MifflinStJeor => "Mifflin-St Jeor",
        }
    }

    pub fn accuracy_note(&self) -> &'static str {
        match self {
            BmrMethod::KatchMcArdle => {
                "Katch-McArdle uses lean body mass from the body fat estimate. \
                 Usually within 5-10% of actual BMR when the estimate is accurate."
            }
            BmrMethod::MifflinStJeor => {
                "Mifflin-St Jeor is used when body fat percentage is not available. \
                 Usually within 10-15% of actual BMR."
            }
        }
    }
}

/// Every intermediate term of an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdeeBreakdown {
    pub weight_lbs: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmr: f64,
    pub bmr_method: BmrMethod,
    pub tef: f64,
    pub neat_adjustment: f64,
    pub daily_exercise_calories: f64,
    pub tdee: f64,
    pub result: TdeeResult,
}

/// Basal metabolic rate in kcal/day.
///
/// A body fat estimate bypasses the gender branch entirely.
pub fn basal_metabolic_rate(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    bodyfat_est: Option<f64>,
) -> Result<(f64, BmrMethod), TdeeError> {
    if let Some(bodyfat) = bodyfat_est {
        let lean_body_mass = weight_kg * (1.0 - bodyfat / 100.0);
        return Ok((370.0 + 21.6 * lean_body_mass, BmrMethod::KatchMcArdle));
    }

    let age = f64::from(age);
    let bmr = match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
        Gender::Other => return Err(TdeeError::InvalidGender { gender }),
    };
    Ok((bmr, BmrMethod::MifflinStJeor))
}

/// Gym calories averaged over the whole week
pub fn daily_exercise_calories(
    gender: Gender,
    level: EatLevel,
    weight_lbs: f64,
    gym_minutes: f64,
    days_per_week: u32,
) -> f64 {
    let calories_per_hour = level.rate_per_pound(gender) * weight_lbs;
    let weekly = calories_per_hour * (gym_minutes / 60.0) * f64::from(days_per_week);
    weekly / 7.0
}

/// Estimate TDEE and keep every intermediate term
pub fn estimate_tdee(input: &TdeeInput) -> Result<TdeeBreakdown, TdeeError> {
    let weight_lbs = parse_weight_lbs(&input.weight);
    let weight_kg = weight_lbs * KG_PER_LB;
    let height_cm = parse_height_cm(&input.height);

    let (bmr, bmr_method) = basal_metabolic_rate(
        weight_kg,
        height_cm,
        input.age,
        input.gender,
        input.bodyfat_est,
    )?;

    let tef = bmr * (input.tef_percentage / 100.0);
    let neat_adjustment = bmr * (neat_factor(input.activity_level_neat) - 1.0);
    let daily_exercise_calories = daily_exercise_calories(
        input.gender,
        input.activity_level_eat,
        weight_lbs,
        input.gym_duration,
        input.exercise_days_per_week,
    );

    let tdee = bmr + tef + neat_adjustment + daily_exercise_calories;
    let result = TdeeResult::from_tdee(tdee, input.error_margin);

    tracing::debug!(
        weight_kg,
        height_cm,
        bmr,
        method = bmr_method.display_name(),
        tef,
        neat_adjustment,
        daily_exercise_calories,
        tdee,
        "TDEE estimated"
    );

    Ok(TdeeBreakdown {
        weight_lbs,
        weight_kg,
        height_cm,
        bmr,
        bmr_method,
        tef,
        neat_adjustment,
        daily_exercise_calories,
        tdee,
        result,
    })
}

/// Estimate the TDEE range for a client
pub fn compute_tdee(input: &TdeeInput) -> Result<TdeeResult, TdeeError> {
    estimate_tdee(input).map(|breakdown| breakdown.result)
}
