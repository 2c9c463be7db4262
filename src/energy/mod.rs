//! Energy expenditure module
//!
//! TDEE estimation from client biometrics and activity levels.

pub mod form;
pub mod parse;
pub mod tables;
pub mod tdee;

pub use form::TdeeForm;
pub use parse::{
    age_from_dob, parse_dob, parse_height_cm, parse_height_inches, parse_leading_number,
    parse_weight_lbs,
};
pub use tables::{neat_factor, EatLevel, Gender, NeatLevel};
pub use tdee::{
    basal_metabolic_rate, compute_tdee, daily_exercise_calories, estimate_tdee, BmrMethod,
    NormalTdee, SaveTdeePayload, TdeeBreakdown, TdeeError, TdeeInput, TdeeResult,
    DEFAULT_ERROR_MARGIN, DEFAULT_TEF_PERCENTAGE,
};
