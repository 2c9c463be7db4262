//! Lookup tables and conversion constants
//!
//! Activity level enums keyed to their NEAT factors and EAT rates, plus the
//! imperial/metric constants used by the estimator.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;
/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// NEAT factor for a missing or unrecognized activity level
pub const DEFAULT_NEAT_FACTOR: f64 = 1.0;

// ============================================================================
// Gender
// ============================================================================

/// Gender as entered on the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Only the exact form values `Male` and `Female` are recognized;
    /// anything else, including `male` or a blank, maps to `Other`
    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// NEAT (non-exercise activity)
// ============================================================================

/// Daily non-exercise activity, bucketed by step count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeatLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    #[serde(rename = "Very_Active")]
    VeryActive,
    #[serde(rename = "Extremely_Active")]
    ExtremelyActive,
}

impl NeatLevel {
    pub const ALL: [NeatLevel; 6] = [
        NeatLevel::Sedentary,
        NeatLevel::Light,
        NeatLevel::Moderate,
        NeatLevel::Active,
        NeatLevel::VeryActive,
        NeatLevel::ExtremelyActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NeatLevel::Sedentary => "Sedentary",
            NeatLevel::Light => "Light",
            NeatLevel::Moderate => "Moderate",
            NeatLevel::Active => "Active",
            NeatLevel::VeryActive => "Very_Active",
            NeatLevel::ExtremelyActive => "Extremely_Active",
        }
    }

    /// Exact form key lookup (`Very_Active`, not `very active`)
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == s)
    }

    /// Multiplier applied to BMR
    pub fn factor(&self) -> f64 {
        match self {
            NeatLevel::Sedentary => 1.01,
            NeatLevel::Light => 1.05,
            NeatLevel::Moderate => 1.1,
            NeatLevel::Active => 1.15,
            NeatLevel::VeryActive => 1.2,
            NeatLevel::ExtremelyActive => 1.25,
        }
    }

    pub fn steps_description(&self) -> &'static str {
        match self {
            NeatLevel::Sedentary => "0 - 2999 steps/day (e.g., office worker)",
            NeatLevel::Light => "3000 - 4999 steps/day (e.g., teacher, cashier)",
            NeatLevel::Moderate => "5000 - 7499 steps/day (e.g., retail worker, nurse)",
            NeatLevel::Active => "7500 - 9999 steps/day (e.g., construction worker, landscaper)",
            NeatLevel::VeryActive => {
                "10000 - 14999 steps/day (e.g., mail carrier, professional athlete)"
            }
            NeatLevel::ExtremelyActive => {
                "15000+ steps/day (e.g., manual laborer, professional dancer)"
            }
        }
    }
}

/// NEAT factor for an optional level, falling back to 1.0
pub fn neat_factor(level: Option<NeatLevel>) -> f64 {
    level.map(|l| l.factor()).unwrap_or(DEFAULT_NEAT_FACTOR)
}

// ============================================================================
// EAT (exercise activity)
// ============================================================================

/// Intensity of deliberate exercise sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EatLevel {
    #[serde(rename = "None")]
    NoExercise,
    Light,
    Moderate,
    Intense,
    #[serde(rename = "Very_Intense")]
    VeryIntense,
}

impl EatLevel {
    pub const ALL: [EatLevel; 5] = [
        EatLevel::NoExercise,
        EatLevel::Light,
        EatLevel::Moderate,
        EatLevel::Intense,
        EatLevel::VeryIntense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EatLevel::NoExercise => "None",
            EatLevel::Light => "Light",
            EatLevel::Moderate => "Moderate",
            EatLevel::Intense => "Intense",
            EatLevel::VeryIntense => "Very_Intense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == s)
    }

    /// Calories per pound of body weight per hour of exercise.
    ///
    /// `Gender::Other` has no row in the table and burns 0.
    pub fn rate_per_pound(&self, gender: Gender) -> f64 {
        match (gender, self) {
            (Gender::Male, EatLevel::VeryIntense) => 6.078,
            (Gender::Male, EatLevel::Intense) => 4.559,
            (Gender::Male, EatLevel::Moderate) => 3.039,
            (Gender::Male, EatLevel::Light) => 1.520,
            (Gender::Female, EatLevel::VeryIntense) => 5.868,
            (Gender::Female, EatLevel::Intense) => 4.398,
            (Gender::Female, EatLevel::Moderate) => 2.931,
            (Gender::Female, EatLevel::Light) => 1.466,
            (_, EatLevel::NoExercise) | (Gender::Other, _) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neat_factors() {
        assert_eq!(NeatLevel::Sedentary.factor(), 1.01);
        assert_eq!(NeatLevel::Light.factor(), 1.05);
        assert_eq!(NeatLevel::Moderate.factor(), 1.1);
        assert_eq!(NeatLevel::Active.factor(), 1.15);
        assert_eq!(NeatLevel::VeryActive.factor(), 1.2);
        assert_eq!(NeatLevel::ExtremelyActive.factor(), 1.25);
    }

    #[test]
    fn test_neat_factor_fallback() {
        assert_eq!(neat_factor(None), 1.0);
        assert_eq!(neat_factor(NeatLevel::from_str("couch_potato")), 1.0);
        assert_eq!(neat_factor(Some(NeatLevel::Active)), 1.15);
    }

    #[test]
    fn test_neat_level_parsing() {
        assert_eq!(NeatLevel::from_str("Very_Active"), Some(NeatLevel::VeryActive));
        assert_eq!(NeatLevel::from_str("Extremely_Active"), Some(NeatLevel::ExtremelyActive));
        assert_eq!(NeatLevel::from_str(""), None);
    }

    #[test]
    fn test_level_keys_are_exact() {
        assert_eq!(NeatLevel::from_str("very active"), None);
        assert_eq!(NeatLevel::from_str("sedentary"), None);
        assert_eq!(NeatLevel::from_str("Extremely-Active"), None);
        assert_eq!(neat_factor(NeatLevel::from_str("very active")), 1.0);
        assert_eq!(neat_factor(NeatLevel::from_str("sedentary")), 1.0);
        assert_eq!(EatLevel::from_str("none"), None);
        assert_eq!(EatLevel::from_str("very intense"), None);
        assert_eq!(EatLevel::from_str("Very_Intense"), Some(EatLevel::VeryIntense));
    }

    #[test]
    fn test_eat_rates() {
        assert_eq!(EatLevel::VeryIntense.rate_per_pound(Gender::Male), 6.078);
        assert_eq!(EatLevel::Light.rate_per_pound(Gender::Male), 1.520);
        assert_eq!(EatLevel::Intense.rate_per_pound(Gender::Female), 4.398);
        assert_eq!(EatLevel::Moderate.rate_per_pound(Gender::Female), 2.931);
        assert_eq!(EatLevel::NoExercise.rate_per_pound(Gender::Female), 0.0);
        assert_eq!(EatLevel::VeryIntense.rate_per_pound(Gender::Other), 0.0);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!(Gender::from_str("Male"), Gender::Male);
        assert_eq!(Gender::from_str(" Female "), Gender::Female);
        assert_eq!(Gender::from_str("Other"), Gender::Other);
        assert_eq!(Gender::from_str("nonbinary"), Gender::Other);
    }

    #[test]
    fn test_gender_is_case_sensitive() {
        assert_eq!(Gender::from_str("male"), Gender::Other);
        assert_eq!(Gender::from_str(" FEMALE "), Gender::Other);
        assert_eq!(Gender::from_str(""), Gender::Other);
    }

    #[test]
    fn test_serde_keys_match_form_values() {
        assert_eq!(
            serde_json::to_string(&NeatLevel::VeryActive).unwrap(),
            "\"Very_Active\""
        );
        assert_eq!(
            serde_json::to_string(&EatLevel::NoExercise).unwrap(),
            "\"None\""
        );
        let level: EatLevel = serde_json::from_str("\"Very_Intense\"").unwrap();
        assert_eq!(level, EatLevel::VeryIntense);
    }

    #[test]
    fn test_as_str_round_trips_through_from_str() {
        for level in NeatLevel::ALL {
            assert_eq!(NeatLevel::from_str(level.as_str()), Some(level));
        }
        for level in EatLevel::ALL {
            assert_eq!(EatLevel::from_str(level.as_str()), Some(level));
        }
    }
}
