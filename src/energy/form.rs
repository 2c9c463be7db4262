//! TDEE form state
//!
//! A `TdeeForm` holds the calculator fields as text, the way a stored
//! nutrition profile or a trainer's edits deliver them. `to_input` coerces
//! them into a `TdeeInput` without ever failing.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::parse::{age_from_dob, parse_leading_number};
use super::tables::{EatLevel, Gender, NeatLevel};
use super::tdee::TdeeInput;
use crate::config::EstimatorDefaults;

/// Calculator fields as entered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TdeeForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    /// Takes precedence over `age` when it parses
    #[serde(default, deserialize_with = "lenient_string")]
    pub dob: Option<String>,
    /// Absent means the form default (`Male`); an explicit null is kept as a
    /// blank entry so it fails the way any unrecognized gender does
    #[serde(default, deserialize_with = "null_as_blank")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bodyfat_est: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity_level_neat: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity_level_eat: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub exercise_days_per_week: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gym_duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tef_percentage: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error_margin: Option<String>,
}

impl TdeeForm {
    /// Lay `overrides` over these values, field by field.
    ///
    /// An explicit age in the overrides discards the stored date of birth,
    /// otherwise the edit would be shadowed.
    pub fn merge(&self, overrides: &TdeeForm) -> TdeeForm {
        fn pick(over: &Option<String>, base: &Option<String>) -> Option<String> {
            over.clone().or_else(|| base.clone())
        }

        let dob = if overrides.age.is_some() && overrides.dob.is_none() {
            None
        } else {
            pick(&overrides.dob, &self.dob)
        };

        TdeeForm {
            height: pick(&overrides.height, &self.height),
            weight: pick(&overrides.weight, &self.weight),
            age: pick(&overrides.age, &self.age),
            dob,
            gender: pick(&overrides.gender, &self.gender),
            bodyfat_est: pick(&overrides.bodyfat_est, &self.bodyfat_est),
            activity_level_neat: pick(&overrides.activity_level_neat, &self.activity_level_neat),
            activity_level_eat: pick(&overrides.activity_level_eat, &self.activity_level_eat),
            exercise_days_per_week: pick(
                &overrides.exercise_days_per_week,
                &self.exercise_days_per_week,
            ),
            gym_duration: pick(&overrides.gym_duration, &self.gym_duration),
            tef_percentage: pick(&overrides.tef_percentage, &self.tef_percentage),
            error_margin: pick(&overrides.error_margin, &self.error_margin),
        }
    }

    /// Coerce into estimator input, computing age as of today
    pub fn to_input(&self, defaults: &EstimatorDefaults) -> TdeeInput {
        self.to_input_on(defaults, chrono::Local::now().date_naive())
    }

    /// Coerce into estimator input, computing age as of `today`
    pub fn to_input_on(&self, defaults: &EstimatorDefaults, today: NaiveDate) -> TdeeInput {
        TdeeInput {
            height: self.height.clone().unwrap_or_default(),
            weight: self.weight.clone().unwrap_or_default(),
            age: self.resolve_age(today),
            gender: self
                .gender
                .as_deref()
                .map(Gender::from_str)
                .unwrap_or(Gender::Male),
            bodyfat_est: non_blank(&self.bodyfat_est)
                .map(|raw| parse_leading_number(raw).unwrap_or(0.0)),
            activity_level_neat: self.resolve_neat(),
            activity_level_eat: self.resolve_eat(),
            exercise_days_per_week: whole_number(&self.exercise_days_per_week),
            gym_duration: non_blank(&self.gym_duration)
                .and_then(parse_leading_number)
                .unwrap_or(0.0),
            tef_percentage: match non_blank(&self.tef_percentage) {
                Some(raw) => parse_leading_number(raw).unwrap_or(0.0),
                None => defaults.tef_percentage,
            },
            error_margin: non_blank(&self.error_margin)
                .and_then(parse_leading_number)
                .unwrap_or(defaults.error_margin),
        }
    }

    fn resolve_age(&self, today: NaiveDate) -> u32 {
        if let Some(age) = non_blank(&self.dob).and_then(|dob| age_from_dob(dob, today)) {
            return age;
        }
        whole_number(&self.age)
    }

    fn resolve_neat(&self) -> Option<NeatLevel> {
        match self.activity_level_neat.as_deref() {
            None => Some(NeatLevel::Sedentary),
            Some(raw) => {
                let level = NeatLevel::from_str(raw);
                if level.is_none() {
                    tracing::warn!("Unrecognized NEAT activity level '{}', using factor 1.0", raw);
                }
                level
            }
        }
    }

    fn resolve_eat(&self) -> EatLevel {
        match self.activity_level_eat.as_deref() {
            None => EatLevel::NoExercise,
            Some(raw) => EatLevel::from_str(raw).unwrap_or_else(|| {
                tracing::warn!("Unrecognized EAT activity level '{}', treating as None", raw);
                EatLevel::NoExercise
            }),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Non-negative integer from a leading number; fractions truncate, junk is 0
fn whole_number(value: &Option<String>) -> u32 {
    non_blank(value)
        .and_then(parse_leading_number)
        .map(|n| n.max(0.0).trunc() as u32)
        .unwrap_or(0)
}

/// Accept strings, numbers and booleans for a text field
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Like `lenient_string`, but a present `null` becomes `Some("")`
fn null_as_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.or_else(|| Some(String::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn text(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn sample_form() -> TdeeForm {
        TdeeForm {
            height: text("5'10"),
            weight: text("180"),
            age: text("30"),
            gender: text("Male"),
            bodyfat_est: text(""),
            activity_level_neat: text("Sedentary"),
            activity_level_eat: text("None"),
            exercise_days_per_week: text("0"),
            gym_duration: text("0"),
            tef_percentage: text("10"),
            ..TdeeForm::default()
        }
    }

    #[test]
    fn test_sample_form_coercion() {
        let input = sample_form().to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.height, "5'10");
        assert_eq!(input.weight, "180");
        assert_eq!(input.age, 30);
        assert_eq!(input.gender, Gender::Male);
        assert_eq!(input.bodyfat_est, None);
        assert_eq!(input.activity_level_neat, Some(NeatLevel::Sedentary));
        assert_eq!(input.activity_level_eat, EatLevel::NoExercise);
        assert_eq!(input.tef_percentage, 10.0);
        assert_eq!(input.error_margin, 10.0);
    }

    #[test]
    fn test_empty_form_uses_form_defaults() {
        let input = TdeeForm::default().to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input, TdeeInput::default());
    }

    #[test]
    fn test_tef_missing_vs_malformed() {
        let defaults = EstimatorDefaults {
            tef_percentage: 12.0,
            error_margin: 10.0,
        };
        let blank = TdeeForm {
            tef_percentage: text("  "),
            ..sample_form()
        };
        let junk = TdeeForm {
            tef_percentage: text("lots"),
            ..sample_form()
        };
        assert_eq!(blank.to_input_on(&defaults, today()).tef_percentage, 12.0);
        assert_eq!(junk.to_input_on(&defaults, today()).tef_percentage, 0.0);
    }

    #[test]
    fn test_bodyfat_coercion() {
        let defaults = EstimatorDefaults::default();
        let percent = TdeeForm {
            bodyfat_est: text("18%"),
            ..sample_form()
        };
        let junk = TdeeForm {
            bodyfat_est: text("unsure"),
            ..sample_form()
        };
        assert_eq!(percent.to_input_on(&defaults, today()).bodyfat_est, Some(18.0));
        assert_eq!(junk.to_input_on(&defaults, today()).bodyfat_est, Some(0.0));
    }

    #[test]
    fn test_unknown_levels() {
        let form = TdeeForm {
            activity_level_neat: text("Couch"),
            activity_level_eat: text("Extreme"),
            ..sample_form()
        };
        let input = form.to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.activity_level_neat, None);
        assert_eq!(input.activity_level_eat, EatLevel::NoExercise);
    }

    #[test]
    fn test_gender_blank_is_other() {
        let form = TdeeForm {
            gender: text(""),
            ..sample_form()
        };
        let input = form.to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.gender, Gender::Other);
    }

    #[test]
    fn test_dob_wins_over_age() {
        let form = TdeeForm {
            dob: text("1990-04-12"),
            ..sample_form()
        };
        let input = form.to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.age, 36);
    }

    #[test]
    fn test_unparseable_dob_falls_back_to_age() {
        let form = TdeeForm {
            dob: text("sometime in the 90s"),
            ..sample_form()
        };
        let input = form.to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.age, 30);
    }

    #[test]
    fn test_whole_numbers() {
        assert_eq!(whole_number(&text("4")), 4);
        assert_eq!(whole_number(&text("3.9")), 3);
        assert_eq!(whole_number(&text("-2")), 0);
        assert_eq!(whole_number(&text("often")), 0);
        assert_eq!(whole_number(&None), 0);
    }

    #[test]
    fn test_merge_overrides_fields() {
        let stored = TdeeForm {
            dob: text("1990-04-12"),
            ..sample_form()
        };
        let edits = TdeeForm {
            weight: text("175"),
            activity_level_eat: text("Moderate"),
            ..TdeeForm::default()
        };
        let merged = stored.merge(&edits);
        assert_eq!(merged.weight, text("175"));
        assert_eq!(merged.activity_level_eat, text("Moderate"));
        assert_eq!(merged.height, text("5'10"));
        assert_eq!(merged.dob, text("1990-04-12"));
    }

    #[test]
    fn test_merge_age_edit_drops_dob() {
        let stored = TdeeForm {
            dob: text("1990-04-12"),
            ..sample_form()
        };
        let edits = TdeeForm {
            age: text("45"),
            ..TdeeForm::default()
        };
        let merged = stored.merge(&edits);
        assert_eq!(merged.dob, None);
        let input = merged.to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.age, 45);
    }

    #[test]
    fn test_deserialize_accepts_numbers() {
        let form: TdeeForm = serde_json::from_str(
            r#"{"height": "5'10", "weight": 180, "age": 30, "gym_duration": 45.5, "bodyfat_est": null}"#,
        )
        .unwrap();
        assert_eq!(form.weight, text("180"));
        assert_eq!(form.age, text("30"));
        assert_eq!(form.gym_duration, text("45.5"));
        assert_eq!(form.bodyfat_est, None);
        assert_eq!(form.gender, None);
    }

    #[test]
    fn test_null_gender_is_not_defaulted() {
        let form: TdeeForm = serde_json::from_str(
            r#"{"height": "5'10", "weight": "180", "age": "30", "gender": null}"#,
        )
        .unwrap();
        assert_eq!(form.gender, text(""));
        let input = form.to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.gender, Gender::Other);
        assert!(crate::energy::compute_tdee(&input).is_err());
    }

    #[test]
    fn test_lowercase_gender_is_other() {
        let form = TdeeForm {
            gender: text("male"),
            ..sample_form()
        };
        let input = form.to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.gender, Gender::Other);
    }

    #[test]
    fn test_loose_level_spelling_is_unrecognized() {
        let form = TdeeForm {
            activity_level_neat: text("very active"),
            activity_level_eat: text("very intense"),
            ..sample_form()
        };
        let input = form.to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.activity_level_neat, None);
        assert_eq!(input.activity_level_eat, EatLevel::NoExercise);
    }

    #[test]
    fn test_future_dob_falls_back_to_age() {
        let form = TdeeForm {
            dob: text("2030-01-01"),
            age: text("41"),
            ..sample_form()
        };
        let input = form.to_input_on(&EstimatorDefaults::default(), today());
        assert_eq!(input.age, 41);
    }
}
