//! Runtime configuration
//!
//! Estimator defaults, overridable from the environment.

use serde::Serialize;

use crate::energy::{DEFAULT_ERROR_MARGIN, DEFAULT_TEF_PERCENTAGE};

pub const TEF_PERCENTAGE_ENV: &str = "PTM_DEFAULT_TEF_PERCENTAGE";
pub const ERROR_MARGIN_ENV: &str = "PTM_DEFAULT_ERROR_MARGIN";

/// Values used when a form leaves TEF or the error margin blank
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimatorDefaults {
    pub tef_percentage: f64,
    pub error_margin: f64,
}

impl Default for EstimatorDefaults {
    fn default() -> Self {
        Self {
            tef_percentage: DEFAULT_TEF_PERCENTAGE,
            error_margin: DEFAULT_ERROR_MARGIN,
        }
    }
}

impl EstimatorDefaults {
    /// Read `PTM_DEFAULT_TEF_PERCENTAGE` and `PTM_DEFAULT_ERROR_MARGIN`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            tef_percentage: read_percentage(&lookup, TEF_PERCENTAGE_ENV)
                .unwrap_or(defaults.tef_percentage),
            error_margin: read_percentage(&lookup, ERROR_MARGIN_ENV)
                .unwrap_or(defaults.error_margin),
        }
    }
}

fn read_percentage<F>(lookup: &F, key: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            tracing::warn!("Ignoring {}={:?}: expected a non-negative number", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = EstimatorDefaults::default();
        assert_eq!(defaults.tef_percentage, 10.0);
        assert_eq!(defaults.error_margin, 10.0);
    }

    #[test]
    fn test_lookup_overrides() {
        let defaults = EstimatorDefaults::from_lookup(|key| match key {
            TEF_PERCENTAGE_ENV => Some("12".to_string()),
            ERROR_MARGIN_ENV => Some(" 8.5 ".to_string()),
            _ => None,
        });
        assert_eq!(defaults.tef_percentage, 12.0);
        assert_eq!(defaults.error_margin, 8.5);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let defaults = EstimatorDefaults::from_lookup(|key| match key {
            TEF_PERCENTAGE_ENV => Some("lots".to_string()),
            ERROR_MARGIN_ENV => Some("-4".to_string()),
            _ => None,
        });
        assert_eq!(defaults, EstimatorDefaults::default());
    }
}
