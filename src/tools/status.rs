//! PTM Status Tool
//!
//! Runtime status of the service and calculator usage instructions.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::config::EstimatorDefaults;

/// Crate version reported by the status tool and the MCP handshake
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// TDEE calculator instructions for AI assistants
pub const TDEE_INSTRUCTIONS: &str = r#"
# PTM TDEE Calculator Instructions

This guide explains how to estimate a client's Total Daily Energy Expenditure (TDEE)
with the Personal Training Manager (PTM) tools.

## Overview

TDEE is the sum of four terms:

1. **BMR** (Basal Metabolic Rate) - calories burned at rest
2. **TEF** (Thermic Effect of Food) - a percentage of BMR, 10% by default
3. **NEAT** (Non-Exercise Activity Thermogenesis) - daily movement outside the gym
4. **EAT** (Exercise Activity Thermogenesis) - deliberate exercise, averaged over the week

The result is a range: TDEE widened by the error margin (10% by default) in both directions,
plus the average of the two ends.

---

## Inputs

| Field | Format | Notes |
|-------|--------|-------|
| height | `5'10` or `178cm` | Anything else counts as 0 |
| weight | pounds, e.g. `180` or `180 lbs` | Non-numeric characters are stripped |
| age / dob | years, or `YYYY-MM-DD` | dob wins when it parses |
| gender | `Male`, `Female`, `Other` | Exact spelling; required unless bodyfat_est is given |
| bodyfat_est | percent, e.g. `18` | Optional; switches BMR to Katch-McArdle |
| activity_level_neat | see below | Default `Sedentary` |
| activity_level_eat | see below | Default `None` |
| exercise_days_per_week | integer | |
| gym_duration | minutes per session | |
| tef_percentage | percent | Default 10; 8-12% is typical |
| error_margin | percent | Default 10; 8-16% is recommended |

**Malformed numbers are not errors.** They silently become 0. Check the `input` echo in the
response to see what was actually used.

**Gender is the one hard failure.** Without a body fat estimate, the Mifflin-St Jeor equation
needs Male or Female. Ask the trainer for a body fat estimate if the client's gender is Other.

---

## NEAT Levels

| Key | Steps/day | Factor |
|-----|-----------|--------|
| Sedentary | 0 - 2999 | 1.01 |
| Light | 3000 - 4999 | 1.05 |
| Moderate | 5000 - 7499 | 1.10 |
| Active | 7500 - 9999 | 1.15 |
| Very_Active | 10000 - 14999 | 1.20 |
| Extremely_Active | 15000+ | 1.25 |

Tip: do not overestimate daily activity. It is better to underestimate.

## EAT Levels

`None`, `Light`, `Moderate`, `Intense`, `Very_Intense`.

Lifting weights alone should be considered **Light**. Moderate cardio combined with weights
is **Moderate**.

---

## Workflow

1. Call `list_activity_levels` if unsure which key to use
2. Call `calculate_tdee` with the client's values (and `client_id` if the result will be saved)
3. Report the range and average from `summary`
4. Mention any `advisories`
5. If saving, forward `save_payload` to the backend's `save_tdee` endpoint unchanged
"#;

/// Status response
#[derive(Debug, Clone, Serialize)]
pub struct PtmStatus {
    pub version: &'static str,
    /// When this server process started, RFC 3339
    pub started_at: String,

    pub estimator_defaults: EstimatorDefaults,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Collects runtime information for the status tool
pub struct StatusTracker {
    start_time: Instant,
    started_at: chrono::DateTime<chrono::Local>,
    defaults: EstimatorDefaults,
}

impl StatusTracker {
    pub fn new(defaults: EstimatorDefaults) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Local::now(),
            defaults,
        }
    }

    pub fn get_status(&self) -> PtmStatus {
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));
        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PtmStatus {
            version: VERSION,
            started_at: self.started_at.to_rfc3339(),
            estimator_defaults: self.defaults,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
