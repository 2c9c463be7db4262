//! PTM MCP Server Implementation
//!
//! Implements the MCP server with all PTM tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::EstimatorDefaults;
use crate::energy::form::lenient_string;
use crate::energy::{TdeeError, TdeeForm};
use crate::tools::status::StatusTracker;
use crate::tools::tdee;

/// PTM MCP Service
#[derive(Clone)]
pub struct PtmService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    defaults: EstimatorDefaults,
    tool_router: ToolRouter<PtmService>,
}

impl PtmService {
    pub fn new(defaults: EstimatorDefaults) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(defaults))),
            defaults,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// TDEE Parameter Structs
// ============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CalculateTdeeParams {
    /// Client ID; when given, the response includes a save_tdee payload
    pub client_id: Option<i64>,
    /// Stored TDEE variables for the client (as returned by get_tdee_variables). Fields below override these.
    pub stored_variables: Option<serde_json::Value>,
    /// Height as 5'10 or 178cm
    #[serde(default, deserialize_with = "lenient_string")]
    pub height: Option<String>,
    /// Weight in pounds
    #[serde(default, deserialize_with = "lenient_string")]
    pub weight: Option<String>,
    /// Age in years
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    /// Date of birth (YYYY-MM-DD); takes precedence over age
    #[serde(default, deserialize_with = "lenient_string")]
    pub dob: Option<String>,
    /// Male, Female or Other
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    /// Body fat percentage (optional; enables Katch-McArdle)
    #[serde(default, deserialize_with = "lenient_string")]
    pub bodyfat_est: Option<String>,
    /// Sedentary, Light, Moderate, Active, Very_Active, Extremely_Active
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity_level_neat: Option<String>,
    /// None, Light, Moderate, Intense, Very_Intense
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity_level_eat: Option<String>,
    /// Exercise sessions per week
    #[serde(default, deserialize_with = "lenient_string")]
    pub exercise_days_per_week: Option<String>,
    /// Minutes per exercise session
    #[serde(default, deserialize_with = "lenient_string")]
    pub gym_duration: Option<String>,
    /// Thermic effect of food, percent (default 10)
    #[serde(default, deserialize_with = "lenient_string")]
    pub tef_percentage: Option<String>,
    /// Error margin, percent (default 10)
    #[serde(default, deserialize_with = "lenient_string")]
    pub error_margin: Option<String>,
}

impl CalculateTdeeParams {
    /// Stored variables with the explicit fields laid over them
    fn into_form(self) -> Result<TdeeForm, McpError> {
        let stored = match self.stored_variables {
            Some(value @ serde_json::Value::Object(_)) => serde_json::from_value::<TdeeForm>(value)
                .map_err(|e| {
                    McpError::invalid_params(format!("Invalid stored_variables: {}", e), None)
                })?,
            Some(serde_json::Value::Null) | None => TdeeForm::default(),
            Some(_) => {
                return Err(McpError::invalid_params(
                    "Invalid stored_variables: expected an object of TDEE fields",
                    None,
                ))
            }
        };

        let overrides = TdeeForm {
            height: self.height,
            weight: self.weight,
            age: self.age,
            dob: self.dob,
            gender: self.gender,
            bodyfat_est: self.bodyfat_est,
            activity_level_neat: self.activity_level_neat,
            activity_level_eat: self.activity_level_eat,
            exercise_days_per_week: self.exercise_days_per_week,
            gym_duration: self.gym_duration,
            tef_percentage: self.tef_percentage,
            error_margin: self.error_margin,
        };

        Ok(stored.merge(&overrides))
    }
}

fn tdee_error(e: TdeeError) -> McpError {
    match e {
        TdeeError::InvalidGender { .. } => McpError::invalid_params(e.to_string(), None),
    }
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl PtmService {
    // --- Status ---

    #[tool(description = "Get the current status of the PTM service including version, start time, estimator defaults, and process information")]
    async fn ptm_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for estimating a client's TDEE. Call this before the first calculate_tdee in a session.")]
    fn tdee_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::TDEE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(TDEE_INSTRUCTIONS)]))
    }

    // --- TDEE ---

    #[tool(description = "Estimate a client's Total Daily Energy Expenditure range from height, weight, age, gender, optional body fat, activity levels and gym habits. Malformed numbers count as 0; gender must be Male or Female unless bodyfat_est is given.")]
    fn calculate_tdee(&self, Parameters(p): Parameters<CalculateTdeeParams>) -> Result<CallToolResult, McpError> {
        let client_id = p.client_id;
        let form = p.into_form()?;
        let result = tdee::calculate_tdee(&form, &self.defaults, client_id).map_err(tdee_error)?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List NEAT activity levels with their BMR factors and EAT exercise levels with per-pound hourly calorie rates")]
    fn list_activity_levels(&self) -> Result<CallToolResult, McpError> {
        let result = tdee::activity_levels();
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for PtmService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ptm".into(),
                version: crate::tools::status::VERSION.into(),
                title: Some("Personal Training Manager".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Personal Training Manager (PTM) - client energy expenditure estimates. \
                 IMPORTANT: Call tdee_instructions before estimating. \
                 TDEE: calculate_tdee, list_activity_levels. \
                 Pass client_id to calculate_tdee to receive a save_tdee payload. \
                 Status: ptm_status."
                    .into(),
            ),
        }
    }
}
