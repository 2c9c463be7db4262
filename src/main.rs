//! Personal Training Manager (PTM)
//!
//! An MCP server for client TDEE estimation.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use ptm::config::EstimatorDefaults;
use ptm::mcp::PtmService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the MCP stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ptm=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        version = ptm::tools::status::VERSION,
        "Personal Training Manager starting MCP server on stdio"
    );

    let defaults = EstimatorDefaults::from_env();
    tracing::info!(
        tef_percentage = defaults.tef_percentage,
        error_margin = defaults.error_margin,
        "Estimator defaults loaded"
    );

    let service = PtmService::new(defaults);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
