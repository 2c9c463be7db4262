//! PTM Tools module
//!
//! Tool implementations behind the MCP server.

pub mod status;
pub mod tdee;
