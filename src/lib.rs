//! Personal Training Manager (PTM) Library
//!
//! TDEE estimation for trainer clients.

pub mod config;
pub mod energy;
pub mod mcp;
pub mod tools;
