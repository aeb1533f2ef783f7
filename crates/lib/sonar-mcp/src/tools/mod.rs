//! MCP tool modules.
//!
//! Tools are grouped by domain: web-grounded research, reasoning-model
//! templates, and static usage guidance.

pub mod reasoning;
pub mod research;
mod context;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// Parameters shared by every Sonar-backed tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct QueryParams {
    pub prompt: String,
    pub model: Option<String>,
}
