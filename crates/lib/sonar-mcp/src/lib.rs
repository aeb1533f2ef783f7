//! MCP server implementation for sonar-mcp.
//!
//! This crate wires the dispatch control plane into rmcp tool handlers and
//! exposes the MCP-facing tool surface for Perplexity's Sonar models.

mod tools;
pub mod server;

use std::sync::Arc;

use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use sonar_core::client::CompletionBackend;
use sonar_core::control::SonarControlPlane;

const SERVER_INSTRUCTIONS: &str = r"sonar-mcp exposes Perplexity's Sonar models as MCP tools.

Workflow:
1. Call `usage` to see every tool with example prompts and recommended models.
2. For a web-grounded answer with sources and suggested next steps, call `research`.
3. For a plain answer with no added framing, call `ask`.
4. To turn a task into numbered steps an agent can execute, call `instruct`.
5. For a structured lesson on a topic, call `teach`.

Notes:
- Every upstream tool accepts an optional `model` override (sonar, sonar-pro,
  sonar-deep-research, sonar-reasoning, sonar-reasoning-pro).
- Failures are reported in-band: a reply starting with 'Perplexity Error'
  means the upstream call failed. The call itself always returns a string.
- `health` returns `ok`.";

/// MCP server wrapper around the dispatch control plane and tool routers.
pub struct SonarMcp<B: CompletionBackend> {
    tool_router: ToolRouter<Self>,
    control: Arc<SonarControlPlane<B>>,
}

impl<B: CompletionBackend> Clone for SonarMcp<B> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            control: self.control.clone(),
        }
    }
}

impl<B: CompletionBackend> SonarMcp<B> {
    /// Creates a new server using a control plane by value.
    #[must_use]
    pub fn new(control: SonarControlPlane<B>) -> Self {
        Self::with_control(Arc::new(control))
    }

    /// Creates a new server using a shared control plane handle.
    #[must_use]
    pub fn with_control(control: Arc<SonarControlPlane<B>>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_research()
            + Self::tool_router_reasoning()
            + Self::tool_router_context();
        Self {
            tool_router,
            control,
        }
    }

    pub(crate) fn control(&self) -> &SonarControlPlane<B> {
        &self.control
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl<B: CompletionBackend> SonarMcp<B> {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl<B: CompletionBackend> ServerHandler for SonarMcp<B> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
