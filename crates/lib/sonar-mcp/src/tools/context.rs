use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    tool,
    tool_router,
};
use sonar_core::catalog;
use sonar_core::client::CompletionBackend;

use crate::SonarMcp;

#[tool_router(router = tool_router_context, vis = "pub")]
impl<B: CompletionBackend> SonarMcp<B> {
    #[tool(
        description = "Describe every sonar-mcp tool with its purpose, example prompt, and recommended model. Makes no upstream call."
    )]
    async fn usage(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text(
            catalog::render_usage(),
        )]))
    }
}
