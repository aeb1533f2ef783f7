use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool,
    tool_router,
};
use sonar_core::client::CompletionBackend;

use super::QueryParams;
use crate::SonarMcp;

#[tool_router(router = tool_router_research, vis = "pub")]
impl<B: CompletionBackend> SonarMcp<B> {
    #[tool(
        description = "Research a question with Perplexity Sonar. Returns a web-grounded answer with numbered sources and suggested next steps."
    )]
    async fn research(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .control()
            .invoke("research", &params.prompt, params.model.as_deref())
            .await;
        Ok(CallToolResult::success(vec![Content::text(response)]))
    }

    #[tool(
        description = "Ask Perplexity Sonar a question and return the answer exactly as generated, with sources when available."
    )]
    async fn ask(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .control()
            .invoke("ask", &params.prompt, params.model.as_deref())
            .await;
        Ok(CallToolResult::success(vec![Content::text(response)]))
    }
}
