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

#[tool_router(router = tool_router_reasoning, vis = "pub")]
impl<B: CompletionBackend> SonarMcp<B> {
    #[tool(
        description = "Turn a task into precise, numbered, agent-executable steps using a Sonar reasoning model. The response opens with a directive to follow the steps in order."
    )]
    async fn instruct(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .control()
            .invoke("instruct", &params.prompt, params.model.as_deref())
            .await;
        Ok(CallToolResult::success(vec![Content::text(response)]))
    }

    #[tool(
        description = "Get a structured lesson on a topic using a Sonar reasoning model: incremental concepts, concrete examples, exercises, and learning tips."
    )]
    async fn teach(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .control()
            .invoke("teach", &params.prompt, params.model.as_deref())
            .await;
        Ok(CallToolResult::success(vec![Content::text(response)]))
    }
}
