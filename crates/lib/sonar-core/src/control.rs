//! Tool dispatch and the in-band error boundary.
//!
//! [`SonarControlPlane::invoke`] runs one invocation end-to-end: resolve the
//! template, pick the effective model, compose the outbound content, make
//! exactly one upstream call, and format the result. Failures never cross
//! this boundary as errors; they are rendered into the response string.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::catalog;
use crate::client::{ClientError, CompletionBackend, CompletionRequest};
use crate::compose;

#[derive(Debug)]
pub enum InvokeError {
    UnknownTool(String),
    Upstream(ClientError),
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTool(name) => write!(f, "unknown tool: {name}"),
            Self::Upstream(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InvokeError {}

impl From<ClientError> for InvokeError {
    fn from(err: ClientError) -> Self {
        Self::Upstream(err)
    }
}

/// Executes tool invocations against a completion backend.
pub struct SonarControlPlane<B> {
    backend: Arc<B>,
}

impl<B: CompletionBackend> Clone for SonarControlPlane<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
        }
    }
}

impl<B: CompletionBackend> SonarControlPlane<B> {
    pub fn new(backend: B) -> Self {
        Self::with_backend(Arc::new(backend))
    }

    #[must_use]
    pub fn with_backend(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Runs one tool invocation and always returns a plain string.
    ///
    /// Tool calls are a request/response protocol whose contract is "always
    /// return a string", so any failure is rendered in-band with a fixed
    /// `❌ Perplexity Error:` marker instead of propagating.
    pub async fn invoke(&self, tool_name: &str, prompt: &str, model: Option<&str>) -> String {
        match self.run(tool_name, prompt, model).await {
            Ok(response) => response,
            Err(err) => format!("\u{274c} Perplexity Error: {err}"),
        }
    }

    async fn run(
        &self,
        tool_name: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<String, InvokeError> {
        let template = catalog::lookup(tool_name)
            .ok_or_else(|| InvokeError::UnknownTool(tool_name.to_string()))?;
        let model = model
            .filter(|value| !value.is_empty())
            .unwrap_or(template.default_model);

        let content = compose::build_content(prompt, template.pre_prompt_input);
        let completion = self
            .backend
            .complete(CompletionRequest {
                model: model.to_string(),
                content,
            })
            .await?;

        let mut response = compose::format_answer(
            template.pre_prompt_output,
            &completion.answer,
            &completion.citations,
        );
        response.push_str(template.suffix.text());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::catalog::{REASONING_MODEL, RESEARCH_MODEL, Suffix};
    use crate::client::Completion;

    struct StubBackend {
        completion: Option<Completion>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl StubBackend {
        fn answering(answer: &str, citations: &[&str]) -> Self {
            Self {
                completion: Some(Completion {
                    answer: answer.to_string(),
                    citations: citations.iter().map(ToString::to_string).collect(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                completion: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, request: CompletionRequest) -> Result<Completion, ClientError> {
            self.requests.lock().unwrap().push(request);
            match &self.completion {
                Some(completion) => Ok(completion.clone()),
                None => Err(ClientError::Malformed("stubbed upstream failure".to_string())),
            }
        }
    }

    fn control_over(backend: StubBackend) -> (SonarControlPlane<StubBackend>, Arc<StubBackend>) {
        let backend = Arc::new(backend);
        (SonarControlPlane::with_backend(backend.clone()), backend)
    }

    #[tokio::test]
    async fn ask_returns_framed_answer_verbatim() {
        let (control, backend) = control_over(StubBackend::answering("4", &[]));

        let response = control.invoke("ask", "What is 2+2?", None).await;

        assert_eq!(response, "\n\n4");
        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, RESEARCH_MODEL);
        assert_eq!(requests[0].content, "What is 2+2?");
    }

    #[tokio::test]
    async fn teach_wraps_prompt_and_appends_sources_and_tips() {
        let (control, backend) =
            control_over(StubBackend::answering("Recursion is...", &["src1", "src2"]));
        let template = catalog::lookup("teach").unwrap();

        let response = control.invoke("teach", "Explain recursion", None).await;

        let requests = backend.requests();
        assert_eq!(requests[0].model, REASONING_MODEL);
        assert!(requests[0].content.starts_with(template.pre_prompt_input));
        assert!(requests[0].content.ends_with("\n\nExplain recursion"));

        assert!(response.contains("Recursion is..."));
        assert!(response.contains("Sources:\n1. src1\n2. src2\n"));
        assert!(response.ends_with(Suffix::LearningTips.text()));
    }

    #[tokio::test]
    async fn instruct_frames_both_request_and_response() {
        let (control, backend) = control_over(StubBackend::answering("1. install nginx", &[]));
        let template = catalog::lookup("instruct").unwrap();

        let response = control.invoke("instruct", "Set up a web server", None).await;

        let requests = backend.requests();
        assert!(requests[0].content.starts_with(template.pre_prompt_input));
        assert!(response.starts_with(template.pre_prompt_output));
        assert!(response.contains("1. install nginx"));
    }

    #[tokio::test]
    async fn research_appends_next_steps_block() {
        let (control, _backend) = control_over(StubBackend::answering("findings", &["src"]));

        let response = control.invoke("research", "What is QUIC?", None).await;

        assert!(response.contains("findings"));
        assert!(response.contains("Sources:\n1. src\n"));
        assert!(response.ends_with(Suffix::ResearchTips.text()));
    }

    #[tokio::test]
    async fn unknown_tool_fails_without_calling_upstream() {
        let (control, backend) = control_over(StubBackend::answering("unused", &[]));

        let response = control.invoke("unknown-tool", "x", None).await;

        assert!(response.starts_with("\u{274c} Perplexity Error: "));
        assert!(response.contains("unknown-tool"));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_rendered_in_band() {
        let (control, _backend) = control_over(StubBackend::failing());

        let response = control.invoke("ask", "anything", None).await;

        assert!(response.starts_with("\u{274c} Perplexity Error: "));
    }

    #[tokio::test]
    async fn caller_model_overrides_default_unless_empty() {
        let (control, backend) = control_over(StubBackend::answering("ok", &[]));

        control.invoke("ask", "q", Some("sonar-pro")).await;
        control.invoke("ask", "q", Some("")).await;

        let requests = backend.requests();
        assert_eq!(requests[0].model, "sonar-pro");
        assert_eq!(requests[1].model, RESEARCH_MODEL);
    }
}
