//! Prompt composition and response formatting.
//!
//! Builds the outbound message from a tool template plus the caller's prompt,
//! and wraps the raw model answer with output framing and a numbered source
//! list. Tool-specific text lives in the catalog; nothing here knows which
//! tool it is composing for.

/// Citations beyond this count are dropped from the rendered block.
pub const MAX_CITATIONS: usize = 5;

/// Builds the outbound message content for a completion request.
///
/// Template text and prompt are joined with a blank line. Both pass through
/// verbatim: no truncation, no escaping, and no rejection of empty prompts
/// (the upstream endpoint is the sole validator).
#[must_use]
pub fn build_content(prompt: &str, pre_prompt_input: &str) -> String {
    if pre_prompt_input.is_empty() {
        prompt.to_string()
    } else {
        format!("{pre_prompt_input}\n\n{prompt}")
    }
}

/// Wraps a raw model answer with output framing and its source list.
///
/// The separator before the answer is emitted even when `pre_prompt_output`
/// is empty so the response shape stays uniform across tools. Only the first
/// [`MAX_CITATIONS`] citations are rendered, 1-indexed, in upstream order.
#[must_use]
pub fn format_answer(pre_prompt_output: &str, answer: &str, citations: &[String]) -> String {
    let mut formatted = format!("{pre_prompt_output}\n\n{answer}");
    if !citations.is_empty() {
        formatted.push_str("\n\nSources:\n");
        for (index, citation) in citations.iter().take(MAX_CITATIONS).enumerate() {
            let line_number = index + 1;
            formatted.push_str(&format!("{line_number}. {citation}\n"));
        }
    }
    formatted
}
