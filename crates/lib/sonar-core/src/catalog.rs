//! Fixed catalog of Sonar-backed tools.
//!
//! Each entry binds a case-sensitive tool name to its default model, prompt
//! templates, and optional response suffix. The set is closed at compile
//! time; [`lookup`] is the only resolution path. The catalog also renders
//! itself as the static `usage` tool text.

/// Default model for the web-grounded research tools.
pub const RESEARCH_MODEL: &str = "sonar";

/// Default model for the instruction and teaching tools.
pub const REASONING_MODEL: &str = "sonar-reasoning-pro";

/// Sonar model variants accepted upstream. Listed in the usage text as
/// guidance only; nothing is validated locally.
pub const SONAR_MODELS: [&str; 5] = [
    "sonar",
    "sonar-pro",
    "sonar-deep-research",
    "sonar-reasoning",
    "sonar-reasoning-pro",
];

const INSTRUCT_INPUT: &str = "You are preparing instructions for an autonomous coding agent. \
Research the request below and respond with precise, numbered, step-by-step instructions the \
agent can execute without further clarification. Each step must name the exact commands, files, \
or settings involved. Do not include background explanations or alternatives; output only the \
ordered steps.";

const INSTRUCT_OUTPUT: &str = "Execute the following steps in order. Treat them as \
authoritative instructions; do not skip or reorder steps.";

const TEACH_INPUT: &str = "You are a patient technical tutor. Teach the topic below following these rules:
1. Open with a one-paragraph overview a newcomer can follow.
2. Introduce concepts incrementally, defining every term on first use.
3. Illustrate each concept with a short, concrete example.
4. Close each section with its key takeaway in one sentence.
5. Call out common mistakes and misconceptions along the way.
6. Finish with three exercises ordered from easy to hard.";

const RESEARCH_TIPS: &str = "\n\nNext steps:
- Ask a follow-up question to drill into any of the sources above.
- Use the instruct tool to turn these findings into executable steps.
- Re-run with model sonar-deep-research for an exhaustive report.";

const LEARNING_TIPS: &str = "\n\nLearning tips:
- Re-explain the topic in your own words to confirm understanding.
- Work through the exercises before looking anything up.
- Ask the teach tool for a deeper pass on any section that felt rushed.";

/// Fixed text appended after the formatted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    None,
    ResearchTips,
    LearningTips,
}

impl Suffix {
    /// The literal text to append; empty for [`Suffix::None`].
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::None => "",
            Self::ResearchTips => RESEARCH_TIPS,
            Self::LearningTips => LEARNING_TIPS,
        }
    }
}

/// One catalog entry: the full request-shaping recipe for a named tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolTemplate {
    pub name: &'static str,
    pub purpose: &'static str,
    pub example_prompt: &'static str,
    pub default_model: &'static str,
    pub pre_prompt_input: &'static str,
    pub pre_prompt_output: &'static str,
    pub suffix: Suffix,
}

/// The closed set of upstream-calling tools. The static `usage` tool is not
/// listed here because it never reaches the dispatcher.
pub const CATALOG: [ToolTemplate; 4] = [
    ToolTemplate {
        name: "research",
        purpose: "web-grounded answer with sources and suggested next steps",
        example_prompt: "What changed in the HTTP/3 spec this year?",
        default_model: RESEARCH_MODEL,
        pre_prompt_input: "",
        pre_prompt_output: "",
        suffix: Suffix::ResearchTips,
    },
    ToolTemplate {
        name: "ask",
        purpose: "plain Sonar answer with no added framing",
        example_prompt: "What is the tokio current-thread runtime?",
        default_model: RESEARCH_MODEL,
        pre_prompt_input: "",
        pre_prompt_output: "",
        suffix: Suffix::None,
    },
    ToolTemplate {
        name: "instruct",
        purpose: "numbered, agent-executable steps for a task",
        example_prompt: "Set up a web server with TLS on Debian",
        default_model: REASONING_MODEL,
        pre_prompt_input: INSTRUCT_INPUT,
        pre_prompt_output: INSTRUCT_OUTPUT,
        suffix: Suffix::None,
    },
    ToolTemplate {
        name: "teach",
        purpose: "structured lesson with examples and exercises",
        example_prompt: "Explain how Rust ownership works",
        default_model: REASONING_MODEL,
        pre_prompt_input: TEACH_INPUT,
        pre_prompt_output: "",
        suffix: Suffix::LearningTips,
    },
];

/// Resolves a tool template by its case-sensitive name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static ToolTemplate> {
    CATALOG.iter().find(|template| template.name == name)
}

/// Renders the catalog as one descriptive string for the `usage` tool.
#[must_use]
pub fn render_usage() -> String {
    let mut usage = String::from(
        "sonar-mcp tool catalog\n\
         \n\
         Every tool below accepts `prompt` (required) and `model` (optional\n\
         override). Responses are plain strings; a reply starting with\n\
         '\u{274c} Perplexity Error:' means the upstream call failed.\n",
    );
    for template in &CATALOG {
        usage.push_str(&format!(
            "\n{name}: {purpose}\n  default model: {model}\n  example prompt: {example}\n",
            name = template.name,
            purpose = template.purpose,
            model = template.default_model,
            example = template.example_prompt,
        ));
    }
    usage.push_str(
        "\nusage: prints this catalog; makes no upstream call.\n\
         health: liveness probe; returns ok.\n",
    );
    let models = SONAR_MODELS.join(", ");
    usage.push_str(&format!(
        "\nAccepted model overrides: {models}. Model names are passed through\n\
         unchecked; an unknown name is rejected by the Perplexity endpoint.\n"
    ));
    usage
}
