//! AI trait for grounded text completion.
//!
//! The pipeline needs exactly one capability from a provider: complete a
//! prompt, optionally grounded against a live tool (map lookup or web
//! search), optionally constrained to a response schema, and report any
//! citation metadata alongside the text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AiError;

/// Grounding tool to enable for a completion.
///
/// Grounding anchors the model's output to live external data instead of
/// training-data recall; discovery uses map lookup, audits use web search,
/// and pitch generation runs ungrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundingTool {
    /// Live map/places lookup
    MapLookup,

    /// Live web search
    WebSearch,
}

/// A cited source returned alongside a grounded completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Source title; providers frequently omit it.
    #[serde(default)]
    pub title: Option<String>,

    /// Source URI.
    pub uri: String,
}

impl Citation {
    /// Create a citation from a URI alone.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            title: None,
            uri: uri.into(),
        }
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A completion request: prompt plus provider options.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The full prompt text.
    pub prompt: String,

    /// Grounding tool to enable, if any.
    pub tool: Option<GroundingTool>,

    /// Schema the response text should conform to, when the provider
    /// supports structured output. Best-effort: callers still coerce.
    pub response_schema: Option<serde_json::Value>,

    /// Per-call model override; `None` uses the provider's default.
    pub model: Option<String>,
}

impl CompletionRequest {
    /// Create a plain completion request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            tool: None,
            response_schema: None,
            model: None,
        }
    }

    /// Enable a grounding tool.
    pub fn with_tool(mut self, tool: GroundingTool) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Request structured output conforming to `schema`.
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Override the model for this call.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// A completed response: text plus any citations.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// Raw response text. May be prose, JSON, or JSON wrapped in prose;
    /// stages coerce it into typed data.
    pub text: String,

    /// Citations from grounding metadata; empty when the call ran without
    /// a tool or the provider returned none.
    pub citations: Vec<Citation>,
}

impl Completion {
    /// Create a completion with text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }

    /// Add citations.
    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }
}

/// AI provider trait.
///
/// Implementations wrap specific providers (Gemini, etc.) and handle
/// transport and authentication; the pipeline depends only on this shape.
#[async_trait]
pub trait AI: Send + Sync {
    /// Complete a prompt, honoring the request's tool, schema and model
    /// options to the extent the provider supports them.
    async fn complete(&self, request: CompletionRequest) -> std::result::Result<Completion, AiError>;
}

/// Generate a provider-ready response schema for `T`.
///
/// Strips the metadata keys (`$schema`, `title`, `definitions`) that
/// structured-output endpoints reject. Intended for the small leaf shapes
/// the pipeline requests (arrays of strings); nested types with `$ref`s
/// need inlining this helper does not do.
pub fn response_schema_for<T: schemars::JsonSchema>() -> serde_json::Value {
    let root = schemars::gen::SchemaGenerator::default().into_root_schema_for::<T>();
    let mut value = serde_json::to_value(root).unwrap_or_default();
    if let serde_json::Value::Object(map) = &mut value {
        map.remove("$schema");
        map.remove("title");
        map.remove("definitions");
    }
    value
}
