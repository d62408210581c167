//! Gemini implementation of the AI trait.
//!
//! A reference implementation over the `gemini-client` REST crate. Maps the
//! pipeline's completion requests onto `generateContent` calls: grounding
//! tools become `google_maps`/`google_search` tools, response schemas
//! become structured-output generation config, and grounding chunks come
//! back as citations.
//!
//! # Example
//!
//! ```rust,ignore
//! use leadscout::ai::Gemini;
//! use leadscout::{LeadPipeline, PipelineConfig};
//!
//! let ai = Gemini::from_env()?.with_model("gemini-2.5-pro");
//! let pipeline = LeadPipeline::new(ai, PipelineConfig::default());
//! ```

use async_trait::async_trait;

use gemini_client::{
    GeminiClient, GeminiError, GenerateContentRequest, Tool,
};

use crate::error::AiError;
use crate::traits::ai::{Citation, Completion, CompletionRequest, GroundingTool, AI};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini-backed AI provider.
#[derive(Clone)]
pub struct Gemini {
    client: GeminiClient,
    model: String,
}

impl Gemini {
    /// Create a provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, AiError> {
        let client = GeminiClient::from_env().map_err(map_error)?;
        Ok(Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Set the default model (per-request overrides still win).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the default model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AI for Gemini {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, AiError> {
        let model = request.model.as_deref().unwrap_or(&self.model).to_string();

        let mut wire = GenerateContentRequest::from_prompt(&request.prompt);
        match request.tool {
            Some(GroundingTool::MapLookup) => wire = wire.with_tool(Tool::google_maps()),
            Some(GroundingTool::WebSearch) => wire = wire.with_tool(Tool::google_search()),
            None => {}
        }
        if let Some(schema) = request.response_schema {
            wire = wire.with_response_schema(schema);
        }

        let response = self
            .client
            .generate_content(&model, wire)
            .await
            .map_err(map_error)?;

        let citations = response
            .grounding_chunks()
            .iter()
            .filter_map(|chunk| {
                let source = chunk.source()?;
                let uri = source.uri.clone()?;
                let mut citation = Citation::new(uri);
                if let Some(title) = &source.title {
                    citation = citation.with_title(title);
                }
                Some(citation)
            })
            .collect();

        Ok(Completion {
            text: response.text(),
            citations,
        })
    }
}

fn map_error(error: GeminiError) -> AiError {
    match error {
        GeminiError::Config(message) => AiError::Config(message),
        GeminiError::Network(message) => AiError::Network(message),
        GeminiError::Api(message) | GeminiError::Parse(message) => AiError::Provider(message),
    }
}
