//! Testing utilities including a mock AI provider.
//!
//! Useful for testing applications built on the pipeline without making
//! real provider calls.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::AiError;
use crate::traits::ai::{Citation, Completion, CompletionRequest, AI};

#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Reply(Completion),
    Fail(AiError),
}

#[derive(Debug, Clone)]
struct Script {
    needle: String,
    latency: Option<Duration>,
    outcome: ScriptedOutcome,
}

/// A mock AI provider for testing.
///
/// Scripts are matched against the incoming prompt by substring, first
/// match wins. Unscripted prompts resolve to an empty completion. Latency
/// is simulated with `tokio::time::sleep`, so tests using
/// `#[tokio::test(start_paused = true)]` can race requests
/// deterministically.
#[derive(Clone, Default)]
pub struct MockAI {
    scripts: Arc<RwLock<Vec<Script>>>,
    calls: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl MockAI {
    /// Create a mock with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `text` to prompts containing `needle`.
    pub fn with_reply(self, needle: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(needle, None, ScriptedOutcome::Reply(Completion::new(text)));
        self
    }

    /// Reply with `text` and citations to prompts containing `needle`.
    pub fn with_cited_reply(
        self,
        needle: impl Into<String>,
        text: impl Into<String>,
        citations: Vec<Citation>,
    ) -> Self {
        self.push(
            needle,
            None,
            ScriptedOutcome::Reply(Completion::new(text).with_citations(citations)),
        );
        self
    }

    /// Fail prompts containing `needle` with `error`.
    pub fn with_failure(self, needle: impl Into<String>, error: AiError) -> Self {
        self.push(needle, None, ScriptedOutcome::Fail(error));
        self
    }

    /// Reply with `text` after `latency` to prompts containing `needle`.
    pub fn with_delayed_reply(
        self,
        needle: impl Into<String>,
        text: impl Into<String>,
        latency: Duration,
    ) -> Self {
        self.push(
            needle,
            Some(latency),
            ScriptedOutcome::Reply(Completion::new(text)),
        );
        self
    }

    /// Fail prompts containing `needle` with `error` after `latency`.
    pub fn with_delayed_failure(
        self,
        needle: impl Into<String>,
        error: AiError,
        latency: Duration,
    ) -> Self {
        self.push(needle, Some(latency), ScriptedOutcome::Fail(error));
        self
    }

    /// All requests made to this mock, in call order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.read().unwrap().clone()
    }

    /// Clear recorded calls.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn push(&self, needle: impl Into<String>, latency: Option<Duration>, outcome: ScriptedOutcome) {
        self.scripts.write().unwrap().push(Script {
            needle: needle.into(),
            latency,
            outcome,
        });
    }

    fn find(&self, prompt: &str) -> Option<Script> {
        self.scripts
            .read()
            .unwrap()
            .iter()
            .find(|s| prompt.contains(&s.needle))
            .cloned()
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, AiError> {
        self.calls.write().unwrap().push(request.clone());

        let Some(script) = self.find(&request.prompt) else {
            return Ok(Completion::new(""));
        };

        if let Some(latency) = script.latency {
            tokio::time::sleep(latency).await;
        }

        match script.outcome {
            ScriptedOutcome::Reply(completion) => Ok(completion),
            ScriptedOutcome::Fail(error) => Err(error),
        }
    }
}
