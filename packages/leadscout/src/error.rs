//! Typed errors for the prospecting pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep failures
//! distinguishable per stage: the UI layer shows a different outcome for a
//! failed discovery than for a failed audit or pitch.

use thiserror::Error;

/// Errors from the AI provider seam.
///
/// `Clone` so mocks can script the same failure for repeated calls.
#[derive(Debug, Clone, Error)]
pub enum AiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// Provider-side error (non-2xx response, quota, malformed reply body)
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider answered with no usable text
    #[error("empty completion")]
    EmptyCompletion,
}

/// Errors that can occur while running the pipeline.
///
/// Parse failures never appear here: malformed-but-successful provider
/// responses are recovered with fallback values inside the stages. Stale
/// results are not errors either; the orchestrator discards them silently.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The discovery AI call failed (distinct from "no businesses found")
    #[error("discovery failed: {0}")]
    Discovery(#[source] AiError),

    /// The audit research call failed; no audit was produced
    #[error("audit failed: {0}")]
    Audit(#[source] AiError),

    /// The pitch generation call failed; no partial output is returned
    #[error("pitch generation failed: {0}")]
    Pitch(#[source] AiError),

    /// A pitch was requested with no lead selected
    #[error("no lead selected")]
    NoLeadSelected,

    /// A pitch was requested before an audit completed
    #[error("no audit available")]
    NoAuditAvailable,
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
