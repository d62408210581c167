//! Pitch generation - ungrounded copywriting from gathered context.

use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::pipeline::prompts::format_pitch_prompt;
use crate::traits::ai::{CompletionRequest, AI};
use crate::types::{
    audit::BusinessAudit,
    config::PipelineConfig,
    lead::BusinessLead,
    pitch::PitchOptions,
};

/// Returned when the provider answers with empty text; a blank pitch box is
/// worse than a generic opener the user can edit.
pub const FALLBACK_PITCH: &str = "We took a close look at your business online and \
found a few opportunities worth a quick conversation.";

/// Generate an outreach pitch for a lead from its audit.
///
/// No grounding tool: everything the model needs is already in the prompt.
/// Provider failure is a distinguishable error; empty-but-successful output
/// degrades to [`FALLBACK_PITCH`].
pub async fn generate_pitch<A: AI + ?Sized>(
    ai: &A,
    config: &PipelineConfig,
    lead: &BusinessLead,
    audit: &BusinessAudit,
    options: &PitchOptions,
) -> Result<String> {
    let mut request = CompletionRequest::new(format_pitch_prompt(lead, audit, options));
    if let Some(model) = &config.pitch_model {
        request = request.with_model(model);
    }

    let completion = ai.complete(request).await.map_err(PipelineError::Pitch)?;

    let text = completion.text.trim();
    if text.is_empty() {
        warn!(lead = %lead.name, "provider returned empty pitch, using fallback");
        return Ok(FALLBACK_PITCH.to_string());
    }

    debug!(lead = %lead.name, chars = text.len(), "pitch generated");
    Ok(text.to_string())
}
