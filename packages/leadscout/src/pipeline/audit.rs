//! Two-phase business audit - grounded research, then gap extraction.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{AiError, PipelineError, Result};
use crate::pipeline::coerce::coerce;
use crate::pipeline::prompts::{format_audit_prompt, format_gap_prompt};
use crate::traits::ai::{response_schema_for, CompletionRequest, GroundingTool, AI};
use crate::types::{
    audit::{BusinessAudit, SourceLink},
    config::PipelineConfig,
    lead::BusinessLead,
};

/// Audit one lead's online presence.
///
/// Phase 1 researches the business with web-search grounding; its text
/// becomes the audit narrative and its citations become `sources`. Phase 2
/// distills the narrative into a list of concrete gaps. Phase 1 failing
/// fails the audit; phase 2 failing degrades to `gaps = []`, because an
/// audit without structured gaps is still worth showing.
pub async fn audit<A: AI + ?Sized>(
    ai: &A,
    config: &PipelineConfig,
    lead: &BusinessLead,
) -> Result<BusinessAudit> {
    let mut request =
        CompletionRequest::new(format_audit_prompt(lead)).with_tool(GroundingTool::WebSearch);
    if let Some(model) = &config.audit_model {
        request = request.with_model(model);
    }

    let completion = ai.complete(request).await.map_err(PipelineError::Audit)?;

    let content = completion.text.trim().to_string();
    if content.is_empty() {
        return Err(PipelineError::Audit(AiError::EmptyCompletion));
    }

    let sources: Vec<SourceLink> = completion
        .citations
        .into_iter()
        .map(SourceLink::from)
        .collect();

    let gaps = extract_gaps(ai, config, &content).await;
    debug!(
        lead = %lead.name,
        sources = sources.len(),
        gaps = gaps.len(),
        "audit complete"
    );

    Ok(BusinessAudit {
        content,
        sources,
        gaps,
        generated_at: Utc::now(),
    })
}

/// Phase 2: distill the research narrative into short gap names.
///
/// Requests structured output (array of strings) to maximize parse success,
/// then coerces with an empty fallback. Total: never fails the audit.
async fn extract_gaps<A: AI + ?Sized>(
    ai: &A,
    config: &PipelineConfig,
    content: &str,
) -> Vec<String> {
    let mut request = CompletionRequest::new(format_gap_prompt(content))
        .with_response_schema(response_schema_for::<Vec<String>>());
    if let Some(model) = &config.gap_model {
        request = request.with_model(model);
    }

    match ai.complete(request).await {
        Ok(completion) => coerce(&completion.text, Vec::new()),
        Err(error) => {
            warn!(%error, "gap extraction failed, keeping audit without gaps");
            Vec::new()
        }
    }
}
