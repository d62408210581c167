//! Lead discovery - map-grounded search for local businesses.

use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{PipelineError, Result};
use crate::pipeline::classify::classify;
use crate::pipeline::coerce::coerce;
use crate::pipeline::prompts::format_discover_prompt;
use crate::traits::ai::{CompletionRequest, GroundingTool, AI};
use crate::types::{config::PipelineConfig, lead::BusinessLead};

/// Raw business record as the provider returns it, before it enters the
/// typed domain model. Every field is defaulted so one partial record
/// degrades instead of failing the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLead {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub reviews: Option<u32>,

    #[serde(default)]
    pub website: Option<String>,
}

/// Discover local businesses matching `category` in `location`.
///
/// A provider failure is a distinguishable error - "the search broke" and
/// "the search found nothing" are different user-facing outcomes. A
/// successful call with unparseable content returns an empty list instead.
pub async fn discover<A: AI + ?Sized>(
    ai: &A,
    config: &PipelineConfig,
    category: &str,
    location: &str,
) -> Result<Vec<BusinessLead>> {
    let prompt = format_discover_prompt(config.max_results, category, location);
    let mut request = CompletionRequest::new(prompt).with_tool(GroundingTool::MapLookup);
    if let Some(model) = &config.discovery_model {
        request = request.with_model(model);
    }

    let completion = ai
        .complete(request)
        .await
        .map_err(PipelineError::Discovery)?;

    let raw: Vec<RawLead> = coerce(&completion.text, Vec::new());
    let leads: Vec<BusinessLead> = raw.into_iter().filter_map(into_lead).collect();

    if leads.len() > config.max_results {
        warn!(
            requested = config.max_results,
            returned = leads.len(),
            "provider exceeded requested result cap"
        );
    }
    debug!(category, location, count = leads.len(), "discovery complete");

    Ok(leads)
}

/// Map a raw record into a classified lead. Records without a name carry no
/// actionable signal and are dropped.
fn into_lead(raw: RawLead) -> Option<BusinessLead> {
    if raw.name.trim().is_empty() {
        return None;
    }

    let rating = raw.rating.unwrap_or(0.0);
    let reviews = raw.reviews.unwrap_or(0);
    let website = raw.website.filter(|w| !w.trim().is_empty());
    let opportunities = classify(rating, reviews, website.is_some());

    Some(BusinessLead {
        id: Uuid::new_v4().to_string(),
        name: raw.name,
        address: raw.address,
        rating,
        reviews,
        website,
        opportunities,
    })
}
