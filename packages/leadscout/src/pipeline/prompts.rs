//! LLM prompts for the prospecting pipeline.
//!
//! Discovery and audit prompts assume a grounding tool is enabled on the
//! call; the pitch prompt is pure generation from already-gathered context.

use crate::types::{
    audit::BusinessAudit,
    lead::BusinessLead,
    pitch::PitchOptions,
};

/// Prompt for discovering local businesses. Placeholders: count, category,
/// location.
pub const DISCOVER_PROMPT: &str = r#"Find up to {count} local businesses matching "{category}" in {location}.

Use the map lookup so every result is a real place with current data.

Return ONLY a JSON array, one object per business:
[
    {
        "name": "Business name",
        "address": "Street address",
        "rating": 4.2,
        "reviews": 87,
        "website": "https://..."
    }
]

Rules:
- Include rating (0.0-5.0) and review count when the map data has them
- Omit the "website" field entirely when the business has no website
- No markdown fences, no commentary, no trailing text"#;

/// Prompt for researching one business's online presence. Placeholders:
/// name, address, website_line.
pub const AUDIT_RESEARCH_PROMPT: &str = r#"Research the online presence of this local business.

Name: {name}
Address: {address}
{website_line}

Investigate with web search:
1. Does the listed website load, and does it work on mobile?
2. Social profiles (Facebook, Instagram, etc.) and how active they are
3. Online booking or appointment scheduling capability
4. Live chat or automated assistant on the site
5. How fresh the site looks (copyright year, latest post or update)

Write a short narrative audit (1-3 paragraphs) of what they have and what
they are missing. Plain prose, no JSON."#;

/// Prompt for distilling an audit into concrete gaps. Placeholder: audit.
pub const GAP_EXTRACTION_PROMPT: &str = r#"From the audit below, list the concrete digital capabilities this business is missing.

Audit:
{audit}

Return ONLY a JSON array of short strings, for example:
["No online booking", "No chatbot", "Outdated website"]

Each entry names one missing capability in five words or fewer.
Return [] if nothing is missing."#;

/// Prompt for generating an outreach pitch. Placeholders: name, rating,
/// reviews, audit, gaps, framing, tone, length.
pub const PITCH_PROMPT: &str = r#"Write a cold outreach pitch to the owner of "{name}".

What we know about them:
- Rating: {rating} stars from {reviews} reviews
- Audit findings: {audit}
- Missing capabilities: {gaps}

Angle: {framing}
Tone: {tone}
Length: {length}

Write the pitch only - no subject-line options, no commentary, no
placeholders left for the sender to fill in."#;

/// Format the discovery prompt.
pub fn format_discover_prompt(count: usize, category: &str, location: &str) -> String {
    DISCOVER_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{category}", category)
        .replace("{location}", location)
}

/// Format the audit research prompt for a lead.
pub fn format_audit_prompt(lead: &BusinessLead) -> String {
    let website_line = match lead.website.as_deref() {
        Some(website) if !website.trim().is_empty() => format!("Website: {}", website),
        _ => "Website: none listed".to_string(),
    };

    AUDIT_RESEARCH_PROMPT
        .replace("{name}", &lead.name)
        .replace("{address}", &lead.address)
        .replace("{website_line}", &website_line)
}

/// Format the gap-extraction prompt over phase-1 audit content.
pub fn format_gap_prompt(audit_content: &str) -> String {
    GAP_EXTRACTION_PROMPT.replace("{audit}", audit_content)
}

/// Format the pitch prompt from a lead, its audit, and the caller's
/// tone/length/focus selections.
pub fn format_pitch_prompt(
    lead: &BusinessLead,
    audit: &BusinessAudit,
    options: &PitchOptions,
) -> String {
    let gaps = if audit.gaps.is_empty() {
        "none identified".to_string()
    } else {
        audit.gaps.join(", ")
    };

    PITCH_PROMPT
        .replace("{name}", &lead.name)
        .replace("{rating}", &lead.rating.to_string())
        .replace("{reviews}", &lead.reviews.to_string())
        .replace("{audit}", &audit.content)
        .replace("{gaps}", &gaps)
        .replace("{framing}", options.focus.framing())
        .replace("{tone}", options.tone.instruction())
        .replace("{length}", options.length.instruction())
}
