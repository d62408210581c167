//! Audit types - the output of the two-phase audit stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::ai::Citation;

/// A cited source backing an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    /// Display title; falls back to the URI when the provider omits one.
    pub title: String,

    pub uri: String,
}

impl From<Citation> for SourceLink {
    fn from(citation: Citation) -> Self {
        let title = citation
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| citation.uri.clone());
        Self {
            title,
            uri: citation.uri,
        }
    }
}

/// A digital-presence audit of one business.
///
/// Exactly one audit is current per session; issuing a new one discards the
/// previous from display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessAudit {
    /// Free-text narrative from the research call. Non-empty prose; no
    /// further structure is guaranteed.
    pub content: String,

    /// Sources cited by the grounded research call; may be empty.
    pub sources: Vec<SourceLink>,

    /// Short names of missing digital capabilities, extracted in a second
    /// call over `content`; empty when extraction degraded.
    pub gaps: Vec<String>,

    pub generated_at: DateTime<Utc>,
}
