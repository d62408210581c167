//! Business lead types - the output of the discovery stage.

use serde::{Deserialize, Serialize};

/// A sales opportunity derived from a lead's public signals.
///
/// Pure function of the (rating, reviews, website) triple - recomputed at
/// discovery time, never mutated in place. Serialized in the wire form the
/// UI layer displays (`LOW_REPUTATION`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Opportunity {
    /// Rating below 4.0 - reputation management angle
    LowReputation,

    /// Rating above 4.5 with fewer than 20 reviews - visibility angle
    Undervalued,

    /// No website listed - online presence angle
    MissingInfo,
}

impl Opportunity {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Opportunity::LowReputation => "Low reputation",
            Opportunity::Undervalued => "Undervalued",
            Opportunity::MissingInfo => "Missing online info",
        }
    }
}

/// A discovered local business.
///
/// Created in bulk per search and immutable thereafter; the next search
/// supersedes the whole result set. `name` and `address` come straight from
/// the provider and are untrusted free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessLead {
    /// Opaque id, unique within one result set.
    pub id: String,

    pub name: String,

    pub address: String,

    /// Expected range 0.0-5.0; out-of-range values pass through unchecked.
    pub rating: f64,

    /// Review count; missing provider data defaults to 0.
    pub reviews: u32,

    /// Absence is meaningful: it drives classification and pitch framing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Derived opportunity tags in stable classifier order.
    pub opportunities: Vec<Opportunity>,
}

impl BusinessLead {
    /// Whether this lead has a usable website listing.
    pub fn has_website(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !w.trim().is_empty())
    }
}
