//! Configuration for the prospecting pipeline.

use serde::{Deserialize, Serialize};

/// Pipeline configuration.
///
/// Model overrides are per stage; `None` leaves the provider's default in
/// place. Everything here is configuration, not part of the stage contracts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Search category used when the caller passes none through the UI.
    pub default_category: String,

    /// Search location used when the caller passes none through the UI.
    pub default_location: String,

    /// Cap on businesses requested per discovery search.
    pub max_results: usize,

    /// Model override for the discovery call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_model: Option<String>,

    /// Model override for the audit research call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_model: Option<String>,

    /// Model override for the gap-extraction call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_model: Option<String>,

    /// Model override for the pitch call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_model: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_category: "Restaurants".to_string(),
            default_location: "Austin, TX".to_string(),
            max_results: 12,
            discovery_model: None,
            audit_model: None,
            gap_model: None,
            pitch_model: None,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default search category.
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Set the default search location.
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    /// Set the discovery result cap.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Override the model for every stage at once.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.discovery_model = Some(model.clone());
        self.audit_model = Some(model.clone());
        self.gap_model = Some(model.clone());
        self.pitch_model = Some(model);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_results, 12);
        assert!(config.discovery_model.is_none());
    }

    #[test]
    fn test_with_model_sets_all_stages() {
        let config = PipelineConfig::new().with_model("gemini-2.5-pro");
        assert_eq!(config.discovery_model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(config.pitch_model.as_deref(), Some("gemini-2.5-pro"));
    }
}
