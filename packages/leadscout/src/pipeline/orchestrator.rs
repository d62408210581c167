//! Session orchestration - stage state machines and stale-result discard.
//!
//! [`LeadPipeline`] owns the only shared mutable state in the system: the
//! discovered leads, the selected lead, the current audit, and the current
//! pitch, plus a per-stage state machine (`Idle -> InFlight -> Succeeded |
//! Failed`) with a monotonically increasing request token.
//!
//! The token discipline is the core correctness property here. A stage call
//! bumps its token before the AI call and applies its outcome to shared
//! state only if the token is still current afterward. A faster, newer
//! request supersedes a slower, older one: the old call still completes
//! (there is no transport-level cancellation), but its result never touches
//! displayed state. The check and the write happen under one lock with no
//! await point in between, so they are indivisible with respect to the
//! event loop.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::pipeline::{audit, discovery, pitch};
use crate::traits::ai::AI;
use crate::types::{
    audit::BusinessAudit,
    config::PipelineConfig,
    lead::BusinessLead,
    pitch::PitchOptions,
};

/// Display state of one pipeline stage.
///
/// `Succeeded` and `Failed` are display states only; the next invocation of
/// the stage starts a fresh `InFlight` cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StageState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

/// One stage's state machine plus its request token.
#[derive(Debug, Default)]
struct StageTracker {
    state: StageState,
    seq: u64,
}

impl StageTracker {
    /// Start a new request cycle; the returned token identifies it.
    fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.state = StageState::InFlight;
        self.seq
    }

    /// Invalidate any in-flight request without starting a new one. The
    /// next token comparison for an older request will fail.
    fn invalidate(&mut self) {
        self.seq += 1;
        self.state = StageState::Idle;
    }

    fn is_current(&self, token: u64) -> bool {
        self.seq == token
    }
}

/// Shared session state. All access goes through the pipeline's mutex.
#[derive(Debug, Default)]
struct Session {
    leads: Vec<BusinessLead>,
    selected: Option<BusinessLead>,
    audit: Option<BusinessAudit>,
    pitch: Option<String>,
    discovery: StageTracker,
    audit_stage: StageTracker,
    pitch_stage: StageTracker,
}

/// Read-only copy of the displayable session state.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub leads: Vec<BusinessLead>,
    pub selected: Option<BusinessLead>,
    pub audit: Option<BusinessAudit>,
    pub pitch: Option<String>,
    pub discovery_state: StageState,
    pub audit_state: StageState,
    pub pitch_state: StageState,
}

/// The prospecting pipeline: discovery -> audit -> pitch over one AI seam.
///
/// Callable concurrently from one logical thread of control; overlapping
/// calls to the same stage resolve in favor of the most recently issued
/// one. Stage methods return their own outcome to the caller even when it
/// was superseded - only the shared state ignores stale results.
pub struct LeadPipeline<A: AI> {
    ai: A,
    config: PipelineConfig,
    session: Mutex<Session>,
}

impl<A: AI> LeadPipeline<A> {
    /// Create a pipeline over an AI provider.
    pub fn new(ai: A, config: PipelineConfig) -> Self {
        Self {
            ai,
            config,
            session: Mutex::new(Session::default()),
        }
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current displayable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let session = self.session_guard();
        SessionSnapshot {
            leads: session.leads.clone(),
            selected: session.selected.clone(),
            audit: session.audit.clone(),
            pitch: session.pitch.clone(),
            discovery_state: session.discovery.state.clone(),
            audit_state: session.audit_stage.state.clone(),
            pitch_state: session.pitch_stage.state.clone(),
        }
    }

    /// Run a discovery search.
    ///
    /// Starting a search immediately clears the selected lead, the current
    /// audit, and the current pitch: a new search supersedes everything
    /// downstream, including their in-flight requests.
    pub async fn run_discovery(
        &self,
        category: &str,
        location: &str,
    ) -> Result<Vec<BusinessLead>> {
        let token = {
            let mut session = self.session_guard();
            session.selected = None;
            session.audit = None;
            session.pitch = None;
            session.audit_stage.invalidate();
            session.pitch_stage.invalidate();
            session.discovery.begin()
        };

        let outcome = discovery::discover(&self.ai, &self.config, category, location).await;

        let mut session = self.session_guard();
        if !session.discovery.is_current(token) {
            debug!(token, "discarding stale discovery result");
            return outcome;
        }
        match &outcome {
            Ok(leads) => {
                session.leads = leads.clone();
                session.discovery.state = StageState::Succeeded;
            }
            Err(error) => {
                session.discovery.state = StageState::Failed(error.to_string());
            }
        }
        outcome
    }

    /// Audit a lead, selecting it.
    ///
    /// Selecting a lead clears the current pitch (and invalidates any pitch
    /// request in flight) before the audit call starts. When the call
    /// resolves, its outcome is applied only if no newer audit request was
    /// issued in the meantime; a late result for a previously selected lead
    /// is silently dropped.
    pub async fn run_audit(&self, lead: &BusinessLead) -> Result<BusinessAudit> {
        let token = {
            let mut session = self.session_guard();
            session.selected = Some(lead.clone());
            session.audit = None;
            session.pitch = None;
            session.pitch_stage.invalidate();
            session.audit_stage.begin()
        };

        let outcome = audit::audit(&self.ai, &self.config, lead).await;

        let mut session = self.session_guard();
        if !session.audit_stage.is_current(token) {
            debug!(token, lead = %lead.name, "discarding stale audit result");
            return outcome;
        }
        match &outcome {
            Ok(result) => {
                session.audit = Some(result.clone());
                session.audit_stage.state = StageState::Succeeded;
            }
            Err(error) => {
                session.audit_stage.state = StageState::Failed(error.to_string());
            }
        }
        outcome
    }

    /// Generate a pitch for the currently selected lead and audit.
    ///
    /// Requires both to exist; the UI only offers this action once they do,
    /// but the pipeline enforces it anyway. Subject to the same stale
    /// discipline: changing the selected lead mid-flight discards the
    /// result from display.
    pub async fn generate_pitch(&self, options: PitchOptions) -> Result<String> {
        let (lead, current_audit, token) = {
            let mut session = self.session_guard();
            let lead = session
                .selected
                .clone()
                .ok_or(PipelineError::NoLeadSelected)?;
            let current_audit = session.audit.clone().ok_or(PipelineError::NoAuditAvailable)?;
            session.pitch = None;
            let token = session.pitch_stage.begin();
            (lead, current_audit, token)
        };

        let outcome =
            pitch::generate_pitch(&self.ai, &self.config, &lead, &current_audit, &options).await;

        let mut session = self.session_guard();
        if !session.pitch_stage.is_current(token) {
            debug!(token, lead = %lead.name, "discarding stale pitch result");
            return outcome;
        }
        match &outcome {
            Ok(text) => {
                session.pitch = Some(text.clone());
                session.pitch_stage.state = StageState::Succeeded;
            }
            Err(error) => {
                session.pitch_stage.state = StageState::Failed(error.to_string());
            }
        }
        outcome
    }

    /// Lock the session, recovering from poisoning - no invariant spans a
    /// panic here, every write is a whole-value replacement.
    fn session_guard(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiError;
    use crate::testing::MockAI;

    fn lead(name: &str) -> BusinessLead {
        BusinessLead {
            id: format!("id-{name}"),
            name: name.to_string(),
            address: "1 Main St".into(),
            rating: 4.2,
            reviews: 30,
            website: Some("https://example.com".into()),
            opportunities: vec![],
        }
    }

    #[tokio::test]
    async fn test_pitch_requires_selection_and_audit() {
        let pipeline = LeadPipeline::new(MockAI::new(), PipelineConfig::default());

        let result = pipeline.generate_pitch(PitchOptions::default()).await;
        assert!(matches!(result, Err(PipelineError::NoLeadSelected)));
    }

    #[tokio::test]
    async fn test_audit_failure_sets_failed_state() {
        let ai = MockAI::new()
            .with_failure("Name: Flaky Cafe", AiError::Provider("boom".into()));
        let pipeline = LeadPipeline::new(ai, PipelineConfig::default());

        let result = pipeline.run_audit(&lead("Flaky Cafe")).await;
        assert!(result.is_err());

        let snapshot = pipeline.snapshot();
        assert!(matches!(snapshot.audit_state, StageState::Failed(_)));
        assert!(snapshot.audit.is_none());
        // Failure does not clear the selection.
        assert_eq!(snapshot.selected.unwrap().name, "Flaky Cafe");
    }

    #[tokio::test]
    async fn test_audit_success_transitions() {
        let ai = MockAI::new()
            .with_reply("Name: Good Cafe", "A tidy audit.")
            .with_reply("capabilities this business is missing", "[\"No chatbot\"]");
        let pipeline = LeadPipeline::new(ai, PipelineConfig::default());

        assert_eq!(pipeline.snapshot().audit_state, StageState::Idle);
        pipeline.run_audit(&lead("Good Cafe")).await.unwrap();

        let snapshot = pipeline.snapshot();
        assert_eq!(snapshot.audit_state, StageState::Succeeded);
        assert_eq!(snapshot.audit.unwrap().gaps, vec!["No chatbot"]);
    }

    #[tokio::test]
    async fn test_discovery_failure_keeps_previous_leads() {
        let ai = MockAI::new()
            .with_reply("\"Bakery\"", r#"[{"name":"Rise & Shine","address":"2 Oak"}]"#)
            .with_failure("\"Florist\"", AiError::Network("offline".into()));
        let pipeline = LeadPipeline::new(ai, PipelineConfig::default());

        pipeline.run_discovery("Bakery", "Austin, TX").await.unwrap();
        assert_eq!(pipeline.snapshot().leads.len(), 1);

        let result = pipeline.run_discovery("Florist", "Austin, TX").await;
        assert!(result.is_err());

        let snapshot = pipeline.snapshot();
        assert!(matches!(snapshot.discovery_state, StageState::Failed(_)));
        // The stale list stays visible alongside the error state.
        assert_eq!(snapshot.leads.len(), 1);
    }
}
