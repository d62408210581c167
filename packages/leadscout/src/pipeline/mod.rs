//! The prospecting pipeline - the core of the library.
//!
//! Data flows strictly forward:
//! - discovery finds and classifies leads (map-grounded)
//! - audit researches one lead and distills gaps (web-search-grounded)
//! - pitch turns a lead + audit into outreach copy (ungrounded)
//!
//! [`orchestrator::LeadPipeline`] sequences the stages over shared session
//! state and discards stale results from superseded requests.

pub mod audit;
pub mod classify;
pub mod coerce;
pub mod discovery;
pub mod orchestrator;
pub mod pitch;
pub mod prompts;

pub use audit::audit;
pub use classify::classify;
pub use coerce::coerce;
pub use discovery::{discover, RawLead};
pub use orchestrator::{LeadPipeline, SessionSnapshot, StageState};
pub use pitch::{generate_pitch, FALLBACK_PITCH};
pub use prompts::{
    format_audit_prompt, format_discover_prompt, format_gap_prompt, format_pitch_prompt,
    AUDIT_RESEARCH_PROMPT, DISCOVER_PROMPT, GAP_EXTRACTION_PROMPT, PITCH_PROMPT,
};
