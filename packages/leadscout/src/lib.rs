//! Local Business Lead Prospecting Pipeline
//!
//! Discovers local businesses, audits their online presence, and drafts
//! outreach pitches by chaining three AI calls, two of them grounded
//! against live data (map lookup for discovery, web search for audits).
//!
//! # Design Philosophy
//!
//! The provider's text output is an untyped external input. Every raw
//! response crosses one boundary - the coercion layer - before it enters
//! the typed domain model, and always with a fallback: a degraded result
//! beats a blocked user.
//!
//! Overlapping requests are resolved by token, not by cancellation: an
//! in-flight call cannot be aborted, but a superseded one can never clobber
//! the state a newer one produced.
//!
//! # Usage
//!
//! ```rust,ignore
//! use leadscout::{LeadPipeline, PipelineConfig, PitchOptions};
//! use leadscout::ai::Gemini;
//!
//! let ai = Gemini::from_env()?;
//! let pipeline = LeadPipeline::new(ai, PipelineConfig::default());
//!
//! let leads = pipeline.run_discovery("Dentist", "Austin, TX").await?;
//! let audit = pipeline.run_audit(&leads[0]).await?;
//! let pitch = pipeline.generate_pitch(PitchOptions::default()).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The AI provider seam
//! - [`types`] - Domain data types
//! - [`pipeline`] - The three stages plus the session orchestrator
//! - [`testing`] - Mock AI for testing without provider calls

pub mod error;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "gemini")]
pub mod ai;

// Re-export core types at crate root
pub use error::{AiError, PipelineError, Result};
pub use traits::ai::{response_schema_for, Citation, Completion, CompletionRequest, GroundingTool, AI};
pub use types::{
    audit::{BusinessAudit, SourceLink},
    config::PipelineConfig,
    lead::{BusinessLead, Opportunity},
    pitch::{PitchFocus, PitchLength, PitchOptions, PitchTone},
};

// Re-export the pipeline surface
pub use pipeline::{
    audit, classify, coerce, discover, generate_pitch, LeadPipeline, RawLead, SessionSnapshot,
    StageState, FALLBACK_PITCH,
};

// Re-export testing utilities
pub use testing::MockAI;
