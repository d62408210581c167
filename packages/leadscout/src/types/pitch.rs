//! Pitch option types.
//!
//! Tone, length and focus are closed configuration tables mapping symbolic
//! values to prompt-instruction fragments, not free-form strings threaded
//! through the system.

use serde::{Deserialize, Serialize};

/// Which sales angle the pitch leads with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PitchFocus {
    /// "You have digital gaps we can automate" - for leads with a presence
    Automation,

    /// "You have no online presence" - for leads without one
    WebsitePresence,
}

impl PitchFocus {
    /// Framing instruction for the prompt.
    pub fn framing(&self) -> &'static str {
        match self {
            PitchFocus::Automation => {
                "they already have an online presence, but clear digital gaps \
                 we can automate for them (booking, chat, follow-up)"
            }
            PitchFocus::WebsitePresence => {
                "they have little or no online presence, and we can build it \
                 for them starting with a website"
            }
        }
    }
}

/// Voice of the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PitchTone {
    Professional,
    Friendly,
    Direct,
}

impl PitchTone {
    /// Tone instruction for the prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            PitchTone::Professional => "polished and professional",
            PitchTone::Friendly => "warm and friendly, like a helpful neighbor",
            PitchTone::Direct => "direct and to the point, no filler",
        }
    }
}

/// Target length of the pitch.
///
/// Communicated to the model as a word-count band; never enforced
/// programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PitchLength {
    Short,
    Medium,
    Long,
}

impl PitchLength {
    /// Word-count band instruction for the prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            PitchLength::Short => "around 50-80 words",
            PitchLength::Medium => "around 100-150 words",
            PitchLength::Long => "around 200-250 words",
        }
    }
}

/// Options for one pitch generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchOptions {
    pub focus: PitchFocus,
    pub tone: PitchTone,
    pub length: PitchLength,
}

impl Default for PitchOptions {
    fn default() -> Self {
        Self {
            focus: PitchFocus::Automation,
            tone: PitchTone::Professional,
            length: PitchLength::Medium,
        }
    }
}
