//! Core trait abstractions for the prospecting pipeline.
//!
//! The pipeline depends on a single seam: an AI provider capable of text
//! completion with optional grounding tools. Applications plug in a real
//! provider (see the `gemini` feature) or a mock.

pub mod ai;
