//! Response coercion - best-effort extraction of typed JSON from AI text.
//!
//! Providers wrap JSON in explanatory prose or markdown fences, or return
//! it clean, depending on the prompt and the day. This module is the only
//! place bracket-matching and fence-stripping logic lives; every stage
//! funnels raw response text through [`coerce`] before it enters the typed
//! domain model.

use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use tracing::warn;

/// Coerce raw AI response text into `T`, returning `fallback` on failure.
///
/// Strategies, in order; the first successful parse wins:
/// 1. the whole text as JSON
/// 2. the contents of a fenced code block
/// 3. the first balanced top-level `[...]` that parses as `T`
/// 4. the first balanced top-level `{...}` that parses as `T`
///
/// Never returns an error: exhaustion of all strategies yields `fallback`
/// and a warning log. Known limitation: when the text contains several
/// independent JSON-looking fragments, the scanner picks the first one that
/// parses as `T`, which is not necessarily the fragment a human would
/// choose.
pub fn coerce<T: DeserializeOwned>(raw: &str, fallback: T) -> T {
    match try_coerce(raw) {
        Some(value) => value,
        None => {
            warn!(
                snippet = raw.chars().take(120).collect::<String>(),
                "could not coerce AI response into expected shape, using fallback"
            );
            fallback
        }
    }
}

fn try_coerce<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    if let Some(block) = fenced_block(text) {
        if let Ok(value) = serde_json::from_str(block.trim()) {
            return Some(value);
        }
    }

    if let Some(value) = first_parsable_span(text, '[', ']') {
        return Some(value);
    }

    first_parsable_span(text, '{', '}')
}

/// Contents of the first fenced code block, tag (` ```json `) optional.
fn fenced_block(text: &str) -> Option<&str> {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let pattern = FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence pattern compiles")
    });
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Try each balanced `open..close` span in order of its opening position.
fn first_parsable_span<T: DeserializeOwned>(text: &str, open: char, close: char) -> Option<T> {
    for (start, _) in text.char_indices().filter(|(_, c)| *c == open) {
        if let Some(len) = balanced_len(&text[start..], open, close) {
            if let Ok(value) = serde_json::from_str(&text[start..start + len]) {
                return Some(value);
            }
        }
    }
    None
}

/// Byte length of the balanced span starting at an `open` char, tracking
/// string literals and escapes so brackets inside strings don't count.
fn balanced_len(text: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i + c.len_utf8());
            }
        }
    }
    None
}
