//! Post-processing of the model's reply
//!
//! The reply goes through three steps, in order:
//! 1. a reply that is one fenced code block is replaced by the block's interior
//! 2. a JSON object with an `error` field is the model refusing the edit
//! 3. anything without a doctype or `<html` tag is not a whole page

use serde_json::Value;

/// Outcome of interpreting a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyVerdict {
    /// A whole page, ready to be proposed to the editor
    Document(String),
    /// The model's own refusal
    Refused(String),
    /// Not recognisable as a whole page
    Invalid,
}

/// Interpret a raw reply
pub fn interpret(raw: &str) -> ReplyVerdict {
    let text = strip_code_fence(raw);

    if let Some(reason) = refusal_reason(text) {
        return ReplyVerdict::Refused(reason);
    }

    if !looks_like_document(text) {
        return ReplyVerdict::Invalid;
    }

    ReplyVerdict::Document(text.to_string())
}

/// Unwrap a reply that consists of exactly one fenced block
///
/// The opener is three backticks, optionally `html`, then whitespace up to
/// and including a line break; the closer is a line break, three backticks
/// and nothing but whitespace. The interior is returned as a slice of the
/// input, unchanged. Anything else is returned as is.
///
/// Blank lines directly after the opener belong to the opener, so the
/// interior starts at the first line with visible content.
pub fn strip_code_fence(text: &str) -> &str {
    let Some(after_ticks) = text.strip_prefix("```") else {
        return text;
    };
    let after_lang = after_ticks.strip_prefix("html").unwrap_or(after_ticks);

    // Leading whitespace of the opener; the interior starts after its last newline.
    let ws_len = after_lang.len() - after_lang.trim_start().len();
    let Some(newline) = after_lang[..ws_len].rfind('\n') else {
        return text;
    };
    let rest = &after_lang[newline + 1..];

    let Some(interior) = rest
        .trim_end()
        .strip_suffix("```")
        .and_then(|s| s.strip_suffix('\n'))
    else {
        return text;
    };

    interior
}

/// The refusal reason, if the reply is a JSON object with an `error` field
///
/// Replies that merely look like JSON but do not parse are not refusals.
pub fn refusal_reason(text: &str) -> Option<String> {
    if !text.starts_with('{') || !text.contains("\"error\"") {
        return None;
    }

    let value: Value = serde_json::from_str(text).ok()?;
    match value.get("error")? {
        Value::String(reason) => Some(reason.clone()),
        other => Some(other.to_string()),
    }
}

/// Loose check that the text is a whole HTML document, not a fragment
pub fn looks_like_document(text: &str) -> bool {
    text.contains("<!DOCTYPE html") || text.contains("<html")
}
