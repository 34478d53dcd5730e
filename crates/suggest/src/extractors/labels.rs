use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::constants::{messages, TITLE_MAX_CHARS};
use crate::types::{Confidence, Priority, SuggestionResult};
use crate::utils::truncate_with_ellipsis;

static TITLE: Lazy<Option<Regex>> = Lazy::new(|| label_pattern("TITLE"));
static PRIORITY: Lazy<Option<Regex>> = Lazy::new(|| label_pattern("PRIORITY"));
static CATEGORY: Lazy<Option<Regex>> = Lazy::new(|| label_pattern("CATEGORY"));
static CONFIDENCE: Lazy<Option<Regex>> = Lazy::new(|| label_pattern("CONFIDENCE"));

/// `LABEL:` at the start of a line (after optional list or emphasis markers),
/// case-insensitive, capturing the rest of that line.
fn label_pattern(label: &str) -> Option<Regex> {
    match Regex::new(&format!(r"(?im)^[ \t>*_#\d.)-]*{label}\b[ \t*_]*:[ \t]*([^\r\n]*)")) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(label, error = %e, "label pattern failed to compile");
            None
        }
    }
}

/// Parse free text into a suggestion. Each field is looked up on its own;
/// a missing or unrecognized label leaves that field unset. Never fails.
pub fn parse_field_suggestion(text: &str, elapsed_ms: u64) -> SuggestionResult {
    let suggested_title = label_value(&TITLE, "TITLE", text)
        .map(|title| truncate_with_ellipsis(&title, TITLE_MAX_CHARS));

    let suggested_priority = word_value(&PRIORITY, "PRIORITY", text)
        .and_then(|word| {
            let priority = Priority::from_label(&word);
            if priority.is_none() {
                debug!(value = %word, "unrecognized priority in generated text");
            }
            priority
        });

    let suggested_category = word_value(&CATEGORY, "CATEGORY", text);

    // Absent confidence reads as Medium; the failure path reports Low elsewhere.
    let confidence = word_value(&CONFIDENCE, "CONFIDENCE", text)
        .and_then(|word| Confidence::from_label(&word))
        .unwrap_or(Confidence::Medium);

    SuggestionResult {
        suggested_title,
        suggested_priority,
        suggested_category,
        confidence,
        processing_time_ms: elapsed_ms,
    }
}

/// Generated summary text as-is, or a placeholder when the model said nothing.
pub fn parse_summary(text: &str) -> String {
    if text.trim().is_empty() {
        debug!("generated summary was empty");
        return messages::SUMMARY_UNAVAILABLE.to_string();
    }
    text.to_string()
}

fn label_value(pattern: &Option<Regex>, label: &str, text: &str) -> Option<String> {
    let re = pattern.as_ref()?;

    let value = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_value(m.as_str()))
        .filter(|v| !v.is_empty());

    match value {
        None => {
            debug!(label, "label missing from generated text");
            None
        }
        Some(v) if is_placeholder(&v) => {
            debug!(label, value = %v, "template placeholder echoed back");
            None
        }
        Some(v) => Some(v),
    }
}

/// First word of a single-choice label. A list of alternatives
/// (`Low/Medium/High`) is not a choice.
fn word_value(pattern: &Option<Regex>, label: &str, text: &str) -> Option<String> {
    let value = label_value(pattern, label, text)?;
    if value.contains(|c: char| matches!(c, '/' | '|')) {
        debug!(label, value = %value, "list of options instead of a choice");
        return None;
    }
    first_word(&value).map(str::to_string)
}

// Models like to wrap values in markdown emphasis or quotes.
fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '*' | '"' | '`'))
        .trim()
        .to_string()
}

// The prompt's `[...]` slots copied verbatim instead of filled in.
fn is_placeholder(value: &str) -> bool {
    value.starts_with('[')
}

fn first_word(value: &str) -> Option<&str> {
    value
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
}
