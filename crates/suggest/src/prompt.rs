use crate::constants::{CATEGORY_TAXONOMY, TITLE_MAX_CHARS};
use crate::types::{Confidence, Priority};

/// Prompt asking for exactly four labeled lines: TITLE, PRIORITY, CATEGORY, CONFIDENCE.
pub fn build_field_suggestion_prompt(description: &str) -> String {
    let priorities: Vec<&str> = Priority::ALL.iter().map(Priority::as_str).collect();
    let confidences: Vec<&str> = Confidence::ALL.iter().map(Confidence::as_str).collect();

    format!(
        "Analyze this task description and suggest:\n\
1. A concise title (max {TITLE_MAX_CHARS} characters)\n\
2. Priority level ({priority_choices})\n\
3. Best matching category ({category_choices})\n\
\n\
Task description: \"{description}\"\n\
\n\
Respond in this EXACT format:\n\
TITLE: [your suggested title]\n\
PRIORITY: [{priority_slots}]\n\
CATEGORY: [{category_slots}]\n\
CONFIDENCE: [{confidence_slots}]",
        priority_choices = either_or(&priorities),
        category_choices = either_or(&CATEGORY_TAXONOMY),
        priority_slots = priorities.join("/"),
        category_slots = CATEGORY_TAXONOMY.join("/"),
        confidence_slots = confidences.join("/"),
    )
}

/// Prompt asking for a bullet-point digest of a task thread.
pub fn build_summary_prompt(content: &str) -> String {
    format!(
        "Summarize this task thread in a brief, structured format. Include:\n\
- Key points\n\
- Important decisions\n\
- Current blockers\n\
- Next steps\n\
\n\
Content:\n\
{content}\n\
\n\
Provide a concise summary in bullet points."
    )
}

// "A, B, or C"
fn either_or(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}
