pub const TITLE_MAX_CHARS: usize = 80;
pub const ELLIPSIS: &str = "...";
pub const USAGE_TEXT_MAX_CHARS: usize = 500;

pub const CATEGORY_TAXONOMY: [&str; 5] = ["Bug", "Feature", "Enhancement", "Documentation", "Support"];

pub mod sampling {
    pub const SUGGESTION_TEMPERATURE: f32 = 0.7;
    pub const SUGGESTION_MAX_TOKENS: u32 = 150;
    pub const SUMMARY_TEMPERATURE: f32 = 0.5;
    pub const SUMMARY_MAX_TOKENS: u32 = 200;
}

pub mod fallback {
    pub const CATEGORY: &str = "Support";
}

pub mod messages {
    pub const SUMMARY_UNAVAILABLE: &str = "Unable to generate summary.";
    pub const SUMMARY_FAILED: &str = "Error generating AI summary. Please try again later.";
}
