use std::sync::Arc;
use std::time::Instant;

use llm::{GenerateOptions, TransportError};
use tracing::{debug, error};

use crate::constants::{fallback, messages, sampling, TITLE_MAX_CHARS};
use crate::extractors::labels::{parse_field_suggestion, parse_summary};
use crate::prompt::{build_field_suggestion_prompt, build_summary_prompt};
use crate::traits::TextGenerator;
use crate::types::{Confidence, Priority, SuggestionResult};
use crate::usage::{FeatureType, TracingUsageSink, UsageRecord, UsageSink};
use crate::utils::truncate_with_ellipsis;

/// Build → call → parse, or fall back. Holds no per-call state, so one
/// instance can serve any number of concurrent requests.
pub struct SuggestionOrchestrator {
    generator: Arc<dyn TextGenerator>,
    usage: Arc<dyn UsageSink>,
}

impl SuggestionOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator, usage: Arc::new(TracingUsageSink) }
    }

    pub fn with_usage_sink(mut self, usage: Arc<dyn UsageSink>) -> Self {
        self.usage = usage;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.generator.name()
    }

    /// Suggest title, priority and category for a task description.
    /// Always returns a usable result; backend failures yield the fallback.
    pub async fn suggest_fields(&self, description: &str) -> SuggestionResult {
        let prompt = build_field_suggestion_prompt(description);
        let opts = GenerateOptions {
            temperature: sampling::SUGGESTION_TEMPERATURE,
            max_tokens: sampling::SUGGESTION_MAX_TOKENS,
        };

        let (outcome, elapsed_ms) = self.timed_generate(&prompt, opts).await;
        self.record(FeatureType::Autofill, elapsed_ms, &prompt, &outcome);

        match outcome {
            Ok(text) => {
                let result = parse_field_suggestion(&text, elapsed_ms);
                debug!(elapsed_ms, empty = result.is_empty(), "parsed field suggestion");
                result
            }
            Err(e) => {
                error!(provider = self.provider_name(), error = %e, "field suggestion failed, using fallback");
                fallback_suggestion(description, elapsed_ms)
            }
        }
    }

    /// Bullet-point summary of a task thread. Never empty.
    pub async fn generate_summary(&self, content: &str) -> String {
        let prompt = build_summary_prompt(content);
        let opts = GenerateOptions {
            temperature: sampling::SUMMARY_TEMPERATURE,
            max_tokens: sampling::SUMMARY_MAX_TOKENS,
        };

        let (outcome, elapsed_ms) = self.timed_generate(&prompt, opts).await;
        self.record(FeatureType::Summary, elapsed_ms, &prompt, &outcome);

        match outcome {
            Ok(text) => parse_summary(&text),
            Err(e) => {
                error!(provider = self.provider_name(), error = %e, "summary generation failed");
                messages::SUMMARY_FAILED.to_string()
            }
        }
    }

    // Wall-clock time covers the backend call only.
    async fn timed_generate(&self, prompt: &str, opts: GenerateOptions) -> (Result<String, TransportError>, u64) {
        let started = Instant::now();
        let outcome = self.generator.generate(prompt, opts).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        (outcome, elapsed_ms)
    }

    fn record(&self, feature: FeatureType, elapsed_ms: u64, prompt: &str, outcome: &Result<String, TransportError>) {
        let outcome = outcome.as_ref().map(String::as_str);
        self.usage.record(UsageRecord::new(self.provider_name(), feature, elapsed_ms, prompt, outcome));
    }
}

/// Deterministic stand-in when the backend is unavailable.
fn fallback_suggestion(description: &str, elapsed_ms: u64) -> SuggestionResult {
    SuggestionResult {
        suggested_title: Some(truncate_with_ellipsis(description, TITLE_MAX_CHARS)),
        suggested_priority: Some(Priority::Medium),
        suggested_category: Some(fallback::CATEGORY.to_string()),
        confidence: Confidence::Low,
        processing_time_ms: elapsed_ms,
    }
}
