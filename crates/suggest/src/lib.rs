pub mod constants;
pub mod traits;
pub mod types;
pub mod prompt;
pub mod providers;
pub mod extractors;
pub mod orchestrator;
pub mod usage;
mod utils;

pub use traits::TextGenerator;
pub use types::{Confidence, Priority, SuggestionResult};
pub use orchestrator::SuggestionOrchestrator;
pub use usage::{ChannelUsageSink, FeatureType, TracingUsageSink, UsageRecord, UsageSink};

// Transport-level types come straight from the client crate
pub use llm::{GenerateOptions, TransportError};

// Re-export providers
pub use providers::mock::MockProvider;
pub use providers::backend::LlmProvider;

// Re-export extractors
pub use extractors::labels::{parse_field_suggestion, parse_summary};
