use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::constants::USAGE_TEXT_MAX_CHARS;
use crate::utils::truncate_with_ellipsis;
use llm::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeatureType {
    Autofill,
    Summary,
}

/// One AI call, for audit and cost tracking. Prompt and response are clipped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub provider: String,
    pub feature: FeatureType,
    pub elapsed_ms: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl UsageRecord {
    pub fn new(
        provider: &str,
        feature: FeatureType,
        elapsed_ms: u64,
        prompt: &str,
        outcome: Result<&str, &TransportError>,
    ) -> Self {
        let (success, response, error) = match outcome {
            Ok(text) => (true, Some(truncate_with_ellipsis(text, USAGE_TEXT_MAX_CHARS)), None),
            Err(e) => (false, None, Some(e.to_string())),
        };
        Self {
            provider: provider.to_string(),
            feature,
            elapsed_ms,
            success,
            error,
            prompt: truncate_with_ellipsis(prompt, USAGE_TEXT_MAX_CHARS),
            response,
        }
    }
}

/// Fire-and-forget side channel. `record` must not block.
pub trait UsageSink: Send + Sync {
    fn record(&self, record: UsageRecord);
}

/// Writes usage records to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingUsageSink;

impl UsageSink for TracingUsageSink {
    fn record(&self, record: UsageRecord) {
        if record.success {
            info!(
                provider = %record.provider,
                feature = ?record.feature,
                elapsed_ms = record.elapsed_ms,
                "ai call succeeded"
            );
        } else {
            warn!(
                provider = %record.provider,
                feature = ?record.feature,
                elapsed_ms = record.elapsed_ms,
                error = record.error.as_deref().unwrap_or_default(),
                "ai call failed"
            );
        }
    }
}

/// Forwards records to a channel; drops them when the receiver lags or is gone.
#[derive(Debug, Clone)]
pub struct ChannelUsageSink(pub mpsc::Sender<UsageRecord>);

impl UsageSink for ChannelUsageSink {
    fn record(&self, record: UsageRecord) {
        if let Err(e) = self.0.try_send(record) {
            debug!(error = %e, "usage record dropped");
        }
    }
}
