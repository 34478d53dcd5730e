use std::sync::Arc;
use std::time::Duration;

use suggest::{
    ChannelUsageSink, Confidence, FeatureType, MockProvider, Priority, SuggestionOrchestrator,
    TransportError,
};
use tokio::sync::mpsc;

const WELL_FORMED: &str = "TITLE: Fix login bug\nPRIORITY: High\nCATEGORY: Bug\nCONFIDENCE: High";

fn orchestrator_with(provider: MockProvider) -> (SuggestionOrchestrator, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    (SuggestionOrchestrator::new(provider.clone()), provider)
}

#[tokio::test]
async fn suggest_fields_parses_backend_reply() {
    let (core, provider) = orchestrator_with(MockProvider::replying(WELL_FORMED));

    let result = core.suggest_fields("Users cannot log in after the last deploy").await;
    assert_eq!(result.suggested_title.as_deref(), Some("Fix login bug"));
    assert_eq!(result.suggested_priority, Some(Priority::High));
    assert_eq!(result.suggested_category.as_deref(), Some("Bug"));
    assert_eq!(result.confidence, Confidence::High);

    // Exactly one backend call, with the suggestion sampling parameters
    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].options.temperature, 0.7);
    assert_eq!(calls[0].options.max_tokens, 150);
    assert!(calls[0].prompt.contains("\"Users cannot log in after the last deploy\""));
}

#[tokio::test]
async fn unreachable_backend_falls_back() {
    let (core, _) = orchestrator_with(MockProvider::unreachable());
    let description = "When a user resets their password the confirmation email never arrives and support gets flooded";
    assert!(description.chars().count() > 80);

    let result = core.suggest_fields(description).await;
    let expected_title = format!("{}...", description.chars().take(77).collect::<String>());
    assert_eq!(result.suggested_title.as_deref(), Some(expected_title.as_str()));
    assert_eq!(result.suggested_priority, Some(Priority::Medium));
    assert_eq!(result.suggested_category.as_deref(), Some("Support"));
    assert_eq!(result.confidence, Confidence::Low);
}

#[tokio::test]
async fn fallback_keeps_short_descriptions_whole() {
    let (core, _) = orchestrator_with(MockProvider::failing(TransportError::Timeout(Duration::from_secs(30))));

    let result = core.suggest_fields("Printer on floor 3 is jammed").await;
    assert_eq!(result.suggested_title.as_deref(), Some("Printer on floor 3 is jammed"));
    assert_eq!(result.confidence, Confidence::Low);
}

#[tokio::test]
async fn every_failure_kind_degrades_the_same_way() {
    let failures = vec![
        TransportError::Timeout(Duration::from_secs(1)),
        TransportError::Connect("refused".into()),
        TransportError::Status { status: 500, body: "boom".into() },
        TransportError::Envelope("missing `response`".into()),
        TransportError::Request("reset".into()),
    ];

    for err in failures {
        let label = err.to_string();
        let (core, _) = orchestrator_with(MockProvider::failing(err));
        let result = core.suggest_fields("Nightly export job crashes").await;
        assert_eq!(result.confidence, Confidence::Low, "{label}");
        assert_eq!(result.suggested_priority, Some(Priority::Medium), "{label}");
        assert_eq!(result.suggested_category.as_deref(), Some("Support"), "{label}");
    }
}

#[tokio::test]
async fn missing_confidence_is_medium_but_failure_is_low() {
    let (core, _) = orchestrator_with(
        MockProvider::unreachable().then(Ok("TITLE: Tidy docs\nCATEGORY: Documentation".to_string())),
    );

    let parsed = core.suggest_fields("The docs folder is a mess").await;
    assert_eq!(parsed.confidence, Confidence::Medium);
    assert_eq!(parsed.suggested_priority, None);

    let fallback = core.suggest_fields("The docs folder is a mess").await;
    assert_eq!(fallback.confidence, Confidence::Low);
}

#[tokio::test]
async fn processing_time_spans_the_backend_call() {
    let (core, _) = orchestrator_with(MockProvider::replying(WELL_FORMED).with_delay(Duration::from_millis(60)));
    let result = core.suggest_fields("Slow model").await;
    assert!(result.processing_time_ms >= 50, "got {}", result.processing_time_ms);

    let (core, _) = orchestrator_with(MockProvider::unreachable().with_delay(Duration::from_millis(60)));
    let result = core.suggest_fields("Slow and broken model").await;
    assert_eq!(result.confidence, Confidence::Low);
    assert!(result.processing_time_ms >= 50, "got {}", result.processing_time_ms);
}

#[tokio::test]
async fn identical_replies_give_identical_results() {
    let (core, _) = orchestrator_with(MockProvider::replying(WELL_FORMED));

    let mut first = core.suggest_fields("Login is broken").await;
    let mut second = core.suggest_fields("Login is broken").await;
    first.processing_time_ms = 0;
    second.processing_time_ms = 0;
    assert_eq!(first, second);
}

#[tokio::test]
async fn result_is_always_schema_complete() {
    let long = "long ".repeat(200);
    let replies = ["", "nonsense", WELL_FORMED, "CONFIDENCE: Low"];
    let inputs: [&str; 4] = ["", "x", "Ünïcödé déscription with émojis 🚀🚀🚀", &long];

    for reply in replies {
        for input in inputs {
            let (core, _) = orchestrator_with(MockProvider::replying(reply));
            let result = core.suggest_fields(input).await;
            assert!(Confidence::ALL.contains(&result.confidence));
        }
    }

    for input in inputs {
        let (core, _) = orchestrator_with(MockProvider::unreachable());
        let result = core.suggest_fields(input).await;
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result.suggested_title.unwrap().chars().count() <= 80);
    }
}

#[tokio::test]
async fn concurrent_calls_share_one_orchestrator() {
    let core = Arc::new(SuggestionOrchestrator::new(Arc::new(
        MockProvider::replying(WELL_FORMED).with_delay(Duration::from_millis(20)),
    )));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let core = core.clone();
            tokio::spawn(async move { core.suggest_fields(&format!("Task number {i}")).await })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap();
        assert_eq!(result.suggested_priority, Some(Priority::High));
    }
}

#[tokio::test]
async fn summary_uses_summary_sampling() {
    let (core, provider) = orchestrator_with(MockProvider::replying("- Key point: auth\n- Next step: release"));

    let summary = core.generate_summary("Login broken.\nComment: fixed in #42").await;
    assert_eq!(summary, "- Key point: auth\n- Next step: release");

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].options.temperature, 0.5);
    assert_eq!(calls[0].options.max_tokens, 200);
    assert!(calls[0].prompt.contains("Comment: fixed in #42"));
}

#[tokio::test]
async fn summary_is_never_empty() {
    let (core, _) = orchestrator_with(MockProvider::replying("   "));
    assert_eq!(core.generate_summary("anything").await, "Unable to generate summary.");

    let (core, _) = orchestrator_with(MockProvider::unreachable());
    let summary = core.generate_summary("anything").await;
    assert_eq!(summary, "Error generating AI summary. Please try again later.");
}

#[tokio::test]
async fn usage_is_recorded_for_success_and_failure() {
    let (tx, mut rx) = mpsc::channel(8);
    let provider = Arc::new(MockProvider::replying(WELL_FORMED).then(Err(TransportError::Connect("down".into()))));
    let core = SuggestionOrchestrator::new(provider).with_usage_sink(Arc::new(ChannelUsageSink(tx)));

    core.suggest_fields("First call fails").await;
    core.generate_summary(&"very long thread ".repeat(100)).await;

    let failed = rx.recv().await.unwrap();
    assert_eq!(failed.provider, "mock");
    assert_eq!(failed.feature, FeatureType::Autofill);
    assert!(!failed.success);
    assert!(failed.error.as_deref().unwrap().contains("down"));
    assert!(failed.response.is_none());

    let ok = rx.recv().await.unwrap();
    assert_eq!(ok.feature, FeatureType::Summary);
    assert!(ok.success);
    assert!(ok.error.is_none());
    assert_eq!(ok.response.as_deref(), Some(WELL_FORMED));
    assert!(ok.prompt.chars().count() <= 500);
}

#[tokio::test]
async fn full_usage_channel_does_not_block() {
    let (tx, _rx) = mpsc::channel(1);
    let core = SuggestionOrchestrator::new(Arc::new(MockProvider::replying(WELL_FORMED)))
        .with_usage_sink(Arc::new(ChannelUsageSink(tx)));

    for _ in 0..3 {
        let result = core.suggest_fields("Keep going").await;
        assert_eq!(result.confidence, Confidence::High);
    }
}
