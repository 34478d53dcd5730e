use std::sync::Arc;

use anyhow::Result;
use llm::ClientConfig;
use suggest::{LlmProvider, SuggestionOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from workspace root
    dotenvy::from_path(".env").ok();

    let config = ClientConfig::from_env()?;
    println!("Testing with {:?} model {} at {}", config.backend, config.model, config.endpoint);

    let core = SuggestionOrchestrator::new(Arc::new(LlmProvider::from_config(config)?));

    let descriptions = vec![
        "Users get logged out every few minutes after the last deploy, only on Safari",
        "It would be great to export the task list as CSV for the weekly report",
        "The onboarding guide still references the old API keys page",
    ];

    for description in descriptions {
        println!("\nDescription: \"{}\"", description);
        let result = core.suggest_fields(description).await;
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    let summary = core
        .generate_summary("Task: Safari logouts\nComment: cookie SameSite changed in v2.3\nComment: waiting on infra to roll back")
        .await;
    println!("\nSummary:\n{}", summary);

    Ok(())
}
