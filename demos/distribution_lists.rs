//! Distribution list example
//!
//! This example demonstrates:
//! - Registering an in-memory distribution list
//! - Targeting list members with DISTRIBUTION_GROUPS_FILE conditions
//! - Updating list membership at runtime
//! - Inspecting an evaluation trace

use targeting_core::{Condition, FieldType, Filter, Operator};
use targeting_runtime::{ListService, MemoryBackend, UserRecord};
use targeting_sdk::FilterEngineBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const BETA_TESTERS: &str = "17";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "targeting_sdk=info,targeting_runtime=info".into()),
        )
        .with(fmt::layer())
        .try_init();

    println!("=== Distribution List Example ===\n");

    let lists = ListService::new();
    lists
        .register(
            BETA_TESTERS,
            Box::new(MemoryBackend::with_values(
                BETA_TESTERS,
                ["3586067540", "9876543210"],
            )),
        )
        .await;

    let engine = FilterEngineBuilder::new()
        .with_list_service(lists.clone())
        .build()
        .await?;

    let filter = Filter::new("Beta testers outside Russia", 7)
        .with_condition(Condition::new(
            FieldType::DistributionGroupsFile,
            Operator::In,
            BETA_TESTERS,
        ))
        .with_condition(Condition::new(FieldType::Country, Operator::NotEqual, "RU").and());

    let member = UserRecord::new().with("SMID", "3586067540").with("COUNTRY", "UA");
    let newcomer = UserRecord::new().with("SMID", "1000000001").with("COUNTRY", "UA");

    println!("Member matched:   {}", engine.evaluate(&filter, &member).await);
    println!("Newcomer matched: {}", engine.evaluate(&filter, &newcomer).await);

    lists.add(BETA_TESTERS, "1000000001".to_string()).await?;
    println!(
        "Newcomer matched after joining list {}: {}",
        BETA_TESTERS,
        engine.evaluate(&filter, &newcomer).await
    );

    let trace = engine.evaluator().evaluate_with_trace(&filter, &member).await;
    println!("\nTrace:\n{}", serde_json::to_string_pretty(&trace)?);

    Ok(())
}
