//! Simple filter example
//!
//! This example demonstrates:
//! - Creating a FilterEngine with in-memory storage
//! - Storing a filter with a root condition and an OR group
//! - Evaluating stored and inline filters against user requests

use targeting_core::{Condition, FieldType, Filter, Group, LogicalOperator, Operator};
use targeting_sdk::{EvaluationRequest, FilterEngineBuilder, UserRecord};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "targeting_sdk=info,targeting_runtime=info".into()),
        )
        .with(fmt::layer())
        .try_init();

    println!("=== Simple Filter Example ===\n");

    let engine = FilterEngineBuilder::new().enable_trace(true).build().await?;

    // Recent clients in Ukraine or Poland
    let filter = Filter::new("Recent clients in UA/PL", 1)
        .with_description("Client 2.0.0 or newer, country UA or PL")
        .with_condition(Condition::new(
            FieldType::ClientVersion,
            Operator::GreaterThanOrEqual,
            "2.0.0",
        ))
        .with_group(
            Group::new("Countries", LogicalOperator::And)
                .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA"))
                .with_condition(Condition::new(FieldType::Country, Operator::Equal, "PL").or()),
        );

    let validation = engine.validate(&filter);
    println!("Validation: valid={} errors={:?}\n", validation.valid, validation.errors);

    let stored = engine.create_filter(filter).await?;
    let id = stored.id.unwrap_or_default();
    println!("Stored filter:\n{}\n", serde_json::to_string_pretty(&stored)?);

    let users = [
        UserRecord::new().with("COUNTRY", "UA").with("CLIENT_VERSION", "2.2.1"),
        UserRecord::new().with("COUNTRY", "PL").with("CLIENT_VERSION", "1.9.9"),
        UserRecord::new().with("COUNTRY", "DE").with("CLIENT_VERSION", "3.0.0"),
    ];

    println!("Results:");
    for user in &users {
        let matched = engine.evaluate_by_id(id, user).await;
        println!(
            "  country={:?} version={:?} -> {}",
            user.country, user.client_version, matched
        );
    }

    // Inline evaluation, as a client would send it
    let request = EvaluationRequest::inline(
        Filter::new("Chrome users", 1).with_condition(Condition::new(
            FieldType::Browser,
            Operator::Contains,
            "chrome",
        )),
        UserRecord::new().with("BROWSER", "Google Chrome 120"),
    );
    let response = engine.evaluate_request(&request).await?;
    println!("\nInline request response:\n{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
