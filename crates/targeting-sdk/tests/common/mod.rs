//! Shared helpers for targeting-sdk integration tests

#![allow(dead_code)]

use std::path::Path;
use targeting_sdk::{
    Condition, FieldType, Filter, FilterEngine, FilterEngineBuilder, Group, ListService,
    LogicalOperator, MemoryBackend, Operator, RepositoryConfig, UserRecord,
};

/// Distribution list used by the fixtures
pub const BETA_LIST: &str = "17";

/// Members of [`BETA_LIST`]
pub const BETA_MEMBERS: [&str; 2] = ["3586067540", "9876543210"];

/// In-memory engine with [`BETA_LIST`] registered
pub async fn memory_engine() -> FilterEngine {
    let lists = ListService::new();
    lists
        .register(
            BETA_LIST,
            Box::new(MemoryBackend::with_values(BETA_LIST, BETA_MEMBERS)),
        )
        .await;

    FilterEngineBuilder::new()
        .with_list_service(lists)
        .build()
        .await
        .expect("Failed to build engine")
}

/// Engine storing filters under `root`
pub async fn file_engine(root: &Path) -> FilterEngine {
    FilterEngineBuilder::new()
        .with_repository(RepositoryConfig::file_system(root.to_string_lossy().into_owned()))
        .build()
        .await
        .expect("Failed to build engine")
}

/// Record from key/value pairs
pub fn record(pairs: &[(&str, &str)]) -> UserRecord {
    pairs
        .iter()
        .fold(UserRecord::new(), |record, (key, value)| record.with(key, *value))
}

/// `COUNTRY == UA`
pub fn only_ukraine() -> Filter {
    Filter::new("Only Ukraine Users", 1)
        .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA"))
}

/// `CLIENT_VERSION > 2.0.0`
pub fn new_clients() -> Filter {
    Filter::new("New clients", 1).with_condition(Condition::new(
        FieldType::ClientVersion,
        Operator::GreaterThan,
        "2.0.0",
    ))
}

/// One group: `COUNTRY == UA OR COUNTRY == RU`
pub fn ua_or_ru() -> Filter {
    Filter::new("UA or RU", 2).with_group(
        Group::new("Countries", LogicalOperator::And)
            .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA"))
            .with_condition(Condition::new(FieldType::Country, Operator::Equal, "RU").or()),
    )
}

/// Members of [`BETA_LIST`] in Ukraine
pub fn beta_in_ukraine() -> Filter {
    Filter::new("Beta testers in Ukraine", 3)
        .with_condition(Condition::new(
            FieldType::DistributionGroupsFile,
            Operator::In,
            BETA_LIST,
        ))
        .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA").and())
}
