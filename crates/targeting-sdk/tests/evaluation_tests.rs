//! Integration tests for filter evaluation through the SDK

mod common;

use common::*;
use targeting_sdk::{
    Condition, EvaluationRequest, FieldType, Filter, FilterEngineBuilder, Group, LogicalOperator,
    Operator, UserRecord,
};

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_country_filter() {
    let engine = memory_engine().await;
    let filter = only_ukraine();

    assert!(engine.evaluate(&filter, &record(&[("COUNTRY", "UA")])).await);
    assert!(!engine.evaluate(&filter, &record(&[("COUNTRY", "RU")])).await);
    assert!(!engine.evaluate(&filter, &UserRecord::new()).await);
}

#[tokio::test]
async fn test_client_version_filter() {
    let engine = memory_engine().await;
    let filter = new_clients();

    assert!(engine.evaluate(&filter, &record(&[("CLIENT_VERSION", "2.2.1")])).await);
    assert!(!engine.evaluate(&filter, &record(&[("CLIENT_VERSION", "1.9.9")])).await);
}

#[tokio::test]
async fn test_or_group() {
    let engine = memory_engine().await;
    let filter = ua_or_ru();

    assert!(engine.evaluate(&filter, &record(&[("COUNTRY", "RU")])).await);
    assert!(engine.evaluate(&filter, &record(&[("COUNTRY", "UA")])).await);
    assert!(!engine.evaluate(&filter, &record(&[("COUNTRY", "PL")])).await);
}

#[tokio::test]
async fn test_inactive_filter_never_matches() {
    let engine = memory_engine().await;
    let filter = only_ukraine().inactive();

    assert!(!engine.evaluate(&filter, &record(&[("COUNTRY", "UA")])).await);
}

// ============================================================================
// Distribution lists
// ============================================================================

#[tokio::test]
async fn test_distribution_list_membership() {
    let engine = memory_engine().await;
    let filter = beta_in_ukraine();

    let member = record(&[("SMID", BETA_MEMBERS[0]), ("COUNTRY", "UA")]);
    let outsider = record(&[("SMID", "1111111111"), ("COUNTRY", "UA")]);
    let member_abroad = record(&[("SMID", BETA_MEMBERS[1]), ("COUNTRY", "DE")]);

    assert!(engine.evaluate(&filter, &member).await);
    assert!(!engine.evaluate(&filter, &outsider).await);
    assert!(!engine.evaluate(&filter, &member_abroad).await);
}

#[tokio::test]
async fn test_not_in_distribution_list() {
    let engine = memory_engine().await;
    let filter = Filter::new("Everyone but beta", 3).with_condition(Condition::new(
        FieldType::DistributionGroupsFile,
        Operator::NotIn,
        BETA_LIST,
    ));

    assert!(!engine.evaluate(&filter, &record(&[("SMID", BETA_MEMBERS[0])])).await);
    assert!(engine.evaluate(&filter, &record(&[("SMID", "1111111111")])).await);
    // No identifier to look up
    assert!(!engine.evaluate(&filter, &UserRecord::new()).await);
}

#[tokio::test]
async fn test_list_updates_visible_to_engine() {
    let engine = memory_engine().await;
    let filter = beta_in_ukraine();
    let newcomer = record(&[("SMID", "5555555555"), ("COUNTRY", "UA")]);

    assert!(!engine.evaluate(&filter, &newcomer).await);

    engine
        .list_service()
        .expect("list service")
        .add(BETA_LIST, "5555555555".to_string())
        .await
        .unwrap();

    assert!(engine.evaluate(&filter, &newcomer).await);
}

#[tokio::test]
async fn test_unknown_list_is_not_matched() {
    let engine = memory_engine().await;
    let filter = Filter::new("Unknown list", 3).with_condition(Condition::new(
        FieldType::DistributionGroupsFile,
        Operator::In,
        "404",
    ));

    assert!(!engine.evaluate(&filter, &record(&[("SMID", BETA_MEMBERS[0])])).await);
}

#[tokio::test]
async fn test_lists_loaded_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("vip.txt"), "# VIP users\n100\n200\n").unwrap();
    std::fs::write(
        dir.path().join("lists.yaml"),
        r#"
lists:
  - id: "vip"
    backend: file
    path: vip.txt
  - id: "staff"
    initial_values: ["300"]
"#,
    )
    .unwrap();

    let engine = FilterEngineBuilder::new()
        .with_lists_dir(dir.path())
        .build()
        .await
        .unwrap();

    let filter = Filter::new("VIP or staff", 1).with_group(
        Group::new("Lists", LogicalOperator::And)
            .with_condition(Condition::new(FieldType::DistributionGroupsFile, Operator::In, "vip"))
            .with_condition(
                Condition::new(FieldType::DistributionGroupsFile, Operator::Equal, "staff").or(),
            ),
    );

    for (smid, expected) in [("100", true), ("200", true), ("300", true), ("400", false)] {
        assert_eq!(
            engine.evaluate(&filter, &record(&[("SMID", smid)])).await,
            expected,
            "SMID {}",
            smid
        );
    }
}

// ============================================================================
// Stored filters and requests
// ============================================================================

#[tokio::test]
async fn test_evaluate_stored_filter() {
    let engine = memory_engine().await;
    let stored = engine.create_filter(ua_or_ru()).await.unwrap();
    let id = stored.id.unwrap();

    assert!(engine.evaluate_by_id(id, &record(&[("COUNTRY", "RU")])).await);
    assert!(!engine.evaluate_by_id(id, &record(&[("COUNTRY", "DE")])).await);

    engine.delete_filter(id).await.unwrap();
    assert!(!engine.evaluate_by_id(id, &record(&[("COUNTRY", "RU")])).await);
}

#[tokio::test]
async fn test_evaluation_request_from_json() {
    let engine = memory_engine().await;

    let json = r#"{
        "filter": {
            "filterName": "Chrome on Windows",
            "marketingTargetId": 4,
            "conditions": [
                {"fieldType": "BROWSER", "operator": "CONTAINS", "fieldValue": "chrome", "orderIndex": 0},
                {"fieldType": "OPERATING_SYSTEM", "operator": "STARTS_WITH", "fieldValue": "win",
                 "logicalOperator": "AND", "orderIndex": 1}
            ]
        },
        "userRequest": {"browser": "Google Chrome 120", "operatingSystem": "Windows 11"}
    }"#;

    let request: EvaluationRequest = serde_json::from_str(json).unwrap();
    let response = engine.evaluate_request(&request).await.unwrap();
    assert!(response.matched);
    assert_eq!(response.filter_id, None);

    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["matched"], true);
    assert!(body.get("evaluatedAt").is_some());
}

#[tokio::test]
async fn test_evaluation_is_repeatable() {
    let engine = memory_engine().await;
    let filter = beta_in_ukraine();
    let member = record(&[("SMID", BETA_MEMBERS[0]), ("COUNTRY", "UA")]);

    let first = engine.evaluate(&filter, &member).await;
    for _ in 0..5 {
        assert_eq!(engine.evaluate(&filter, &member).await, first);
    }
}
