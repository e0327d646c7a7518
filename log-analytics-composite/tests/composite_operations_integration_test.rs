//! Integration tests for the composite operations facade.
//!
//! These drive the public API against the scripted in-memory client with tokio's
//! clock paused, so multi-minute waits finish instantly.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use log_analytics_composite::test_utils::{
    ScriptedClient, ENTITY_ID, NAMESPACE, RULE_ID, TASK_ID, WORK_REQUEST_ID,
};
use log_analytics_composite::{
    wait_on_work_request, CallOptions, CompositeOperationError, CreateLogAnalyticsEntityDetails,
    CreateLogAnalyticsObjectCollectionRuleDetails, CreateScheduledTaskDetails, LifecycleState,
    LogAnalyticsCompositeOperations, PurgeStorageDataDetails, QueryDetails,
    RecallArchivedDataDetails, ReleaseRecalledDataDetails, ServiceError, StatusPolling,
    UpdateLogAnalyticsEntityDetails, UpdateLogAnalyticsObjectCollectionRuleDetails,
    UpdateScheduledTaskDetails, UpsertLogAnalyticsAssociationDetails, WaitError, WaitOutcome,
    WaitTargets, WaiterOptions, WaiterPolicy,
};
use serde_json::Map;
use tokio::time::Instant;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn entity_details() -> CreateLogAnalyticsEntityDetails {
    CreateLogAnalyticsEntityDetails {
        name: "web-01".to_string(),
        entity_type_name: "Host (Linux)".to_string(),
        compartment_id: "ocid1.compartment.oc1..aaaa".to_string(),
        ..Default::default()
    }
}

fn purge_details() -> PurgeStorageDataDetails {
    PurgeStorageDataDetails {
        compartment_id: "ocid1.tenancy.oc1..aaaa".to_string(),
        time_data_ended: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        purge_query_string: None,
        data_type: None,
        compartment_id_in_subtree: None,
        extra: Map::new(),
    }
}

fn recall_details() -> RecallArchivedDataDetails {
    RecallArchivedDataDetails {
        compartment_id: "ocid1.tenancy.oc1..aaaa".to_string(),
        time_data_started: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        time_data_ended: Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap(),
        data_type: None,
        log_sets: None,
        query: None,
        extra: Map::new(),
    }
}

fn release_details() -> ReleaseRecalledDataDetails {
    ReleaseRecalledDataDetails {
        compartment_id: "ocid1.tenancy.oc1..aaaa".to_string(),
        time_data_started: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        time_data_ended: Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap(),
        data_type: None,
        log_sets: None,
        extra: Map::new(),
    }
}

fn query_details() -> QueryDetails {
    QueryDetails {
        compartment_id: "ocid1.compartment.oc1..aaaa".to_string(),
        query_string: "* | stats count".to_string(),
        sub_system: "LOG".to_string(),
        should_run_async: Some(true),
        ..Default::default()
    }
}

/// Runs every work request operation once and returns how many settled.
async fn run_all_work_request_operations(
    ops: &LogAnalyticsCompositeOperations,
    targets: &WaitTargets,
) -> usize {
    let options = CallOptions::default();
    let waiter = WaiterOptions::default();
    let outcomes: Vec<WaitOutcome<()>> = vec![
        ops.onboard_namespace_and_wait_for_state(NAMESPACE, targets.clone(), &options, waiter)
            .await
            .unwrap(),
        ops.offboard_namespace_and_wait_for_state(NAMESPACE, targets.clone(), &options, waiter)
            .await
            .unwrap(),
        ops.purge_storage_data_and_wait_for_state(
            NAMESPACE,
            &purge_details(),
            targets.clone(),
            &options,
            waiter,
        )
        .await
        .unwrap(),
        ops.recall_archived_data_and_wait_for_state(
            NAMESPACE,
            &recall_details(),
            targets.clone(),
            &options,
            waiter,
        )
        .await
        .unwrap(),
        ops.release_recalled_data_and_wait_for_state(
            NAMESPACE,
            &release_details(),
            targets.clone(),
            &options,
            waiter,
        )
        .await
        .unwrap(),
        ops.upsert_associations_and_wait_for_state(
            NAMESPACE,
            &UpsertLogAnalyticsAssociationDetails::default(),
            targets.clone(),
            &options,
            waiter,
        )
        .await
        .unwrap(),
    ];
    let query_settled = ops
        .query_and_wait_for_state(NAMESPACE, &query_details(), targets.clone(), &options, waiter)
        .await
        .unwrap()
        .is_settled();

    outcomes.iter().filter(|o| o.is_settled()).count() + usize::from(query_settled)
}

#[tokio::test]
async fn test_empty_targets_never_poll_direct_state_resources() {
    init_logging();
    let client = Arc::new(ScriptedClient::new().with_resource_states(["ACTIVE"]));
    let ops = LogAnalyticsCompositeOperations::new(client.clone());
    let options = CallOptions::default();
    let waiter = WaiterOptions::default();

    let entity = ops
        .create_log_analytics_entity_and_wait_for_state(
            NAMESPACE,
            &entity_details(),
            WaitTargets::none(),
            &options,
            waiter,
        )
        .await
        .unwrap();
    assert_eq!(entity.data.lifecycle_state.as_deref(), Some("CREATING"));

    ops.update_log_analytics_entity_and_wait_for_state(
        NAMESPACE,
        ENTITY_ID,
        &UpdateLogAnalyticsEntityDetails::default(),
        WaitTargets::none(),
        &options,
        waiter,
    )
    .await
    .unwrap();
    ops.create_log_analytics_object_collection_rule_and_wait_for_state(
        NAMESPACE,
        &CreateLogAnalyticsObjectCollectionRuleDetails::default(),
        WaitTargets::none(),
        &options,
        waiter,
    )
    .await
    .unwrap();
    ops.update_log_analytics_object_collection_rule_and_wait_for_state(
        NAMESPACE,
        RULE_ID,
        &UpdateLogAnalyticsObjectCollectionRuleDetails::default(),
        WaitTargets::none(),
        &options,
        waiter,
    )
    .await
    .unwrap();
    ops.create_scheduled_task_and_wait_for_state(
        NAMESPACE,
        &CreateScheduledTaskDetails::default(),
        WaitTargets::none(),
        &options,
        waiter,
    )
    .await
    .unwrap();
    ops.update_scheduled_task_and_wait_for_state(
        NAMESPACE,
        TASK_ID,
        &UpdateScheduledTaskDetails::default(),
        WaitTargets::none(),
        &options,
        waiter,
    )
    .await
    .unwrap();

    assert_eq!(client.mutation_calls(), 6);
    assert_eq!(client.resource_polls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_completion_utility_waits_even_without_targets() {
    init_logging();
    let client = Arc::new(ScriptedClient::new().with_work_request_statuses(["SUCCEEDED"]));
    let ops = LogAnalyticsCompositeOperations::new(client.clone());

    let settled = run_all_work_request_operations(&ops, &WaitTargets::none()).await;

    assert_eq!(settled, 7);
    assert_eq!(client.mutation_calls(), 7);
    assert_eq!(client.work_request_polls(), 7);
}

#[tokio::test]
async fn test_status_polling_without_targets_returns_immediately() {
    init_logging();
    let client = Arc::new(ScriptedClient::new().with_work_request_statuses(["SUCCEEDED"]));
    let ops = LogAnalyticsCompositeOperations::new(client.clone())
        .with_work_request_waiter(Arc::new(StatusPolling));

    let settled = run_all_work_request_operations(&ops, &WaitTargets::none()).await;

    assert_eq!(settled, 0);
    assert_eq!(client.mutation_calls(), 7);
    assert_eq!(client.work_request_polls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_status_polling_with_targets_settles_every_operation() {
    init_logging();
    let client = Arc::new(ScriptedClient::new().with_work_request_statuses(["succeeded"]));
    let ops = LogAnalyticsCompositeOperations::new(client.clone())
        .with_work_request_waiter(Arc::new(StatusPolling));

    let settled = run_all_work_request_operations(&ops, &WaitTargets::from(["SUCCEEDED"])).await;

    assert_eq!(settled, 7);
    assert_eq!(client.work_request_polls(), 7);
}

#[tokio::test(start_paused = true)]
async fn test_create_entity_transitions_to_active_across_three_polls() {
    init_logging();
    let client =
        Arc::new(ScriptedClient::new().with_resource_states(["CREATING", "CREATING", "ACTIVE"]));
    let ops = LogAnalyticsCompositeOperations::new(client.clone());

    let result = ops
        .create_log_analytics_entity_and_wait_for_state(
            NAMESPACE,
            &entity_details(),
            ["ACTIVE"],
            &CallOptions::default(),
            WaiterOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(result.data.lifecycle_state.as_deref(), Some("ACTIVE"));
    assert_eq!(result.data.id.as_deref(), Some(ENTITY_ID));
    assert_eq!(client.resource_polls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_uppercase_target_matches_lowercase_state() {
    init_logging();
    let client = Arc::new(ScriptedClient::new().with_resource_states(["active"]));
    let ops = LogAnalyticsCompositeOperations::new(client.clone());

    let result = ops
        .create_log_analytics_entity_and_wait_for_state(
            NAMESPACE,
            &entity_details(),
            ["ACTIVE"],
            &CallOptions::default(),
            WaiterOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(result.data.lifecycle_state.as_deref(), Some("active"));
}

#[tokio::test(start_paused = true)]
async fn test_failed_entity_times_out_with_original_result() {
    init_logging();
    let client = Arc::new(ScriptedClient::new().with_resource_states(["CREATING", "FAILED"]));
    let ops = LogAnalyticsCompositeOperations::new(client.clone());
    let start = Instant::now();

    let err = ops
        .create_log_analytics_entity_and_wait_for_state(
            NAMESPACE,
            &entity_details(),
            [LifecycleState::Active],
            &CallOptions::default(),
            WaiterOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(start.elapsed() >= Duration::from_secs(1200));
    assert!(matches!(err.wait_error(), Some(WaitError::Timeout { .. })));
    let partial = err.into_partial_result().unwrap();
    assert_eq!(partial.data.lifecycle_state.as_deref(), Some("CREATING"));
    assert_eq!(partial.data.id.as_deref(), Some(ENTITY_ID));
    assert!(client.resource_polls() > 2);
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_without_state_field_fails_on_first_poll() {
    init_logging();
    let client = Arc::new(
        ScriptedClient::new()
            .with_initial_state("UPDATING")
            .with_stateless_resource(),
    );
    let ops = LogAnalyticsCompositeOperations::new(client.clone());
    let start = Instant::now();

    let err = ops
        .update_scheduled_task_and_wait_for_state(
            NAMESPACE,
            TASK_ID,
            &UpdateScheduledTaskDetails::default(),
            ["ACTIVE"],
            &CallOptions::default(),
            WaiterOptions::default(),
        )
        .await
        .unwrap_err();

    match err {
        CompositeOperationError::WaitFailed {
            partial_result,
            source: WaitError::MissingState(kind),
        } => {
            assert_eq!(kind, "scheduled task");
            assert_eq!(partial_result.data.lifecycle_state.as_deref(), Some("UPDATING"));
        }
        other => panic!("expected missing state, got {other:?}"),
    }
    assert_eq!(client.resource_polls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_work_request_without_status_fails_on_first_poll() {
    init_logging();
    let client = Arc::new(ScriptedClient::new().with_statusless_work_request());
    let ops = LogAnalyticsCompositeOperations::new(client.clone());

    let err = ops
        .offboard_namespace_and_wait_for_state(
            NAMESPACE,
            WaitTargets::none(),
            &CallOptions::default(),
            WaiterOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err.wait_error(), Some(WaitError::MissingState("work request"))));
    assert_eq!(err.partial_result().map(|r| r.status), Some(202));
    assert_eq!(client.work_request_polls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_poll_spacing_is_bounded_by_interval_ceiling() {
    init_logging();
    let client = Arc::new(ScriptedClient::new().with_resource_states([
        "CREATING", "CREATING", "CREATING", "CREATING", "CREATING", "ACTIVE",
    ]));
    let ops = LogAnalyticsCompositeOperations::new(client.clone());
    let start = Instant::now();

    ops.create_log_analytics_object_collection_rule_and_wait_for_state(
        NAMESPACE,
        &CreateLogAnalyticsObjectCollectionRuleDetails::default(),
        ["ACTIVE"],
        &CallOptions::default(),
        WaiterOptions::new().max_interval_seconds(2),
    )
    .await
    .unwrap();

    // sleeps of 1, 2, 2, 2, 2 seconds between six polls
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(9));
    assert!(elapsed < Duration::from_secs(10));
    assert_eq!(client.resource_polls(), 6);
}

#[tokio::test]
async fn test_mutation_failure_is_not_a_wait_failure() {
    init_logging();
    let client = Arc::new(
        ScriptedClient::new()
            .with_mutation_error(ServiceError::new(400, "InvalidParameter", "bad namespace")),
    );
    let ops = LogAnalyticsCompositeOperations::new(client.clone());

    let err = ops
        .onboard_namespace_and_wait_for_state(
            NAMESPACE,
            ["SUCCEEDED"],
            &CallOptions::default(),
            WaiterOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CompositeOperationError::Service(ref e) if e.code == "InvalidParameter"));
    assert!(err.partial_result().is_none());
    assert_eq!(client.work_request_polls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_calls_share_one_client() {
    init_logging();
    let client = Arc::new(
        ScriptedClient::new()
            .with_resource_states(["ACTIVE"])
            .with_work_request_statuses(["SUCCEEDED"]),
    );
    let ops = LogAnalyticsCompositeOperations::new(client.clone());
    let options = CallOptions::default();

    let entity_details = entity_details();
    let purge_details = purge_details();
    let (entity, purge) = tokio::join!(
        ops.create_log_analytics_entity_and_wait_for_state(
            NAMESPACE,
            &entity_details,
            ["ACTIVE"],
            &options,
            WaiterOptions::default(),
        ),
        ops.purge_storage_data_and_wait_for_state(
            NAMESPACE,
            &purge_details,
            WaitTargets::none(),
            &options,
            WaiterOptions::default(),
        ),
    );

    assert_eq!(entity.unwrap().data.lifecycle_state.as_deref(), Some("ACTIVE"));
    assert!(purge.unwrap().is_settled());
    assert_eq!(client.mutation_calls(), 2);
}

#[tokio::test]
async fn test_work_request_utility_rejects_blank_id() {
    init_logging();
    let client = ScriptedClient::new().with_work_request_statuses(["SUCCEEDED"]);

    let err = wait_on_work_request(&client, NAMESPACE, "  ", &WaiterPolicy::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WaitError::MissingIdentifier(_)));
    assert_eq!(client.work_request_polls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_work_request_utility_stops_on_canceled() {
    init_logging();
    let client = ScriptedClient::new().with_work_request_statuses(["ACCEPTED", "CANCELED"]);

    let work_request = wait_on_work_request(
        &client,
        NAMESPACE,
        WORK_REQUEST_ID,
        &WaiterPolicy::default(),
    )
    .await
    .unwrap();

    assert_eq!(work_request.data.status.as_deref(), Some("CANCELED"));
    assert_eq!(client.work_request_polls(), 2);
}
