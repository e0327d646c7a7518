//! Composite operations for the Log Analytics service:
//! - Issue a mutating call through a [`LogAnalyticsClient`]
//! - Wait for the resource's lifecycle state, or its work request, to settle
//! - Hand back the final snapshot, or the original result if the wait fails
//!
//! ```no_run
//! use std::sync::Arc;
//! use log_analytics_composite::{
//!     CallOptions, CreateLogAnalyticsEntityDetails, LifecycleState, LogAnalyticsClient,
//!     LogAnalyticsCompositeOperations, WaiterOptions,
//! };
//!
//! # async fn example(client: Arc<dyn LogAnalyticsClient>) -> Result<(), Box<dyn std::error::Error>> {
//! let ops = LogAnalyticsCompositeOperations::new(client);
//! let details = CreateLogAnalyticsEntityDetails {
//!     name: "web-01".to_string(),
//!     entity_type_name: "Host (Linux)".to_string(),
//!     compartment_id: "ocid1.compartment.oc1..example".to_string(),
//!     ..Default::default()
//! };
//!
//! let entity = ops
//!     .create_log_analytics_entity_and_wait_for_state(
//!         "tenancy-namespace",
//!         &details,
//!         [LifecycleState::Active],
//!         &CallOptions::default(),
//!         WaiterOptions::new().max_wait_seconds(300),
//!     )
//!     .await?;
//! println!("entity {:?} is {:?}", entity.data.id, entity.data.lifecycle_state);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;
mod operations;
mod types;
mod waiter;

#[cfg(any(test, feature = "integ-test"))]
pub mod test_utils;

// Re-exports for a small, focused public API
pub use client::LogAnalyticsClient;
pub use error::{
    CompositeOperationError, CompositeResult, ServiceError, ServiceResult, WaitError,
};
pub use models::{
    CreateLogAnalyticsEntityDetails, CreateLogAnalyticsObjectCollectionRuleDetails,
    CreateScheduledTaskDetails, LifecycleState, LogAnalyticsEntity,
    LogAnalyticsObjectCollectionRule, PurgeStorageDataDetails, QueryAggregation, QueryDetails,
    RecallArchivedDataDetails, ReleaseRecalledDataDetails, ScheduledTask, StatefulResource,
    UpdateLogAnalyticsEntityDetails, UpdateLogAnalyticsObjectCollectionRuleDetails,
    UpdateScheduledTaskDetails, UpsertLogAnalyticsAssociation,
    UpsertLogAnalyticsAssociationDetails, WorkRequest, WorkRequestStatus,
};
pub use operations::LogAnalyticsCompositeOperations;
pub use types::{
    CallOptions, Response, WaitOutcome, WaitTargets, OPC_REQUEST_ID, OPC_WORK_REQUEST_ID,
};
pub use waiter::{
    wait_on_work_request, wait_until, CompletionUtility, StatusPolling, WaiterOptions,
    WaiterPolicy, WorkRequestWaiter, DEFAULT_MAX_INTERVAL, DEFAULT_MAX_WAIT,
};
