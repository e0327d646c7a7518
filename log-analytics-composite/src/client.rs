//! The service client seam.
//!
//! Composite operations never talk to the network themselves. They drive a
//! [`LogAnalyticsClient`], normally an adapter over the generated SDK client,
//! which owns transport, signing, retries and (de)serialization.

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::{
    CreateLogAnalyticsEntityDetails, CreateLogAnalyticsObjectCollectionRuleDetails,
    CreateScheduledTaskDetails, LogAnalyticsEntity, LogAnalyticsObjectCollectionRule,
    PurgeStorageDataDetails, QueryAggregation, QueryDetails, RecallArchivedDataDetails,
    ReleaseRecalledDataDetails, ScheduledTask, UpdateLogAnalyticsEntityDetails,
    UpdateLogAnalyticsObjectCollectionRuleDetails, UpdateScheduledTaskDetails,
    UpsertLogAnalyticsAssociationDetails, WorkRequest,
};
use crate::types::{CallOptions, Response};

/// Calls the composite layer needs from the Log Analytics service.
///
/// One handle is shared by every composite call made through a
/// [`LogAnalyticsCompositeOperations`](crate::LogAnalyticsCompositeOperations),
/// possibly concurrently, so implementations must be `Send + Sync`.
#[async_trait]
pub trait LogAnalyticsClient: Send + Sync {
    async fn create_log_analytics_entity(
        &self,
        namespace_name: &str,
        details: &CreateLogAnalyticsEntityDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<LogAnalyticsEntity>>;

    async fn update_log_analytics_entity(
        &self,
        namespace_name: &str,
        log_analytics_entity_id: &str,
        details: &UpdateLogAnalyticsEntityDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<LogAnalyticsEntity>>;

    async fn get_log_analytics_entity(
        &self,
        namespace_name: &str,
        log_analytics_entity_id: &str,
    ) -> ServiceResult<Response<LogAnalyticsEntity>>;

    async fn create_log_analytics_object_collection_rule(
        &self,
        namespace_name: &str,
        details: &CreateLogAnalyticsObjectCollectionRuleDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<LogAnalyticsObjectCollectionRule>>;

    async fn update_log_analytics_object_collection_rule(
        &self,
        namespace_name: &str,
        log_analytics_object_collection_rule_id: &str,
        details: &UpdateLogAnalyticsObjectCollectionRuleDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<LogAnalyticsObjectCollectionRule>>;

    async fn get_log_analytics_object_collection_rule(
        &self,
        namespace_name: &str,
        log_analytics_object_collection_rule_id: &str,
    ) -> ServiceResult<Response<LogAnalyticsObjectCollectionRule>>;

    async fn create_scheduled_task(
        &self,
        namespace_name: &str,
        details: &CreateScheduledTaskDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<ScheduledTask>>;

    async fn update_scheduled_task(
        &self,
        namespace_name: &str,
        scheduled_task_id: &str,
        details: &UpdateScheduledTaskDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<ScheduledTask>>;

    async fn get_scheduled_task(
        &self,
        namespace_name: &str,
        scheduled_task_id: &str,
    ) -> ServiceResult<Response<ScheduledTask>>;

    async fn onboard_namespace(
        &self,
        namespace_name: &str,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>>;

    async fn offboard_namespace(
        &self,
        namespace_name: &str,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>>;

    async fn purge_storage_data(
        &self,
        namespace_name: &str,
        details: &PurgeStorageDataDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>>;

    async fn recall_archived_data(
        &self,
        namespace_name: &str,
        details: &RecallArchivedDataDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>>;

    async fn release_recalled_data(
        &self,
        namespace_name: &str,
        details: &ReleaseRecalledDataDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>>;

    async fn query(
        &self,
        namespace_name: &str,
        details: &QueryDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<QueryAggregation>>;

    async fn upsert_associations(
        &self,
        namespace_name: &str,
        details: &UpsertLogAnalyticsAssociationDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>>;

    async fn get_work_request(
        &self,
        namespace_name: &str,
        work_request_id: &str,
    ) -> ServiceResult<Response<WorkRequest>>;
}
