//! Test utilities: a scripted in-memory [`LogAnalyticsClient`].
//!
//! Mutations answer with a fixed resource (or a `202` carrying a work request
//! header). Polls replay a script of states; the last entry repeats forever.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use http::header::{HeaderName, HeaderValue};

use crate::client::LogAnalyticsClient;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    CreateLogAnalyticsEntityDetails, CreateLogAnalyticsObjectCollectionRuleDetails,
    CreateScheduledTaskDetails, LogAnalyticsEntity, LogAnalyticsObjectCollectionRule,
    PurgeStorageDataDetails, QueryAggregation, QueryDetails, RecallArchivedDataDetails,
    ReleaseRecalledDataDetails, ScheduledTask, UpdateLogAnalyticsEntityDetails,
    UpdateLogAnalyticsObjectCollectionRuleDetails, UpdateScheduledTaskDetails,
    UpsertLogAnalyticsAssociationDetails, WorkRequest,
};
use crate::types::{CallOptions, Response, OPC_WORK_REQUEST_ID};

pub const NAMESPACE: &str = "tenancy-namespace";
pub const ENTITY_ID: &str = "ocid1.loganalyticsentity.oc1..entity";
pub const RULE_ID: &str = "ocid1.loganalyticsobjectcollectionrule.oc1..rule";
pub const TASK_ID: &str = "ocid1.loganalyticsscheduledtask.oc1..task";
pub const WORK_REQUEST_ID: &str = "ocid1.loganalyticsworkrequest.oc1..workrequest";

/// A mutating call the client received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub namespace_name: String,
    /// Target resource id for update calls
    pub resource_id: Option<String>,
    pub options: CallOptions,
}

type Script = VecDeque<ServiceResult<Option<String>>>;

/// Scripted client for driving composite operations in tests.
pub struct ScriptedClient {
    initial_state: String,
    resource_id_present: bool,
    work_request_header_present: bool,
    mutation_error: Option<ServiceError>,
    resource_script: Mutex<Script>,
    work_request_script: Mutex<Script>,
    mutation_calls: AtomicUsize,
    resource_polls: AtomicUsize,
    work_request_polls: AtomicUsize,
    last_call: Mutex<Option<RecordedCall>>,
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self {
            initial_state: "CREATING".to_string(),
            resource_id_present: true,
            work_request_header_present: true,
            mutation_error: None,
            resource_script: Mutex::new(VecDeque::new()),
            work_request_script: Mutex::new(VecDeque::new()),
            mutation_calls: AtomicUsize::new(0),
            resource_polls: AtomicUsize::new(0),
            work_request_polls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle state carried by the body of create/update responses.
    pub fn with_initial_state(mut self, state: &str) -> Self {
        self.initial_state = state.to_string();
        self
    }

    /// States returned by successive resource `get` calls.
    pub fn with_resource_states<I, S>(self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lock(&self.resource_script).extend(
            states
                .into_iter()
                .map(|state| Ok(Some(state.as_ref().to_string()))),
        );
        self
    }

    /// Next resource `get` returns a snapshot without a lifecycle state.
    pub fn with_stateless_resource(self) -> Self {
        lock(&self.resource_script).push_back(Ok(None));
        self
    }

    pub fn with_resource_error(self, error: ServiceError) -> Self {
        lock(&self.resource_script).push_back(Err(error));
        self
    }

    /// Statuses returned by successive `get_work_request` calls.
    pub fn with_work_request_statuses<I, S>(self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lock(&self.work_request_script).extend(
            statuses
                .into_iter()
                .map(|status| Ok(Some(status.as_ref().to_string()))),
        );
        self
    }

    /// Next `get_work_request` returns a work request without a status.
    pub fn with_statusless_work_request(self) -> Self {
        lock(&self.work_request_script).push_back(Ok(None));
        self
    }

    pub fn with_work_request_error(self, error: ServiceError) -> Self {
        lock(&self.work_request_script).push_back(Err(error));
        self
    }

    /// Every mutating call fails with `error`.
    pub fn with_mutation_error(mut self, error: ServiceError) -> Self {
        self.mutation_error = Some(error);
        self
    }

    /// Create/update bodies come back without an `id`.
    pub fn without_resource_id(mut self) -> Self {
        self.resource_id_present = false;
        self
    }

    /// Asynchronous operations come back without `opc-work-request-id`.
    pub fn without_work_request_header(mut self) -> Self {
        self.work_request_header_present = false;
        self
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    pub fn resource_polls(&self) -> usize {
        self.resource_polls.load(Ordering::SeqCst)
    }

    pub fn work_request_polls(&self) -> usize {
        self.work_request_polls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        lock(&self.last_call).clone()
    }

    fn record(
        &self,
        operation: &'static str,
        namespace_name: &str,
        resource_id: Option<&str>,
        options: &CallOptions,
    ) -> ServiceResult<()> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.last_call) = Some(RecordedCall {
            operation,
            namespace_name: namespace_name.to_string(),
            resource_id: resource_id.map(str::to_string),
            options: options.clone(),
        });
        match &self.mutation_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn mutation_id(&self, default_id: &str, resource_id: Option<&str>) -> Option<String> {
        self.resource_id_present
            .then(|| resource_id.unwrap_or(default_id).to_string())
    }

    fn accepted<T>(&self, data: T) -> Response<T> {
        let response = Response::new(data).with_status(202);
        if self.work_request_header_present {
            response.with_header(
                HeaderName::from_static(OPC_WORK_REQUEST_ID),
                HeaderValue::from_static(WORK_REQUEST_ID),
            )
        } else {
            response
        }
    }

    fn next_resource_state(&self) -> ServiceResult<Option<String>> {
        self.resource_polls.fetch_add(1, Ordering::SeqCst);
        next_scripted(&self.resource_script)
    }

    fn next_work_request_status(&self) -> ServiceResult<Option<String>> {
        self.work_request_polls.fetch_add(1, Ordering::SeqCst);
        next_scripted(&self.work_request_script)
    }

    fn entity(&self, id: Option<String>, state: Option<String>) -> LogAnalyticsEntity {
        LogAnalyticsEntity {
            id,
            name: Some("web-01".to_string()),
            lifecycle_state: state,
            ..Default::default()
        }
    }

    fn rule(&self, id: Option<String>, state: Option<String>) -> LogAnalyticsObjectCollectionRule {
        LogAnalyticsObjectCollectionRule {
            id,
            lifecycle_state: state,
            ..Default::default()
        }
    }

    fn task(&self, id: Option<String>, state: Option<String>) -> ScheduledTask {
        ScheduledTask {
            id,
            lifecycle_state: state,
            ..Default::default()
        }
    }
}

/// Pops the next scripted entry, repeating the last one once the script runs dry.
fn next_scripted(script: &Mutex<Script>) -> ServiceResult<Option<String>> {
    let mut script = lock(script);
    if script.len() > 1 {
        if let Some(next) = script.pop_front() {
            return next;
        }
    }
    script.front().cloned().unwrap_or_else(|| {
        Err(ServiceError::new(
            404,
            "NotAuthorizedOrNotFound",
            "no scripted snapshot",
        ))
    })
}

#[async_trait]
impl LogAnalyticsClient for ScriptedClient {
    async fn create_log_analytics_entity(
        &self,
        namespace_name: &str,
        _details: &CreateLogAnalyticsEntityDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<LogAnalyticsEntity>> {
        self.record("create_log_analytics_entity", namespace_name, None, options)?;
        Ok(Response::new(self.entity(
            self.mutation_id(ENTITY_ID, None),
            Some(self.initial_state.clone()),
        )))
    }

    async fn update_log_analytics_entity(
        &self,
        namespace_name: &str,
        log_analytics_entity_id: &str,
        _details: &UpdateLogAnalyticsEntityDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<LogAnalyticsEntity>> {
        self.record(
            "update_log_analytics_entity",
            namespace_name,
            Some(log_analytics_entity_id),
            options,
        )?;
        Ok(Response::new(self.entity(
            self.mutation_id(ENTITY_ID, Some(log_analytics_entity_id)),
            Some(self.initial_state.clone()),
        )))
    }

    async fn get_log_analytics_entity(
        &self,
        _namespace_name: &str,
        log_analytics_entity_id: &str,
    ) -> ServiceResult<Response<LogAnalyticsEntity>> {
        let state = self.next_resource_state()?;
        Ok(Response::new(
            self.entity(Some(log_analytics_entity_id.to_string()), state),
        ))
    }

    async fn create_log_analytics_object_collection_rule(
        &self,
        namespace_name: &str,
        _details: &CreateLogAnalyticsObjectCollectionRuleDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<LogAnalyticsObjectCollectionRule>> {
        self.record(
            "create_log_analytics_object_collection_rule",
            namespace_name,
            None,
            options,
        )?;
        Ok(Response::new(self.rule(
            self.mutation_id(RULE_ID, None),
            Some(self.initial_state.clone()),
        )))
    }

    async fn update_log_analytics_object_collection_rule(
        &self,
        namespace_name: &str,
        log_analytics_object_collection_rule_id: &str,
        _details: &UpdateLogAnalyticsObjectCollectionRuleDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<LogAnalyticsObjectCollectionRule>> {
        self.record(
            "update_log_analytics_object_collection_rule",
            namespace_name,
            Some(log_analytics_object_collection_rule_id),
            options,
        )?;
        Ok(Response::new(self.rule(
            self.mutation_id(RULE_ID, Some(log_analytics_object_collection_rule_id)),
            Some(self.initial_state.clone()),
        )))
    }

    async fn get_log_analytics_object_collection_rule(
        &self,
        _namespace_name: &str,
        log_analytics_object_collection_rule_id: &str,
    ) -> ServiceResult<Response<LogAnalyticsObjectCollectionRule>> {
        let state = self.next_resource_state()?;
        Ok(Response::new(self.rule(
            Some(log_analytics_object_collection_rule_id.to_string()),
            state,
        )))
    }

    async fn create_scheduled_task(
        &self,
        namespace_name: &str,
        _details: &CreateScheduledTaskDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<ScheduledTask>> {
        self.record("create_scheduled_task", namespace_name, None, options)?;
        Ok(Response::new(self.task(
            self.mutation_id(TASK_ID, None),
            Some(self.initial_state.clone()),
        )))
    }

    async fn update_scheduled_task(
        &self,
        namespace_name: &str,
        scheduled_task_id: &str,
        _details: &UpdateScheduledTaskDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<ScheduledTask>> {
        self.record(
            "update_scheduled_task",
            namespace_name,
            Some(scheduled_task_id),
            options,
        )?;
        Ok(Response::new(self.task(
            self.mutation_id(TASK_ID, Some(scheduled_task_id)),
            Some(self.initial_state.clone()),
        )))
    }

    async fn get_scheduled_task(
        &self,
        _namespace_name: &str,
        scheduled_task_id: &str,
    ) -> ServiceResult<Response<ScheduledTask>> {
        let state = self.next_resource_state()?;
        Ok(Response::new(
            self.task(Some(scheduled_task_id.to_string()), state),
        ))
    }

    async fn onboard_namespace(
        &self,
        namespace_name: &str,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>> {
        self.record("onboard_namespace", namespace_name, None, options)?;
        Ok(self.accepted(()))
    }

    async fn offboard_namespace(
        &self,
        namespace_name: &str,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>> {
        self.record("offboard_namespace", namespace_name, None, options)?;
        Ok(self.accepted(()))
    }

    async fn purge_storage_data(
        &self,
        namespace_name: &str,
        _details: &PurgeStorageDataDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>> {
        self.record("purge_storage_data", namespace_name, None, options)?;
        Ok(self.accepted(()))
    }

    async fn recall_archived_data(
        &self,
        namespace_name: &str,
        _details: &RecallArchivedDataDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>> {
        self.record("recall_archived_data", namespace_name, None, options)?;
        Ok(self.accepted(()))
    }

    async fn release_recalled_data(
        &self,
        namespace_name: &str,
        _details: &ReleaseRecalledDataDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>> {
        self.record("release_recalled_data", namespace_name, None, options)?;
        Ok(self.accepted(()))
    }

    async fn query(
        &self,
        namespace_name: &str,
        _details: &QueryDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<QueryAggregation>> {
        self.record("query", namespace_name, None, options)?;
        Ok(self.accepted(QueryAggregation {
            total_count: Some(0),
            ..Default::default()
        }))
    }

    async fn upsert_associations(
        &self,
        namespace_name: &str,
        _details: &UpsertLogAnalyticsAssociationDetails,
        options: &CallOptions,
    ) -> ServiceResult<Response<()>> {
        self.record("upsert_associations", namespace_name, None, options)?;
        Ok(self.accepted(()))
    }

    async fn get_work_request(
        &self,
        _namespace_name: &str,
        work_request_id: &str,
    ) -> ServiceResult<Response<WorkRequest>> {
        let status = self.next_work_request_status()?;
        Ok(Response::new(WorkRequest {
            id: Some(work_request_id.to_string()),
            operation_type: Some("SCRIPTED".to_string()),
            status,
            ..Default::default()
        }))
    }
}
