//! Entity create/update with a wait on the entity's lifecycle state

use crate::error::CompositeResult;
use crate::models::{
    CreateLogAnalyticsEntityDetails, LogAnalyticsEntity, UpdateLogAnalyticsEntityDetails,
};
use crate::types::{CallOptions, Response, WaitTargets};
use crate::waiter::WaiterOptions;

impl super::service::LogAnalyticsCompositeOperations {
    /// Create an entity and wait for it to reach one of `wait_for_states`.
    pub async fn create_log_analytics_entity_and_wait_for_state(
        &self,
        namespace_name: &str,
        details: &CreateLogAnalyticsEntityDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<Response<LogAnalyticsEntity>, LogAnalyticsEntity> {
        let client = self.client.as_ref();
        Self::mutate_and_wait_for_resource(
            client.create_log_analytics_entity(namespace_name, details, options),
            wait_for_states.into(),
            waiter_options.into(),
            move |entity_id| async move {
                client
                    .get_log_analytics_entity(namespace_name, &entity_id)
                    .await
            },
        )
        .await
    }

    /// Update an entity and wait for it to reach one of `wait_for_states`.
    pub async fn update_log_analytics_entity_and_wait_for_state(
        &self,
        namespace_name: &str,
        log_analytics_entity_id: &str,
        details: &UpdateLogAnalyticsEntityDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<Response<LogAnalyticsEntity>, LogAnalyticsEntity> {
        let client = self.client.as_ref();
        Self::mutate_and_wait_for_resource(
            client.update_log_analytics_entity(
                namespace_name,
                log_analytics_entity_id,
                details,
                options,
            ),
            wait_for_states.into(),
            waiter_options.into(),
            move |entity_id| async move {
                client
                    .get_log_analytics_entity(namespace_name, &entity_id)
                    .await
            },
        )
        .await
    }
}
