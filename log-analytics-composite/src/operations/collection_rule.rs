//! Object collection rule create/update with a wait on the rule's lifecycle state

use crate::error::CompositeResult;
use crate::models::{
    CreateLogAnalyticsObjectCollectionRuleDetails, LogAnalyticsObjectCollectionRule,
    UpdateLogAnalyticsObjectCollectionRuleDetails,
};
use crate::types::{CallOptions, Response, WaitTargets};
use crate::waiter::WaiterOptions;

impl super::service::LogAnalyticsCompositeOperations {
    /// Create an object collection rule and poll it until it reaches a requested state.
    pub async fn create_log_analytics_object_collection_rule_and_wait_for_state(
        &self,
        namespace_name: &str,
        details: &CreateLogAnalyticsObjectCollectionRuleDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<Response<LogAnalyticsObjectCollectionRule>, LogAnalyticsObjectCollectionRule>
    {
        let client = self.client.as_ref();
        Self::mutate_and_wait_for_resource(
            client.create_log_analytics_object_collection_rule(namespace_name, details, options),
            wait_for_states.into(),
            waiter_options.into(),
            move |rule_id| async move {
                client
                    .get_log_analytics_object_collection_rule(namespace_name, &rule_id)
                    .await
            },
        )
        .await
    }

    /// Update an object collection rule and poll it until it reaches a requested state.
    pub async fn update_log_analytics_object_collection_rule_and_wait_for_state(
        &self,
        namespace_name: &str,
        log_analytics_object_collection_rule_id: &str,
        details: &UpdateLogAnalyticsObjectCollectionRuleDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<Response<LogAnalyticsObjectCollectionRule>, LogAnalyticsObjectCollectionRule>
    {
        let client = self.client.as_ref();
        Self::mutate_and_wait_for_resource(
            client.update_log_analytics_object_collection_rule(
                namespace_name,
                log_analytics_object_collection_rule_id,
                details,
                options,
            ),
            wait_for_states.into(),
            waiter_options.into(),
            move |rule_id| async move {
                client
                    .get_log_analytics_object_collection_rule(namespace_name, &rule_id)
                    .await
            },
        )
        .await
    }
}
