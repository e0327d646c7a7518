use crate::error::CompositeResult;
use crate::models::UpsertLogAnalyticsAssociationDetails;
use crate::types::{CallOptions, WaitOutcome, WaitTargets};
use crate::waiter::WaiterOptions;

impl super::service::LogAnalyticsCompositeOperations {
    /// Create or update source-entity associations and wait on the work request.
    pub async fn upsert_associations_and_wait_for_state(
        &self,
        namespace_name: &str,
        details: &UpsertLogAnalyticsAssociationDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<WaitOutcome<()>, ()> {
        self.mutate_and_wait_for_work_request(
            namespace_name,
            self.client.upsert_associations(namespace_name, details, options),
            wait_for_states.into(),
            waiter_options.into(),
        )
        .await
    }
}
