use crate::error::CompositeResult;
use crate::models::{QueryAggregation, QueryDetails};
use crate::types::{CallOptions, WaitOutcome, WaitTargets};
use crate::waiter::WaiterOptions;

impl super::service::LogAnalyticsCompositeOperations {
    /// Run a query and wait on its work request.
    ///
    /// Only meaningful for queries submitted with `should_run_async`; a
    /// synchronous query answers without a work request header, so waiting on
    /// it fails with the query results kept as the partial result.
    pub async fn query_and_wait_for_state(
        &self,
        namespace_name: &str,
        details: &QueryDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<WaitOutcome<QueryAggregation>, QueryAggregation> {
        self.mutate_and_wait_for_work_request(
            namespace_name,
            self.client.query(namespace_name, details, options),
            wait_for_states.into(),
            waiter_options.into(),
        )
        .await
    }
}
