//! Namespace onboarding and offboarding, tracked through work requests

use crate::error::CompositeResult;
use crate::types::{CallOptions, WaitOutcome, WaitTargets};
use crate::waiter::WaiterOptions;

impl super::service::LogAnalyticsCompositeOperations {
    /// Onboard a tenancy namespace to Log Analytics and wait on the resulting work request.
    pub async fn onboard_namespace_and_wait_for_state(
        &self,
        namespace_name: &str,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<WaitOutcome<()>, ()> {
        self.mutate_and_wait_for_work_request(
            namespace_name,
            self.client.onboard_namespace(namespace_name, options),
            wait_for_states.into(),
            waiter_options.into(),
        )
        .await
    }

    /// Offboard a namespace and wait on the resulting work request.
    pub async fn offboard_namespace_and_wait_for_state(
        &self,
        namespace_name: &str,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<WaitOutcome<()>, ()> {
        self.mutate_and_wait_for_work_request(
            namespace_name,
            self.client.offboard_namespace(namespace_name, options),
            wait_for_states.into(),
            waiter_options.into(),
        )
        .await
    }
}
