use crate::error::CompositeResult;
use crate::models::{CreateScheduledTaskDetails, ScheduledTask, UpdateScheduledTaskDetails};
use crate::types::{CallOptions, Response, WaitTargets};
use crate::waiter::WaiterOptions;

impl super::service::LogAnalyticsCompositeOperations {
    /// Create a scheduled task and poll it until it reaches a requested state.
    pub async fn create_scheduled_task_and_wait_for_state(
        &self,
        namespace_name: &str,
        details: &CreateScheduledTaskDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<Response<ScheduledTask>, ScheduledTask> {
        let client = self.client.as_ref();
        Self::mutate_and_wait_for_resource(
            client.create_scheduled_task(namespace_name, details, options),
            wait_for_states.into(),
            waiter_options.into(),
            move |task_id| async move { client.get_scheduled_task(namespace_name, &task_id).await },
        )
        .await
    }

    /// Update a scheduled task and poll it until it reaches a requested state.
    pub async fn update_scheduled_task_and_wait_for_state(
        &self,
        namespace_name: &str,
        scheduled_task_id: &str,
        details: &UpdateScheduledTaskDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<Response<ScheduledTask>, ScheduledTask> {
        let client = self.client.as_ref();
        Self::mutate_and_wait_for_resource(
            client.update_scheduled_task(namespace_name, scheduled_task_id, details, options),
            wait_for_states.into(),
            waiter_options.into(),
            move |task_id| async move { client.get_scheduled_task(namespace_name, &task_id).await },
        )
        .await
    }
}
