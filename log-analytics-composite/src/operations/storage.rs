//! Storage lifecycle operations: purge, recall and release of log data

use crate::error::CompositeResult;
use crate::models::{PurgeStorageDataDetails, RecallArchivedDataDetails, ReleaseRecalledDataDetails};
use crate::types::{CallOptions, WaitOutcome, WaitTargets};
use crate::waiter::WaiterOptions;

impl super::service::LogAnalyticsCompositeOperations {
    /// Purge stored log data older than the given time and wait on the work request.
    pub async fn purge_storage_data_and_wait_for_state(
        &self,
        namespace_name: &str,
        details: &PurgeStorageDataDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<WaitOutcome<()>, ()> {
        self.mutate_and_wait_for_work_request(
            namespace_name,
            self.client.purge_storage_data(namespace_name, details, options),
            wait_for_states.into(),
            waiter_options.into(),
        )
        .await
    }

    /// Recall archived data for a time range and wait on the work request.
    pub async fn recall_archived_data_and_wait_for_state(
        &self,
        namespace_name: &str,
        details: &RecallArchivedDataDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<WaitOutcome<()>, ()> {
        self.mutate_and_wait_for_work_request(
            namespace_name,
            self.client.recall_archived_data(namespace_name, details, options),
            wait_for_states.into(),
            waiter_options.into(),
        )
        .await
    }

    /// Release previously recalled data and wait on the work request.
    pub async fn release_recalled_data_and_wait_for_state(
        &self,
        namespace_name: &str,
        details: &ReleaseRecalledDataDetails,
        wait_for_states: impl Into<WaitTargets>,
        options: &CallOptions,
        waiter_options: WaiterOptions,
    ) -> CompositeResult<WaitOutcome<()>, ()> {
        self.mutate_and_wait_for_work_request(
            namespace_name,
            self.client.release_recalled_data(namespace_name, details, options),
            wait_for_states.into(),
            waiter_options.into(),
        )
        .await
    }
}
