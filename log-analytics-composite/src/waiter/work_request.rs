//! Waiting on work requests.
//!
//! Operations that run asynchronously on the service side hand back a work
//! request id instead of a resource. How that work request is waited on is a
//! strategy chosen once, when the composite operations are constructed:
//!
//! - [`CompletionUtility`] waits for the work request to finish, whatever the
//!   outcome, and ignores the caller's target states. It runs even when no
//!   states were requested.
//! - [`StatusPolling`] polls the work request status against the caller's
//!   target states, and does nothing when none were requested.

use async_trait::async_trait;
use log::debug;

use super::{reached_target, wait_until, WaiterPolicy};
use crate::client::LogAnalyticsClient;
use crate::error::WaitError;
use crate::models::{StatefulResource, WorkRequest, WorkRequestStatus};
use crate::types::{Response, WaitTargets};

/// Strategy for waiting on the work request behind an asynchronous operation.
#[async_trait]
pub trait WorkRequestWaiter: Send + Sync {
    /// Whether this strategy waits even when the caller requested no states.
    fn requires_wait(&self) -> bool;

    async fn wait(
        &self,
        client: &dyn LogAnalyticsClient,
        namespace_name: &str,
        work_request_id: &str,
        targets: &WaitTargets,
        policy: &WaiterPolicy,
    ) -> Result<Response<WorkRequest>, WaitError>;
}

/// Wait until a work request reaches a terminal status.
///
/// SUCCEEDED, FAILED and CANCELED are all terminal: a failed work request is
/// returned, not turned into an error, and the caller inspects its `status`.
/// A work request fetched without any status ends the wait with
/// [`WaitError::MissingState`].
pub async fn wait_on_work_request(
    client: &dyn LogAnalyticsClient,
    namespace_name: &str,
    work_request_id: &str,
    policy: &WaiterPolicy,
) -> Result<Response<WorkRequest>, WaitError> {
    require_work_request_id(work_request_id)?;

    let description = format!("{} {}", WorkRequest::KIND, work_request_id);
    let response = wait_until(
        &description,
        policy,
        move || client.get_work_request(namespace_name, work_request_id),
        |work_request: &WorkRequest| {
            let status = work_request
                .reported_state()
                .ok_or(WaitError::MissingState(WorkRequest::KIND))?;
            Ok(WorkRequestStatus::parse(status).is_some_and(WorkRequestStatus::is_terminal))
        },
    )
    .await?;

    debug!(
        "{} finished with status {}",
        description,
        response.data.status.as_deref().unwrap_or("<none>")
    );
    Ok(response)
}

/// Delegates to [`wait_on_work_request`]. The default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionUtility;

#[async_trait]
impl WorkRequestWaiter for CompletionUtility {
    fn requires_wait(&self) -> bool {
        true
    }

    async fn wait(
        &self,
        client: &dyn LogAnalyticsClient,
        namespace_name: &str,
        work_request_id: &str,
        _targets: &WaitTargets,
        policy: &WaiterPolicy,
    ) -> Result<Response<WorkRequest>, WaitError> {
        wait_on_work_request(client, namespace_name, work_request_id, policy).await
    }
}

/// Polls the work request status until it matches one of the caller's targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusPolling;

#[async_trait]
impl WorkRequestWaiter for StatusPolling {
    fn requires_wait(&self) -> bool {
        false
    }

    async fn wait(
        &self,
        client: &dyn LogAnalyticsClient,
        namespace_name: &str,
        work_request_id: &str,
        targets: &WaitTargets,
        policy: &WaiterPolicy,
    ) -> Result<Response<WorkRequest>, WaitError> {
        require_work_request_id(work_request_id)?;

        let description = format!("{} {}", WorkRequest::KIND, work_request_id);
        wait_until(
            &description,
            policy,
            move || client.get_work_request(namespace_name, work_request_id),
            |work_request: &WorkRequest| reached_target(work_request, targets),
        )
        .await
    }
}

fn require_work_request_id(work_request_id: &str) -> Result<(), WaitError> {
    if work_request_id.trim().is_empty() {
        return Err(WaitError::MissingIdentifier("work request id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedClient, NAMESPACE, WORK_REQUEST_ID};

    #[tokio::test(start_paused = true)]
    async fn test_status_polling_rejects_blank_id() {
        let client = ScriptedClient::new().with_work_request_statuses(["SUCCEEDED"]);

        let err = StatusPolling
            .wait(
                &client,
                NAMESPACE,
                "  ",
                &WaitTargets::from(["SUCCEEDED"]),
                &WaiterPolicy::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, WaitError::MissingIdentifier(_)));
        assert_eq!(client.work_request_polls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_polling_fails_on_missing_status() {
        let client = ScriptedClient::new().with_statusless_work_request();

        let err = StatusPolling
            .wait(
                &client,
                NAMESPACE,
                WORK_REQUEST_ID,
                &WaitTargets::from(["SUCCEEDED"]),
                &WaiterPolicy::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, WaitError::MissingState("work request")));
        assert_eq!(client.work_request_polls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_fails_on_missing_status() {
        let client = ScriptedClient::new().with_statusless_work_request();

        let err = CompletionUtility
            .wait(
                &client,
                NAMESPACE,
                WORK_REQUEST_ID,
                &WaitTargets::none(),
                &WaiterPolicy::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, WaitError::MissingState("work request")));
        assert_eq!(client.work_request_polls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_keeps_polling_unknown_status() {
        let client = ScriptedClient::new().with_work_request_statuses(["QUEUED", "SUCCEEDED"]);

        let work_request = CompletionUtility
            .wait(
                &client,
                NAMESPACE,
                WORK_REQUEST_ID,
                &WaitTargets::none(),
                &WaiterPolicy::default(),
            )
            .await
            .unwrap();

        assert_eq!(work_request.data.status.as_deref(), Some("SUCCEEDED"));
        assert_eq!(client.work_request_polls(), 2);
    }
}
