//! Composite operations facade
//!
//! Holds the shared service client and the work request strategy, and provides
//! the two generic "mutate, then wait" routines every operation is built from.

use std::future::Future;
use std::sync::Arc;

use log::{debug, warn};

use crate::client::LogAnalyticsClient;
use crate::error::{CompositeOperationError, CompositeResult, ServiceResult, WaitError};
use crate::models::StatefulResource;
use crate::types::{Response, WaitOutcome, WaitTargets, OPC_WORK_REQUEST_ID};
use crate::waiter::{
    reached_target, wait_until, CompletionUtility, WaiterPolicy, WorkRequestWaiter,
};

/// Issues mutating Log Analytics calls and waits for them to settle.
///
/// Each `*_and_wait_for_state` method calls the underlying operation exactly
/// once, then waits according to the target states and waiter options given.
/// Cloning is cheap; clones share the client and the strategy.
#[derive(Clone)]
pub struct LogAnalyticsCompositeOperations {
    pub(crate) client: Arc<dyn LogAnalyticsClient>,
    pub(crate) work_request_waiter: Arc<dyn WorkRequestWaiter>,
}

impl LogAnalyticsCompositeOperations {
    /// Create composite operations over `client`.
    ///
    /// Work requests are waited on with [`CompletionUtility`]; use
    /// [`with_work_request_waiter`](Self::with_work_request_waiter) to swap in
    /// [`StatusPolling`](crate::StatusPolling) or another strategy.
    pub fn new(client: Arc<dyn LogAnalyticsClient>) -> Self {
        Self {
            client,
            work_request_waiter: Arc::new(CompletionUtility),
        }
    }

    pub fn with_work_request_waiter(mut self, waiter: Arc<dyn WorkRequestWaiter>) -> Self {
        self.work_request_waiter = waiter;
        self
    }

    /// The client this facade drives, for calls that need no waiting.
    pub fn service_client(&self) -> &Arc<dyn LogAnalyticsClient> {
        &self.client
    }

    /// Mutate a resource that reports its own lifecycle state, then poll it.
    ///
    /// With no targets the mutation result is returned untouched. Otherwise the
    /// resource id is taken from the mutation body and `fetch` is polled until
    /// the reported state matches a target. A snapshot with no state ends the
    /// wait at once.
    pub(crate) async fn mutate_and_wait_for_resource<T, M, F, Fut>(
        mutation: M,
        targets: WaitTargets,
        policy: WaiterPolicy,
        fetch: F,
    ) -> CompositeResult<Response<T>, T>
    where
        T: StatefulResource,
        M: Future<Output = ServiceResult<Response<T>>>,
        F: Fn(String) -> Fut,
        Fut: Future<Output = ServiceResult<Response<T>>>,
    {
        let operation_result = mutation.await?;

        if targets.is_empty() {
            return Ok(operation_result);
        }

        let Some(resource_id) = operation_result
            .data
            .identifier()
            .filter(|id| !id.trim().is_empty())
            .map(str::to_owned)
        else {
            warn!("{} returned without an id, cannot wait on it", T::KIND);
            return Err(CompositeOperationError::wait_failed(
                operation_result,
                WaitError::MissingIdentifier(T::KIND),
            ));
        };

        let description = format!("{} {}", T::KIND, resource_id);
        debug!(
            "Waiting up to {:?} for {} to reach one of {:?}",
            policy.max_wait,
            description,
            targets.iter().collect::<Vec<_>>()
        );

        let waited = wait_until(
            &description,
            &policy,
            || fetch(resource_id.clone()),
            |snapshot: &T| reached_target(snapshot, &targets),
        )
        .await;

        match waited {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                warn!("Wait on {} failed: {}", description, e);
                Err(CompositeOperationError::wait_failed(operation_result, e))
            }
        }
    }

    /// Mutate through an asynchronous operation, then wait on its work request.
    ///
    /// The work request id is read from the `opc-work-request-id` header of the
    /// mutation response and handed to the configured [`WorkRequestWaiter`].
    pub(crate) async fn mutate_and_wait_for_work_request<T, M>(
        &self,
        namespace_name: &str,
        mutation: M,
        targets: WaitTargets,
        policy: WaiterPolicy,
    ) -> CompositeResult<WaitOutcome<T>, T>
    where
        M: Future<Output = ServiceResult<Response<T>>>,
    {
        let operation_result = mutation.await?;

        if targets.is_empty() && !self.work_request_waiter.requires_wait() {
            return Ok(WaitOutcome::Issued(operation_result));
        }

        let Some(work_request_id) = operation_result.work_request_id().map(str::to_owned) else {
            warn!("Mutation response carries no {} header", OPC_WORK_REQUEST_ID);
            return Err(CompositeOperationError::wait_failed(
                operation_result,
                WaitError::MissingHeader(OPC_WORK_REQUEST_ID),
            ));
        };

        debug!(
            "Waiting up to {:?} on work request {} in namespace {}",
            policy.max_wait, work_request_id, namespace_name
        );

        let waited = self
            .work_request_waiter
            .wait(
                self.client.as_ref(),
                namespace_name,
                &work_request_id,
                &targets,
                &policy,
            )
            .await;

        match waited {
            Ok(work_request) => Ok(WaitOutcome::Settled(work_request)),
            Err(e) => {
                warn!("Wait on work request {} failed: {}", work_request_id, e);
                Err(CompositeOperationError::wait_failed(operation_result, e))
            }
        }
    }
}
