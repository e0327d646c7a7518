//! Waiter policy and the generic poll loop.
//!
//! [`wait_until`] fetches a snapshot, evaluates a predicate and sleeps with
//! exponential backoff until the predicate holds, the predicate rejects the
//! snapshot, or the overall ceiling elapses. Every composite operation funnels
//! through it.

mod work_request;

use std::future::Future;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Instant};

use crate::error::{ServiceResult, WaitError};
use crate::models::StatefulResource;
use crate::types::{Response, WaitTargets};

pub use work_request::{wait_on_work_request, CompletionUtility, StatusPolling, WorkRequestWaiter};

/// Default ceiling on the spacing between two polls (30 seconds)
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(30);

/// Default ceiling on the total time spent waiting (20 minutes)
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(1200);

/// Spacing before the second poll; doubles from there up to the interval ceiling
const INITIAL_INTERVAL: Duration = Duration::from_secs(1);

/// Caller overrides for the waiter policy. Unset fields fall back to the defaults.
///
/// Deserializable so callers can keep waiter settings in their own configuration:
///
/// ```
/// use log_analytics_composite::WaiterOptions;
///
/// let options = WaiterOptions::from_json(r#"{"max_wait_seconds": 300}"#).unwrap();
/// assert_eq!(options.max_wait_seconds, Some(300));
/// assert_eq!(options.max_interval_seconds, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaiterOptions {
    pub max_interval_seconds: Option<u64>,
    pub max_wait_seconds: Option<u64>,
}

impl WaiterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_interval_seconds(mut self, seconds: u64) -> Self {
        self.max_interval_seconds = Some(seconds);
        self
    }

    pub fn max_wait_seconds(mut self, seconds: u64) -> Self {
        self.max_wait_seconds = Some(seconds);
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Resolved waiter settings for one wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaiterPolicy {
    /// Maximum spacing between two polls
    pub max_interval: Duration,
    /// Maximum total time spent waiting
    pub max_wait: Duration,
}

impl Default for WaiterPolicy {
    fn default() -> Self {
        Self {
            max_interval: DEFAULT_MAX_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl From<WaiterOptions> for WaiterPolicy {
    fn from(options: WaiterOptions) -> Self {
        Self {
            max_interval: options
                .max_interval_seconds
                .map_or(DEFAULT_MAX_INTERVAL, Duration::from_secs),
            max_wait: options
                .max_wait_seconds
                .map_or(DEFAULT_MAX_WAIT, Duration::from_secs),
        }
    }
}

impl WaiterPolicy {
    /// A zero interval ceiling is treated as one second so the loop always yields.
    fn interval_ceiling(&self) -> Duration {
        self.max_interval.max(INITIAL_INTERVAL)
    }

    fn initial_interval(&self) -> Duration {
        INITIAL_INTERVAL.min(self.interval_ceiling())
    }
}

/// Poll `fetch` until `is_done` accepts the snapshot or `policy.max_wait` elapses.
///
/// The first fetch happens immediately. Between fetches the loop sleeps for an
/// interval starting at one second and doubling up to `policy.max_interval`,
/// never sleeping past the overall deadline. A fetch error ends the wait, and
/// so does an error returned by `is_done`.
///
/// # Returns
/// * `Ok(response)` - the first snapshot `is_done` accepted
/// * `Err(WaitError::Timeout)` - the deadline passed without a match
/// * `Err(WaitError::Fetch)` - a fetch failed
/// * any error `is_done` returned for a snapshot it could not judge
pub async fn wait_until<T, F, Fut, P>(
    description: &str,
    policy: &WaiterPolicy,
    mut fetch: F,
    mut is_done: P,
) -> Result<Response<T>, WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ServiceResult<Response<T>>>,
    P: FnMut(&T) -> Result<bool, WaitError>,
{
    let start = Instant::now();
    let mut interval = policy.initial_interval();
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        let response = fetch().await.map_err(|source| WaitError::Fetch {
            description: description.to_string(),
            source,
        })?;

        if is_done(&response.data)? {
            debug!(
                "{} reached a requested state after {} poll(s) in {:?}",
                description,
                attempt,
                start.elapsed()
            );
            return Ok(response);
        }

        let elapsed = start.elapsed();
        if elapsed >= policy.max_wait {
            return Err(WaitError::Timeout {
                description: description.to_string(),
                elapsed,
            });
        }

        let delay = interval.min(policy.max_wait - elapsed);
        debug!(
            "{} not ready after poll {}, next poll in {:?}",
            description, attempt, delay
        );
        sleep(delay).await;

        interval = (interval * 2).min(policy.interval_ceiling());
    }
}

/// Whether `snapshot` reports one of `targets`.
///
/// A snapshot without a state can never match, so it fails the wait with
/// [`WaitError::MissingState`] instead of polling on to the deadline.
pub(crate) fn reached_target<T: StatefulResource>(
    snapshot: &T,
    targets: &WaitTargets,
) -> Result<bool, WaitError> {
    snapshot
        .reported_state()
        .map(|state| targets.matches(state))
        .ok_or(WaitError::MissingState(T::KIND))
}
