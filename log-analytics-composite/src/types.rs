//! Shared types: the response envelope, call options, wait targets and outcomes.

use std::collections::BTreeMap;

use http::header::{HeaderName, HeaderValue, InvalidHeaderValue};
use http::HeaderMap;

use crate::models::WorkRequest;

/// Response header carrying the id of the work request tracking an asynchronous operation.
pub const OPC_WORK_REQUEST_ID: &str = "opc-work-request-id";

/// Response header carrying the service-assigned request id.
pub const OPC_REQUEST_ID: &str = "opc-request-id";

/// Envelope returned by every service client call.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub status: u16,
    pub headers: HeaderMap,
    pub data: T,
}

impl<T> Response<T> {
    /// A `200 OK` response with no headers.
    pub fn new(data: T) -> Self {
        Self {
            status: 200,
            headers: HeaderMap::new(),
            data,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_work_request_id(self, work_request_id: &str) -> Result<Self, InvalidHeaderValue> {
        let value = HeaderValue::from_str(work_request_id)?;
        Ok(self.with_header(HeaderName::from_static(OPC_WORK_REQUEST_ID), value))
    }

    /// Header value as a string. Values that are not visible ASCII are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn work_request_id(&self) -> Option<&str> {
        self.header(OPC_WORK_REQUEST_ID)
    }

    pub fn opc_request_id(&self) -> Option<&str> {
        self.header(OPC_REQUEST_ID)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            status: self.status,
            headers: self.headers,
            data: f(self.data),
        }
    }
}

/// Per-call options handed through to the service client unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub opc_request_id: Option<String>,
    /// Token making a create or long-running call safe to retry
    pub opc_retry_token: Option<String>,
    /// ETag for optimistic concurrency on updates
    pub if_match: Option<String>,
    pub extra_headers: BTreeMap<String, String>,
}

impl CallOptions {
    pub fn with_opc_request_id(mut self, id: impl Into<String>) -> Self {
        self.opc_request_id = Some(id.into());
        self
    }

    pub fn with_retry_token(mut self, token: impl Into<String>) -> Self {
        self.opc_retry_token = Some(token.into());
        self
    }

    pub fn with_if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match = Some(etag.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }
}

/// The set of states a caller wants to observe, compared case-insensitively.
///
/// An empty set means "do not wait".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitTargets {
    states: Vec<String>,
}

impl WaitTargets {
    pub fn new<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for state in states {
            let state = state.as_ref().to_lowercase();
            if !normalized.contains(&state) {
                normalized.push(state);
            }
        }
        Self { states: normalized }
    }

    /// No wait requested.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn matches(&self, state: &str) -> bool {
        let state = state.to_lowercase();
        self.states.iter().any(|target| *target == state)
    }

    /// Normalized (lowercase) states in the order they were first given.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for WaitTargets {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for WaitTargets {
    fn from(states: [S; N]) -> Self {
        Self::new(states)
    }
}

impl<S: AsRef<str>> From<&[S]> for WaitTargets {
    fn from(states: &[S]) -> Self {
        Self::new(states)
    }
}

impl<S: AsRef<str>> From<Vec<S>> for WaitTargets {
    fn from(states: Vec<S>) -> Self {
        Self::new(states)
    }
}

/// Result of an operation tracked through a work request.
#[derive(Debug, Clone, PartialEq)]
pub enum WaitOutcome<T> {
    /// No wait was performed; this is the mutation result as returned.
    Issued(Response<T>),
    /// The final work request snapshot observed by the wait.
    Settled(Response<WorkRequest>),
}

impl<T> WaitOutcome<T> {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }

    pub fn work_request(&self) -> Option<&WorkRequest> {
        match self {
            Self::Issued(_) => None,
            Self::Settled(response) => Some(&response.data),
        }
    }

    pub fn into_issued(self) -> Option<Response<T>> {
        match self {
            Self::Issued(response) => Some(response),
            Self::Settled(_) => None,
        }
    }

    pub fn into_settled(self) -> Option<Response<WorkRequest>> {
        match self {
            Self::Issued(_) => None,
            Self::Settled(response) => Some(response),
        }
    }
}
