//! Error types for composite operations.

use std::time::Duration;

use thiserror::Error;

use crate::types::Response;

/// An error reported by the service client.
///
/// Transport failures, non-2xx responses and deserialization problems all
/// arrive here; the client is responsible for any retries before returning one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Service error {status} ({code}): {message}")]
pub struct ServiceError {
    /// HTTP status code of the failed call
    pub status: u16,
    /// Service error code, e.g. `NotAuthorizedOrNotFound`
    pub code: String,
    pub message: String,
    /// Value of the `opc-request-id` response header, when the service sent one
    pub opc_request_id: Option<String>,
}

impl ServiceError {
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            opc_request_id: None,
        }
    }

    pub fn with_request_id(mut self, opc_request_id: impl Into<String>) -> Self {
        self.opc_request_id = Some(opc_request_id.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Reasons a wait on a resource or work request did not succeed.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The overall wait ceiling elapsed before a requested state was observed.
    #[error("Timed out after {elapsed:?} waiting for {description}")]
    Timeout {
        description: String,
        elapsed: Duration,
    },

    /// Fetching the current snapshot failed.
    #[error("Failed to fetch {description}: {source}")]
    Fetch {
        description: String,
        #[source]
        source: ServiceError,
    },

    /// The mutation result carried no identifier to poll on.
    #[error("No {0} available to wait on")]
    MissingIdentifier(&'static str),

    /// A fetched snapshot carried no lifecycle state (or work request status).
    #[error("Fetched {0} reports no state")]
    MissingState(&'static str),

    /// The mutation response lacked the header naming its work request.
    #[error("Response is missing the '{0}' header")]
    MissingHeader(&'static str),
}

/// Failure of a composite "mutate, then wait" operation.
///
/// `Service` means the mutation itself failed and nothing changed on the
/// service side. `WaitFailed` means the mutation was accepted but the
/// requested state was not observed; the original mutation result is kept so
/// the caller still has whatever the service returned.
#[derive(Debug, Error)]
pub enum CompositeOperationError<T> {
    #[error("Mutating call failed: {0}")]
    Service(#[from] ServiceError),

    #[error("Mutating call succeeded but waiting for the requested state failed: {source}")]
    WaitFailed {
        partial_result: Box<Response<T>>,
        #[source]
        source: WaitError,
    },
}

impl<T> CompositeOperationError<T> {
    pub(crate) fn wait_failed(partial_result: Response<T>, source: WaitError) -> Self {
        Self::WaitFailed {
            partial_result: Box::new(partial_result),
            source,
        }
    }

    /// The result of the mutating call, if it succeeded before the wait failed.
    pub fn partial_result(&self) -> Option<&Response<T>> {
        match self {
            Self::Service(_) => None,
            Self::WaitFailed { partial_result, .. } => Some(partial_result),
        }
    }

    pub fn into_partial_result(self) -> Option<Response<T>> {
        match self {
            Self::Service(_) => None,
            Self::WaitFailed { partial_result, .. } => Some(*partial_result),
        }
    }

    pub fn wait_error(&self) -> Option<&WaitError> {
        match self {
            Self::Service(_) => None,
            Self::WaitFailed { source, .. } => Some(source),
        }
    }
}

pub type CompositeResult<R, T> = Result<R, CompositeOperationError<T>>;
