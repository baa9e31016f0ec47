use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload a backend attaches to a failed response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// The response half of a failed request: the status the server answered
/// with and whatever body it attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub data: ErrorBody,
}

/// Failure raised by a requester.
///
/// Mirrors the envelope a typical HTTP client produces: an optional server
/// response plus a transport-level message. Either half may be absent.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{}", .message.as_deref().unwrap_or("request failed"))]
pub struct RequestFailure {
    pub response: Option<ErrorResponse>,
    pub message: Option<String>,
}

impl RequestFailure {
    /// Transport-level failure with no server response, e.g. a refused
    /// connection or a body that did not parse.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            response: None,
            message: Some(message.into()),
        }
    }

    /// The server answered with an error status and a (possibly empty)
    /// parsed body.
    pub fn api(status: u16, data: ErrorBody) -> Self {
        Self {
            response: Some(ErrorResponse { status, data }),
            message: Some(format!("request failed with status {status}")),
        }
    }

    /// A failure carrying no usable fields at all.
    pub fn bare() -> Self {
        Self::default()
    }
}
