//! Error types for the API layer
//!
//! `RequestFailure` is the raw shape of a failed call, before classification.
//! `ApiError` is what a wrapper hands back to its caller once the failure has
//! been classified as something the caller must present.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestFailure {
    /// The request went out but no response came back (refused, reset, timed out).
    #[error("No response from server: {0}")]
    NoResponse(#[source] reqwest::Error),

    /// The server answered with a failure. `body` is the raw response text.
    #[error("HTTP error with status {status}")]
    Response { status: u16, body: String },

    /// The request was never dispatched.
    #[error("Request could not be sent: {}", .message.as_deref().unwrap_or("unknown cause"))]
    Setup { message: Option<String> },
}

impl RequestFailure {
    /// Map an error returned by `RequestBuilder::send`.
    ///
    /// Builder errors happen before anything touches the network. Redirect
    /// errors mean the server did answer, only with redirects the client gave
    /// up on; the status is 0 when reqwest does not report the last one. Every
    /// other send error means the request went out without a response.
    pub fn from_send_error(error: reqwest::Error) -> Self {
        if error.is_builder() {
            RequestFailure::Setup {
                message: Some(error.to_string()),
            }
        } else if error.is_redirect() {
            RequestFailure::Response {
                status: error.status().map_or(0, |status| status.as_u16()),
                body: String::new(),
            }
        } else {
            RequestFailure::NoResponse(error)
        }
    }

    pub async fn from_response(response: reqwest::Response) -> RequestFailure {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        RequestFailure::Response { status, body }
    }

    pub fn setup(message: impl Into<String>) -> Self {
        RequestFailure::Setup {
            message: Some(message.into()),
        }
    }
}

/// A classified failure the caller is expected to show to the user.
///
/// `Display` is the user-facing message and nothing else.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with an error.
    #[error("{message}")]
    Application { status: u16, message: String },

    /// The request could not be sent at all.
    #[error("{message}")]
    Setup { message: String },

    /// The request scope was torn down before the call settled.
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// HTTP status of an application error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Application { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 answers, i.e. the session is missing or not allowed.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let error = ApiError::Application {
            status: 400,
            message: "Name is required".to_string(),
        };
        assert_eq!(error.to_string(), "Name is required");
        assert_eq!(error.status(), Some(400));
        assert!(!error.is_auth_failure());
    }

    #[test]
    fn auth_failures_are_401_and_403() {
        for status in [401, 403] {
            let error = ApiError::Application {
                status,
                message: String::new(),
            };
            assert!(error.is_auth_failure());
        }
        assert!(!ApiError::Cancelled.is_auth_failure());
    }

    #[test]
    fn setup_failure_display_without_message() {
        let failure = RequestFailure::Setup { message: None };
        assert_eq!(
            failure.to_string(),
            "Request could not be sent: unknown cause"
        );
    }
}
