//! Centralized error handling and classification

use crate::api::error::{ApiError, RequestFailure};
use crate::consts::cli_consts::{messages, paths};
use crate::logging::LogLevel;
use crate::network::navigation::NavigationService;

/// What a failed call turned out to be. Exactly one per failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorOutcome {
    /// The backend did not respond at all.
    ServerUnreachable,
    /// The backend answered with an error.
    ApplicationError { status: u16, message: String },
    /// The request was never dispatched.
    SetupError { message: String },
}

/// Marker returned once an unreachable server has been handled by redirecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerDown;

/// Centralized error handler for all API calls
#[derive(Debug, Clone)]
pub struct ErrorHandler {
    navigation: NavigationService,
}

impl ErrorHandler {
    pub fn new(navigation: NavigationService) -> Self {
        Self { navigation }
    }

    /// Classify a failure. Pure: no logging, no navigation.
    ///
    /// The order matters: a failure with a response is an application error
    /// even if the transport also reported trouble afterwards.
    pub fn classify(&self, failure: &RequestFailure, default_message: &str) -> ErrorOutcome {
        match failure {
            RequestFailure::NoResponse(_) => ErrorOutcome::ServerUnreachable,
            RequestFailure::Response { status, body } => ErrorOutcome::ApplicationError {
                status: *status,
                message: message_from_body(body).unwrap_or_else(|| default_message.to_string()),
            },
            RequestFailure::Setup { message } => ErrorOutcome::SetupError {
                message: message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(messages::SETUP_FALLBACK)
                    .to_string(),
            },
        }
    }

    /// Classify a failure and apply its side effect.
    ///
    /// An unreachable server redirects to the server-down page and yields
    /// `Ok(ServerDown)`. Everything else becomes an `ApiError` for the caller.
    pub fn resolve(
        &self,
        failure: RequestFailure,
        default_message: &str,
    ) -> Result<ServerDown, ApiError> {
        let outcome = self.classify(&failure, default_message);
        let level: log::Level = self.log_level(&outcome).into();
        log::log!(level, "{default_message}: {failure}");

        match outcome {
            ErrorOutcome::ServerUnreachable => {
                self.navigation.navigate(paths::SERVER_DOWN);
                Ok(ServerDown)
            }
            ErrorOutcome::ApplicationError { status, message } => {
                Err(ApiError::Application { status, message })
            }
            ErrorOutcome::SetupError { message } => Err(ApiError::Setup { message }),
        }
    }

    /// Classify an outcome and determine the appropriate log level
    pub fn log_level(&self, outcome: &ErrorOutcome) -> LogLevel {
        match outcome {
            // Whole application is redirected; worth noticing
            ErrorOutcome::ServerUnreachable => LogLevel::Warn,

            // Session problems are routine
            ErrorOutcome::ApplicationError { status, .. } if *status == 401 => LogLevel::Info,
            ErrorOutcome::ApplicationError { status, .. } if *status == 403 => LogLevel::Info,

            // Server errors
            ErrorOutcome::ApplicationError { status, .. } if (500..=599).contains(status) => {
                LogLevel::Warn
            }

            // Validation and other client errors, shown to the user anyway
            ErrorOutcome::ApplicationError { .. } => LogLevel::Debug,

            // Programming or configuration defect
            ErrorOutcome::SetupError { .. } => LogLevel::Error,
        }
    }
}

/// User-facing message carried by an error body: `message`, then `error`.
///
/// Empty strings and bodies that are not JSON objects count as absent.
fn message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}
