//! Session guard for commands that need a logged-in user.

use crate::api::Api;
use crate::api::error::ApiError;
use crate::consts::cli_consts::paths;
use crate::network::NavigationService;

/// Check that the current session is usable before a protected command runs.
///
/// Returns `Ok(true)` when it is. Otherwise the user has already been sent
/// to a page (login, or server-down) and the command should stop quietly
/// with `Ok(false)`. Only setup failures and cancellation are errors.
pub async fn require_session(
    api: &dyn Api,
    navigation: &NavigationService,
) -> Result<bool, ApiError> {
    if api.session().is_none() {
        navigation.navigate(paths::AUTH);
        return Ok(false);
    }

    match api.verify_session().await {
        Ok(verified) => Ok(verified),
        Err(ApiError::Application { status, message }) => {
            log::info!("Session rejected ({status}): {message}");
            navigation.navigate(paths::AUTH);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use std::sync::{Arc, Mutex};

    fn recording_navigation() -> (NavigationService, Arc<Mutex<Vec<String>>>) {
        let navigation = NavigationService::new();
        let visited = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&visited);
        navigation.init(move |path| sink.lock().unwrap().push(path.to_string()));
        (navigation, visited)
    }

    #[tokio::test]
    /// No stored session: straight to login, no request made.
    async fn missing_session_redirects_to_auth() {
        let (navigation, visited) = recording_navigation();
        let mut api = MockApi::new();
        api.expect_session().return_const(None::<String>);
        api.expect_verify_session().never();

        assert_eq!(require_session(&api, &navigation).await, Ok(false));
        assert_eq!(*visited.lock().unwrap(), vec!["/auth".to_string()]);
    }

    #[tokio::test]
    async fn valid_session_passes() {
        let (navigation, visited) = recording_navigation();
        let mut api = MockApi::new();
        api.expect_session().return_const(Some("abc".to_string()));
        api.expect_verify_session().times(1).returning(|| Ok(true));

        assert_eq!(require_session(&api, &navigation).await, Ok(true));
        assert!(visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    /// An expired session is sent to the login page, not reported as an error.
    async fn rejected_session_redirects_to_auth() {
        let (navigation, visited) = recording_navigation();
        let mut api = MockApi::new();
        api.expect_session().return_const(Some("stale".to_string()));
        api.expect_verify_session().returning(|| {
            Err(ApiError::Application {
                status: 401,
                message: "Unauthorized".to_string(),
            })
        });

        assert_eq!(require_session(&api, &navigation).await, Ok(false));
        assert_eq!(*visited.lock().unwrap(), vec!["/auth".to_string()]);
    }

    #[tokio::test]
    /// Server down: the client already redirected, the guard adds nothing.
    async fn unreachable_server_stops_quietly() {
        let (navigation, visited) = recording_navigation();
        let mut api = MockApi::new();
        api.expect_session().return_const(Some("abc".to_string()));
        api.expect_verify_session().returning(|| Ok(false));

        assert_eq!(require_session(&api, &navigation).await, Ok(false));
        assert!(visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn setup_failure_propagates() {
        let (navigation, _) = recording_navigation();
        let mut api = MockApi::new();
        api.expect_session().return_const(Some("abc".to_string()));
        api.expect_verify_session().returning(|| {
            Err(ApiError::Setup {
                message: "Invalid URL".to_string(),
            })
        });

        let result = require_session(&api, &navigation).await;
        assert!(matches!(result, Err(ApiError::Setup { .. })));
    }
}
