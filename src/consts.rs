pub mod cli_consts {
    //! CLI Configuration Constants
    //!
    //! Constants shared by the API client, the error handler and the commands,
    //! organized by functional area.

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client configuration
    pub mod http {
        use std::time::Duration;

        /// Time allowed to establish a TCP/TLS connection (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Time allowed for a whole request, including the response body (seconds)
        /// Code submissions are judged synchronously, so this is generous.
        pub const REQUEST_TIMEOUT_SECS: u64 = 60;

        /// User-Agent string with CLI version
        pub const USER_AGENT: &str = concat!("crucible-cli/", env!("CARGO_PKG_VERSION"));

        /// Name of the cookie carrying the backend session
        pub const SESSION_COOKIE: &str = "SESSION";

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // NAVIGATION
    // =============================================================================

    /// Route paths understood by the CLI router
    pub mod paths {
        /// Page shown when the backend cannot be reached
        pub const SERVER_DOWN: &str = "/server-down";

        /// Login page, used by the session guard
        pub const AUTH: &str = "/auth";
    }

    // =============================================================================
    // MESSAGES
    // =============================================================================

    /// Messages used when the failure itself carries none
    pub mod messages {
        /// A request that could not even be dispatched and had no message of its own
        pub const SETUP_FALLBACK: &str = "Request could not be sent";

        /// Shown on the server-down page
        pub const SERVER_DOWN: &str = "No response from server. Please try again later.";
    }

    // =============================================================================
    // ENVIRONMENT VARIABLES
    // =============================================================================

    pub mod env {
        /// Selects the deployment (`local`, `staging`, `production`)
        pub const ENVIRONMENT: &str = "CRUCIBLE_ENVIRONMENT";

        /// Overrides the REST root outright, e.g. `http://127.0.0.1:8080/api/v1`
        pub const API_URL: &str = "CRUCIBLE_API_URL";
    }
}
