//! Crucible API Client
//!
//! A client for the Crucible REST backend. Every call runs inside the
//! client's request scope and every failure goes through the error handler,
//! which decides between redirecting and reporting.

use crate::api::Api;
use crate::api::error::{ApiError, RequestFailure};
use crate::api::types::*;
use crate::consts::cli_consts::http;
use crate::network::{ErrorHandler, NavigationService, RequestScope, ServerDown};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::future::Future;
use std::sync::Arc;
use url::Url;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    cookies: Arc<Jar>,
    error_handler: ErrorHandler,
    scope: RequestScope,
}

impl ApiClient {
    /// Create a client for the REST root `base_url` (e.g. `https://crucible.dev/api/v1`).
    pub fn new(
        base_url: &str,
        navigation: NavigationService,
        scope: RequestScope,
    ) -> Result<Self, ApiError> {
        let cookies = Arc::new(Jar::default());
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .user_agent(http::USER_AGENT)
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(|e| ApiError::Setup {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            cookies,
            error_handler: ErrorHandler::new(navigation),
            scope,
        })
    }

    /// Resume a session saved by an earlier login.
    pub fn with_session(self, session: &str) -> Self {
        match Url::parse(&self.base_url) {
            Ok(url) => {
                let cookie = format!("{}={}; Path=/", http::SESSION_COOKIE, session);
                self.cookies.add_cookie_str(&cookie, &url);
            }
            Err(e) => log::warn!("Not restoring session for invalid URL {}: {}", self.base_url, e),
        }
        self
    }

    fn build_url(&self, endpoint: &str) -> Result<Url, RequestFailure> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| RequestFailure::setup(format!("Invalid URL {raw}: {e}")))
    }

    fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, RequestFailure> {
        Ok(self.client.request(method, self.build_url(endpoint)?))
    }

    async fn execute(request: RequestBuilder) -> Result<Response, RequestFailure> {
        let response = request
            .send()
            .await
            .map_err(RequestFailure::from_send_error)?;
        if !response.status().is_success() {
            return Err(RequestFailure::from_response(response).await);
        }
        Ok(response)
    }

    /// A success response whose body is unusable. Reported with the caller's default message.
    fn malformed(status: u16, url: &Url, reason: impl std::fmt::Display) -> RequestFailure {
        log::warn!("Unexpected response body from {url}: {reason}");
        RequestFailure::Response {
            status,
            body: String::new(),
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RequestFailure> {
        let status = response.status().as_u16();
        let url = response.url().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::malformed(status, &url, e))?;
        serde_json::from_slice(&bytes).map_err(|e| Self::malformed(status, &url, e))
    }

    /// Turn an envelope that reports a failure in its body into a response failure.
    fn declared_failure<T>(envelope: &Envelope<T>) -> Option<RequestFailure> {
        match envelope.status_code {
            Some(code) if envelope.declares_failure() => Some(RequestFailure::Response {
                status: code,
                body: serde_json::json!({ "message": envelope.message }).to_string(),
            }),
            _ => None,
        }
    }

    /// Read the `data` of an enveloped response.
    async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T, RequestFailure> {
        let status = response.status().as_u16();
        let url = response.url().clone();
        let envelope: Envelope<T> = Self::read_json(response).await?;
        if let Some(failure) = Self::declared_failure(&envelope) {
            return Err(failure);
        }
        envelope
            .data
            .ok_or_else(|| Self::malformed(status, &url, "missing `data`"))
    }

    /// Accept a response whose payload is not needed.
    ///
    /// Empty and non-envelope bodies are fine; an envelope declaring a failure is not.
    async fn read_ack(response: Response) -> Result<(), RequestFailure> {
        let bytes = response.bytes().await.unwrap_or_default();
        if bytes.is_empty() {
            return Ok(());
        }
        match serde_json::from_slice::<Envelope<IgnoredAny>>(&bytes) {
            Ok(envelope) => match Self::declared_failure(&envelope) {
                Some(failure) => Err(failure),
                None => Ok(()),
            },
            Err(_) => Ok(()),
        }
    }

    async fn get_data<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, RequestFailure> {
        let response = Self::execute(self.request(Method::GET, endpoint)?).await?;
        Self::read_data(response).await
    }

    async fn send_data<T, B>(&self, method: Method, endpoint: &str, body: &B) -> Result<T, RequestFailure>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(method, endpoint)?.json(body);
        let response = Self::execute(request).await?;
        Self::read_data(response).await
    }

    async fn send_empty<B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<(), RequestFailure>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method, endpoint)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = Self::execute(request).await?;
        Self::read_ack(response).await
    }

    /// Run a call in the client's scope and apply the failure convention.
    ///
    /// `Ok(None)` means the server was unreachable and the redirect already happened.
    async fn settle<T, F>(&self, default_message: &str, call: F) -> Result<Option<T>, ApiError>
    where
        F: Future<Output = Result<T, RequestFailure>>,
    {
        match self.scope.run(call).await {
            None => Err(ApiError::Cancelled),
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(failure)) => self
                .error_handler
                .resolve(failure, default_message)
                .map(|ServerDown| None),
        }
    }

    /// `settle` for calls whose only result is whether they went through.
    async fn settle_flag<F>(&self, default_message: &str, call: F) -> Result<bool, ApiError>
    where
        F: Future<Output = Result<(), RequestFailure>>,
    {
        Ok(self.settle(default_message, call).await?.is_some())
    }
}

const NO_BODY: Option<&()> = None;

#[async_trait::async_trait]
impl Api for ApiClient {
    fn session(&self) -> Option<String> {
        let url = Url::parse(&self.base_url).ok()?;
        let header = self.cookies.cookies(&url)?;
        let header = header.to_str().ok()?;
        header
            .split(';')
            .map(str::trim)
            .find_map(|pair| pair.strip_prefix(http::SESSION_COOKIE)?.strip_prefix('='))
            .map(str::to_string)
    }

    async fn check_health(&self) -> Result<Option<u16>, ApiError> {
        self.settle("Health check failed", async {
            let response = Self::execute(self.request(Method::GET, "health")?).await?;
            Self::read_json(response).await
        })
        .await
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<LoginResponse>, ApiError> {
        self.settle("Login failed", async {
            let request = self
                .request(Method::POST, "auth/login")?
                .form(&[("username", username), ("password", password)]);
            let response = Self::execute(request).await?;
            Self::read_json(response).await
        })
        .await
    }

    async fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<Option<RegistrationResponse>, ApiError> {
        self.settle(
            "Registration failed",
            self.send_data(Method::POST, "auth/register", payload),
        )
        .await
    }

    async fn verify_session(&self) -> Result<bool, ApiError> {
        self.settle_flag(
            "Session verification failed",
            self.send_empty(Method::GET, "auth/verify-session", NO_BODY),
        )
        .await
    }

    async fn logout(&self) -> Result<bool, ApiError> {
        self.settle_flag(
            "Logout failed",
            self.send_empty(Method::POST, "auth/logout", NO_BODY),
        )
        .await
    }

    async fn get_me(&self) -> Result<Option<UserInfo>, ApiError> {
        self.settle("Failed to fetch user info", self.get_data("auth/me"))
            .await
    }

    async fn create_contest(
        &self,
        payload: &CreateContestPayload,
    ) -> Result<Option<Contest>, ApiError> {
        self.settle(
            "Failed to create contest",
            self.send_data(Method::POST, "contests", payload),
        )
        .await
    }

    async fn get_all_contests(&self) -> Result<Option<ContestBoard>, ApiError> {
        self.settle("Failed to fetch contests", async {
            let (ongoing, upcoming, past) = futures::try_join!(
                self.get_data("contests/live"),
                self.get_data("contests/upcoming"),
                self.get_data("contests/past"),
            )?;
            Ok(ContestBoard {
                ongoing,
                upcoming,
                past,
            })
        })
        .await
    }

    async fn get_user_contests(&self) -> Result<Option<Vec<Contest>>, ApiError> {
        self.settle("Failed to fetch user contests", self.get_data("contests/user"))
            .await
    }

    async fn get_contest_by_id(
        &self,
        contest_id: u64,
    ) -> Result<Option<ContestDetailsForUser>, ApiError> {
        let endpoint = format!("contests/{contest_id}");
        self.settle("Failed to fetch contest", self.get_data(&endpoint))
            .await
    }

    async fn update_contest(
        &self,
        contest_id: u64,
        payload: &UpdateContestPayload,
    ) -> Result<Option<Contest>, ApiError> {
        let endpoint = format!("contests/{contest_id}");
        self.settle(
            "Failed to update contest",
            self.send_data(Method::PUT, &endpoint, payload),
        )
        .await
    }

    async fn delete_contest(&self, contest_id: u64) -> Result<bool, ApiError> {
        let endpoint = format!("contests/{contest_id}");
        self.settle_flag(
            "Failed to delete contest",
            self.send_empty(Method::DELETE, &endpoint, NO_BODY),
        )
        .await
    }

    async fn get_manage_contest_data(
        &self,
        contest_id: u64,
    ) -> Result<Option<ManageContestData>, ApiError> {
        let endpoint = format!("contests/manage/{contest_id}");
        self.settle("Failed to fetch manage contest data", self.get_data(&endpoint))
            .await
    }

    async fn get_contest_questions(
        &self,
        contest_id: u64,
    ) -> Result<Option<ContestQuestionsResponse>, ApiError> {
        let endpoint = format!("contests/{contest_id}/questions");
        self.settle("Failed to fetch contest questions", self.get_data(&endpoint))
            .await
    }

    async fn participate_in_contest(&self, contest_id: u64) -> Result<bool, ApiError> {
        let endpoint = format!("contests/{contest_id}/participate");
        self.settle_flag(
            "Failed to join contest",
            self.send_empty(Method::POST, &endpoint, NO_BODY),
        )
        .await
    }

    async fn add_admin_to_contest(&self, contest_id: u64, email: &str) -> Result<bool, ApiError> {
        let payload = AlterAdminPayload {
            contest_id,
            email: email.to_string(),
        };
        self.settle_flag(
            "Failed to add admin to contest",
            self.send_empty(Method::POST, "admin", Some(&payload)),
        )
        .await
    }

    async fn remove_admin_from_contest(
        &self,
        contest_id: u64,
        email: &str,
    ) -> Result<bool, ApiError> {
        let payload = AlterAdminPayload {
            contest_id,
            email: email.to_string(),
        };
        self.settle_flag(
            "Failed to remove admin from contest",
            self.send_empty(Method::DELETE, "admin", Some(&payload)),
        )
        .await
    }

    async fn get_question(
        &self,
        question_id: u64,
    ) -> Result<Option<QuestionWithSamples>, ApiError> {
        let endpoint = format!("questions/{question_id}");
        self.settle("Failed to fetch question", self.get_data(&endpoint))
            .await
    }

    async fn create_question(
        &self,
        payload: &CreateQuestionPayload,
    ) -> Result<Option<Question>, ApiError> {
        self.settle(
            "Failed to create question",
            self.send_data(Method::POST, "questions", payload),
        )
        .await
    }

    async fn update_question(
        &self,
        question_id: u64,
        payload: &UpdateQuestionPayload,
    ) -> Result<Option<Question>, ApiError> {
        let endpoint = format!("questions/{question_id}");
        self.settle(
            "Failed to update question",
            self.send_data(Method::PUT, &endpoint, payload),
        )
        .await
    }

    async fn delete_question(&self, question_id: u64) -> Result<bool, ApiError> {
        let endpoint = format!("questions/{question_id}");
        self.settle_flag(
            "Failed to delete question",
            self.send_empty(Method::DELETE, &endpoint, NO_BODY),
        )
        .await
    }

    async fn get_test_cases(&self, question_id: u64) -> Result<Option<Vec<TestCase>>, ApiError> {
        let endpoint = format!("test-cases/question/{question_id}");
        self.settle("Failed to fetch test cases", self.get_data(&endpoint))
            .await
    }

    async fn create_test_case(
        &self,
        payload: &TestCasePayload,
    ) -> Result<Option<TestCase>, ApiError> {
        self.settle(
            "Failed to create test case",
            self.send_data(Method::POST, "test-cases", payload),
        )
        .await
    }

    async fn update_test_case(
        &self,
        test_case_id: u64,
        payload: &TestCasePayload,
    ) -> Result<Option<TestCase>, ApiError> {
        let endpoint = format!("test-cases/{test_case_id}");
        self.settle(
            "Failed to update test case",
            self.send_data(Method::PUT, &endpoint, payload),
        )
        .await
    }

    async fn delete_test_case(&self, test_case_id: u64) -> Result<bool, ApiError> {
        let endpoint = format!("test-cases/{test_case_id}");
        self.settle_flag(
            "Failed to delete test case",
            self.send_empty(Method::DELETE, &endpoint, NO_BODY),
        )
        .await
    }

    async fn submit_for_practice(
        &self,
        request: &SubmitCodeRequest,
    ) -> Result<Option<SubmissionResponse>, ApiError> {
        self.settle(
            "Failed to submit code",
            self.send_data(Method::POST, "submissions/submit", request),
        )
        .await
    }

    async fn submit_for_contest(
        &self,
        request: &ContestSubmitCodeRequest,
    ) -> Result<Option<SubmissionResponse>, ApiError> {
        self.settle(
            "Failed to submit code",
            self.send_data(Method::POST, "submissions/contest", request),
        )
        .await
    }
}
