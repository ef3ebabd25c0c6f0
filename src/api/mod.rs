use crate::api::error::ApiError;
use crate::api::types::*;

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::automock;

/// The Crucible backend, one method per REST call.
///
/// Every method follows the same convention. On success it returns the
/// payload. When the server cannot be reached the client has already
/// redirected to the server-down page, and the method returns `Ok(None)`
/// (or `Ok(false)` for methods reporting success as a flag). Any other
/// failure is an `Err` carrying the message to show the user.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Api: Send + Sync {
    /// Value of the session cookie, if a session is established.
    fn session(&self) -> Option<String>;

    /// Ping the backend; returns the status it reports.
    async fn check_health(&self) -> Result<Option<u16>, ApiError>;

    /// Start a session with username (or email) and password.
    async fn login(&self, username: &str, password: &str)
    -> Result<Option<LoginResponse>, ApiError>;

    async fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<Option<RegistrationResponse>, ApiError>;

    /// Whether the current session is still valid.
    async fn verify_session(&self) -> Result<bool, ApiError>;

    async fn logout(&self) -> Result<bool, ApiError>;

    /// The user owning the current session.
    async fn get_me(&self) -> Result<Option<UserInfo>, ApiError>;

    async fn create_contest(
        &self,
        payload: &CreateContestPayload,
    ) -> Result<Option<Contest>, ApiError>;

    /// Ongoing, upcoming and past contests.
    async fn get_all_contests(&self) -> Result<Option<ContestBoard>, ApiError>;

    /// Contests the current user manages.
    async fn get_user_contests(&self) -> Result<Option<Vec<Contest>>, ApiError>;

    async fn get_contest_by_id(
        &self,
        contest_id: u64,
    ) -> Result<Option<ContestDetailsForUser>, ApiError>;

    async fn update_contest(
        &self,
        contest_id: u64,
        payload: &UpdateContestPayload,
    ) -> Result<Option<Contest>, ApiError>;

    async fn delete_contest(&self, contest_id: u64) -> Result<bool, ApiError>;

    /// Contest details, admins and questions for the management page.
    async fn get_manage_contest_data(
        &self,
        contest_id: u64,
    ) -> Result<Option<ManageContestData>, ApiError>;

    async fn get_contest_questions(
        &self,
        contest_id: u64,
    ) -> Result<Option<ContestQuestionsResponse>, ApiError>;

    async fn participate_in_contest(&self, contest_id: u64) -> Result<bool, ApiError>;

    async fn add_admin_to_contest(&self, contest_id: u64, email: &str) -> Result<bool, ApiError>;

    async fn remove_admin_from_contest(
        &self,
        contest_id: u64,
        email: &str,
    ) -> Result<bool, ApiError>;

    async fn get_question(&self, question_id: u64)
    -> Result<Option<QuestionWithSamples>, ApiError>;

    async fn create_question(
        &self,
        payload: &CreateQuestionPayload,
    ) -> Result<Option<Question>, ApiError>;

    async fn update_question(
        &self,
        question_id: u64,
        payload: &UpdateQuestionPayload,
    ) -> Result<Option<Question>, ApiError>;

    async fn delete_question(&self, question_id: u64) -> Result<bool, ApiError>;

    async fn get_test_cases(&self, question_id: u64) -> Result<Option<Vec<TestCase>>, ApiError>;

    async fn create_test_case(
        &self,
        payload: &TestCasePayload,
    ) -> Result<Option<TestCase>, ApiError>;

    async fn update_test_case(
        &self,
        test_case_id: u64,
        payload: &TestCasePayload,
    ) -> Result<Option<TestCase>, ApiError>;

    async fn delete_test_case(&self, test_case_id: u64) -> Result<bool, ApiError>;

    /// Run or submit code for a practice problem.
    async fn submit_for_practice(
        &self,
        request: &SubmitCodeRequest,
    ) -> Result<Option<SubmissionResponse>, ApiError>;

    /// Run or submit code for a problem inside a contest.
    async fn submit_for_contest(
        &self,
        request: &ContestSubmitCodeRequest,
    ) -> Result<Option<SubmissionResponse>, ApiError>;
}
