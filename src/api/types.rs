//! Wire types of the Crucible REST API.
//!
//! Field names follow the backend's camelCase JSON. Timestamps are the
//! backend's zone-less local times, so they map to `NaiveDateTime`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The body shape of every enveloped endpoint: payload, status and message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Whether the body itself declares a failure, independent of the HTTP status.
    pub fn declares_failure(&self) -> bool {
        self.status_code.is_some_and(|code| !(200..300).contains(&code))
    }
}

// -----------------------------------------------------------------------------
// Auth
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, alias = "role", deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
}

// -----------------------------------------------------------------------------
// Contests
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub card_description: Option<String>,
    #[serde(default)]
    pub markdown_description: Option<String>,
    #[serde(default)]
    pub creator_id: Option<u64>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestDetailsForUser {
    #[serde(flatten)]
    pub contest: Contest,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_user_participated: bool,
}

/// Contests grouped the way the listing page shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContestBoard {
    pub ongoing: Vec<Contest>,
    pub upcoming: Vec<Contest>,
    pub past: Vec<Contest>,
}

impl ContestBoard {
    pub fn is_empty(&self) -> bool {
        self.ongoing.is_empty() && self.upcoming.is_empty() && self.past.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContestPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_description: Option<String>,
    pub markdown_description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContestPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
}

impl UpdateContestPayload {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestQuestionSummary {
    pub id: u64,
    pub title: String,
    pub points: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_attempted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_solved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestQuestionsResponse {
    pub contest_id: u64,
    pub contest_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_participated: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<ContestQuestionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageContestData {
    pub contest: Contest,
    #[serde(default, deserialize_with = "null_as_default")]
    pub admins: Vec<UserSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterAdminPayload {
    pub contest_id: u64,
    pub email: String,
}

// -----------------------------------------------------------------------------
// Questions & test cases
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub markdown_description: String,
    pub points: u32,
    #[serde(default)]
    pub creator_id: Option<u64>,
    #[serde(default)]
    pub contest_id: Option<u64>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleTestCase {
    pub id: u64,
    pub input: String,
    pub expected_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWithSamples {
    #[serde(flatten)]
    pub question: Question,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sample_test_cases: Vec<SampleTestCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionPayload {
    pub title: String,
    pub markdown_description: String,
    pub points: u32,
    pub contest_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: u64,
    pub question_id: u64,
    pub input: String,
    pub expected_output: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_sample: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCasePayload {
    pub question_id: u64,
    pub input: String,
    pub expected_output: String,
    pub is_sample: bool,
}

// -----------------------------------------------------------------------------
// Submissions
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCodeRequest {
    pub question_id: u64,
    pub code: String,
    pub language: String,
    /// Run against sample test cases only.
    pub is_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestSubmitCodeRequest {
    pub contest_id: u64,
    pub question_id: u64,
    pub code: String,
    pub language: String,
    pub is_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub test_case_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passed: bool,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub expected_output: Option<String>,
    #[serde(default)]
    pub actual_output: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_sample: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    #[serde(default)]
    pub submission_id: Option<u64>,
    /// "Accepted", "Wrong Answer", "Runtime Error", "Time Limit Exceeded", "Compilation Error"
    pub status: String,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passed_test_cases: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_test_cases: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_run: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_case_results: Vec<TestCaseResult>,
}

impl SubmissionResponse {
    pub fn is_accepted(&self) -> bool {
        self.status.eq_ignore_ascii_case("accepted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contest_details_flatten_contest_fields() {
        let details: ContestDetailsForUser = serde_json::from_value(json!({
            "id": 7,
            "name": "Weekly 12",
            "markdownDescription": "# Rules",
            "startTime": "2025-03-01T10:00:00",
            "endTime": "2025-03-01T12:00:00",
            "hasUserParticipated": true
        }))
        .unwrap();

        assert_eq!(details.contest.id, 7);
        assert_eq!(details.contest.markdown_description.as_deref(), Some("# Rules"));
        assert!(details.has_user_participated);
    }

    #[test]
    fn envelope_declares_failure_from_status_code() {
        let envelope: Envelope<UserInfo> = serde_json::from_value(json!({
            "data": null,
            "statusCode": 401,
            "message": "Not authenticated"
        }))
        .unwrap();

        assert!(envelope.declares_failure());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn update_payload_omits_unset_fields() {
        let payload = UpdateContestPayload {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "name": "Renamed" })
        );
        assert!(!payload.is_empty());
        assert!(UpdateContestPayload::default().is_empty());
    }

    #[test]
    fn registration_accepts_singular_role_field() {
        let response: RegistrationResponse = serde_json::from_value(json!({
            "id": "1",
            "username": "alice",
            "email": "alice@example.com",
            "role": ["USER"]
        }))
        .unwrap();
        assert_eq!(response.roles, vec!["USER".to_string()]);
    }

    #[test]
    fn null_flags_read_as_false() {
        let details: ContestDetailsForUser = serde_json::from_value(json!({
            "id": 5,
            "name": "Weekly 5",
            "startTime": "2025-03-01T10:00:00",
            "endTime": "2025-03-01T12:00:00",
            "hasUserParticipated": null
        }))
        .unwrap();
        assert!(!details.has_user_participated);

        let listing: ContestQuestionsResponse = serde_json::from_value(json!({
            "contestId": 5,
            "contestName": "Weekly 5",
            "hasParticipated": null,
            "questions": [{
                "id": 1,
                "title": "Two Sum",
                "points": 100,
                "hasAttempted": null,
                "hasSolved": null
            }]
        }))
        .unwrap();
        assert!(!listing.has_participated);
        assert!(!listing.questions[0].has_attempted);
        assert!(!listing.questions[0].has_solved);

        let test_case: TestCase = serde_json::from_value(json!({
            "id": 11,
            "questionId": 1,
            "input": "1 2",
            "expectedOutput": "3",
            "isSample": null
        }))
        .unwrap();
        assert!(!test_case.is_sample);
    }

    #[test]
    fn submission_with_null_counts_and_lists() {
        let response: SubmissionResponse = serde_json::from_value(json!({
            "submissionId": null,
            "status": "Compilation Error",
            "output": "expected ';'",
            "passedTestCases": null,
            "totalTestCases": null,
            "isRun": null,
            "testCaseResults": null
        }))
        .unwrap();
        assert_eq!(response.passed_test_cases, 0);
        assert_eq!(response.total_test_cases, 0);
        assert!(!response.is_run);
        assert!(response.test_case_results.is_empty());

        let result: TestCaseResult = serde_json::from_value(json!({
            "testCaseNumber": 2,
            "passed": null,
            "isSample": null
        }))
        .unwrap();
        assert!(!result.passed);
        assert!(!result.is_sample);
    }

    #[test]
    fn manage_data_with_null_lists() {
        let data: ManageContestData = serde_json::from_value(json!({
            "contest": {
                "id": 5,
                "name": "Weekly 5",
                "startTime": "2025-03-01T10:00:00",
                "endTime": "2025-03-01T12:00:00"
            },
            "admins": null,
            "questions": null
        }))
        .unwrap();
        assert!(data.admins.is_empty());
        assert!(data.questions.is_empty());
    }
}
