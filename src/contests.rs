//! Contest commands: browsing, joining, and managing contests.

use crate::api::Api;
use crate::api::types::{Contest, CreateContestPayload, UpdateContestPayload};
use crate::network::NavigationService;
use crate::pretty::{print_cmd_error, print_cmd_info};
use crate::session::require_session;
use chrono::{Local, NaiveDateTime};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses a contest time given as `2025-03-01T10:00:00`, `2025-03-01 10:00:00` or `2025-03-01 10:00`.
pub fn parse_time(value: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", TIME_FORMAT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("invalid time '{value}', expected YYYY-MM-DD HH:MM"))
}

fn check_window(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), Box<dyn std::error::Error>> {
    if end <= start {
        print_cmd_error!("❌ The contest must end after it starts.");
        return Err(Box::from("End time is not after start time"));
    }
    Ok(())
}

fn print_contest_line(contest: &Contest) {
    println!(
        "  #{:<5} {:<32} {} -> {}",
        contest.id,
        contest.name,
        contest.start_time.format(TIME_FORMAT),
        contest.end_time.format(TIME_FORMAT)
    );
}

fn print_section(title: &str, contests: &[Contest]) {
    println!("{title} ({})", contests.len());
    for contest in contests {
        print_contest_line(contest);
    }
}

/// Lists ongoing, upcoming and past contests. Needs no session.
pub async fn list(api: &dyn Api) -> CmdResult {
    let Some(board) = api.get_all_contests().await? else {
        return Ok(());
    };
    if board.is_empty() {
        println!("No contests yet.");
        return Ok(());
    }
    print_section("Ongoing", &board.ongoing);
    print_section("Upcoming", &board.upcoming);
    print_section("Past", &board.past);
    Ok(())
}

/// Lists the contests the current user created or administers.
pub async fn mine(api: &dyn Api, navigation: &NavigationService) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(contests) = api.get_user_contests().await? else {
        return Ok(());
    };
    if contests.is_empty() {
        println!("You do not manage any contests.");
    } else {
        print_section("Your contests", &contests);
    }
    Ok(())
}

pub async fn show(contest_id: u64, api: &dyn Api, navigation: &NavigationService) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(details) = api.get_contest_by_id(contest_id).await? else {
        return Ok(());
    };
    let contest = &details.contest;
    println!("#{} {}", contest.id, contest.name);
    println!(
        "{} -> {}",
        contest.start_time.format(TIME_FORMAT),
        contest.end_time.format(TIME_FORMAT)
    );
    if let Some(card) = &contest.card_description {
        println!("{card}");
    }
    if let Some(description) = &contest.markdown_description {
        println!("\n{description}\n");
    }
    if details.has_user_participated {
        println!("You are participating.");
    } else if contest.end_time > Local::now().naive_local() {
        println!("Join with: crucible contests join {}", contest.id);
    }
    Ok(())
}

pub async fn create(
    payload: CreateContestPayload,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    check_window(payload.start_time, payload.end_time)?;
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(contest) = api.create_contest(&payload).await? else {
        return Ok(());
    };
    print_cmd_info!("✅ Contest created.", "#{} {}", contest.id, contest.name);
    Ok(())
}

pub async fn update(
    contest_id: u64,
    payload: UpdateContestPayload,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if payload.is_empty() {
        print_cmd_error!("❌ Nothing to update.", "Pass at least one field to change.");
        return Err(Box::from("No fields to update"));
    }
    if let (Some(start), Some(end)) = (payload.start_time, payload.end_time) {
        check_window(start, end)?;
    }
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(contest) = api.update_contest(contest_id, &payload).await? else {
        return Ok(());
    };
    print_cmd_info!("✅ Contest updated.", "#{} {}", contest.id, contest.name);
    Ok(())
}

pub async fn delete(contest_id: u64, api: &dyn Api, navigation: &NavigationService) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    if api.delete_contest(contest_id).await? {
        println!("Contest #{contest_id} deleted.");
    }
    Ok(())
}

/// Prints everything the management page shows: details, admins and questions.
pub async fn manage(contest_id: u64, api: &dyn Api, navigation: &NavigationService) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(data) = api.get_manage_contest_data(contest_id).await? else {
        return Ok(());
    };
    print_contest_line(&data.contest);
    println!("Admins ({})", data.admins.len());
    for admin in &data.admins {
        println!("  {} <{}>", admin.username, admin.email);
    }
    println!("Questions ({})", data.questions.len());
    for question in &data.questions {
        println!("  #{:<5} {} ({} pts)", question.id, question.title, question.points);
    }
    Ok(())
}

/// Lists a contest's questions with the user's progress on each.
pub async fn questions(
    contest_id: u64,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(listing) = api.get_contest_questions(contest_id).await? else {
        return Ok(());
    };
    println!("#{} {}", listing.contest_id, listing.contest_name);
    if !listing.has_participated {
        println!("Join the contest to submit: crucible contests join {}", listing.contest_id);
    }
    for question in &listing.questions {
        let mark = if question.has_solved {
            "solved"
        } else if question.has_attempted {
            "attempted"
        } else {
            ""
        };
        println!(
            "  #{:<5} {:<40} {:>4} pts  {}",
            question.id, question.title, question.points, mark
        );
    }
    Ok(())
}

pub async fn join(contest_id: u64, api: &dyn Api, navigation: &NavigationService) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    if api.participate_in_contest(contest_id).await? {
        print_cmd_info!(
            "✅ Joined the contest.",
            "See the questions with: crucible contests questions {}",
            contest_id
        );
    }
    Ok(())
}

pub async fn add_admin(
    contest_id: u64,
    email: &str,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    if api.add_admin_to_contest(contest_id, email).await? {
        println!("{email} is now an admin of contest #{contest_id}.");
    }
    Ok(())
}

pub async fn remove_admin(
    contest_id: u64,
    email: &str,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    if api.remove_admin_from_contest(contest_id, email).await? {
        println!("{email} is no longer an admin of contest #{contest_id}.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use crate::api::error::ApiError;
    use crate::api::types::ContestBoard;
    use mockall::predicate::eq;

    fn at(value: &str) -> NaiveDateTime {
        parse_time(value).unwrap()
    }

    fn contest(id: u64) -> Contest {
        Contest {
            id,
            name: format!("Weekly {id}"),
            banner_image_url: None,
            card_description: None,
            markdown_description: None,
            creator_id: Some(1),
            start_time: at("2025-03-01 10:00"),
            end_time: at("2025-03-01 12:00"),
            created_at: None,
            updated_at: None,
        }
    }

    fn logged_in_api() -> MockApi {
        let mut api = MockApi::new();
        api.expect_session().return_const(Some("abc".to_string()));
        api.expect_verify_session().returning(|| Ok(true));
        api
    }

    #[test]
    fn parse_time_accepts_common_layouts() {
        let expected = NaiveDateTime::parse_from_str("2025-03-01 10:00", TIME_FORMAT).unwrap();
        assert_eq!(parse_time("2025-03-01T10:00:00"), Ok(expected));
        assert_eq!(parse_time("2025-03-01 10:00:00"), Ok(expected));
        assert_eq!(parse_time("2025-03-01 10:00"), Ok(expected));
        assert!(parse_time("tomorrow").is_err());
    }

    #[tokio::test]
    async fn list_needs_no_session() {
        let mut api = MockApi::new();
        api.expect_session().never();
        api.expect_get_all_contests().returning(|| {
            Ok(Some(ContestBoard {
                ongoing: vec![contest(1)],
                upcoming: vec![],
                past: vec![contest(2)],
            }))
        });

        list(&api).await.unwrap();
    }

    #[tokio::test]
    /// Server down: the list command ends quietly.
    async fn list_with_server_down_is_not_an_error() {
        let mut api = MockApi::new();
        api.expect_get_all_contests().returning(|| Ok(None));

        assert!(list(&api).await.is_ok());
    }

    #[tokio::test]
    async fn create_rejects_inverted_window_before_any_request() {
        let mut api = MockApi::new();
        api.expect_session().never();
        api.expect_create_contest().never();

        let payload = CreateContestPayload {
            name: "Backwards".to_string(),
            banner_image_url: None,
            card_description: None,
            markdown_description: "rules".to_string(),
            start_time: at("2025-03-01 12:00"),
            end_time: at("2025-03-01 10:00"),
        };
        let navigation = NavigationService::new();
        assert!(create(payload, &api, &navigation).await.is_err());
    }

    #[tokio::test]
    async fn create_sends_payload_when_logged_in() {
        let mut api = logged_in_api();
        api.expect_create_contest()
            .withf(|payload| payload.name == "Weekly 3")
            .times(1)
            .returning(|_| Ok(Some(contest(3))));

        let payload = CreateContestPayload {
            name: "Weekly 3".to_string(),
            banner_image_url: None,
            card_description: Some("short".to_string()),
            markdown_description: "rules".to_string(),
            start_time: at("2025-03-01 10:00"),
            end_time: at("2025-03-01 12:00"),
        };
        let navigation = NavigationService::new();
        create(payload, &api, &navigation).await.unwrap();
    }

    #[tokio::test]
    async fn update_without_fields_is_rejected() {
        let mut api = MockApi::new();
        api.expect_update_contest().never();

        let navigation = NavigationService::new();
        let result = update(3, UpdateContestPayload::default(), &api, &navigation).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    /// Protected commands stop before their request when logged out.
    async fn join_without_session_sends_nothing() {
        let mut api = MockApi::new();
        api.expect_session().return_const(None::<String>);
        api.expect_participate_in_contest().never();

        let navigation = NavigationService::new();
        join(7, &api, &navigation).await.unwrap();
    }

    #[tokio::test]
    async fn join_surfaces_backend_message() {
        let mut api = logged_in_api();
        api.expect_participate_in_contest()
            .with(eq(7u64))
            .returning(|_| {
                Err(ApiError::Application {
                    status: 400,
                    message: "Contest has ended".to_string(),
                })
            });

        let navigation = NavigationService::new();
        let error = join(7, &api, &navigation).await.unwrap_err();
        assert_eq!(error.to_string(), "Contest has ended");
    }

    #[tokio::test]
    async fn add_admin_passes_email_through() {
        let mut api = logged_in_api();
        api.expect_add_admin_to_contest()
            .with(eq(7u64), eq("bob@example.com"))
            .times(1)
            .returning(|_, _| Ok(true));

        let navigation = NavigationService::new();
        add_admin(7, "bob@example.com", &api, &navigation)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_reports_server_down_quietly() {
        let mut api = logged_in_api();
        api.expect_delete_contest().with(eq(7u64)).returning(|_| Ok(false));

        let navigation = NavigationService::new();
        assert!(delete(7, &api, &navigation).await.is_ok());
    }
}
