//! Question and test-case commands for contest authors.

use crate::api::Api;
use crate::api::types::{CreateQuestionPayload, TestCasePayload, UpdateQuestionPayload};
use crate::network::NavigationService;
use crate::pretty::{print_cmd_error, print_cmd_info};
use crate::session::require_session;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Prints a question with its sample test cases.
pub async fn show(question_id: u64, api: &dyn Api, navigation: &NavigationService) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(found) = api.get_question(question_id).await? else {
        return Ok(());
    };
    let question = &found.question;
    println!("#{} {} ({} pts)", question.id, question.title, question.points);
    println!("\n{}\n", question.markdown_description);
    for (n, sample) in found.sample_test_cases.iter().enumerate() {
        println!("Sample {}", n + 1);
        println!("  input:\n{}", sample.input);
        println!("  expected:\n{}", sample.expected_output);
    }
    Ok(())
}

pub async fn create(
    payload: CreateQuestionPayload,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(question) = api.create_question(&payload).await? else {
        return Ok(());
    };
    print_cmd_info!(
        "✅ Question created.",
        "#{} {} in contest #{}",
        question.id,
        question.title,
        payload.contest_id
    );
    Ok(())
}

pub async fn update(
    question_id: u64,
    payload: UpdateQuestionPayload,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if payload.title.is_none() && payload.markdown_description.is_none() && payload.points.is_none()
    {
        print_cmd_error!("❌ Nothing to update.", "Pass at least one field to change.");
        return Err(Box::from("No fields to update"));
    }
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(question) = api.update_question(question_id, &payload).await? else {
        return Ok(());
    };
    print_cmd_info!("✅ Question updated.", "#{} {}", question.id, question.title);
    Ok(())
}

pub async fn delete(question_id: u64, api: &dyn Api, navigation: &NavigationService) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    if api.delete_question(question_id).await? {
        println!("Question #{question_id} deleted.");
    }
    Ok(())
}

/// Lists every test case of a question, hidden ones included.
pub async fn list_test_cases(
    question_id: u64,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(test_cases) = api.get_test_cases(question_id).await? else {
        return Ok(());
    };
    if test_cases.is_empty() {
        println!("Question #{question_id} has no test cases.");
        return Ok(());
    }
    for test_case in &test_cases {
        let kind = if test_case.is_sample { "sample" } else { "hidden" };
        println!("#{} ({kind})", test_case.id);
        println!("  input:\n{}", test_case.input);
        println!("  expected:\n{}", test_case.expected_output);
    }
    Ok(())
}

pub async fn add_test_case(
    payload: TestCasePayload,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(test_case) = api.create_test_case(&payload).await? else {
        return Ok(());
    };
    println!(
        "Test case #{} added to question #{}.",
        test_case.id, test_case.question_id
    );
    Ok(())
}

pub async fn update_test_case(
    test_case_id: u64,
    payload: TestCasePayload,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    let Some(test_case) = api.update_test_case(test_case_id, &payload).await? else {
        return Ok(());
    };
    println!("Test case #{} updated.", test_case.id);
    Ok(())
}

pub async fn delete_test_case(
    test_case_id: u64,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    if !require_session(api, navigation).await? {
        return Ok(());
    }
    if api.delete_test_case(test_case_id).await? {
        println!("Test case #{test_case_id} deleted.");
    }
    Ok(())
}
