//! Running and submitting solutions.

use crate::api::Api;
use crate::api::types::{ContestSubmitCodeRequest, SubmissionResponse, SubmitCodeRequest};
use crate::network::NavigationService;
use crate::pretty::print_cmd_error;
use crate::session::require_session;
use std::path::Path;
use std::str::FromStr;
use strum::{Display, EnumString};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Languages the judge accepts, named the way the backend expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[strum(to_string = "javascript", serialize = "js")]
    JavaScript,
    #[strum(to_string = "python", serialize = "python3", serialize = "py")]
    Python,
    #[strum(to_string = "java")]
    Java,
    #[strum(to_string = "c")]
    C,
    #[strum(to_string = "cpp", serialize = "c++")]
    Cpp,
    #[strum(to_string = "go")]
    Go,
    #[strum(to_string = "rust", serialize = "rs")]
    Rust,
    #[strum(to_string = "ruby", serialize = "rb")]
    Ruby,
    #[strum(to_string = "php")]
    Php,
    #[strum(to_string = "typescript", serialize = "ts")]
    TypeScript,
}

impl Language {
    /// Guess the language from a source file's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        let language = match extension.as_str() {
            "js" | "mjs" => Language::JavaScript,
            "py" => Language::Python,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" | "cc" | "cxx" => Language::Cpp,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "ts" => Language::TypeScript,
            _ => return None,
        };
        Some(language)
    }
}

/// What to do with a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Judge against the sample test cases only.
    Run,
    /// Judge against every test case and record the submission.
    Submit,
}

/// Resolve the language from an explicit name, falling back to the file extension.
pub fn resolve_language(
    file: &Path,
    language: Option<&str>,
) -> Result<Language, Box<dyn std::error::Error>> {
    match language {
        Some(name) => Language::from_str(name)
            .map_err(|_| Box::from(format!("Unsupported language: {name}"))),
        None => Language::from_path(file).ok_or_else(|| {
            Box::from(format!(
                "Cannot tell the language of {}; pass --language",
                file.display()
            ))
        }),
    }
}

/// Reads `file` and sends it to the judge, inside a contest when `contest_id` is set.
pub async fn solve(
    mode: Mode,
    question_id: u64,
    file: &Path,
    language: Option<&str>,
    contest_id: Option<u64>,
    api: &dyn Api,
    navigation: &NavigationService,
) -> CmdResult {
    let language = resolve_language(file, language).inspect_err(|e| {
        print_cmd_error!("❌ Unknown language.", "{}", e);
    })?;
    let code = std::fs::read_to_string(file).map_err(|e| {
        print_cmd_error!("❌ Could not read the source file.", "{}: {}", file.display(), e);
        e
    })?;
    if code.trim().is_empty() {
        print_cmd_error!("❌ The source file is empty.");
        return Err(Box::from(format!("{} is empty", file.display())));
    }

    if !require_session(api, navigation).await? {
        return Ok(());
    }

    let is_run = mode == Mode::Run;
    log::debug!(
        "{} question {question_id} as {language} ({} bytes)",
        if is_run { "Running" } else { "Submitting" },
        code.len()
    );
    let response = match contest_id {
        Some(contest_id) => {
            let request = ContestSubmitCodeRequest {
                contest_id,
                question_id,
                code,
                language: language.to_string(),
                is_run,
            };
            api.submit_for_contest(&request).await?
        }
        None => {
            let request = SubmitCodeRequest {
                question_id,
                code,
                language: language.to_string(),
                is_run,
            };
            api.submit_for_practice(&request).await?
        }
    };

    if let Some(response) = response {
        print_verdict(&response);
    }
    Ok(())
}

fn print_verdict(response: &SubmissionResponse) {
    let colour = if response.is_accepted() { "32" } else { "31" };
    println!(
        "\x1b[1;{colour}m{}\x1b[0m  {}/{} test cases passed",
        response.status, response.passed_test_cases, response.total_test_cases
    );
    if let Some(id) = response.submission_id {
        println!("Submission #{id}");
    }

    for result in &response.test_case_results {
        let mark = if result.passed { "✅" } else { "❌" };
        println!("{mark} Test {}", result.test_case_number);
        // Hidden test cases come back without their data
        if result.passed || !result.is_sample {
            continue;
        }
        if let Some(input) = &result.input {
            println!("  input:\n{input}");
        }
        if let Some(expected) = &result.expected_output {
            println!("  expected:\n{expected}");
        }
        if let Some(actual) = &result.actual_output {
            println!("  got:\n{actual}");
        }
        if let Some(error) = &result.error_message {
            println!("  error:\n{error}");
        }
    }

    if response.test_case_results.is_empty() {
        if let Some(output) = &response.output {
            println!("{output}");
        }
    }
}
