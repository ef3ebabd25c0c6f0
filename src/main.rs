mod api;
mod auth;
mod config;
mod consts;
mod contests;
mod environment;
mod logging;
mod network;
mod pretty;
mod questions;
mod routes;
mod session;
mod submit;

use crate::api::ApiClient;
use crate::api::types::{
    CreateContestPayload, CreateQuestionPayload, TestCasePayload, UpdateContestPayload,
    UpdateQuestionPayload,
};
use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::env;
use crate::environment::Environment;
use crate::network::{NavigationService, RequestScope};
use crate::pretty::print_cmd_error;
use crate::routes::{Route, Router};
use crate::submit::Mode;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Command-line client for the Crucible judge", long_about = None)]
/// Command-line arguments
struct Args {
    /// Log debug output to stderr. RUST_LOG takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the Crucible server is reachable
    Health,
    /// Log in and store the session
    Login {
        /// Username or email
        #[arg(long, value_name = "USERNAME")]
        username: String,
        #[arg(long, env = "CRUCIBLE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a new account
    Register {
        #[arg(long, value_name = "USERNAME")]
        username: String,
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, env = "CRUCIBLE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Must match --password
        #[arg(long)]
        confirm_password: String,
    },
    /// End the session and clear the configuration file. Succeeds even when the server is down
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Browse and manage contests
    #[command(subcommand)]
    Contests(ContestCommand),
    /// Manage contest admins
    #[command(subcommand)]
    Admins(AdminCommand),
    /// Manage questions
    #[command(subcommand)]
    Questions(QuestionCommand),
    /// Manage the test cases of a question
    #[command(subcommand)]
    TestCases(TestCaseCommand),
    /// Run a solution against the sample test cases
    Run(SolveArgs),
    /// Submit a solution for judging
    Submit(SolveArgs),
}

impl Command {
    /// Commands whose local effect is the point; an unreachable server does not fail them.
    fn works_offline(&self) -> bool {
        matches!(self, Command::Logout)
    }
}

#[derive(Subcommand)]
enum ContestCommand {
    /// Ongoing, upcoming and past contests
    List,
    /// Contests you created or administer
    Mine,
    Show {
        contest_id: u64,
    },
    Create {
        #[arg(long)]
        name: String,
        /// Contest rules and description, in Markdown
        #[arg(long)]
        description: String,
        /// Start time, e.g. "2025-03-01 10:00"
        #[arg(long, value_parser = contests::parse_time)]
        start: NaiveDateTime,
        #[arg(long, value_parser = contests::parse_time)]
        end: NaiveDateTime,
        /// One-line summary shown on the contest card
        #[arg(long)]
        card: Option<String>,
        #[arg(long)]
        banner_url: Option<String>,
    },
    Update {
        contest_id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = contests::parse_time)]
        start: Option<NaiveDateTime>,
        #[arg(long, value_parser = contests::parse_time)]
        end: Option<NaiveDateTime>,
        #[arg(long)]
        card: Option<String>,
        #[arg(long)]
        banner_url: Option<String>,
    },
    Delete {
        contest_id: u64,
    },
    /// Details, admins and questions of a contest you manage
    Manage {
        contest_id: u64,
    },
    /// Questions of a contest and your progress on them
    Questions {
        contest_id: u64,
    },
    /// Participate in a contest
    Join {
        contest_id: u64,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    Add {
        contest_id: u64,
        #[arg(long, value_name = "EMAIL")]
        email: String,
    },
    Remove {
        contest_id: u64,
        #[arg(long, value_name = "EMAIL")]
        email: String,
    },
}

#[derive(Subcommand)]
enum QuestionCommand {
    Show {
        question_id: u64,
    },
    Create {
        #[arg(long)]
        contest_id: u64,
        #[arg(long)]
        title: String,
        /// Problem statement, in Markdown
        #[arg(long)]
        description: String,
        #[arg(long)]
        points: u32,
    },
    Update {
        question_id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        points: Option<u32>,
    },
    Delete {
        question_id: u64,
    },
}

#[derive(Subcommand)]
enum TestCaseCommand {
    List {
        question_id: u64,
    },
    Add {
        #[arg(long)]
        question_id: u64,
        #[command(flatten)]
        data: TestCaseData,
    },
    Update {
        test_case_id: u64,
        #[arg(long)]
        question_id: u64,
        #[command(flatten)]
        data: TestCaseData,
    },
    Delete {
        test_case_id: u64,
    },
}

#[derive(clap::Args)]
struct TestCaseData {
    /// File holding the test input
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// File holding the expected output
    #[arg(long, value_name = "FILE")]
    expected: PathBuf,
    /// Show this test case to participants
    #[arg(long)]
    sample: bool,
}

impl TestCaseData {
    fn into_payload(self, question_id: u64) -> Result<TestCasePayload, Box<dyn Error>> {
        let read = |path: &PathBuf| {
            std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
        };
        Ok(TestCasePayload {
            question_id,
            input: read(&self.input)?,
            expected_output: read(&self.expected)?,
            is_sample: self.sample,
        })
    }
}

#[derive(clap::Args)]
struct SolveArgs {
    question_id: u64,
    /// Source file of the solution
    #[arg(long, value_name = "FILE")]
    file: PathBuf,
    /// Language name; guessed from the file extension when omitted
    #[arg(long)]
    language: Option<String>,
    /// Judge inside this contest
    #[arg(long, value_name = "CONTEST_ID")]
    contest: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let environment = std::env::var(env::ENVIRONMENT)
        .unwrap_or_default()
        .parse::<Environment>()
        .unwrap_or_default();
    let api_url = std::env::var(env::API_URL).unwrap_or_else(|_| environment.api_url());
    log::debug!("Using {environment} at {api_url}");

    let config_path = get_config_path()?;
    let config = Config::load_or_default(&config_path, environment);

    let router = Router::new();
    let navigation = NavigationService::new();
    {
        let router = router.clone();
        navigation.init(move |path| router.navigate(path));
    }

    let scope = RequestScope::new();
    {
        let scope = scope.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("Interrupted, cancelling pending requests");
                scope.cancel();
            }
        });
    }

    let mut client = ApiClient::new(&api_url, navigation.clone(), scope.child())?;
    match (&config.session, config.environment == environment) {
        (Some(session), true) => client = client.with_session(session),
        (Some(_), false) => log::info!(
            "Ignoring session stored for {}; current environment is {}",
            config.environment,
            environment
        ),
        (None, _) => {}
    }

    let works_offline = args.command.works_offline();
    let result = run(args.command, &client, &navigation, &config_path, environment).await;

    navigation.dispose();
    scope.cancel();

    if let Err(e) = result {
        exit_with_error(&e.to_string());
    }
    if router.current() == Some(Route::ServerDown) && !works_offline {
        exit_with_error("Server unreachable");
    }
    Ok(())
}

/// Print the failure and exit with a non-zero status.
fn exit_with_error(message: &str) -> ! {
    print_cmd_error!("Command failed.", "{}", message);
    std::process::exit(1);
}

async fn run(
    command: Command,
    api: &ApiClient,
    navigation: &NavigationService,
    config_path: &std::path::Path,
    environment: Environment,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Health => auth::health(api).await,
        Command::Login { username, password } => {
            auth::login(&username, &password, config_path, environment, api).await
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => auth::register(&username, &email, &password, &confirm_password, api).await,
        Command::Logout => auth::logout(config_path, api).await,
        Command::Whoami => auth::whoami(api, navigation).await,
        Command::Contests(command) => match command {
            ContestCommand::List => contests::list(api).await,
            ContestCommand::Mine => contests::mine(api, navigation).await,
            ContestCommand::Show { contest_id } => contests::show(contest_id, api, navigation).await,
            ContestCommand::Create {
                name,
                description,
                start,
                end,
                card,
                banner_url,
            } => {
                let payload = CreateContestPayload {
                    name,
                    banner_image_url: banner_url,
                    card_description: card,
                    markdown_description: description,
                    start_time: start,
                    end_time: end,
                };
                contests::create(payload, api, navigation).await
            }
            ContestCommand::Update {
                contest_id,
                name,
                description,
                start,
                end,
                card,
                banner_url,
            } => {
                let payload = UpdateContestPayload {
                    name,
                    banner_image_url: banner_url,
                    card_description: card,
                    markdown_description: description,
                    start_time: start,
                    end_time: end,
                };
                contests::update(contest_id, payload, api, navigation).await
            }
            ContestCommand::Delete { contest_id } => {
                contests::delete(contest_id, api, navigation).await
            }
            ContestCommand::Manage { contest_id } => {
                contests::manage(contest_id, api, navigation).await
            }
            ContestCommand::Questions { contest_id } => {
                contests::questions(contest_id, api, navigation).await
            }
            ContestCommand::Join { contest_id } => contests::join(contest_id, api, navigation).await,
        },
        Command::Admins(command) => match command {
            AdminCommand::Add { contest_id, email } => {
                contests::add_admin(contest_id, &email, api, navigation).await
            }
            AdminCommand::Remove { contest_id, email } => {
                contests::remove_admin(contest_id, &email, api, navigation).await
            }
        },
        Command::Questions(command) => match command {
            QuestionCommand::Show { question_id } => {
                questions::show(question_id, api, navigation).await
            }
            QuestionCommand::Create {
                contest_id,
                title,
                description,
                points,
            } => {
                let payload = CreateQuestionPayload {
                    title,
                    markdown_description: description,
                    points,
                    contest_id,
                };
                questions::create(payload, api, navigation).await
            }
            QuestionCommand::Update {
                question_id,
                title,
                description,
                points,
            } => {
                let payload = UpdateQuestionPayload {
                    title,
                    markdown_description: description,
                    points,
                };
                questions::update(question_id, payload, api, navigation).await
            }
            QuestionCommand::Delete { question_id } => {
                questions::delete(question_id, api, navigation).await
            }
        },
        Command::TestCases(command) => match command {
            TestCaseCommand::List { question_id } => {
                questions::list_test_cases(question_id, api, navigation).await
            }
            TestCaseCommand::Add { question_id, data } => {
                let payload = data.into_payload(question_id)?;
                questions::add_test_case(payload, api, navigation).await
            }
            TestCaseCommand::Update {
                test_case_id,
                question_id,
                data,
            } => {
                let payload = data.into_payload(question_id)?;
                questions::update_test_case(test_case_id, payload, api, navigation).await
            }
            TestCaseCommand::Delete { test_case_id } => {
                questions::delete_test_case(test_case_id, api, navigation).await
            }
        },
        Command::Run(solve) => solve.run(Mode::Run, api, navigation).await,
        Command::Submit(solve) => solve.run(Mode::Submit, api, navigation).await,
    }
}

impl SolveArgs {
    async fn run(
        self,
        mode: Mode,
        api: &ApiClient,
        navigation: &NavigationService,
    ) -> Result<(), Box<dyn Error>> {
        submit::solve(
            mode,
            self.question_id,
            &self.file,
            self.language.as_deref(),
            self.contest,
            api,
            navigation,
        )
        .await
    }
}
