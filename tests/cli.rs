use assert_cmd::Command;
use predicates::str::contains;
use serde_json::json;
use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".crucible").join("config.json")
}

/// An API root nothing is listening on.
fn unreachable_api_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/v1")
}

const BINARY_NAME: &str = "crucible";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line client for the Crucible judge"));
}

#[test]
/// Logout command should delete an existing config file.
fn logout_deletes_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    // Run the command
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("logout")
        .env("HOME", tmp.path()) // simulate different $HOME
        .env("CRUCIBLE_API_URL", unreachable_api_url())
        .assert()
        .success()
        .stdout(contains("Logging out"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}

#[test]
/// Logging out with a dead server still clears the local session and succeeds.
fn logout_with_unreachable_server_succeeds() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(
        &config_path,
        r#"{"environment":"Production","username":"alice","session":"abc123"}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("logout")
        .env("HOME", tmp.path())
        .env_remove("CRUCIBLE_ENVIRONMENT")
        .env("CRUCIBLE_API_URL", unreachable_api_url())
        .assert()
        .success()
        .stdout(contains("Clearing the local session only"));

    assert!(!config_path.exists());
}

#[test]
/// A dead server shows the server-down page and fails the command.
fn health_with_unreachable_server_shows_server_down() {
    let tmp = temp_config_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("health")
        .env("HOME", tmp.path())
        .env("CRUCIBLE_API_URL", unreachable_api_url())
        .assert()
        .failure()
        .stdout(contains("The Crucible server is down."));
}

#[test]
/// Protected commands send logged-out users to the login page without a request.
fn protected_command_without_session_asks_for_login() {
    let tmp = temp_config_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["contests", "mine"])
        .env("HOME", tmp.path())
        .env("CRUCIBLE_API_URL", unreachable_api_url())
        .assert()
        .success()
        .stdout(contains("Login required."));
}

#[test]
fn submit_with_unknown_language_fails_locally() {
    let tmp = temp_config_dir();
    let source = tmp.path().join("solution.txt");
    fs::write(&source, "print(1)\n").unwrap();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["submit", "3", "--file"])
        .arg(&source)
        .env("HOME", tmp.path())
        .env("CRUCIBLE_API_URL", unreachable_api_url())
        .assert()
        .failure()
        .stdout(contains("Unknown language"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
/// Listing contests needs no session and combines the three listings.
async fn contests_list_prints_all_sections() {
    let server = MockServer::start().await;
    for (endpoint, name) in [
        ("/api/v1/contests/live", "Live Round"),
        ("/api/v1/contests/upcoming", "Next Round"),
        ("/api/v1/contests/past", "Old Round"),
    ] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "id": 1,
                    "name": name,
                    "markdownDescription": "rules",
                    "startTime": "2025-03-01T10:00:00",
                    "endTime": "2025-03-01T12:00:00"
                }],
                "statusCode": 200,
                "message": "ok"
            })))
            .mount(&server)
            .await;
    }

    let tmp = temp_config_dir();
    let api_url = format!("{}/api/v1", server.uri());
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["contests", "list"])
        .env("HOME", tmp.path())
        .env("CRUCIBLE_API_URL", api_url)
        .assert()
        .success()
        .stdout(contains("Live Round"))
        .stdout(contains("Next Round"))
        .stdout(contains("Old Round"));
}
