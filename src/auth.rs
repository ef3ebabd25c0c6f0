//! Logging in and out, registering, and checking who is logged in.

use crate::api::Api;
use crate::api::error::ApiError;
use crate::api::types::RegistrationPayload;
use crate::config::Config;
use crate::consts::cli_consts::paths;
use crate::environment::Environment;
use crate::network::NavigationService;
use crate::pretty::{handle_cmd_error, print_cmd_error, print_cmd_info};
use std::path::Path;

/// Loose shape check; the backend does the real validation.
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Logs in and stores the session in the configuration file.
///
/// # Arguments
/// * `username` - Username or email.
/// * `password` - The account password.
/// * `config_path` - Where the session is saved.
/// * `environment` - Deployment the session belongs to.
/// * `api` - The backend client.
pub async fn login(
    username: &str,
    password: &str,
    config_path: &Path,
    environment: Environment,
    api: &dyn Api,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(response) = api.login(username, password).await? else {
        return Ok(());
    };

    let name = response.username.unwrap_or_else(|| username.to_string());
    let Some(session) = api.session() else {
        print_cmd_error!("❌ Login succeeded but the server did not start a session.");
        return Err(Box::from("No session cookie in login response"));
    };

    Config::new(environment)
        .with_session(name.clone(), session)
        .save(config_path)
        .map_err(|e| handle_cmd_error!(e, "Failed to save config."))?;

    print_cmd_info!(
        "✅ Logged in.",
        "{} as {}",
        response.message.as_deref().unwrap_or("Login successful"),
        name
    );
    Ok(())
}

/// Creates an account. Does not log in.
pub async fn register(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    api: &dyn Api,
) -> Result<(), Box<dyn std::error::Error>> {
    if password != confirm_password {
        print_cmd_error!("❌ Passwords do not match.");
        return Err(Box::from("Passwords do not match"));
    }
    if !is_plausible_email(email) {
        print_cmd_error!("❌ Invalid email address.");
        return Err(Box::from(format!("Invalid email address: {email}")));
    }

    let payload = RegistrationPayload {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    let Some(account) = api.register(&payload).await? else {
        return Ok(());
    };

    print_cmd_info!(
        "✅ Registration complete!",
        "User {} ({}) created. Next step - log in: crucible login --username {}",
        account.username,
        account.email,
        account.username
    );
    Ok(())
}

/// Ends the session on the server (when reachable) and clears the configuration file.
pub async fn logout(config_path: &Path, api: &dyn Api) -> Result<(), Box<dyn std::error::Error>> {
    println!("Logging out and clearing the session...");
    if api.session().is_some() {
        match api.logout().await {
            Ok(true) => log::debug!("Server session closed"),
            Ok(false) => {
                print_cmd_info!(
                    "Server unreachable.",
                    "Clearing the local session only; it expires on the server by itself."
                );
            }
            // An expired session is as good as closed
            Err(e) if e.is_auth_failure() => log::debug!("Session already invalid: {e}"),
            Err(e) => return Err(e.into()),
        }
    }
    Config::clear(config_path).map_err(Into::into)
}

/// Prints the user owning the current session.
pub async fn whoami(
    api: &dyn Api,
    navigation: &NavigationService,
) -> Result<(), Box<dyn std::error::Error>> {
    if api.session().is_none() {
        navigation.navigate(paths::AUTH);
        return Ok(());
    }
    match api.get_me().await {
        Ok(Some(user)) => {
            println!("{} <{}>", user.username, user.email);
            if !user.roles.is_empty() {
                println!("Roles: {}", user.roles.join(", "));
            }
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(ApiError::Application { status: 401, .. }) => {
            navigation.navigate(paths::AUTH);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Reports whether the backend is up.
pub async fn health(api: &dyn Api) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(status) = api.check_health().await? {
        println!("Server is up (status {status}).");
    }
    Ok(())
}
