//! Application configuration.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, path::Path};

/// Directory under `$HOME` holding the CLI state.
const CONFIG_DIR: &str = ".crucible";
const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Deployment the session belongs to.
    #[serde(default)]
    pub environment: Environment,
    /// Name the user logged in with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Value of the backend's session cookie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl Config {
    /// Create Config for the given environment with no session.
    pub fn new(environment: Environment) -> Self {
        Config {
            environment,
            username: None,
            session: None,
        }
    }

    /// Attach a logged-in session.
    pub fn with_session(mut self, username: String, session: String) -> Self {
        self.username = Some(username);
        self.session = Some(session);
        self
    }

    /// Reads the configuration stored at `path`.
    ///
    /// # Errors
    /// Fails when the file cannot be read or does not hold a valid configuration.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let raw = fs::read(path)?;
        serde_json::from_slice(&raw).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Loads the configuration if present, otherwise a fresh one for `environment`.
    pub fn load_or_default(path: &Path, environment: Environment) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    log::warn!("Ignoring unreadable config at {}: {}", path.display(), e);
                }
                Config::new(environment)
            }
        }
    }

    /// Writes the configuration to `path`, replacing any previous one.
    ///
    /// Missing parent directories are created.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    /// Removes the configuration file, forgetting the stored session.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Location of the configuration file: `$HOME/.crucible/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn logged_in(name: &str) -> Config {
        Config::new(Environment::Local).with_session(name.to_string(), "abc123".to_string())
    }

    #[test]
    // A stored session survives a save/load cycle.
    fn test_session_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".crucible").join(CONFIG_FILE);

        logged_in("alice").save(&path).unwrap();

        let stored = Config::load_from_file(&path).unwrap();
        assert_eq!(stored.username.as_deref(), Some("alice"));
        assert_eq!(stored.session.as_deref(), Some("abc123"));
        assert_eq!(stored.environment, Environment::Local);
    }

    #[test]
    // Logging in as someone else replaces the previous session.
    fn test_new_login_replaces_old_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        logged_in("alice").save(&path).unwrap();
        Config::new(Environment::Local)
            .with_session("bob".to_string(), "def456".to_string())
            .save(&path)
            .unwrap();

        let stored = Config::load_from_file(&path).unwrap();
        assert_eq!(stored.username.as_deref(), Some("bob"));
        assert_eq!(stored.session.as_deref(), Some("def456"));
    }

    #[test]
    fn test_logged_out_config_omits_session_fields() {
        let json = serde_json::to_value(Config::new(Environment::Staging)).unwrap();
        assert_eq!(json, serde_json::json!({ "environment": "Staging" }));
    }

    #[test]
    // A file written by hand with no fields is a logged-out production config.
    fn test_load_accepts_empty_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{}").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, Config::new(Environment::Production));
    }

    #[test]
    // Garbage on disk is ignored rather than failing every command.
    fn test_load_or_default_ignores_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "SESSION=abc").unwrap();

        assert!(Config::load_from_file(&path).is_err());
        let config = Config::load_or_default(&path, Environment::Local);
        assert_eq!(config, Config::new(Environment::Local));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let config = Config::load_or_default(&path, Environment::Staging);
        assert_eq!(config.environment, Environment::Staging);
        assert!(config.session.is_none());
    }

    #[test]
    // Clearing removes the file and tolerates a missing one.
    fn test_clear_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        logged_in("alice").save(&path).unwrap();

        Config::clear(&path).unwrap();
        assert!(!path.exists());
        Config::clear(&path).unwrap();
    }
}
