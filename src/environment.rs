use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use strum::{Display, EnumString};

/// Represents the deployments of the Crucible platform the CLI can talk to.
#[derive(Clone, Default, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    /// Backend running on the developer's machine.
    Local,
    /// Staging deployment for pre-release testing.
    Staging,
    /// Public deployment.
    #[default]
    #[strum(to_string = "Production", serialize = "prod")]
    Production,
}

impl Environment {
    /// Server root of the deployment.
    pub fn server_url(&self) -> &'static str {
        match self {
            Environment::Local => "http://localhost:8080",
            Environment::Staging => "https://staging.crucible.dev",
            Environment::Production => "https://crucible.dev",
        }
    }

    /// Versioned REST root, e.g. `https://crucible.dev/api/v1`.
    pub fn api_url(&self) -> String {
        format!("{}/api/v1", self.server_url())
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{} ({})", self, self.api_url())
    }
}
