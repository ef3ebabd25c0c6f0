//! Page routing for the terminal front-end.
//!
//! Navigating renders the target page and remembers it as the current route,
//! so `main` can tell how a command ended.

use crate::consts::cli_consts::{messages, paths};
use crate::pretty::{print_cmd_info, print_server_down};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The backend could not be reached.
    ServerDown,
    /// A session is required.
    Auth,
    /// Any other page; the CLI has nothing to render for it.
    Page(String),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path {
            paths::SERVER_DOWN => Route::ServerDown,
            paths::AUTH => Route::Auth,
            other => Route::Page(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::ServerDown => paths::SERVER_DOWN,
            Route::Auth => paths::AUTH,
            Route::Page(path) => path,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Arc<Mutex<Option<Route>>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the page at `path` and make it the current route.
    ///
    /// Repeated navigations to the current route are not rendered again.
    pub fn navigate(&self, path: &str) {
        let route = Route::from_path(path);
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.as_ref() == Some(&route) {
            return;
        }
        log::debug!("Navigating to {}", route.path());
        render(&route);
        *current = Some(route);
    }

    pub fn current(&self) -> Option<Route> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn render(route: &Route) {
    match route {
        Route::ServerDown => print_server_down(messages::SERVER_DOWN),
        Route::Auth => {
            print_cmd_info!(
                "Login required.",
                "Start a session with: crucible login --username <USERNAME>"
            );
        }
        Route::Page(path) => log::debug!("No page to render for {path}"),
    }
}
