// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route guard.
//!
//! Decides from the session context alone whether a route renders or
//! redirects. There is no server round-trip here, so this only keeps
//! logged-out users away from views that would fail anyway.

use crate::notify::{Notice, Notifier};
use crate::routes::{Access, Route, LOGIN_PATH};
use crate::session::Session;
use std::sync::Arc;

/// Notice shown when a protected route is opened without a login.
pub const NOT_LOGGED_IN_NOTICE: &str = "You're not logged in";

/// Redirect chains longer than this end on the not-found view.
const MAX_REDIRECTS: usize = 8;

/// Outcome of resolving one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    /// Go to `to`, remembering `from` as the location to return to.
    Redirect { to: String, from: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub navigation: Navigation,
    pub notice: Option<Notice>,
}

impl Resolution {
    fn render(route: Route) -> Self {
        Self {
            navigation: Navigation::Render(route),
            notice: None,
        }
    }

    fn redirect(to: impl Into<String>, from: Option<String>) -> Self {
        Self {
            navigation: Navigation::Redirect {
                to: to.into(),
                from,
            },
            notice: None,
        }
    }
}

/// Resolve `path` for the given session.
///
/// `from` is the location state carried by a previous redirect; only the
/// login view uses it, to send an already logged-in user back.
pub fn resolve(path: &str, from: Option<&str>, session: &Session) -> Resolution {
    let route = Route::parse(path);
    let logged_in = session.is_logged_in();

    match route.access() {
        Access::Public => {
            if route == Route::Login && logged_in {
                let target = from.and_then(safe_return_path).unwrap_or("/");
                return Resolution::redirect(target, None);
            }
            Resolution::render(route)
        }
        Access::Protected | Access::Restricted if !logged_in => Resolution {
            navigation: Navigation::Redirect {
                to: LOGIN_PATH.to_string(),
                from: Some(path.to_string()),
            },
            notice: Some(Notice::error(NOT_LOGGED_IN_NOTICE)),
        },
        Access::Restricted => {
            if session.role().is_some_and(|role| role.can_manage_users()) {
                Resolution::render(route)
            } else {
                Resolution::render(Route::AccessDenied)
            }
        }
        Access::Protected => match route.redirect() {
            Some(target) => Resolution::redirect(target, None),
            None => Resolution::render(route),
        },
    }
}

/// Accept only same-origin absolute paths as return locations.
fn safe_return_path(path: &str) -> Option<&str> {
    (path.starts_with('/') && !path.starts_with("//")).then_some(path)
}

/// Where the client currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub route: Route,
    /// Location the user was redirected away from, if any
    pub from: Option<String>,
}

/// Follows redirects to a rendered route and emits guard notices.
pub struct Navigator {
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    location: Option<Location>,
}

impl Navigator {
    pub fn new(session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            location: None,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Navigate to `path` with no location state.
    pub fn navigate(&mut self, path: &str) -> &Location {
        self.navigate_with_state(path, None)
    }

    /// Navigate to `path` carrying `from` as location state.
    pub fn navigate_with_state(&mut self, path: &str, from: Option<String>) -> &Location {
        let mut path = path.to_string();
        let mut from = from;

        for _ in 0..MAX_REDIRECTS {
            let resolution = resolve(&path, from.as_deref(), &self.session);
            if let Some(notice) = resolution.notice {
                self.notifier.notify(notice);
            }

            match resolution.navigation {
                Navigation::Render(route) => {
                    tracing::debug!(path = %path, ?route, "Rendering route");
                    return self.location.insert(Location { path, route, from });
                }
                Navigation::Redirect { to, from: next } => {
                    tracing::debug!(from = %path, to = %to, "Redirecting");
                    path = to;
                    from = next;
                }
            }
        }

        tracing::warn!(path = %path, "Too many redirects");
        self.location.insert(Location {
            path,
            route: Route::NotFound,
            from: None,
        })
    }
}
