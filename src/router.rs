// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::session::{Session, SessionProvider, Subscription, User};

static GROUP_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/groups/([^/]+)/?$").expect("group path pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignIn,
    AuthCallback,
    Dashboard,
    GroupDetail(String),
    Unknown(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        match path.trim_end_matches('/') {
            "" => return Self::SignIn,
            "/auth/callback" => return Self::AuthCallback,
            "/dashboard" => return Self::Dashboard,
            _ => {}
        }
        if let Some(caps) = GROUP_PATH.captures(path) {
            return Self::GroupDetail(caps[1].to_string());
        }
        Self::Unknown(path.to_string())
    }

    pub fn group(id: impl std::fmt::Display) -> Self {
        Self::GroupDetail(id.to_string())
    }

    pub fn path(&self) -> String {
        match self {
            Self::SignIn => "/".into(),
            Self::AuthCallback => "/auth/callback".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::GroupDetail(id) => format!("/groups/{id}"),
            Self::Unknown(raw) => raw.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    Authenticated(User),
    Unauthenticated,
}

impl AuthState {
    fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(s) => Self::Authenticated(s.user.clone()),
            None => Self::Unauthenticated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(Route),
    Redirect(Route),
    /// Session not known yet; nothing renders.
    Pending,
}

/// The routing table.
pub fn resolve(route: &Route, auth: &AuthState) -> Outcome {
    let signed_in = match auth {
        AuthState::Loading => return Outcome::Pending,
        AuthState::Authenticated(_) => true,
        AuthState::Unauthenticated => false,
    };
    match (route, signed_in) {
        (Route::AuthCallback, _) => Outcome::Render(Route::AuthCallback),
        (Route::SignIn, false) => Outcome::Render(Route::SignIn),
        (Route::SignIn, true) => Outcome::Redirect(Route::Dashboard),
        (Route::Dashboard | Route::GroupDetail(_), true) => Outcome::Render(route.clone()),
        (Route::Dashboard | Route::GroupDetail(_), false) => Outcome::Redirect(Route::SignIn),
        (Route::Unknown(_), true) => Outcome::Redirect(Route::Dashboard),
        (Route::Unknown(_), false) => Outcome::Redirect(Route::SignIn),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: Route,
    pub rendered: Route,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.requested != self.rendered
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tracks the session for as long as it lives; dropping it unsubscribes.
pub struct Router {
    state: Arc<Mutex<AuthState>>,
    _subscription: Subscription,
}

impl Router {
    pub fn mount(session: &dyn SessionProvider) -> Self {
        let initial = match session.current_session() {
            Ok(s) => AuthState::from_session(s.as_ref()),
            Err(e) => {
                tracing::error!(error = %e, "error getting session");
                AuthState::Unauthenticated
            }
        };
        let state = Arc::new(Mutex::new(initial));
        let shared = Arc::clone(&state);
        let subscription = session.subscribe(Box::new(move |event, s| {
            tracing::info!(?event, "auth event");
            *lock(&shared) = AuthState::from_session(s);
        }));
        Self {
            state,
            _subscription: subscription,
        }
    }

    pub fn auth_state(&self) -> AuthState {
        lock(&self.state).clone()
    }

    pub fn user(&self) -> Option<User> {
        match self.auth_state() {
            AuthState::Authenticated(u) => Some(u),
            _ => None,
        }
    }

    /// Follows redirects to the page that finally renders.
    pub fn navigate(&self, path: &str) -> Option<Navigation> {
        let requested = Route::parse(path);
        let auth = self.auth_state();
        let mut current = requested.clone();
        // Every redirect target renders in one more step.
        for _ in 0..3 {
            match resolve(&current, &auth) {
                Outcome::Render(route) => {
                    return Some(Navigation {
                        requested,
                        rendered: route,
                    });
                }
                Outcome::Redirect(next) => {
                    tracing::debug!(from = %current.path(), to = %next.path(), "redirect");
                    current = next;
                }
                Outcome::Pending => return None,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".into(),
            email: None,
            email_confirmed_at: None,
        }
    }

    #[test]
    fn parses_paths() {
        assert_eq!(Route::parse("/"), Route::SignIn);
        assert_eq!(Route::parse(""), Route::SignIn);
        assert_eq!(Route::parse("/dashboard/"), Route::Dashboard);
        assert_eq!(Route::parse("/auth/callback#access_token=x"), Route::AuthCallback);
        assert_eq!(Route::parse("/groups/42"), Route::GroupDetail("42".into()));
        assert_eq!(Route::parse("/groups/42?tab=x"), Route::GroupDetail("42".into()));
        assert_eq!(Route::parse("/groups/42/edit"), Route::Unknown("/groups/42/edit".into()));
        assert_eq!(Route::group(7).path(), "/groups/7");
    }

    #[test]
    fn table_for_each_state() {
        let anon = AuthState::Unauthenticated;
        let member = AuthState::Authenticated(user());
        let g = Route::group(1);

        assert_eq!(resolve(&Route::SignIn, &anon), Outcome::Render(Route::SignIn));
        assert_eq!(resolve(&Route::SignIn, &member), Outcome::Redirect(Route::Dashboard));
        assert_eq!(resolve(&Route::AuthCallback, &anon), Outcome::Render(Route::AuthCallback));
        assert_eq!(resolve(&Route::AuthCallback, &member), Outcome::Render(Route::AuthCallback));
        assert_eq!(resolve(&Route::Dashboard, &anon), Outcome::Redirect(Route::SignIn));
        assert_eq!(resolve(&g, &anon), Outcome::Redirect(Route::SignIn));
        assert_eq!(resolve(&g, &member), Outcome::Render(g.clone()));
        let lost = Route::Unknown("/nope".into());
        assert_eq!(resolve(&lost, &anon), Outcome::Redirect(Route::SignIn));
        assert_eq!(resolve(&lost, &member), Outcome::Redirect(Route::Dashboard));
        assert_eq!(resolve(&Route::Dashboard, &AuthState::Loading), Outcome::Pending);
    }
}
