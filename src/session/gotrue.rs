// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Password sign-in against a GoTrue-compatible auth service, with the
//! session kept in a local file between invocations.

use chrono::Utc;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

use super::{AuthEvent, Credentials, Listener, Listeners, Session, SessionProvider, SignUp, Subscription, User};
use crate::config::Config;
use crate::error::AuthError;
use crate::storage;

pub struct GoTrue {
    http: Client,
    auth_url: Option<String>,
    api_key: Option<String>,
    session_file: PathBuf,
    listeners: Arc<Listeners>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

fn rejection(status: u16, body: &str) -> AuthError {
    let parsed: AuthErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = [parsed.error_description, parsed.msg, parsed.message, parsed.error]
        .into_iter()
        .flatten()
        .find(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"));
    AuthError::Rejected(message)
}

fn parse_sign_up(body: Value, now: i64) -> Result<SignUp, AuthError> {
    let decode = |e: serde_json::Error| AuthError::Rejected(format!("unexpected sign-up response: {e}"));
    if body.get("access_token").is_some() {
        let token: TokenResponse = serde_json::from_value(body).map_err(decode)?;
        return Ok(SignUp::Session(token.into_session(now)));
    }
    let user_value = body.get("user").cloned().unwrap_or(body);
    let user: User = serde_json::from_value(user_value).map_err(decode)?;
    Ok(SignUp::ConfirmationPending(user))
}

impl GoTrue {
    pub fn new(cfg: &Config, http: Client) -> Self {
        Self {
            http,
            auth_url: cfg.auth_url.clone(),
            api_key: cfg.auth_key.clone(),
            session_file: cfg.session_file.clone(),
            listeners: Listeners::new(),
        }
    }

    fn post(&self, path: &str, bearer: Option<&str>, body: &Value) -> Result<Value, AuthError> {
        let base = self.auth_url.as_deref().ok_or(AuthError::NotConfigured)?;
        let url = format!("{base}/auth/v1/{path}");
        tracing::debug!(%url, "auth request");
        let mut req = self.http.post(&url).json(body);
        if let Some(key) = &self.api_key {
            req = req.header("apikey", key);
        }
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?;
        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(rejection(status.as_u16(), &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| AuthError::Rejected(format!("unexpected auth response: {e}")))
    }

    fn grant(&self, grant_type: &str, body: Value) -> Result<Session, AuthError> {
        let value = self.post(&format!("token?grant_type={grant_type}"), None, &body)?;
        let token: TokenResponse = serde_json::from_value(value)
            .map_err(|e| AuthError::Rejected(format!("unexpected token response: {e}")))?;
        Ok(token.into_session(Utc::now().timestamp()))
    }

    fn store(&self, session: &Session) -> Result<(), AuthError> {
        storage::save_session(&self.session_file, session)
            .map_err(|e| AuthError::Storage(format!("{e:#}")))
    }

    fn forget(&self) -> Result<(), AuthError> {
        storage::clear_session(&self.session_file).map_err(|e| AuthError::Storage(format!("{e:#}")))
    }

    fn refresh(&self, expired: &Session) -> Result<Option<Session>, AuthError> {
        let Some(refresh_token) = expired.refresh_token.as_deref() else {
            return Ok(None);
        };
        if self.auth_url.is_none() {
            return Ok(None);
        }
        match self.grant("refresh_token", json!({ "refresh_token": refresh_token })) {
            Ok(fresh) => Ok(Some(fresh)),
            Err(AuthError::Rejected(msg)) => {
                tracing::warn!(error = %msg, "session refresh rejected");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl SessionProvider for GoTrue {
    fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let stored = storage::load_session(&self.session_file)
            .map_err(|e| AuthError::Storage(format!("{e:#}")))?;
        let Some(session) = stored else {
            return Ok(None);
        };
        if !session.is_expired(Utc::now()) {
            return Ok(Some(session));
        }
        match self.refresh(&session)? {
            Some(fresh) => {
                self.store(&fresh)?;
                tracing::info!(user = %fresh.user.id, "session refreshed");
                self.listeners.notify(AuthEvent::TokenRefreshed, Some(&fresh));
                Ok(Some(fresh))
            }
            None => {
                self.forget()?;
                tracing::info!("stored session expired");
                self.listeners.notify(AuthEvent::SignedOut, None);
                Ok(None)
            }
        }
    }

    fn subscribe(&self, listener: Box<Listener>) -> Subscription {
        self.listeners.subscribe(listener)
    }

    fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = self.grant(
            "password",
            json!({ "email": credentials.email, "password": credentials.password }),
        )?;
        self.store(&session)?;
        tracing::info!(user = %session.user.id, "signed in");
        self.listeners.notify(AuthEvent::SignedIn, Some(&session));
        Ok(session)
    }

    fn sign_up(&self, credentials: &Credentials) -> Result<SignUp, AuthError> {
        let body = self.post(
            "signup",
            None,
            &json!({ "email": credentials.email, "password": credentials.password }),
        )?;
        let outcome = parse_sign_up(body, Utc::now().timestamp())?;
        if let SignUp::Session(session) = &outcome {
            self.store(session)?;
            self.listeners.notify(AuthEvent::SignedIn, Some(session));
        }
        Ok(outcome)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        let stored = storage::load_session(&self.session_file).ok().flatten();
        if let Some(session) = stored {
            // The local session is dropped even when the server call fails.
            if let Err(e) = self.post("logout", Some(session.access_token.as_str()), &json!({})) {
                tracing::warn!(error = %e, "remote sign-out failed");
            }
        }
        self.forget()?;
        self.listeners.notify(AuthEvent::SignedOut, None);
        Ok(())
    }
}
