// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Deserialize;

/// Failures of a call against the expenses API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No authentication token available")]
    AuthMissing,
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

impl ApiError {
    /// Normalizes a non-success response: the server-supplied message when
    /// the body carries one, otherwise `HTTP <status>`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = [parsed.detail, parsed.error, parsed.message]
            .into_iter()
            .flatten()
            .map(|m| m.trim().to_string())
            .find(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Input rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Group name is required")]
    GroupNameRequired,
    #[error("Expense description is required")]
    ExpenseDescriptionRequired,
    #[error("Please enter a valid amount greater than 0")]
    InvalidAmount,
    #[error("Email and password are required")]
    CredentialsRequired,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Failures reported by the session provider.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authentication service not configured (set EXPTRACK_AUTH_URL)")]
    NotConfigured,
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("session storage: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_prefers_detail_then_error() {
        let e = ApiError::from_status(404, r#"{"error":"Group not found or access denied"}"#);
        assert_eq!(e.to_string(), "Group not found or access denied");
        assert_eq!(e.status(), Some(404));

        let e = ApiError::from_status(422, r#"{"detail":"name too long","error":"bad"}"#);
        assert_eq!(e.to_string(), "name too long");
    }

    #[test]
    fn status_message_falls_back_to_http_code() {
        assert_eq!(ApiError::from_status(502, "<html>bad gateway</html>").to_string(), "HTTP 502");
        assert_eq!(ApiError::from_status(500, "").to_string(), "HTTP 500");
        assert_eq!(ApiError::from_status(400, r#"{"error":"  "}"#).to_string(), "HTTP 400");
    }
}
