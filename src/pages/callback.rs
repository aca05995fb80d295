// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::router::Route;
use crate::session::SessionProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackOutcome {
    pub next: Route,
    pub error: Option<String>,
}

/// Lands the user after an emailed confirmation or sign-in link.
pub fn complete(session: &dyn SessionProvider) -> CallbackOutcome {
    match session.current_session() {
        Ok(Some(s)) => {
            tracing::info!(user = %s.user.id, "auth callback completed");
            CallbackOutcome { next: Route::Dashboard, error: None }
        }
        Ok(None) => CallbackOutcome { next: Route::SignIn, error: None },
        Err(e) => {
            tracing::error!(error = %e, "auth callback error");
            CallbackOutcome {
                next: Route::SignIn,
                error: Some("Authentication failed. Please try again.".into()),
            }
        }
    }
}
