// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use crate::error::ValidationError;
use crate::router::Route;
use crate::session::{Credentials, SessionProvider, SignUp};
use crate::store::Banner;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub mode: LoginMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::CredentialsRequired);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.mode == LoginMode::SignUp && self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

pub struct LoginPage {
    session: Arc<dyn SessionProvider>,
    form: LoginForm,
    banner: Banner,
}

impl LoginPage {
    pub fn new(session: Arc<dyn SessionProvider>) -> Self {
        Self {
            session,
            form: LoginForm::default(),
            banner: Banner::default(),
        }
    }

    pub fn form_mut(&mut self) -> &mut LoginForm {
        &mut self.form
    }

    /// Switching between sign-in and sign-up starts from an empty form.
    pub fn toggle_mode(&mut self) {
        let mode = match self.form.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
        self.form = LoginForm {
            mode,
            ..LoginForm::default()
        };
        self.banner.clear();
    }

    /// Returns where to go next when the user ends up signed in.
    pub fn submit(&mut self) -> Option<Route> {
        self.banner.clear();
        let credentials = match self.form.validate() {
            Ok(c) => c,
            Err(e) => {
                self.banner.set_error(e.to_string());
                return None;
            }
        };
        match self.form.mode {
            LoginMode::SignIn => match self.session.sign_in(&credentials) {
                Ok(_) => {
                    self.banner.set_success("Login successful!");
                    Some(Route::Dashboard)
                }
                Err(e) => {
                    self.banner.set_error(e.to_string());
                    None
                }
            },
            LoginMode::SignUp => match self.session.sign_up(&credentials) {
                Ok(SignUp::ConfirmationPending(_)) => {
                    self.banner.set_success(
                        "Please check your email and click the confirmation link to complete registration!",
                    );
                    None
                }
                Ok(SignUp::Session(_)) => {
                    self.banner.set_success("Registration successful!");
                    Some(Route::Dashboard)
                }
                Err(e) => {
                    self.banner.set_error(e.to_string());
                    None
                }
            },
        }
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(mode: LoginMode, email: &str, pw: &str, confirm: &str) -> LoginForm {
        LoginForm {
            mode,
            email: email.into(),
            password: pw.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn validation_messages() {
        let err = |f: LoginForm| f.validate().unwrap_err().to_string();
        assert_eq!(err(form(LoginMode::SignIn, " ", "secret1", "")), "Email and password are required");
        assert_eq!(err(form(LoginMode::SignIn, "a@x.test", "", "")), "Email and password are required");
        assert_eq!(err(form(LoginMode::SignIn, "a@x.test", "12345", "")), "Password must be at least 6 characters");
        assert_eq!(err(form(LoginMode::SignUp, "a@x.test", "123456", "123457")), "Passwords do not match");
    }

    #[test]
    fn sign_in_ignores_confirmation_field() {
        let c = form(LoginMode::SignIn, " a@x.test ", "123456", "other").validate().unwrap();
        assert_eq!(c.email, "a@x.test");
        assert_eq!(c.password, "123456");
    }
}
