// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod callback;
pub mod dashboard;
pub mod group_detail;
pub mod login;

pub use callback::CallbackOutcome;
pub use dashboard::DashboardPage;
pub use group_detail::{DetailMount, GroupDetailPage};
pub use login::{LoginForm, LoginMode, LoginPage};

fn failure(action: &str, err: &dyn std::fmt::Display) -> String {
    format!("Error {action}: {err}")
}
