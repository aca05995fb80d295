// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod expenses;
pub mod groups;
pub mod health;
pub mod open;

use anyhow::{Result, bail};

use crate::context::AppContext;
use crate::models::GroupId;
use crate::pages::{DashboardPage, DetailMount, GroupDetailPage};
use crate::router::{Route, Router};
use crate::store::Banner;

/// Success on stdout, errors on stderr.
pub fn print_banner(banner: &Banner) {
    if let Some(msg) = banner.success() {
        println!("✓ {msg}");
    }
    if let Some(err) = banner.error() {
        eprintln!("× {err}");
    }
}

fn signed_out<T>() -> Result<T> {
    bail!("Not signed in. Run `exptrack login --email <email>` first.")
}

/// Navigates to `/dashboard` and mounts the page that renders there.
pub fn mount_dashboard(ctx: &AppContext, router: &Router) -> Result<DashboardPage> {
    let Some(nav) = router.navigate(&Route::Dashboard.path()) else {
        bail!("Session state unknown");
    };
    match (nav.rendered, router.user()) {
        (Route::Dashboard, Some(user)) => Ok(DashboardPage::mount(ctx.clone(), user)),
        _ => signed_out(),
    }
}

/// Navigates to `/groups/{id}`. `None` means the group was not found and the
/// router sent the user back to the dashboard.
pub fn mount_group(ctx: &AppContext, router: &Router, id: GroupId) -> Result<Option<GroupDetailPage>> {
    mount_group_path(ctx, router, &Route::group(id).path())
}

fn mount_group_path(ctx: &AppContext, router: &Router, path: &str) -> Result<Option<GroupDetailPage>> {
    let Some(nav) = router.navigate(path) else {
        bail!("Session state unknown");
    };
    let Route::GroupDetail(raw) = nav.rendered else {
        return signed_out();
    };
    match GroupDetailPage::mount(ctx.clone(), &raw) {
        DetailMount::Ready(page) => Ok(Some(page)),
        DetailMount::Redirect(to) => {
            eprintln!("× Group not found; back to {}", to.path());
            Ok(None)
        }
    }
}
