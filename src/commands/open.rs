// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::groups::{render_dashboard, render_group};
use super::{mount_dashboard, mount_group_path};
use crate::context::AppContext;
use crate::pages::callback;
use crate::router::{Route, Router};

pub fn handle(ctx: &AppContext, router: &Router, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap();
    let (json_flag, jsonl_flag) = (sub.get_flag("json"), sub.get_flag("jsonl"));
    let Some(nav) = router.navigate(path) else {
        bail!("Session state unknown");
    };
    if nav.redirected() {
        eprintln!("{} -> {}", nav.requested.path(), nav.rendered.path());
    }
    match nav.rendered {
        Route::SignIn => {
            println!("Sign in with `exptrack login --email <email>` or register with `exptrack signup`.");
        }
        Route::AuthCallback => {
            let outcome = callback::complete(ctx.session.as_ref());
            if let Some(err) = &outcome.error {
                eprintln!("× {err}");
            }
            if outcome.next == Route::Dashboard {
                let page = mount_dashboard(ctx, router)?;
                render_dashboard(&page, json_flag, jsonl_flag)?;
            } else {
                println!("Sign in with `exptrack login --email <email>`.");
            }
        }
        Route::Dashboard => {
            let page = mount_dashboard(ctx, router)?;
            render_dashboard(&page, json_flag, jsonl_flag)?;
        }
        Route::GroupDetail(_) => match mount_group_path(ctx, router, path)? {
            Some(page) => render_group(&page, json_flag, jsonl_flag)?,
            None => {
                let page = mount_dashboard(ctx, router)?;
                render_dashboard(&page, json_flag, jsonl_flag)?;
            }
        },
        Route::Unknown(_) => {}
    }
    Ok(())
}
