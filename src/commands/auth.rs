// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::print_banner;
use crate::context::AppContext;
use crate::pages::{LoginMode, LoginPage};
use crate::router::{Route, Router};
use crate::utils::prompt_line;

pub fn login(ctx: &AppContext, router: &Router, sub: &clap::ArgMatches) -> Result<()> {
    submit(ctx, router, sub, LoginMode::SignIn)
}

pub fn signup(ctx: &AppContext, router: &Router, sub: &clap::ArgMatches) -> Result<()> {
    submit(ctx, router, sub, LoginMode::SignUp)
}

fn submit(ctx: &AppContext, router: &Router, sub: &clap::ArgMatches, mode: LoginMode) -> Result<()> {
    if let Some(nav) = router.navigate(&Route::SignIn.path()) {
        if nav.redirected() {
            let who = router
                .user()
                .and_then(|u| u.email)
                .unwrap_or_else(|| "someone".into());
            println!("Already signed in as {who}. Run `exptrack logout` to switch accounts.");
            return Ok(());
        }
    }

    let mut page = LoginPage::new(ctx.session.clone());
    if mode == LoginMode::SignUp {
        page.toggle_mode();
    }
    let password = match sub.get_one::<String>("password") {
        Some(p) => p.clone(),
        None => prompt_line("Password: ")?,
    };
    let confirm_password = if mode == LoginMode::SignUp {
        match sub.get_one::<String>("confirm") {
            Some(p) => p.clone(),
            None => prompt_line("Confirm password: ")?,
        }
    } else {
        String::new()
    };
    let form = page.form_mut();
    form.email = sub.get_one::<String>("email").cloned().unwrap_or_default();
    form.password = password;
    form.confirm_password = confirm_password;

    let next = page.submit();
    print_banner(page.banner());
    if let Some(route) = next {
        tracing::info!(to = %route.path(), "navigating after sign-in");
        if let Some(user) = router.user() {
            println!("Signed in as {}", user.email.as_deref().unwrap_or(&user.id));
        }
    }
    Ok(())
}

pub fn logout(ctx: &AppContext, router: &Router) -> Result<()> {
    if router.user().is_none() {
        println!("Not signed in.");
        return Ok(());
    }
    match ctx.session.sign_out() {
        Ok(()) => println!("Signed out."),
        Err(e) => eprintln!("× Error signing out: {e}"),
    }
    Ok(())
}

pub fn whoami(router: &Router) -> Result<()> {
    match router.user() {
        Some(u) => {
            println!("{}", u.email.as_deref().unwrap_or("(no email)"));
            println!("id: {}", u.id);
        }
        None => println!("Not signed in."),
    }
    Ok(())
}
