// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing::Level;

use exptrack::{cli, commands, config::Config, context::AppContext, router::Router};

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));

    let cfg = Config::load(&matches)?;
    tracing::debug!(api = %cfg.api_url, session = %cfg.session_file.display(), "configuration loaded");
    let ctx = AppContext::from_config(&cfg)?;

    // Health needs no session; everything else goes through the router.
    if let Some(("health", _)) = matches.subcommand() {
        return commands::health::handle(&ctx);
    }
    let router = Router::mount(ctx.session.as_ref());

    match matches.subcommand() {
        Some(("login", sub)) => commands::auth::login(&ctx, &router, sub)?,
        Some(("signup", sub)) => commands::auth::signup(&ctx, &router, sub)?,
        Some(("logout", _)) => commands::auth::logout(&ctx, &router)?,
        Some(("whoami", _)) => commands::auth::whoami(&router)?,
        Some(("open", sub)) => commands::open::handle(&ctx, &router, sub)?,
        Some(("groups", sub)) => commands::groups::handle(&ctx, &router, sub)?,
        Some(("expenses", sub)) => commands::expenses::handle(&ctx, &router, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
