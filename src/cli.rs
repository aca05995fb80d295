// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn yes_flag() -> Arg {
    Arg::new("yes")
        .short('y')
        .long("yes")
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

fn group_id(help: &'static str) -> Arg {
    Arg::new("group")
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

pub fn build_cli() -> Command {
    Command::new("exptrack")
        .version(clap::crate_version!())
        .about("Shared-expense groups and expenses")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Expenses API base URL (env EXPTRACK_API_URL)"),
        )
        .arg(
            Arg::new("auth-url")
                .long("auth-url")
                .global(true)
                .help("Authentication service URL (env EXPTRACK_AUTH_URL)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in with email and password")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").help("Prompted when omitted")),
        )
        .subcommand(
            Command::new("signup")
                .about("Register a new account")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").help("Prompted when omitted"))
                .arg(Arg::new("confirm").long("confirm").help("Prompted when omitted")),
        )
        .subcommand(Command::new("logout").about("Sign out and forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(Command::new("health").about("Check that the expenses API is up"))
        .subcommand(
            json_flags(
                Command::new("open")
                    .about("Open a page by path, e.g. /dashboard or /groups/7")
                    .arg(Arg::new("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("groups")
                .about("Your groups")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("list").about("List groups with totals")))
                .subcommand(
                    Command::new("create")
                        .about("Create a group")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a group")
                        .arg(group_id("Group id"))
                        .arg(yes_flag()),
                )
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show a group with its expenses and statistics")
                        .arg(group_id("Group id")),
                )),
        )
        .subcommand(
            Command::new("expenses")
                .about("Expenses inside a group")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List a group's expenses")
                        .arg(group_id("Group id")),
                ))
                .subcommand(
                    Command::new("add")
                        .about("Add an expense to a group")
                        .arg(group_id("Group id"))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an expense")
                        .arg(group_id("Group the expense belongs to"))
                        .arg(
                            Arg::new("expense")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(yes_flag()),
                )
                .subcommand(
                    Command::new("export")
                        .about("Write a group's expenses as CSV")
                        .arg(group_id("Group id"))
                        .arg(Arg::new("out").long("out").help("File path; stdout when omitted")),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }
}
