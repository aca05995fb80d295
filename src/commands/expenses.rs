// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;

use super::groups::{expense_rows, render_expenses};
use super::{mount_group, print_banner};
use crate::context::AppContext;
use crate::pages::GroupDetailPage;
use crate::router::Router;
use crate::stats::fmt_amount;
use crate::utils::{confirm, maybe_print_json};

pub fn handle(ctx: &AppContext, router: &Router, m: &clap::ArgMatches) -> Result<()> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(());
    };
    let group_id = *sub.get_one::<i64>("group").unwrap();
    let Some(mut page) = mount_group(ctx, router, group_id)? else {
        return Ok(());
    };
    match name {
        "list" => {
            let rows = expense_rows(&page);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                print_banner(page.banner());
                render_expenses(rows);
            }
        }
        "add" => {
            let form = page.form_mut();
            form.description = sub.get_one::<String>("description").cloned().unwrap_or_default();
            form.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
            if let Some(e) = page.add_expense() {
                println!("Recorded {} for '{}' in group #{}", fmt_amount(e.amount), e.description, group_id);
            }
            print_banner(page.banner());
        }
        "rm" => {
            let expense_id = *sub.get_one::<i64>("expense").unwrap();
            let assume_yes = sub.get_flag("yes");
            page.delete_expense(expense_id, |q| assume_yes || confirm(q));
            print_banner(page.banner());
        }
        "export" => {
            let rows = match sub.get_one::<String>("out") {
                Some(path) => {
                    let file = File::create(path).with_context(|| format!("Create {}", path))?;
                    let n = write_csv(&page, file)?;
                    eprintln!("Wrote {} expenses to {}", n, path);
                    n
                }
                None => write_csv(&page, std::io::stdout().lock())?,
            };
            tracing::info!(group_id, rows, "exported expenses");
            print_banner(page.banner());
        }
        _ => {}
    }
    Ok(())
}

/// CSV with a header row; amounts with two decimals, timestamps in RFC 3339.
pub fn write_csv<W: Write>(page: &GroupDetailPage, out: W) -> Result<usize> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(["id", "group_id", "created_at", "description", "amount"])?;
    for e in page.expenses() {
        w.write_record([
            e.id.to_string(),
            e.group_id.to_string(),
            e.created_at.to_rfc3339(),
            e.description.clone(),
            fmt_amount(e.amount),
        ])?;
    }
    w.flush()?;
    Ok(page.expenses().len())
}
