// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use super::{mount_dashboard, mount_group, print_banner};
use crate::context::AppContext;
use crate::pages::{DashboardPage, GroupDetailPage};
use crate::router::Router;
use crate::stats::{ExpenseStats, GroupSummary, fmt_amount};
use crate::utils::{confirm, maybe_print_json, pretty_table};

pub fn handle(ctx: &AppContext, router: &Router, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let page = mount_dashboard(ctx, router)?;
            render_dashboard(&page, sub.get_flag("json"), sub.get_flag("jsonl"))?;
        }
        Some(("create", sub)) => {
            let mut page = mount_dashboard(ctx, router)?;
            let form = page.form_mut();
            form.name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            form.description = sub
                .get_one::<String>("description")
                .cloned()
                .unwrap_or_default();
            if let Some(g) = page.create_group() {
                println!("Created group #{} '{}'", g.id, g.name);
            }
            print_banner(page.banner());
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("group").unwrap();
            let assume_yes = sub.get_flag("yes");
            let mut page = mount_dashboard(ctx, router)?;
            page.delete_group(id, |q| assume_yes || confirm(q));
            print_banner(page.banner());
        }
        Some(("show", sub)) => {
            let id = *sub.get_one::<i64>("group").unwrap();
            if let Some(page) = mount_group(ctx, router, id)? {
                render_group(&page, sub.get_flag("json"), sub.get_flag("jsonl"))?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct GroupRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub expenses: String,
    pub total: String,
    pub created: String,
}

pub fn group_rows(page: &DashboardPage) -> Vec<GroupRow> {
    page.groups()
        .iter()
        .map(|g| GroupRow {
            id: g.id,
            name: g.name.clone(),
            description: g.description.clone().unwrap_or_default(),
            expenses: g.expense_count.map(|c| c.to_string()).unwrap_or_default(),
            total: g.total_amount.map(fmt_amount).unwrap_or_default(),
            created: g.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

#[derive(Serialize)]
struct DashboardView<'a> {
    user: Option<&'a str>,
    summary: GroupSummary,
    groups: Vec<GroupRow>,
}

pub fn render_dashboard(page: &DashboardPage, json_flag: bool, jsonl_flag: bool) -> Result<()> {
    let rows = group_rows(page);
    if jsonl_flag {
        maybe_print_json(false, true, &rows)?;
        return Ok(());
    }
    let summary = page.summary();
    if json_flag {
        let view = DashboardView {
            user: page.user().and_then(|u| u.email.as_deref()),
            summary,
            groups: rows,
        };
        maybe_print_json(true, false, &view)?;
        return Ok(());
    }

    if let Some(email) = page.user().and_then(|u| u.email.as_deref()) {
        println!("Welcome back, {email}");
    }
    print_banner(page.banner());
    if rows.is_empty() {
        println!("No groups yet. Create one with `exptrack groups create --name <name>`.");
        return Ok(());
    }
    let data: Vec<Vec<String>> = rows
        .into_iter()
        .map(|r| vec![r.id.to_string(), r.name, r.description, r.expenses, r.total, r.created])
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Description", "Expenses", "Total", "Created"], data)
    );
    println!(
        "{} groups, {} expenses, {} total",
        summary.groups,
        summary.expenses,
        fmt_amount(summary.total)
    );
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
}

pub fn expense_rows(page: &GroupDetailPage) -> Vec<ExpenseRow> {
    page.expenses()
        .iter()
        .map(|e| ExpenseRow {
            id: e.id,
            date: e
                .created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            description: e.description.clone(),
            amount: fmt_amount(e.amount),
        })
        .collect()
}

#[derive(Serialize)]
struct GroupView<'a> {
    id: i64,
    name: &'a str,
    description: Option<&'a str>,
    stats: ExpenseStats,
    expenses: Vec<ExpenseRow>,
}

pub fn render_stats(stats: &ExpenseStats) {
    println!(
        "{}",
        pretty_table(
            &["Total", "Expenses", "Average", "Today"],
            vec![vec![
                fmt_amount(stats.total),
                stats.count.to_string(),
                fmt_amount(stats.average),
                stats.today.to_string(),
            ]],
        )
    );
}

pub fn render_expenses(rows: Vec<ExpenseRow>) {
    if rows.is_empty() {
        println!("No expenses yet.");
        return;
    }
    let data: Vec<Vec<String>> = rows
        .into_iter()
        .map(|r| vec![r.id.to_string(), r.date, r.description, r.amount])
        .collect();
    println!("{}", pretty_table(&["ID", "Date", "Description", "Amount"], data));
}

pub fn render_group(page: &GroupDetailPage, json_flag: bool, jsonl_flag: bool) -> Result<()> {
    let rows = expense_rows(page);
    if jsonl_flag {
        maybe_print_json(false, true, &rows)?;
        return Ok(());
    }
    let group = page.group();
    let stats = page.stats();
    if json_flag {
        let view = GroupView {
            id: group.id,
            name: &group.name,
            description: group.description.as_deref(),
            stats,
            expenses: rows,
        };
        maybe_print_json(true, false, &view)?;
        return Ok(());
    }

    println!("{} (#{})", group.name, group.id);
    if let Some(d) = group.description.as_deref().filter(|d| !d.is_empty()) {
        println!("{d}");
    }
    print_banner(page.banner());
    render_stats(&stats);
    render_expenses(rows);
    Ok(())
}
